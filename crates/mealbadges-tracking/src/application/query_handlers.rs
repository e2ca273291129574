//! Query handlers for the Meal Tracking context.
//!
//! Queries never touch client state directly; they are forwarded to the
//! event actor and answered from its registry.

use mealbadges_core::error::DomainError;
use mealbadges_core::id::ClientId;
use serde::Serialize;

use super::actor::{ActorHandle, RegistryStats};
use crate::domain::aggregates::Client;
use crate::domain::badges::Badge;
use crate::domain::meal::Meal;

/// Read-only view of a client aggregate.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClientView {
    /// The client identifier.
    pub id: ClientId,
    /// Meal history, oldest first.
    pub meals: Vec<Meal>,
    /// Current badges.
    pub badges: Vec<Badge>,
}

impl From<&Client> for ClientView {
    fn from(client: &Client) -> Self {
        Self {
            id: client.id(),
            meals: client.meals().to_vec(),
            badges: client.badges().to_vec(),
        }
    }
}

/// Retrieves the badges of a client. Unknown clients have no badges.
///
/// # Errors
///
/// Returns `DomainError::ActorUnavailable` or `DomainError::ReplyTimeout` if
/// the actor cannot answer.
pub async fn get_badges(client_id: ClientId, actor: &ActorHandle) -> Result<Vec<Badge>, DomainError> {
    actor.badges(client_id).await
}

/// Retrieves a client by its identifier.
///
/// # Errors
///
/// Returns `DomainError::AggregateNotFound` if the client is not registered.
/// Returns `DomainError::ActorUnavailable` or `DomainError::ReplyTimeout` if
/// the actor cannot answer.
pub async fn get_client_by_id(
    client_id: ClientId,
    actor: &ActorHandle,
) -> Result<ClientView, DomainError> {
    actor
        .client(client_id)
        .await?
        .ok_or(DomainError::AggregateNotFound(client_id))
}

/// Retrieves registry counters.
///
/// # Errors
///
/// Returns `DomainError::ActorUnavailable` or `DomainError::ReplyTimeout` if
/// the actor cannot answer.
pub async fn get_stats(actor: &ActorHandle) -> Result<RegistryStats, DomainError> {
    actor.stats().await
}
