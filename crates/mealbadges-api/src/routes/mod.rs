//! HTTP routes.

pub mod badges;
pub mod clients;
pub mod health;
pub mod meals;

use serde::Serialize;
use uuid::Uuid;

/// Response body returned after a command is accepted.
#[derive(Debug, Serialize)]
pub struct CommandResponse {
    /// ID of the domain event logged for the command.
    pub event_id: Uuid,
}
