//! Domain events for the Meal Tracking context.

use chrono::{DateTime, Utc};
use mealbadges_core::error::DomainError;
use mealbadges_core::event::{DomainEvent, EventMetadata};
use mealbadges_core::id::ClientId;
use mealbadges_core::log::StoredEvent;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::meal::Meal;

/// Event type name of [`TrackingEventKind::ClientRegistered`].
pub const CLIENT_REGISTERED: &str = "tracking.client_registered";

/// Event type name of [`TrackingEventKind::MealRecorded`].
pub const MEAL_RECORDED: &str = "tracking.meal_recorded";

/// Emitted when a client is made known to the registry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientRegistered {
    /// The registered client.
    pub client_id: ClientId,
}

/// Event payload variants for the Meal Tracking context.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum TrackingEventKind {
    /// A client has been registered.
    ClientRegistered(ClientRegistered),
    /// A meal has been recorded for a client.
    MealRecorded(Meal),
}

impl TrackingEventKind {
    /// Returns the event type name used in the log.
    #[must_use]
    pub fn event_type(&self) -> &'static str {
        match self {
            Self::ClientRegistered(_) => CLIENT_REGISTERED,
            Self::MealRecorded(_) => MEAL_RECORDED,
        }
    }

    /// Returns the client the event applies to.
    #[must_use]
    pub fn client_id(&self) -> ClientId {
        match self {
            Self::ClientRegistered(payload) => payload.client_id,
            Self::MealRecorded(meal) => meal.client,
        }
    }
}

/// Domain event envelope for the Meal Tracking context.
#[derive(Debug, Clone, PartialEq)]
pub struct TrackingEvent {
    /// Event metadata.
    pub metadata: EventMetadata,
    /// Event-specific payload.
    pub kind: TrackingEventKind,
}

impl TrackingEvent {
    /// Wraps a payload in fresh metadata.
    #[must_use]
    pub fn new(kind: TrackingEventKind, correlation_id: Uuid, occurred_at: DateTime<Utc>) -> Self {
        Self {
            metadata: EventMetadata {
                event_id: Uuid::new_v4(),
                event_type: kind.event_type().to_owned(),
                aggregate_id: kind.client_id(),
                correlation_id,
                occurred_at,
            },
            kind,
        }
    }

    /// Rebuilds an event from its log record.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Infrastructure` if the payload does not decode
    /// or does not match the recorded event type.
    pub fn from_stored(stored: &StoredEvent) -> Result<Self, DomainError> {
        let kind: TrackingEventKind =
            serde_json::from_value(stored.payload.clone()).map_err(|e| {
                DomainError::Infrastructure(format!(
                    "event {} deserialization failed: {e}",
                    stored.event_id
                ))
            })?;
        if kind.event_type() != stored.event_type {
            return Err(DomainError::Infrastructure(format!(
                "event {} has type {} but carries a {} payload",
                stored.event_id,
                stored.event_type,
                kind.event_type()
            )));
        }
        Ok(Self {
            metadata: EventMetadata {
                event_id: stored.event_id,
                event_type: stored.event_type.clone(),
                aggregate_id: stored.aggregate_id,
                correlation_id: stored.correlation_id,
                occurred_at: stored.occurred_at,
            },
            kind,
        })
    }
}

impl DomainEvent for TrackingEvent {
    fn event_type(&self) -> &'static str {
        self.kind.event_type()
    }

    fn to_payload(&self) -> Result<serde_json::Value, DomainError> {
        serde_json::to_value(&self.kind)
            .map_err(|e| DomainError::Infrastructure(format!("event serialization failed: {e}")))
    }

    fn metadata(&self) -> &EventMetadata {
        &self.metadata
    }
}
