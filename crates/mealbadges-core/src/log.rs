//! Append-only event log abstraction.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::DomainError;
use crate::id::ClientId;

/// Stored representation of a domain event: one record in the log.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredEvent {
    /// Unique event identifier.
    pub event_id: Uuid,
    /// Client this event belongs to.
    pub aggregate_id: ClientId,
    /// Event type name for deserialization routing.
    pub event_type: String,
    /// Serialized event payload.
    pub payload: serde_json::Value,
    /// Correlation ID for tracing.
    pub correlation_id: Uuid,
    /// Server-assigned acceptance time.
    pub occurred_at: DateTime<Utc>,
}

/// Durable, strictly ordered, append-only log of accepted mutations.
///
/// An event counts as accepted only once `append` has returned `Ok`.
#[async_trait]
pub trait EventLog: Send + Sync {
    /// Appends one record after every previously appended record.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Infrastructure` if the record could not be made
    /// durable. The event must then be treated as rejected.
    async fn append(&self, event: &StoredEvent) -> Result<(), DomainError>;

    /// Reads every record, front to back, in append order.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Infrastructure` if the log cannot be read or a
    /// record cannot be decoded.
    async fn read_all(&self) -> Result<Vec<StoredEvent>, DomainError>;
}
