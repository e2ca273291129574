//! Domain error types.

use std::time::Duration;

use thiserror::Error;

use crate::id::ClientId;

/// Top-level domain error type.
#[derive(Debug, Error)]
pub enum DomainError {
    /// No client is registered under the identifier.
    #[error("aggregate not found: {0}")]
    AggregateNotFound(ClientId),

    /// Producer-supplied input failed validation.
    #[error("validation error: {0}")]
    Validation(String),

    /// Event log I/O or (de)serialization failure.
    #[error("infrastructure error: {0}")]
    Infrastructure(String),

    /// The event actor has stopped and no longer accepts events.
    #[error("event actor is not running")]
    ActorUnavailable,

    /// The event actor did not answer a query in time.
    #[error("event actor did not reply within {0:?}")]
    ReplyTimeout(Duration),
}
