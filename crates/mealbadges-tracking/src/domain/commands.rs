//! Commands for the Meal Tracking context.

use mealbadges_core::id::ClientId;
use uuid::Uuid;

use super::meal::ClientMeal;

/// Command to record a meal for a client.
#[derive(Debug, Clone)]
pub struct RecordMeal {
    /// The correlation ID for tracing.
    pub correlation_id: Uuid,
    /// The unvalidated meal as submitted.
    pub meal: ClientMeal,
}

/// Command to make a client known to the registry.
#[derive(Debug, Clone)]
pub struct RegisterClient {
    /// The correlation ID for tracing.
    pub correlation_id: Uuid,
    /// The client to register.
    pub client_id: ClientId,
}
