//! Shared application state.

use std::sync::Arc;

use mealbadges_core::clock::Clock;
use mealbadges_tracking::application::actor::ActorHandle;
use mealbadges_tracking::application::writer::EventWriter;

/// Application state shared across all request handlers.
#[derive(Clone)]
pub struct AppState {
    /// Source of acceptance timestamps.
    pub clock: Arc<dyn Clock>,
    /// Durable intake in front of the event actor.
    pub writer: Arc<EventWriter>,
}

impl AppState {
    /// Create new application state.
    #[must_use]
    pub fn new(clock: Arc<dyn Clock>, writer: Arc<EventWriter>) -> Self {
        Self { clock, writer }
    }

    /// Returns the handle used for queries.
    #[must_use]
    pub fn actor(&self) -> &ActorHandle {
        self.writer.actor()
    }
}
