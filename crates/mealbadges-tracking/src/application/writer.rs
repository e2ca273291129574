//! Durable intake: log first, then hand to the actor.

use std::sync::Arc;

use mealbadges_core::error::DomainError;
use mealbadges_core::event::DomainEvent;
use mealbadges_core::log::{EventLog, StoredEvent};
use tokio::sync::Mutex;
use tracing::debug;

use super::actor::ActorHandle;
use crate::domain::events::TrackingEvent;

/// Accepts mutation events on behalf of producers.
///
/// An event is accepted only once its record is in the log; only then is it
/// enqueued on the actor. Append and enqueue happen under one lock so that
/// log order always equals application order, which replay relies on. Both
/// steps run on their own task, so dropping the caller's future cannot leave
/// a logged event unapplied.
pub struct EventWriter {
    log: Arc<dyn EventLog>,
    actor: ActorHandle,
    order: Arc<Mutex<()>>,
}

impl EventWriter {
    /// Creates a writer over `log` feeding `actor`.
    #[must_use]
    pub fn new(log: Arc<dyn EventLog>, actor: ActorHandle) -> Self {
        Self {
            log,
            actor,
            order: Arc::new(Mutex::new(())),
        }
    }

    /// Returns the actor this writer feeds.
    #[must_use]
    pub fn actor(&self) -> &ActorHandle {
        &self.actor
    }

    /// Makes `event` durable, then enqueues it.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Infrastructure` if the record could not be
    /// encoded or appended; the actor never sees the event in that case.
    /// Returns `DomainError::ActorUnavailable` if the actor stopped after
    /// the append; the event is then applied on the next replay.
    pub async fn accept(&self, event: TrackingEvent) -> Result<StoredEvent, DomainError> {
        let stored = event.to_stored_event()?;

        let log = Arc::clone(&self.log);
        let actor = self.actor.clone();
        let order = Arc::clone(&self.order);
        let record = stored.clone();
        let intake = tokio::spawn(async move {
            let _in_order = order.lock_owned().await;
            log.append(&record).await?;
            actor.submit(event)
        });
        intake
            .await
            .map_err(|e| DomainError::Infrastructure(format!("event intake task failed: {e}")))??;

        debug!(event_id = %stored.event_id, event_type = %stored.event_type, "event accepted");
        Ok(stored)
    }
}

impl std::fmt::Debug for EventWriter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventWriter")
            .field("actor", &self.actor)
            .finish_non_exhaustive()
    }
}
