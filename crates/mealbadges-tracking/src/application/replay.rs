//! Startup replay: rebuild the registry from the event log.

use mealbadges_core::error::DomainError;
use mealbadges_core::log::EventLog;
use tracing::info;

use super::actor::{ActorHandle, RegistryStats};
use crate::domain::events::TrackingEvent;

/// Outcome of a replay.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReplaySummary {
    /// Records read from the log and resubmitted.
    pub replayed: usize,
    /// Registry counters once every replayed event was applied.
    pub stats: RegistryStats,
}

/// Reads the log front to back and resubmits every record to the actor in
/// its original order. Nothing is appended to the log.
///
/// Every record is decoded before the first one is submitted, so a bad log
/// leaves the actor untouched. Returns once the actor has applied them all.
///
/// # Errors
///
/// Returns `DomainError::Infrastructure` if the log cannot be read or holds
/// a record that does not decode, and `DomainError::ActorUnavailable` if the
/// actor stops during replay.
pub async fn replay(log: &dyn EventLog, actor: &ActorHandle) -> Result<ReplaySummary, DomainError> {
    let stored = log.read_all().await?;
    let events = stored
        .iter()
        .map(TrackingEvent::from_stored)
        .collect::<Result<Vec<_>, _>>()?;

    let replayed = events.len();
    for event in events {
        actor.submit(event)?;
    }
    let stats = actor.barrier().await?;

    info!(
        replayed,
        clients = stats.clients,
        meals = stats.meals,
        "event log replayed"
    );
    Ok(ReplaySummary { replayed, stats })
}
