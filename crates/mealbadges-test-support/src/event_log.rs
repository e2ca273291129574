//! Test event logs: in-memory `EventLog` implementations for tests.

use std::sync::Mutex;

use async_trait::async_trait;
use mealbadges_core::error::DomainError;
use mealbadges_core::log::{EventLog, StoredEvent};

/// An in-memory log that starts with a seeded history and records every
/// append. `read_all` returns the seed followed by everything appended.
#[derive(Debug)]
pub struct RecordingEventLog {
    seeded: Vec<StoredEvent>,
    appended: Mutex<Vec<StoredEvent>>,
}

impl RecordingEventLog {
    /// Create a log whose history starts with `seeded`.
    #[must_use]
    pub fn new(seeded: Vec<StoredEvent>) -> Self {
        Self {
            seeded,
            appended: Mutex::new(Vec::new()),
        }
    }

    /// Returns a snapshot of the records appended since construction.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    pub fn appended_events(&self) -> Vec<StoredEvent> {
        self.appended.lock().unwrap().clone()
    }
}

#[async_trait]
impl EventLog for RecordingEventLog {
    async fn append(&self, event: &StoredEvent) -> Result<(), DomainError> {
        self.appended.lock().unwrap().push(event.clone());
        Ok(())
    }

    async fn read_all(&self) -> Result<Vec<StoredEvent>, DomainError> {
        let mut all = self.seeded.clone();
        all.extend(self.appended.lock().unwrap().iter().cloned());
        Ok(all)
    }
}

/// A log that is always empty and silently discards appends.
#[derive(Debug)]
pub struct EmptyEventLog;

#[async_trait]
impl EventLog for EmptyEventLog {
    async fn append(&self, _event: &StoredEvent) -> Result<(), DomainError> {
        Ok(())
    }

    async fn read_all(&self) -> Result<Vec<StoredEvent>, DomainError> {
        Ok(vec![])
    }
}

/// A log whose every operation fails with an infrastructure error, as a full
/// or read-only disk would.
#[derive(Debug)]
pub struct FailingEventLog;

#[async_trait]
impl EventLog for FailingEventLog {
    async fn append(&self, _event: &StoredEvent) -> Result<(), DomainError> {
        Err(DomainError::Infrastructure("no space left on device".into()))
    }

    async fn read_all(&self) -> Result<Vec<StoredEvent>, DomainError> {
        Err(DomainError::Infrastructure("permission denied".into()))
    }
}
