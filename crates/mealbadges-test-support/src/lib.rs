//! Shared test mocks and utilities for the meal badges service.

mod clock;
mod event_log;

pub use clock::FixedClock;
pub use event_log::{EmptyEventLog, FailingEventLog, RecordingEventLog};
