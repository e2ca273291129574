//! Test clock: deterministic `Clock` implementation for tests.

use chrono::{DateTime, Utc};
use mealbadges_core::clock::Clock;

/// A clock pinned to one instant, so acceptance timestamps are predictable.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub DateTime<Utc>);

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}
