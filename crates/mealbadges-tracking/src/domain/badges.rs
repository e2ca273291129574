//! Badges and the policy that derives them from a client's history.

use serde::{Deserialize, Serialize};

use super::aggregates::Client;

/// A named achievement attached to a client.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Badge {
    /// Display name of the badge.
    pub name: String,
}

impl Badge {
    /// Creates a badge with the given name.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

/// Derives a client's badge set from its state.
///
/// Invoked by the event actor after every meal applied to a client; the
/// returned set replaces the client's badges. Implementations run on the
/// actor task and must not block.
pub trait BadgePolicy: Send + Sync {
    /// Computes the full badge set for `client`.
    fn recompute(&self, client: &Client) -> Vec<Badge>;
}

/// Policy that awards nothing new and keeps whatever badges a client has.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoBadgePolicy;

impl BadgePolicy for NoBadgePolicy {
    fn recompute(&self, client: &Client) -> Vec<Badge> {
        client.badges().to_vec()
    }
}

impl<F> BadgePolicy for F
where
    F: Fn(&Client) -> Vec<Badge> + Send + Sync,
{
    fn recompute(&self, client: &Client) -> Vec<Badge> {
        self(client)
    }
}
