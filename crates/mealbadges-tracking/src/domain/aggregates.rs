//! Aggregate roots for the Meal Tracking context.

use mealbadges_core::id::ClientId;

use super::badges::Badge;
use super::meal::Meal;

/// A client and everything recorded about it.
///
/// Only the event actor mutates clients; everyone else sees snapshots.
#[derive(Debug, Clone, PartialEq)]
pub struct Client {
    /// Aggregate identifier.
    pub(crate) id: ClientId,
    /// Meal history in event application order. Append-only.
    pub(crate) meals: Vec<Meal>,
    /// Badges computed after the most recent meal.
    pub(crate) badges: Vec<Badge>,
}

impl Client {
    /// Creates a client with no history.
    #[must_use]
    pub fn new(id: ClientId) -> Self {
        Self {
            id,
            meals: Vec::new(),
            badges: Vec::new(),
        }
    }

    /// Returns the client identifier.
    #[must_use]
    pub fn id(&self) -> ClientId {
        self.id
    }

    /// Returns the meal history, oldest first.
    #[must_use]
    pub fn meals(&self) -> &[Meal] {
        &self.meals
    }

    /// Returns the current badge set.
    #[must_use]
    pub fn badges(&self) -> &[Badge] {
        &self.badges
    }

    pub(crate) fn record_meal(&mut self, meal: Meal) {
        self.meals.push(meal);
    }

    pub(crate) fn replace_badges(&mut self, badges: Vec<Badge>) {
        self.badges = badges;
    }
}
