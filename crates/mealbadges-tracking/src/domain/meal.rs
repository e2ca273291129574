//! Meal records: untrusted producer input and the trusted domain payload.

use chrono::{DateTime, Utc};
use mealbadges_core::clock::Clock;
use mealbadges_core::error::DomainError;
use mealbadges_core::id::{CLIENT_ID_LEN, ClientId};
use serde::{Deserialize, Serialize};

/// The meal of the day a record belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MealSlot {
    /// Numeric code 0.
    Breakfast,
    /// Numeric code 1.
    Lunch,
    /// Numeric code 2.
    Dinner,
}

impl MealSlot {
    /// Every slot, in code order.
    pub const ALL: [Self; 3] = [Self::Breakfast, Self::Lunch, Self::Dinner];

    /// Returns the numeric code of the slot.
    #[must_use]
    pub fn code(self) -> i32 {
        match self {
            Self::Breakfast => 0,
            Self::Lunch => 1,
            Self::Dinner => 2,
        }
    }

    /// Looks up a slot by numeric code.
    #[must_use]
    pub fn from_code(code: i32) -> Option<Self> {
        Self::ALL.into_iter().find(|slot| slot.code() == code)
    }

    /// Returns the wire name (`"Breakfast"`, `"Lunch"` or `"Dinner"`).
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Breakfast => "Breakfast",
            Self::Lunch => "Lunch",
            Self::Dinner => "Dinner",
        }
    }

    /// Looks up a slot by its exact wire name.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|slot| slot.name() == name)
    }
}

/// A meal as submitted by a producer. Nothing about it is trusted until
/// [`ClientMeal::validate`] passes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientMeal {
    /// Raw client identifier bytes; empty when the source value was malformed.
    pub client: Vec<u8>,
    /// Where the meal was eaten.
    pub location: String,
    /// When the meal was eaten, as claimed by the producer.
    pub date: DateTime<Utc>,
    /// Numeric [`MealSlot`] code.
    pub meal: i32,
    /// Free-text description.
    pub description: String,
}

impl ClientMeal {
    /// Checks the record against the domain constraints.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Validation` naming the first failing field.
    pub fn validate(&self) -> Result<(), DomainError> {
        let client = ClientId::from_bytes(&self.client);
        if self.client.len() != CLIENT_ID_LEN || !client.is_valid() {
            return Err(DomainError::Validation(
                "id must be a non-nil 16-byte client identifier".to_owned(),
            ));
        }
        if self.location.is_empty() {
            return Err(DomainError::Validation("location must not be empty".to_owned()));
        }
        if MealSlot::from_code(self.meal).is_none() {
            return Err(DomainError::Validation(format!(
                "meal code {} is not Breakfast, Lunch or Dinner",
                self.meal
            )));
        }
        if self.description.is_empty() {
            return Err(DomainError::Validation(
                "description must not be empty".to_owned(),
            ));
        }
        Ok(())
    }
}

/// A validated, server-stamped meal. This is the payload of a
/// `MealRecorded` event and the element type of a client's history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Meal {
    /// Acceptance time assigned by the server.
    pub timestamp: DateTime<Utc>,
    /// The client the meal belongs to.
    pub client: ClientId,
    /// Where the meal was eaten.
    pub location: String,
    /// When the meal was eaten.
    pub date: DateTime<Utc>,
    /// Breakfast, lunch or dinner.
    pub meal: MealSlot,
    /// Free-text description.
    pub description: String,
}

impl Meal {
    /// Validates producer input and stamps it with the clock's current time.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Validation` if the input fails
    /// [`ClientMeal::validate`].
    pub fn accept(input: ClientMeal, clock: &dyn Clock) -> Result<Self, DomainError> {
        input.validate()?;
        let meal = MealSlot::from_code(input.meal).ok_or_else(|| {
            DomainError::Validation(format!("meal code {} is out of range", input.meal))
        })?;
        Ok(Self {
            timestamp: clock.now(),
            client: ClientId::from_bytes(&input.client),
            location: input.location,
            date: input.date,
            meal,
            description: input.description,
        })
    }
}
