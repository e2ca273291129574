//! Domain model for the Meal Tracking context.

pub mod aggregates;
pub mod badges;
pub mod commands;
pub mod events;
pub mod meal;
