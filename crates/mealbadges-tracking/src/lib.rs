//! Meal badges: Meal Tracking bounded context.
//!
//! Records meals against registered clients and answers badge queries. All
//! client state lives inside a single event actor; producers talk to it
//! through an [`application::actor::ActorHandle`].

pub mod application;
pub mod domain;
