//! Meal badges core: shared domain abstractions.
//!
//! Identifiers, time, errors and the event log contract used by every
//! other crate. Nothing in here touches the network or the filesystem.

pub mod clock;
pub mod error;
pub mod event;
pub mod id;
pub mod log;
