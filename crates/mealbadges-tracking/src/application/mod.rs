//! Application layer: the event actor and the handlers that feed it.

pub mod actor;
pub mod command_handlers;
pub mod query_handlers;
mod registry;
pub mod replay;
pub mod writer;
