//! Meal badges event store.
//!
//! Durable storage for accepted mutation events. The only backend is a JSON
//! Lines file written with open-append-sync-close on every record.

pub mod file_event_log;

pub use file_event_log::FileEventLog;
