//! Core traits defined in `bedside-core` and implemented by other crates.

pub mod alert;
pub mod store;

pub use alert::{AlertLevel, AlertSink};
pub use store::KeyValueStore;
