//! # bedside-cache
//!
//! Storage helpers around the notification feed:
//!
//! - **memory**: process-local key-value store on [dashmap](https://crates.io/crates/dashmap)
//! - **redis**: Redis-backed key-value store using the [redis](https://crates.io/crates/redis) crate
//! - [`ActivityLog`]: operator log kept in whichever store is configured
//! - [`CachedPatientDirectory`]: [moka](https://crates.io/crates/moka) cache in front of
//!   single-patient lookups
//!
//! The store backend is selected at runtime based on configuration.

pub mod activity;
pub mod directory;
pub mod keys;
#[cfg(feature = "memory")]
pub mod memory;
pub mod provider;
#[cfg(feature = "redis-backend")]
pub mod redis;

pub use activity::{ActivityEntry, ActivityLog};
pub use directory::CachedPatientDirectory;
pub use provider::KeyValueManager;
