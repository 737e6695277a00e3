//! In-memory key-value store.

pub mod store;

pub use store::MemoryKeyValueStore;
