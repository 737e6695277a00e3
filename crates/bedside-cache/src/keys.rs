//! Key builders for every entry the bedside crates keep in the key-value store.
//!
//! Keys are unprefixed; the Redis backend adds the configured namespace.

/// Key holding the operator activity log (JSON array, newest first).
pub fn activity_log() -> String {
    "activity_log".to_string()
}
