//! Key-value store and patient cache configuration.

use serde::{Deserialize, Serialize};

/// Key-value store configuration (local settings and the activity log).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreConfig {
    /// Store provider type: `"memory"` or `"redis"`.
    #[serde(default = "default_provider")]
    pub provider: String,
    /// Redis-specific settings.
    #[serde(default)]
    pub redis: RedisStoreConfig,
    /// Maximum number of entries retained by the activity log.
    #[serde(default = "default_activity_log_capacity")]
    pub activity_log_capacity: usize,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            provider: default_provider(),
            redis: RedisStoreConfig::default(),
            activity_log_capacity: default_activity_log_capacity(),
        }
    }
}

/// Redis store backend configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RedisStoreConfig {
    /// Redis connection URL.
    #[serde(default = "default_redis_url")]
    pub url: String,
    /// Key prefix for all bedside keys.
    #[serde(default = "default_key_prefix")]
    pub key_prefix: String,
}

impl Default for RedisStoreConfig {
    fn default() -> Self {
        Self {
            url: default_redis_url(),
            key_prefix: default_key_prefix(),
        }
    }
}

/// In-process cache for single-patient lookups on the realtime path.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PatientCacheConfig {
    /// Whether lookups are cached at all.
    #[serde(default = "default_true")]
    pub enabled: bool,
    /// Maximum number of cached patients.
    #[serde(default = "default_max_capacity")]
    pub max_capacity: u64,
    /// Time-to-live for cached patients in seconds.
    #[serde(default = "default_ttl")]
    pub time_to_live_seconds: u64,
}

impl Default for PatientCacheConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            max_capacity: default_max_capacity(),
            time_to_live_seconds: default_ttl(),
        }
    }
}

fn default_provider() -> String {
    "memory".to_string()
}

fn default_redis_url() -> String {
    "redis://127.0.0.1:6379".to_string()
}

fn default_key_prefix() -> String {
    "bedside:".to_string()
}

fn default_activity_log_capacity() -> usize {
    100
}

fn default_true() -> bool {
    true
}

fn default_max_capacity() -> u64 {
    1000
}

fn default_ttl() -> u64 {
    300
}
