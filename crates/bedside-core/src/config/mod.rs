//! Application configuration schemas.
//!
//! All configuration structs are deserialized from TOML files via the
//! `config` crate. Each sub-module represents a logical configuration
//! section.

pub mod database;
pub mod feed;
pub mod logging;
pub mod redact;
pub mod store;

use serde::{Deserialize, Serialize};

pub use self::database::DatabaseConfig;
pub use self::feed::FeedConfig;
pub use self::logging::LoggingConfig;
pub use self::redact::redact_url;
pub use self::store::{PatientCacheConfig, RedisStoreConfig, StoreConfig};

use crate::error::AppError;

/// Root application configuration.
///
/// This struct is the top-level deserialization target for the merged
/// TOML configuration files (default.toml + environment overlay).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Database connection settings.
    pub database: DatabaseConfig,
    /// Notification feed settings.
    #[serde(default)]
    pub feed: FeedConfig,
    /// Key-value store settings.
    #[serde(default)]
    pub store: StoreConfig,
    /// Patient lookup cache settings.
    #[serde(default)]
    pub patient_cache: PatientCacheConfig,
    /// Logging settings.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Load configuration from TOML files.
    ///
    /// Merges the default configuration with an environment-specific overlay
    /// and environment variables prefixed with `BEDSIDE__`.
    pub fn load(env: &str) -> Result<Self, AppError> {
        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{env}")).required(false))
            .add_source(
                config::Environment::with_prefix("BEDSIDE")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        let app: Self = config.try_deserialize()?;

        app.database.validate()?;
        app.feed.validate()?;
        Ok(app)
    }
}
