//! Connection to the Redis instance backing the key-value store.

use redis::Client;
use redis::aio::ConnectionManager;
use tracing::info;

use bedside_core::config::{RedisStoreConfig, redact_url};
use bedside_core::error::{AppError, ErrorKind};
use bedside_core::result::AppResult;

/// Reconnecting Redis connection plus the namespace every key lives under.
///
/// Cheap to clone: clones share the underlying multiplexed connection.
#[derive(Debug, Clone)]
pub struct RedisClient {
    conn: ConnectionManager,
    namespace: String,
}

impl RedisClient {
    pub async fn connect(config: &RedisStoreConfig) -> AppResult<Self> {
        let shown = redact_url(&config.url);
        let store_err =
            |e: redis::RedisError| AppError::with_source(ErrorKind::Store, format!("Redis at {shown}: {e}"), e);

        let client = Client::open(config.url.as_str()).map_err(store_err)?;
        let conn = ConnectionManager::new(client).await.map_err(store_err)?;

        info!(url = %shown, namespace = %config.key_prefix, "Redis key-value store connected");
        Ok(Self {
            conn,
            namespace: config.key_prefix.clone(),
        })
    }

    /// A handle on the shared connection for one command sequence.
    pub fn connection(&self) -> ConnectionManager {
        self.conn.clone()
    }

    /// `key` inside this client's namespace.
    pub fn namespaced(&self, key: &str) -> String {
        format!("{}{key}", self.namespace)
    }
}
