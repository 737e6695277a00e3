//! Key-value manager that dispatches to the configured store.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::info;

use bedside_core::config::StoreConfig;
use bedside_core::error::AppError;
use bedside_core::result::AppResult;
use bedside_core::traits::store::KeyValueStore;

/// Wraps the key-value store selected by configuration.
#[derive(Debug, Clone)]
pub struct KeyValueManager {
    inner: Arc<dyn KeyValueStore>,
}

impl KeyValueManager {
    /// Build the configured store and run its `init` step.
    pub async fn new(config: &StoreConfig) -> AppResult<Self> {
        let inner: Arc<dyn KeyValueStore> = match config.provider.as_str() {
            #[cfg(feature = "redis-backend")]
            "redis" => {
                info!("Initializing Redis key-value store");
                let client = crate::redis::RedisClient::connect(&config.redis).await?;
                Arc::new(crate::redis::RedisKeyValueStore::new(client))
            }
            #[cfg(feature = "memory")]
            "memory" => {
                info!("Initializing in-memory key-value store");
                Arc::new(crate::memory::MemoryKeyValueStore::new())
            }
            other => {
                return Err(AppError::configuration(format!(
                    "Unknown store provider: '{other}'. Supported: memory, redis"
                )));
            }
        };

        inner.init().await?;
        Ok(Self { inner })
    }
}

#[async_trait]
impl KeyValueStore for KeyValueManager {
    async fn init(&self) -> AppResult<()> {
        self.inner.init().await
    }

    async fn get(&self, key: &str) -> AppResult<Option<String>> {
        self.inner.get(key).await
    }

    async fn set(&self, key: &str, value: &str) -> AppResult<()> {
        self.inner.set(key, value).await
    }

    async fn remove(&self, key: &str) -> AppResult<bool> {
        self.inner.remove(key).await
    }

    async fn clear(&self) -> AppResult<()> {
        self.inner.clear().await
    }
}
