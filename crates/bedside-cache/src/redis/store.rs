//! Redis-backed key-value store.

use async_trait::async_trait;
use redis::AsyncCommands;
use tracing::debug;

use bedside_core::error::{AppError, ErrorKind};
use bedside_core::result::AppResult;
use bedside_core::traits::store::KeyValueStore;

use super::client::RedisClient;

/// Keys requested per `SCAN` round trip when clearing.
const SCAN_BATCH: usize = 200;

/// Redis-backed store. Every key lives under the client's prefix, so
/// [`clear`](KeyValueStore::clear) never touches foreign keys.
#[derive(Debug, Clone)]
pub struct RedisKeyValueStore {
    client: RedisClient,
}

impl RedisKeyValueStore {
    /// Create a new Redis store.
    pub fn new(client: RedisClient) -> Self {
        Self { client }
    }

    fn map_err(e: redis::RedisError) -> AppError {
        AppError::with_source(ErrorKind::Store, format!("Redis error: {e}"), e)
    }
}

#[async_trait]
impl KeyValueStore for RedisKeyValueStore {
    async fn init(&self) -> AppResult<()> {
        let mut conn = self.client.connection();
        let pong: String = redis::cmd("PING")
            .query_async(&mut conn)
            .await
            .map_err(Self::map_err)?;
        if pong != "PONG" {
            return Err(AppError::store(format!("Unexpected PING reply: {pong}")));
        }
        Ok(())
    }

    async fn get(&self, key: &str) -> AppResult<Option<String>> {
        let full_key = self.client.namespaced(key);
        let mut conn = self.client.connection();
        let result: Option<String> = conn.get(&full_key).await.map_err(Self::map_err)?;
        Ok(result)
    }

    async fn set(&self, key: &str, value: &str) -> AppResult<()> {
        let full_key = self.client.namespaced(key);
        let mut conn = self.client.connection();
        let _: () = conn.set(&full_key, value).await.map_err(Self::map_err)?;
        Ok(())
    }

    async fn remove(&self, key: &str) -> AppResult<bool> {
        let full_key = self.client.namespaced(key);
        let mut conn = self.client.connection();
        let removed: i64 = conn.del(&full_key).await.map_err(Self::map_err)?;
        Ok(removed > 0)
    }

    async fn clear(&self) -> AppResult<()> {
        let pattern = self.client.namespaced("*");
        let mut conn = self.client.connection();
        let mut cursor: u64 = 0;
        let mut count = 0usize;

        loop {
            let (next, keys): (u64, Vec<String>) = redis::cmd("SCAN")
                .arg(cursor)
                .arg("MATCH")
                .arg(&pattern)
                .arg("COUNT")
                .arg(SCAN_BATCH)
                .query_async(&mut conn)
                .await
                .map_err(Self::map_err)?;

            if !keys.is_empty() {
                count += keys.len();
                let _: () = conn.del(&keys).await.map_err(Self::map_err)?;
            }

            if next == 0 {
                break;
            }
            cursor = next;
        }

        debug!(pattern = %pattern, count, "Cleared Redis key-value store");
        Ok(())
    }
}
