//! Key-value store trait for local settings and operator logs.

use async_trait::async_trait;

use crate::result::AppResult;

/// Trait for injectable key-value stores (in-memory or Redis).
///
/// Values are stored as strings (JSON). A store goes through an explicit
/// lifecycle: [`init`](KeyValueStore::init) before first use, reads and
/// writes, and [`clear`](KeyValueStore::clear) to drop everything it owns.
#[async_trait]
pub trait KeyValueStore: Send + Sync + std::fmt::Debug + 'static {
    /// Prepare the backend (connectivity check, namespace setup).
    async fn init(&self) -> AppResult<()>;

    /// Get a value by key. Returns `None` if the key does not exist.
    async fn get(&self, key: &str) -> AppResult<Option<String>>;

    /// Set a value, replacing any previous one.
    async fn set(&self, key: &str, value: &str) -> AppResult<()>;

    /// Remove a key. Returns `true` if the key existed.
    async fn remove(&self, key: &str) -> AppResult<bool>;

    /// Remove every key owned by this store.
    async fn clear(&self) -> AppResult<()>;

    /// Get a typed value by deserializing from JSON.
    async fn get_json<T: serde::de::DeserializeOwned + Send>(
        &self,
        key: &str,
    ) -> AppResult<Option<T>>
    where
        Self: Sized,
    {
        match self.get(key).await? {
            Some(value) => {
                let parsed = serde_json::from_str(&value)?;
                Ok(Some(parsed))
            }
            None => Ok(None),
        }
    }

    /// Set a typed value by serializing to JSON.
    async fn set_json<T: serde::Serialize + Send + Sync>(&self, key: &str, value: &T) -> AppResult<()>
    where
        Self: Sized,
    {
        let json = serde_json::to_string(value)?;
        self.set(key, &json).await
    }
}
