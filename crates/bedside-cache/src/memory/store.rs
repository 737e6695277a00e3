//! In-memory key-value store backed by a concurrent map.

use std::sync::Arc;

use async_trait::async_trait;
use dashmap::DashMap;
use tracing::debug;

use bedside_core::result::AppResult;
use bedside_core::traits::store::KeyValueStore;

/// Process-local store. Clones share the same map.
#[derive(Debug, Clone, Default)]
pub struct MemoryKeyValueStore {
    entries: Arc<DashMap<String, String>>,
}

impl MemoryKeyValueStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored keys.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the store holds no keys.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[async_trait]
impl KeyValueStore for MemoryKeyValueStore {
    async fn init(&self) -> AppResult<()> {
        debug!("In-memory key-value store ready");
        Ok(())
    }

    async fn get(&self, key: &str) -> AppResult<Option<String>> {
        Ok(self.entries.get(key).map(|v| v.value().clone()))
    }

    async fn set(&self, key: &str, value: &str) -> AppResult<()> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    async fn remove(&self, key: &str) -> AppResult<bool> {
        Ok(self.entries.remove(key).is_some())
    }

    async fn clear(&self) -> AppResult<()> {
        let count = self.entries.len();
        self.entries.clear();
        debug!(count, "Cleared in-memory key-value store");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_set_get() {
        let store = MemoryKeyValueStore::new();
        store.init().await.unwrap();
        store.set("key1", "value1").await.unwrap();
        let val = store.get("key1").await.unwrap();
        assert_eq!(val, Some("value1".to_string()));
    }

    #[tokio::test]
    async fn test_remove_reports_presence() {
        let store = MemoryKeyValueStore::new();
        store.set("key2", "value2").await.unwrap();
        assert!(store.remove("key2").await.unwrap());
        assert!(!store.remove("key2").await.unwrap());
        assert_eq!(store.get("key2").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_clear() {
        let store = MemoryKeyValueStore::new();
        store.set("a", "1").await.unwrap();
        store.set("b", "2").await.unwrap();
        store.clear().await.unwrap();
        assert!(store.is_empty());
    }

    #[tokio::test]
    async fn test_json_helpers() {
        let store = MemoryKeyValueStore::new();
        let data = serde_json::json!({"ward": "3B", "beds": 12});
        store.set_json("json_key", &data).await.unwrap();
        let result: Option<serde_json::Value> = store.get_json("json_key").await.unwrap();
        assert_eq!(result, Some(data));
    }

    #[tokio::test]
    async fn test_clones_share_entries() {
        let store = MemoryKeyValueStore::new();
        let other = store.clone();
        store.set("shared", "yes").await.unwrap();
        assert_eq!(other.get("shared").await.unwrap().as_deref(), Some("yes"));
    }
}
