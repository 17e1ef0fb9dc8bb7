use super::PreferenceStore;
use crate::error::PreferenceError;
use async_trait::async_trait;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

/// In-memory [`PreferenceStore`]. Clones share the same map, which lets a test
/// build a second manager over the first one's data to simulate a restart.
#[derive(Clone, Debug, Default)]
pub struct MemoryPreferenceStore {
    entries: Arc<RwLock<HashMap<String, Value>>>,
}

impl MemoryPreferenceStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_entries(entries: impl IntoIterator<Item = (String, Value)>) -> Self {
        Self {
            entries: Arc::new(RwLock::new(entries.into_iter().collect())),
        }
    }

    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.entries.read().await.is_empty()
    }
}

#[async_trait]
impl PreferenceStore for MemoryPreferenceStore {
    async fn get_object(&self, key: &str) -> Result<Option<Value>, PreferenceError> {
        Ok(self.entries.read().await.get(key).cloned())
    }

    async fn set_object(&self, key: &str, value: Value) -> Result<(), PreferenceError> {
        self.entries.write().await.insert(key.to_string(), value);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn test_get_missing_key_returns_none() {
        let store = MemoryPreferenceStore::new();
        assert_eq!(store.get_object("theme").await.unwrap(), None);
        assert!(store.is_empty().await);
    }

    #[tokio::test]
    async fn test_clones_share_entries() {
        let store = MemoryPreferenceStore::new();
        let restarted = store.clone();

        store
            .set_object("theme", json!({"theme": "DARK", "themeColor": ""}))
            .await
            .unwrap();

        assert_eq!(
            restarted.get_object("theme").await.unwrap(),
            Some(json!({"theme": "DARK", "themeColor": ""}))
        );
    }

    #[tokio::test]
    async fn test_boolean_setting_defaults() {
        let store = MemoryPreferenceStore::with_entries([(
            "snow_enabled".to_string(),
            json!("not a bool"),
        )]);

        assert!(store.get_boolean_setting("snow_enabled", true).await.unwrap());
        assert!(!store.get_boolean_setting("missing", false).await.unwrap());

        store.set_boolean_setting("snow_enabled", false).await.unwrap();
        assert!(!store.get_boolean_setting("snow_enabled", true).await.unwrap());
        assert_eq!(store.len().await, 1);
    }
}
