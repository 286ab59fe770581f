use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::errors::AppError;
use crate::models::preferences::PreferenceKey;
use crate::store::PreferenceStore;

/// Process-local store backing unit and router tests.
#[derive(Default)]
pub struct MemoryPreferenceStore {
    entries: RwLock<HashMap<PreferenceKey, String>>,
}

#[async_trait]
impl PreferenceStore for MemoryPreferenceStore {
    async fn get(&self, key: PreferenceKey) -> Result<Option<String>, AppError> {
        Ok(self.entries.read().await.get(&key).cloned())
    }

    async fn set(&self, key: PreferenceKey, value: String) -> Result<(), AppError> {
        self.entries.write().await.insert(key, value);
        Ok(())
    }

    async fn remove(&self, key: PreferenceKey) -> Result<(), AppError> {
        self.entries.write().await.remove(&key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_set_get_remove() {
        let store = MemoryPreferenceStore::default();
        assert!(store.get(PreferenceKey::Avatar).await.unwrap().is_none());

        store
            .set(PreferenceKey::Avatar, "\"x\"".to_string())
            .await
            .unwrap();
        assert_eq!(
            store.get(PreferenceKey::Avatar).await.unwrap().as_deref(),
            Some("\"x\"")
        );

        store.remove(PreferenceKey::Avatar).await.unwrap();
        assert!(store.get(PreferenceKey::Avatar).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_remove_missing_key_is_noop() {
        let store = MemoryPreferenceStore::default();
        store.remove(PreferenceKey::ProjectImages).await.unwrap();
    }
}
