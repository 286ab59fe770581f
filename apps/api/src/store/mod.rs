//! Durable key/value preference store.
//!
//! Every preference lives under its own key as an independently serialized JSON
//! value, so a corrupted entry only costs that one key.

#[cfg(test)]
pub mod memory;
pub mod postgres;

use async_trait::async_trait;
use serde::{de::DeserializeOwned, Serialize};
use tracing::warn;

use crate::errors::AppError;
use crate::models::preferences::{PreferenceKey, ProjectPreferences};

#[cfg(test)]
pub use memory::MemoryPreferenceStore;
pub use postgres::PgPreferenceStore;

/// Carried in `AppState` as `Arc<dyn PreferenceStore>`.
#[async_trait]
pub trait PreferenceStore: Send + Sync {
    async fn get(&self, key: PreferenceKey) -> Result<Option<String>, AppError>;
    async fn set(&self, key: PreferenceKey, value: String) -> Result<(), AppError>;
    async fn remove(&self, key: PreferenceKey) -> Result<(), AppError>;
}

/// Reads and deserializes one key. Missing keys yield `None`; unparseable
/// values are removed from the store and also yield `None`.
pub async fn load<T: DeserializeOwned>(
    store: &dyn PreferenceStore,
    key: PreferenceKey,
) -> Result<Option<T>, AppError> {
    let Some(raw) = store.get(key).await? else {
        return Ok(None);
    };

    match serde_json::from_str::<T>(&raw) {
        Ok(value) => Ok(Some(value)),
        Err(e) => {
            warn!("Discarding corrupted preference '{key}': {e}");
            store.remove(key).await?;
            Ok(None)
        }
    }
}

pub async fn save<T: Serialize>(
    store: &dyn PreferenceStore,
    key: PreferenceKey,
    value: &T,
) -> Result<(), AppError> {
    let raw = serde_json::to_string(value).map_err(|e| AppError::Internal(e.into()))?;
    store.set(key, raw).await
}

/// Rehydrates every projects-gallery key, falling back to defaults per key.
pub async fn load_project_preferences(
    store: &dyn PreferenceStore,
    default_username: &str,
) -> Result<ProjectPreferences, AppError> {
    Ok(ProjectPreferences {
        github_username: load(store, PreferenceKey::GithubUsername)
            .await?
            .unwrap_or_else(|| default_username.to_string()),
        selected_repo_ids: load(store, PreferenceKey::SelectedRepoIds)
            .await?
            .unwrap_or_default(),
        project_images: load(store, PreferenceKey::ProjectImages)
            .await?
            .unwrap_or_default(),
        project_descriptions: load(store, PreferenceKey::ProjectDescriptions)
            .await?
            .unwrap_or_default(),
        fetched_repo_ids: load(store, PreferenceKey::FetchedRepoIds)
            .await?
            .unwrap_or_default(),
    })
}

/// Writes every projects-gallery key at once. Runtime paths save only the
/// keys they change.
#[cfg(test)]
pub async fn save_project_preferences(
    store: &dyn PreferenceStore,
    prefs: &ProjectPreferences,
) -> Result<(), AppError> {
    save(store, PreferenceKey::GithubUsername, &prefs.github_username).await?;
    save(store, PreferenceKey::SelectedRepoIds, &prefs.selected_repo_ids).await?;
    save(store, PreferenceKey::ProjectImages, &prefs.project_images).await?;
    save(store, PreferenceKey::ProjectDescriptions, &prefs.project_descriptions).await?;
    save(store, PreferenceKey::FetchedRepoIds, &prefs.fetched_repo_ids).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::{BTreeMap, BTreeSet};

    fn sample_preferences() -> ProjectPreferences {
        ProjectPreferences {
            github_username: "octocat".to_string(),
            selected_repo_ids: [1, 2, 3].into_iter().collect(),
            project_images: BTreeMap::from([(2, "data:image/png;base64,iVBORw0K".to_string())]),
            project_descriptions: BTreeMap::from([
                (1, "A CLI tool".to_string()),
                (9, "orphaned override".to_string()),
            ]),
            fetched_repo_ids: [1, 2, 3, 4].into_iter().collect(),
        }
    }

    #[tokio::test]
    async fn test_empty_store_yields_defaults() {
        let store = MemoryPreferenceStore::default();
        let prefs = load_project_preferences(&store, "").await.unwrap();
        assert_eq!(prefs, ProjectPreferences::default());
    }

    #[tokio::test]
    async fn test_default_username_used_when_unset() {
        let store = MemoryPreferenceStore::default();
        let prefs = load_project_preferences(&store, "gauri-garg").await.unwrap();
        assert_eq!(prefs.github_username, "gauri-garg");
    }

    #[tokio::test]
    async fn test_stored_empty_username_beats_default() {
        let store = MemoryPreferenceStore::default();
        save(&store, PreferenceKey::GithubUsername, &"").await.unwrap();
        let prefs = load_project_preferences(&store, "gauri-garg").await.unwrap();
        assert_eq!(prefs.github_username, "");
    }

    #[tokio::test]
    async fn test_save_then_load_is_identity() {
        let store = MemoryPreferenceStore::default();
        let prefs = sample_preferences();
        save_project_preferences(&store, &prefs).await.unwrap();
        let loaded = load_project_preferences(&store, "").await.unwrap();
        assert_eq!(loaded, prefs);

        // A second pass must not drift.
        save_project_preferences(&store, &loaded).await.unwrap();
        assert_eq!(load_project_preferences(&store, "").await.unwrap(), prefs);
    }

    #[tokio::test]
    async fn test_corrupted_key_is_cleared_and_defaulted() {
        let store = MemoryPreferenceStore::default();
        save_project_preferences(&store, &sample_preferences())
            .await
            .unwrap();
        store
            .set(PreferenceKey::SelectedRepoIds, "[1, 2,".to_string())
            .await
            .unwrap();

        let prefs = load_project_preferences(&store, "").await.unwrap();
        assert!(prefs.selected_repo_ids.is_empty());
        // Other keys survive.
        assert_eq!(prefs.github_username, "octocat");
        assert_eq!(prefs.project_descriptions.len(), 2);
        // The bad entry is gone from the store.
        assert!(store
            .get(PreferenceKey::SelectedRepoIds)
            .await
            .unwrap()
            .is_none());
    }

    #[tokio::test]
    async fn test_wrong_shape_counts_as_corruption() {
        let store = MemoryPreferenceStore::default();
        store
            .set(PreferenceKey::ProjectImages, r#"["not", "a", "map"]"#.to_string())
            .await
            .unwrap();
        let images: Option<BTreeMap<u64, String>> =
            load(&store, PreferenceKey::ProjectImages).await.unwrap();
        assert!(images.is_none());
        assert!(store.get(PreferenceKey::ProjectImages).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_individual_field_round_trips() {
        let store = MemoryPreferenceStore::default();
        let ids: BTreeSet<u64> = [10, 5, 7].into_iter().collect();
        save(&store, PreferenceKey::SelectedRepoIds, &ids).await.unwrap();
        let loaded: BTreeSet<u64> = load(&store, PreferenceKey::SelectedRepoIds)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(loaded, ids);

        let avatar = "data:image/webp;base64,UklGRg==".to_string();
        save(&store, PreferenceKey::Avatar, &avatar).await.unwrap();
        let loaded: String = load(&store, PreferenceKey::Avatar).await.unwrap().unwrap();
        assert_eq!(loaded, avatar);
    }
}
