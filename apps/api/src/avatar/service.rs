use tracing::info;

use crate::datauri::DataUri;
use crate::errors::AppError;
use crate::flows::avatar::generate_avatar;
use crate::llm_client::GenerativeBackend;
use crate::models::preferences::{PreferenceKey, AVATAR_PLACEHOLDER_URL};
use crate::store::{self, PreferenceStore};

/// Current avatar reference: a data URI, or the placeholder when none is stored.
pub async fn current_avatar(store: &dyn PreferenceStore) -> Result<String, AppError> {
    Ok(store::load::<String>(store, PreferenceKey::Avatar)
        .await?
        .filter(|url| !url.is_empty())
        .unwrap_or_else(|| AVATAR_PLACEHOLDER_URL.to_string()))
}

pub async fn set_avatar(store: &dyn PreferenceStore, image: &DataUri) -> Result<String, AppError> {
    let url = image.to_string();
    store::save(store, PreferenceKey::Avatar, &url).await?;
    info!("Avatar updated ({})", image.mime_type);
    Ok(url)
}

/// Generates and stores a new avatar. On any failure the stored avatar is
/// left as it was.
pub async fn generate_and_store_avatar(
    store: &dyn PreferenceStore,
    backend: &dyn GenerativeBackend,
    description: &str,
    reference_photo: Option<&str>,
) -> Result<String, AppError> {
    let image = generate_avatar(backend, description, reference_photo).await?;
    set_avatar(store, &image).await
}

pub async fn reset_avatar(store: &dyn PreferenceStore) -> Result<String, AppError> {
    store.remove(PreferenceKey::Avatar).await?;
    info!("Avatar reset to placeholder");
    Ok(AVATAR_PLACEHOLDER_URL.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryPreferenceStore;
    use crate::test_support::{FailingBackend, ScriptedBackend};

    #[tokio::test]
    async fn test_placeholder_when_unset() {
        let store = MemoryPreferenceStore::default();
        assert_eq!(current_avatar(&store).await.unwrap(), AVATAR_PLACEHOLDER_URL);
    }

    #[tokio::test]
    async fn test_generated_avatar_is_persisted() {
        let store = MemoryPreferenceStore::default();
        let url = generate_and_store_avatar(&store, &ScriptedBackend::default(), "a fox", None)
            .await
            .unwrap();
        assert_eq!(url, ScriptedBackend::image().to_string());
        assert_eq!(current_avatar(&store).await.unwrap(), url);
    }

    #[tokio::test]
    async fn test_failed_generation_keeps_previous_avatar() {
        let store = MemoryPreferenceStore::default();
        let uploaded = DataUri::parse_image("data:image/jpeg;base64,/9j/").unwrap();
        set_avatar(&store, &uploaded).await.unwrap();

        let err = generate_and_store_avatar(&store, &FailingBackend, "a fox", None)
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Generation(_)));
        assert_eq!(current_avatar(&store).await.unwrap(), uploaded.to_string());
    }

    #[tokio::test]
    async fn test_reset_restores_placeholder() {
        let store = MemoryPreferenceStore::default();
        let uploaded = DataUri::parse_image("data:image/png;base64,iVBORw==").unwrap();
        set_avatar(&store, &uploaded).await.unwrap();
        assert_eq!(reset_avatar(&store).await.unwrap(), AVATAR_PLACEHOLDER_URL);
        assert_eq!(current_avatar(&store).await.unwrap(), AVATAR_PLACEHOLDER_URL);
    }
}
