use std::sync::Arc;

use dojo_core::model::{GenerationSettings, GenerationSettingsDraft};
use storage::json::{read_json, write_json};
use storage::repository::{SessionStore, StoreKey};

use crate::error::SettingsServiceError;

/// Generation settings persisted under `generationSettings`.
#[derive(Clone)]
pub struct GenerationSettingsService {
    store: Arc<dyn SessionStore>,
}

impl GenerationSettingsService {
    #[must_use]
    pub fn new(store: Arc<dyn SessionStore>) -> Self {
        Self { store }
    }

    /// Load persisted settings (or defaults if missing or unreadable).
    ///
    /// # Errors
    ///
    /// Returns `SettingsServiceError::Storage` on storage failures.
    pub async fn load(&self) -> Result<GenerationSettings, SettingsServiceError> {
        let settings = read_json(self.store.as_ref(), StoreKey::GenerationSettings).await?;
        Ok(settings.unwrap_or_default())
    }

    /// Validate and persist new settings.
    ///
    /// # Errors
    ///
    /// Returns `SettingsServiceError` if validation fails or persistence fails.
    pub async fn save(
        &self,
        draft: GenerationSettingsDraft,
    ) -> Result<GenerationSettings, SettingsServiceError> {
        let settings = draft.validate()?;
        write_json(self.store.as_ref(), StoreKey::GenerationSettings, &settings).await?;
        tracing::info!(model = settings.model(), "generation settings saved");
        Ok(settings)
    }

    /// Drop any overrides and return the defaults.
    ///
    /// # Errors
    ///
    /// Returns `SettingsServiceError::Storage` on storage failures.
    pub async fn reset(&self) -> Result<GenerationSettings, SettingsServiceError> {
        self.store.remove(StoreKey::GenerationSettings).await?;
        tracing::info!("generation settings reset to defaults");
        Ok(GenerationSettings::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dojo_core::model::GenerationSettingsError;
    use storage::repository::InMemoryRepository;

    fn service() -> (GenerationSettingsService, Arc<InMemoryRepository>) {
        let repo = Arc::new(InMemoryRepository::new());
        (GenerationSettingsService::new(repo.clone()), repo)
    }

    #[tokio::test]
    async fn missing_settings_load_as_defaults() {
        let (service, _) = service();
        assert_eq!(service.load().await.unwrap(), GenerationSettings::default());
    }

    #[tokio::test]
    async fn save_then_load_round_trips() {
        let (service, _) = service();
        let draft = GenerationSettingsDraft {
            temperature: 0.2,
            top_k: 12,
            use_search_grounding: true,
            ..GenerationSettingsDraft::default()
        };
        let saved = service.save(draft).await.unwrap();
        assert_eq!(service.load().await.unwrap(), saved);
        assert_eq!(saved.top_k(), 12);
    }

    #[tokio::test]
    async fn invalid_draft_is_not_saved() {
        let (service, repo) = service();
        let draft = GenerationSettingsDraft {
            model: "  ".into(),
            ..GenerationSettingsDraft::default()
        };
        let err = service.save(draft).await.unwrap_err();
        assert!(matches!(
            err,
            SettingsServiceError::Settings(GenerationSettingsError::EmptyModel)
        ));
        assert_eq!(repo.get(StoreKey::GenerationSettings).await.unwrap(), None);
    }

    #[tokio::test]
    async fn out_of_range_stored_value_falls_back_and_clears() {
        let (service, repo) = service();
        repo.put(StoreKey::GenerationSettings, r#"{"topK": 500}"#)
            .await
            .unwrap();
        assert_eq!(service.load().await.unwrap(), GenerationSettings::default());
        assert_eq!(repo.get(StoreKey::GenerationSettings).await.unwrap(), None);
    }

    #[tokio::test]
    async fn reset_removes_overrides() {
        let (service, _) = service();
        service
            .save(GenerationSettingsDraft {
                top_p: 0.5,
                ..GenerationSettingsDraft::default()
            })
            .await
            .unwrap();
        service.reset().await.unwrap();
        assert_eq!(service.load().await.unwrap(), GenerationSettings::default());
    }
}
