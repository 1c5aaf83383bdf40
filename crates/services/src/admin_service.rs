use std::sync::Arc;

use dojo_core::model::{GenerationSettings, GenerationSettingsDraft, QuizResult};

use crate::config::AdminConfig;
use crate::error::AdminError;
use crate::provider::QuestionProvider;
use crate::result_recorder::ResultRecorder;
use crate::settings_service::GenerationSettingsService;

/// Proof that the sensei code was entered. Only `AdminService::verify_pin` makes one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AdminAccess {
    _private: (),
}

/// Sensei-only operations behind the static PIN.
#[derive(Clone)]
pub struct AdminService {
    config: AdminConfig,
    recorder: Arc<ResultRecorder>,
    settings: Arc<GenerationSettingsService>,
    provider: Arc<dyn QuestionProvider>,
}

impl AdminService {
    #[must_use]
    pub fn new(
        config: AdminConfig,
        recorder: Arc<ResultRecorder>,
        settings: Arc<GenerationSettingsService>,
        provider: Arc<dyn QuestionProvider>,
    ) -> Self {
        Self {
            config,
            recorder,
            settings,
            provider,
        }
    }

    /// # Errors
    ///
    /// Returns `AdminError::InvalidPin` if `pin` does not match.
    pub fn verify_pin(&self, pin: &str) -> Result<AdminAccess, AdminError> {
        if pin.trim() == self.config.pin() {
            tracing::info!("sensei portal unlocked");
            Ok(AdminAccess { _private: () })
        } else {
            tracing::warn!("rejected sensei code");
            Err(AdminError::InvalidPin)
        }
    }

    /// Every recorded result, newest first.
    ///
    /// # Errors
    ///
    /// Returns `AdminError::Recorder` on storage failures.
    pub async fn list_results(&self, _access: &AdminAccess) -> Result<Vec<QuizResult>, AdminError> {
        Ok(self.recorder.list_results().await?)
    }

    /// # Errors
    ///
    /// Returns `AdminError::Settings` on storage failures.
    pub async fn load_settings(
        &self,
        _access: &AdminAccess,
    ) -> Result<GenerationSettings, AdminError> {
        Ok(self.settings.load().await?)
    }

    /// # Errors
    ///
    /// Returns `AdminError::Settings` if the draft is invalid or cannot be stored.
    pub async fn save_settings(
        &self,
        _access: &AdminAccess,
        draft: GenerationSettingsDraft,
    ) -> Result<GenerationSettings, AdminError> {
        Ok(self.settings.save(draft).await?)
    }

    /// # Errors
    ///
    /// Returns `AdminError::Settings` on storage failures.
    pub async fn reset_settings(
        &self,
        _access: &AdminAccess,
    ) -> Result<GenerationSettings, AdminError> {
        Ok(self.settings.reset().await?)
    }

    pub async fn test_credential(&self, _access: &AdminAccess, api_key: &str) -> bool {
        self.provider.test_credential(api_key).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ProviderError;
    use async_trait::async_trait;
    use dojo_core::model::{AnswerSet, BeltRank, Quiz, UserDraft};
    use dojo_core::time::fixed_clock;
    use storage::repository::{InMemoryRepository, SessionStore};

    struct KeyChecker;

    #[async_trait]
    impl QuestionProvider for KeyChecker {
        async fn request_quiz(
            &self,
            _belt: BeltRank,
            _settings: &GenerationSettings,
            _api_key: Option<&str>,
        ) -> Result<Quiz, ProviderError> {
            Err(ProviderError::MissingCredential)
        }

        async fn test_credential(&self, api_key: &str) -> bool {
            api_key == "valid"
        }
    }

    fn service() -> (AdminService, Arc<ResultRecorder>) {
        let store: Arc<dyn SessionStore> = Arc::new(InMemoryRepository::new());
        let recorder = Arc::new(ResultRecorder::new(fixed_clock(), Arc::clone(&store)));
        let settings = Arc::new(GenerationSettingsService::new(store));
        let admin = AdminService::new(
            AdminConfig::default(),
            Arc::clone(&recorder),
            settings,
            Arc::new(KeyChecker),
        );
        (admin, recorder)
    }

    #[test]
    fn pin_gate() {
        let (admin, _) = service();
        assert!(matches!(admin.verify_pin("1234"), Err(AdminError::InvalidPin)));
        assert!(admin.verify_pin("2005").is_ok());
    }

    #[tokio::test]
    async fn lists_results_newest_first() {
        let (admin, recorder) = service();
        let user = UserDraft::new("Sumi", "pw", BeltRank::White)
            .validate()
            .unwrap();
        let quiz = crate::sessions::test_support::quiz_with_answers(&[0; 5]);
        let older = recorder
            .record(&user, quiz.questions(), &AnswerSet::new(5))
            .await
            .unwrap();
        let newer = recorder
            .record(&user, quiz.questions(), &AnswerSet::new(5))
            .await
            .unwrap();

        let access = admin.verify_pin("2005").unwrap();
        let results = admin.list_results(&access).await.unwrap();
        assert_eq!(results, vec![newer, older]);
    }

    #[tokio::test]
    async fn settings_round_trip_and_reset() {
        let (admin, _) = service();
        let access = admin.verify_pin("2005").unwrap();

        let saved = admin
            .save_settings(
                &access,
                GenerationSettingsDraft {
                    model: "gemini-2.5-flash".into(),
                    ..GenerationSettingsDraft::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(admin.load_settings(&access).await.unwrap(), saved);

        let defaults = admin.reset_settings(&access).await.unwrap();
        assert_eq!(defaults, GenerationSettings::default());
        assert_eq!(admin.load_settings(&access).await.unwrap(), defaults);
    }

    #[tokio::test]
    async fn credential_tester_delegates_to_provider() {
        let (admin, _) = service();
        let access = admin.verify_pin("2005").unwrap();
        assert!(admin.test_credential(&access, "valid").await);
        assert!(!admin.test_credential(&access, "nope").await);
    }
}
