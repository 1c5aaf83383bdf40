use std::sync::Arc;

use storage::repository::Storage;

use crate::Clock;
use crate::admin_service::AdminService;
use crate::app_state::AppState;
use crate::config::{AdminConfig, ProviderConfig};
use crate::error::AppServicesError;
use crate::provider::{GeminiQuestionProvider, QuestionProvider};
use crate::result_recorder::ResultRecorder;
use crate::sessions::QuizSessionService;
use crate::settings_service::GenerationSettingsService;
use crate::user_service::UserService;

/// Assembles app-facing services over one storage backend.
#[derive(Clone)]
pub struct AppServices {
    users: Arc<UserService>,
    settings: Arc<GenerationSettingsService>,
    recorder: Arc<ResultRecorder>,
    admin: Arc<AdminService>,
    provider: Arc<dyn QuestionProvider>,
    quiz: QuizSessionService,
}

impl AppServices {
    /// Build services backed by `SQLite` storage and the Gemini provider.
    ///
    /// # Errors
    ///
    /// Returns `AppServicesError` if storage initialization fails.
    pub async fn new_sqlite(
        db_url: &str,
        clock: Clock,
        provider_config: ProviderConfig,
        admin_config: AdminConfig,
    ) -> Result<Self, AppServicesError> {
        let storage = Storage::sqlite(db_url).await?;
        let provider: Arc<dyn QuestionProvider> =
            Arc::new(GeminiQuestionProvider::new(provider_config));
        Ok(Self::from_storage(&storage, clock, provider, admin_config))
    }

    /// Build services over an existing storage backend and provider.
    #[must_use]
    pub fn from_storage(
        storage: &Storage,
        clock: Clock,
        provider: Arc<dyn QuestionProvider>,
        admin_config: AdminConfig,
    ) -> Self {
        let users = Arc::new(UserService::new(Arc::clone(&storage.session)));
        let settings = Arc::new(GenerationSettingsService::new(Arc::clone(&storage.session)));
        let recorder = Arc::new(ResultRecorder::new(clock, Arc::clone(&storage.session)));
        let admin = Arc::new(AdminService::new(
            admin_config,
            Arc::clone(&recorder),
            Arc::clone(&settings),
            Arc::clone(&provider),
        ));
        let quiz = QuizSessionService::new(Arc::clone(&provider), Arc::clone(&recorder));

        Self {
            users,
            settings,
            recorder,
            admin,
            provider,
            quiz,
        }
    }

    /// Read the remembered user and generation settings.
    ///
    /// # Errors
    ///
    /// Returns `AppServicesError` if storage cannot be read.
    pub async fn load_state(&self) -> Result<AppState, AppServicesError> {
        AppState::load(&self.users, &self.settings).await
    }

    #[must_use]
    pub fn users(&self) -> Arc<UserService> {
        Arc::clone(&self.users)
    }

    #[must_use]
    pub fn settings(&self) -> Arc<GenerationSettingsService> {
        Arc::clone(&self.settings)
    }

    #[must_use]
    pub fn recorder(&self) -> Arc<ResultRecorder> {
        Arc::clone(&self.recorder)
    }

    #[must_use]
    pub fn admin(&self) -> Arc<AdminService> {
        Arc::clone(&self.admin)
    }

    #[must_use]
    pub fn provider(&self) -> Arc<dyn QuestionProvider> {
        Arc::clone(&self.provider)
    }

    #[must_use]
    pub fn quiz(&self) -> QuizSessionService {
        self.quiz.clone()
    }
}
