use std::sync::Arc;

use services::{
    AdminService, AppState, GenerationSettingsService, QuestionProvider, QuizSessionService,
    UserService,
};

pub trait UiApp: Send + Sync {
    /// State loaded from storage before launch.
    fn initial_state(&self) -> AppState;

    fn users(&self) -> Arc<UserService>;
    fn settings(&self) -> Arc<GenerationSettingsService>;
    fn admin(&self) -> Arc<AdminService>;
    fn provider(&self) -> Arc<dyn QuestionProvider>;
    fn quiz(&self) -> QuizSessionService;
}

#[derive(Clone)]
pub struct AppContext {
    initial_state: AppState,

    users: Arc<UserService>,
    settings: Arc<GenerationSettingsService>,
    admin: Arc<AdminService>,
    provider: Arc<dyn QuestionProvider>,
    quiz: QuizSessionService,
}

impl AppContext {
    #[must_use]
    pub fn new(app: &Arc<dyn UiApp>) -> Self {
        Self {
            initial_state: app.initial_state(),
            users: app.users(),
            settings: app.settings(),
            admin: app.admin(),
            provider: app.provider(),
            quiz: app.quiz(),
        }
    }

    #[must_use]
    pub fn initial_state(&self) -> AppState {
        self.initial_state.clone()
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

// This context is provided by the application composition root (e.g. `crates/app`).

/// Build an `AppContext` from a UI-facing app implementation.
#[must_use]
pub fn build_app_context(app: &Arc<dyn UiApp>) -> AppContext {
    AppContext::new(app)
}
