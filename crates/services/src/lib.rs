#![forbid(unsafe_code)]

pub mod admin_service;
pub mod app_services;
pub mod app_state;
pub mod config;
pub mod error;
pub mod navigation;
pub mod provider;
pub mod result_recorder;
pub mod sessions;
pub mod settings_service;
pub mod user_service;

pub use dojo_core::Clock;

pub use admin_service::{AdminAccess, AdminService};
pub use app_services::AppServices;
pub use app_state::AppState;
pub use config::{AdminConfig, ConfigError, ProviderConfig};
pub use error::{
    AdminError, AppServicesError, NavigationError, ProviderError, RecorderError, SessionError,
    SettingsServiceError, UserServiceError,
};
pub use navigation::{Screen, ScreenRouter};
pub use provider::{GeminiQuestionProvider, QuestionProvider, resolve_api_key};
pub use result_recorder::ResultRecorder;
pub use sessions::{
    AdvanceOutcome, COUNTDOWN_SECS, FetchOutcome, QuizPhase, QuizReview, QuizSessionService,
    SessionSnapshot,
};
pub use settings_service::GenerationSettingsService;
pub use user_service::UserService;
