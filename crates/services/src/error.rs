//! Shared error types for the services crate.

use thiserror::Error;

use dojo_core::model::{AnswerError, GenerationSettingsError, UserError};
use storage::repository::StorageError;
use storage::sqlite::SqliteInitError;

use crate::config::ConfigError;
use crate::navigation::Screen;
use crate::sessions::QuizPhase;

/// Failures of the question provider.
///
/// Display strings are shown to the student verbatim.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ProviderError {
    #[error("No AI key is configured. Save a personal key or ask your Sensei for the academy key.")]
    MissingCredential,
    #[error("The Sensei returned no questions. Please try again.")]
    EmptyResponse,
    #[error("The Sensei's questions could not be read ({0}). Please try again.")]
    InvalidResponseShape(String),
    #[error("Too many requests right now. Wait a minute and try again.")]
    RateLimited,
    #[error("The AI key was rejected. Check your API key.")]
    Unauthorized,
    #[error("This AI key is not allowed to use the selected model.")]
    Forbidden,
    #[error("The Sensei is busy. Check your connection and try again. ({0})")]
    NetworkFailure(String),
}

impl From<reqwest::Error> for ProviderError {
    fn from(err: reqwest::Error) -> Self {
        ProviderError::NetworkFailure(err.to_string())
    }
}

/// Errors emitted by `ResultRecorder`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum RecorderError {
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Errors emitted by the quiz session.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum SessionError {
    #[error("cannot {action} while the quiz is {phase}")]
    InvalidTransition {
        action: &'static str,
        phase: QuizPhase,
    },
    #[error("question {} has no answer yet", .index + 1)]
    Unanswered { index: usize },
    #[error(transparent)]
    Answer(#[from] AnswerError),
    #[error(transparent)]
    Provider(#[from] ProviderError),
    #[error(transparent)]
    Recorder(#[from] RecorderError),
}

/// Errors emitted by `UserService`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum UserServiceError {
    #[error(transparent)]
    User(#[from] UserError),
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Errors emitted by `GenerationSettingsService`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum SettingsServiceError {
    #[error(transparent)]
    Settings(#[from] GenerationSettingsError),
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Errors emitted by `AdminService`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum AdminError {
    #[error("incorrect sensei code")]
    InvalidPin,
    #[error(transparent)]
    Recorder(#[from] RecorderError),
    #[error(transparent)]
    Settings(#[from] SettingsServiceError),
}

/// Rejected screen changes.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum NavigationError {
    #[error("{0:?} requires a logged-in student")]
    RequiresLogin(Screen),
    #[error("cannot go from {from:?} to {to:?}")]
    InvalidTransition { from: Screen, to: Screen },
}

/// Errors emitted while bootstrapping app services.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum AppServicesError {
    #[error(transparent)]
    Sqlite(#[from] SqliteInitError),
    #[error(transparent)]
    Storage(#[from] StorageError),
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    UserService(#[from] UserServiceError),
    #[error(transparent)]
    SettingsService(#[from] SettingsServiceError),
}
