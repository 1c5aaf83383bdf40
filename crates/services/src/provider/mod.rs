//! Source of generated quizzes.

use async_trait::async_trait;

use dojo_core::model::{BeltRank, GenerationSettings, Quiz};

use crate::error::ProviderError;

mod gemini;

pub use gemini::GeminiQuestionProvider;

/// Produces a five-question quiz for a belt rank.
#[async_trait]
pub trait QuestionProvider: Send + Sync {
    /// Request a fresh quiz.
    ///
    /// `api_key` is the student's personal key; implementations fall back to
    /// their shared key when it is absent.
    ///
    /// # Errors
    ///
    /// Returns `ProviderError::MissingCredential` before any network call when
    /// no key resolves, and the matching `ProviderError` for upstream failures.
    async fn request_quiz(
        &self,
        belt: BeltRank,
        settings: &GenerationSettings,
        api_key: Option<&str>,
    ) -> Result<Quiz, ProviderError>;

    /// Check whether `api_key` is accepted upstream. Never fails.
    async fn test_credential(&self, api_key: &str) -> bool;
}

/// Pick the key to use: a non-blank personal key wins over the shared one.
#[must_use]
pub fn resolve_api_key(personal: Option<&str>, shared: Option<&str>) -> Option<String> {
    [personal, shared]
        .into_iter()
        .flatten()
        .map(str::trim)
        .find(|key| !key.is_empty())
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn personal_key_wins() {
        assert_eq!(
            resolve_api_key(Some("mine"), Some("academy")).as_deref(),
            Some("mine")
        );
    }

    #[test]
    fn blank_personal_key_falls_back_to_shared() {
        assert_eq!(
            resolve_api_key(Some("   "), Some("academy")).as_deref(),
            Some("academy")
        );
        assert_eq!(resolve_api_key(None, Some("academy")).as_deref(), Some("academy"));
    }

    #[test]
    fn nothing_resolves_without_keys() {
        assert_eq!(resolve_api_key(None, None), None);
        assert_eq!(resolve_api_key(Some(""), Some(" ")), None);
    }
}
