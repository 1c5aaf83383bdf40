use std::sync::Arc;

use rand::Rng;

use dojo_core::Clock;
use dojo_core::model::{AnswerSet, Question, QuizResult, ResultId, User};
use storage::json::{read_json, write_json};
use storage::repository::{SessionStore, StoreKey};

use crate::error::RecorderError;

const ID_ALPHABET: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";
const ID_LEN: usize = 9;

/// Scores finished quizzes and keeps the result log, newest first.
#[derive(Clone)]
pub struct ResultRecorder {
    clock: Clock,
    store: Arc<dyn SessionStore>,
}

impl ResultRecorder {
    #[must_use]
    pub fn new(clock: Clock, store: Arc<dyn SessionStore>) -> Self {
        Self { clock, store }
    }

    /// Score `answers` against `questions` and stamp the result with a new id.
    #[must_use]
    pub fn build_result(&self, user: &User, questions: &[Question], answers: &AnswerSet) -> QuizResult {
        QuizResult::build(new_result_id(), user, questions, answers, self.clock.now())
    }

    /// Prepend `result` to the log.
    ///
    /// A missing or unreadable log starts over empty.
    ///
    /// # Errors
    ///
    /// Returns `RecorderError::Storage` if the log cannot be read or written.
    pub async fn persist(&self, result: &QuizResult) -> Result<(), RecorderError> {
        let mut log: Vec<QuizResult> = read_json(self.store.as_ref(), StoreKey::ResultLog)
            .await?
            .unwrap_or_default();
        log.insert(0, result.clone());
        write_json(self.store.as_ref(), StoreKey::ResultLog, &log).await?;

        tracing::info!(
            result_id = %result.id(),
            student = result.student_name(),
            score = result.score(),
            total = result.total(),
            log_len = log.len(),
            "recorded quiz result"
        );
        Ok(())
    }

    /// Build and persist in one step.
    ///
    /// # Errors
    ///
    /// Returns `RecorderError::Storage` if persisting fails.
    pub async fn record(
        &self,
        user: &User,
        questions: &[Question],
        answers: &AnswerSet,
    ) -> Result<QuizResult, RecorderError> {
        let result = self.build_result(user, questions, answers);
        self.persist(&result).await?;
        Ok(result)
    }

    /// All recorded results, newest first.
    ///
    /// # Errors
    ///
    /// Returns `RecorderError::Storage` on storage failures.
    pub async fn list_results(&self) -> Result<Vec<QuizResult>, RecorderError> {
        Ok(read_json(self.store.as_ref(), StoreKey::ResultLog)
            .await?
            .unwrap_or_default())
    }
}

fn new_result_id() -> ResultId {
    let mut rng = rand::rng();
    let id: String = (0..ID_LEN)
        .map(|_| char::from(ID_ALPHABET[rng.random_range(0..ID_ALPHABET.len())]))
        .collect();
    ResultId::new(id)
}
