use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::model::{AnswerSet, BeltRank, Question, User};
use crate::scoring::{Score, score};

/// Text recorded for a question the student never answered.
pub const NO_ANSWER: &str = "No Answer";

/// Opaque identifier of a recorded quiz result.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ResultId(String);

impl ResultId {
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for ResultId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ResultId({})", self.0)
    }
}

impl fmt::Display for ResultId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Per-question line of a recorded result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResultDetail {
    pub question_text: String,
    pub chosen_option_text: String,
    pub correct_option_text: String,
    pub is_correct: bool,
}

/// Immutable record of one completed quiz.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuizResult {
    id: ResultId,
    student_name: String,
    belt_rank: BeltRank,
    score: u32,
    total: u32,
    /// Completion time in epoch milliseconds.
    timestamp: i64,
    details: Vec<ResultDetail>,
}

impl QuizResult {
    /// Score a finished quiz and capture it as a result record.
    ///
    /// `completed_at` should come from the services layer clock.
    #[must_use]
    pub fn build(
        id: ResultId,
        user: &User,
        questions: &[Question],
        answers: &AnswerSet,
        completed_at: DateTime<Utc>,
    ) -> Self {
        let Score { correct, total } = score(questions, answers);
        let details = questions
            .iter()
            .enumerate()
            .map(|(idx, question)| {
                let chosen = answers.get(idx);
                ResultDetail {
                    question_text: question.prompt().to_string(),
                    chosen_option_text: chosen
                        .and_then(|opt| question.option(opt))
                        .unwrap_or(NO_ANSWER)
                        .to_string(),
                    correct_option_text: question.correct_option().to_string(),
                    is_correct: chosen == Some(question.correct_index()),
                }
            })
            .collect();

        Self {
            id,
            student_name: user.name().to_string(),
            belt_rank: user.belt_rank(),
            score: correct,
            total,
            timestamp: completed_at.timestamp_millis(),
            details,
        }
    }

    #[must_use]
    pub fn id(&self) -> &ResultId {
        &self.id
    }

    #[must_use]
    pub fn student_name(&self) -> &str {
        &self.student_name
    }

    #[must_use]
    pub fn belt_rank(&self) -> BeltRank {
        self.belt_rank
    }

    #[must_use]
    pub fn score(&self) -> u32 {
        self.score
    }

    #[must_use]
    pub fn total(&self) -> u32 {
        self.total
    }

    #[must_use]
    pub fn timestamp_millis(&self) -> i64 {
        self.timestamp
    }

    #[must_use]
    pub fn completed_at(&self) -> Option<DateTime<Utc>> {
        DateTime::<Utc>::from_timestamp_millis(self.timestamp)
    }

    #[must_use]
    pub fn details(&self) -> &[ResultDetail] {
        &self.details
    }

    /// Score as a whole percentage, 0 when the quiz was empty.
    #[must_use]
    pub fn percentage(&self) -> u32 {
        Score {
            correct: self.score,
            total: self.total,
        }
        .percentage()
    }
}
