use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Number of questions in a quiz.
pub const QUIZ_LENGTH: usize = 5;

/// Number of options per question.
pub const OPTION_COUNT: usize = 4;

//
// ─── ERRORS ───────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum QuestionError {
    #[error("question text is empty")]
    EmptyPrompt,

    #[error("expected 4 options, got {got}")]
    OptionCount { got: usize },

    #[error("expected 4 Bengali options, got {got}")]
    BengaliOptionCount { got: usize },

    #[error("correct answer index {0} is out of range")]
    AnswerOutOfRange(i64),

    #[error("expected {expected} questions, got {got}")]
    QuizLength { expected: usize, got: usize },
}

//
// ─── WIRE SHAPE ───────────────────────────────────────────────────────────────
//

/// Untrusted question shape as produced by the question generator.
///
/// Field names match the JSON schema sent upstream. Every `Question` is built
/// from one of these through `TryFrom`, so deserializing a `Question` directly
/// enforces the full shape.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct QuestionRecord {
    pub question: String,
    pub question_bengali: String,
    pub options: Vec<String>,
    pub options_bengali: Vec<String>,
    pub correct_answer: i64,
    pub explanation: String,
    pub explanation_bengali: String,
}

//
// ─── QUESTION ─────────────────────────────────────────────────────────────────
//

/// A validated bilingual multiple-choice question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "QuestionRecord", into = "QuestionRecord")]
pub struct Question {
    prompt: String,
    prompt_bengali: String,
    options: [String; OPTION_COUNT],
    options_bengali: [String; OPTION_COUNT],
    correct_index: u8,
    explanation: String,
    explanation_bengali: String,
}

impl TryFrom<QuestionRecord> for Question {
    type Error = QuestionError;

    fn try_from(record: QuestionRecord) -> Result<Self, Self::Error> {
        if record.question.trim().is_empty() {
            return Err(QuestionError::EmptyPrompt);
        }

        let got = record.options.len();
        let options: [String; OPTION_COUNT] = record
            .options
            .try_into()
            .map_err(|_| QuestionError::OptionCount { got })?;

        let got = record.options_bengali.len();
        let options_bengali: [String; OPTION_COUNT] = record
            .options_bengali
            .try_into()
            .map_err(|_| QuestionError::BengaliOptionCount { got })?;

        let correct_index = u8::try_from(record.correct_answer)
            .ok()
            .filter(|idx| usize::from(*idx) < OPTION_COUNT)
            .ok_or(QuestionError::AnswerOutOfRange(record.correct_answer))?;

        Ok(Self {
            prompt: record.question,
            prompt_bengali: record.question_bengali,
            options,
            options_bengali,
            correct_index,
            explanation: record.explanation,
            explanation_bengali: record.explanation_bengali,
        })
    }
}

impl From<Question> for QuestionRecord {
    fn from(question: Question) -> Self {
        Self {
            question: question.prompt,
            question_bengali: question.prompt_bengali,
            options: question.options.into(),
            options_bengali: question.options_bengali.into(),
            correct_answer: i64::from(question.correct_index),
            explanation: question.explanation,
            explanation_bengali: question.explanation_bengali,
        }
    }
}

impl Question {
    #[must_use]
    pub fn prompt(&self) -> &str {
        &self.prompt
    }

    #[must_use]
    pub fn prompt_bengali(&self) -> &str {
        &self.prompt_bengali
    }

    #[must_use]
    pub fn options(&self) -> &[String; OPTION_COUNT] {
        &self.options
    }

    #[must_use]
    pub fn options_bengali(&self) -> &[String; OPTION_COUNT] {
        &self.options_bengali
    }

    #[must_use]
    pub fn option(&self, index: u8) -> Option<&str> {
        self.options.get(usize::from(index)).map(String::as_str)
    }

    #[must_use]
    pub fn correct_index(&self) -> u8 {
        self.correct_index
    }

    #[must_use]
    pub fn correct_option(&self) -> &str {
        &self.options[usize::from(self.correct_index)]
    }

    #[must_use]
    pub fn explanation(&self) -> &str {
        &self.explanation
    }

    #[must_use]
    pub fn explanation_bengali(&self) -> &str {
        &self.explanation_bengali
    }
}

//
// ─── QUIZ ─────────────────────────────────────────────────────────────────────
//

/// An ordered set of exactly `QUIZ_LENGTH` questions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Quiz {
    questions: Vec<Question>,
}

impl Quiz {
    /// # Errors
    ///
    /// Returns `QuestionError::QuizLength` unless exactly `QUIZ_LENGTH` questions are given.
    pub fn new(questions: Vec<Question>) -> Result<Self, QuestionError> {
        if questions.len() != QUIZ_LENGTH {
            return Err(QuestionError::QuizLength {
                expected: QUIZ_LENGTH,
                got: questions.len(),
            });
        }
        Ok(Self { questions })
    }

    #[must_use]
    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    #[must_use]
    pub fn get(&self, index: usize) -> Option<&Question> {
        self.questions.get(index)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.questions.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn record_json() -> serde_json::Value {
        json!({
            "question": "What does 'Rei' mean?",
            "questionBengali": "'রেই' মানে কী?",
            "options": ["Bow", "Kick", "Punch", "Stance"],
            "optionsBengali": ["অভিবাদন", "লাথি", "ঘুষি", "ভঙ্গি"],
            "correctAnswer": 0,
            "explanation": "Rei is the bow.",
            "explanationBengali": "রেই হলো অভিবাদন।"
        })
    }

    #[test]
    fn parses_valid_question() {
        let question: Question = serde_json::from_value(record_json()).unwrap();
        assert_eq!(question.prompt(), "What does 'Rei' mean?");
        assert_eq!(question.correct_index(), 0);
        assert_eq!(question.correct_option(), "Bow");
        assert_eq!(question.option(3), Some("Stance"));
        assert_eq!(question.option(4), None);
    }

    #[test]
    fn rejects_three_options() {
        let mut value = record_json();
        value["options"] = json!(["Bow", "Kick", "Punch"]);
        let err = serde_json::from_value::<Question>(value).unwrap_err();
        assert!(err.to_string().contains("expected 4 options"), "{err}");
    }

    #[test]
    fn rejects_out_of_range_answer() {
        let mut value = record_json();
        value["correctAnswer"] = json!(4);
        assert!(serde_json::from_value::<Question>(value.clone()).is_err());
        value["correctAnswer"] = json!(-1);
        assert!(serde_json::from_value::<Question>(value).is_err());
    }

    #[test]
    fn rejects_wrong_field_types() {
        let mut value = record_json();
        value["correctAnswer"] = json!("zero");
        assert!(serde_json::from_value::<Question>(value).is_err());
    }

    #[test]
    fn quiz_requires_exact_length() {
        let question: Question = serde_json::from_value(record_json()).unwrap();
        let err = Quiz::new(vec![question.clone(); 4]).unwrap_err();
        assert_eq!(
            err,
            QuestionError::QuizLength {
                expected: QUIZ_LENGTH,
                got: 4
            }
        );
        let quiz = Quiz::new(vec![question; QUIZ_LENGTH]).unwrap();
        assert_eq!(quiz.len(), QUIZ_LENGTH);
    }

    #[test]
    fn serializes_back_to_wire_shape() {
        let question: Question = serde_json::from_value(record_json()).unwrap();
        let value = serde_json::to_value(&question).unwrap();
        assert_eq!(value, record_json());
    }
}
