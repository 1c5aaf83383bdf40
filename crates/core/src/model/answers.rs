use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::model::OPTION_COUNT;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum AnswerError {
    #[error("question index {index} is out of range for a quiz of {len}")]
    QuestionOutOfRange { index: usize, len: usize },

    #[error("option index {0} is out of range")]
    OptionOutOfRange(u8),
}

/// Sparse answers, one slot per question.
///
/// The slot count is fixed at construction, so the set can never hold more
/// answers than the quiz has questions.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct AnswerSet {
    slots: Vec<Option<u8>>,
}

impl AnswerSet {
    /// Create an answer set with `len` unset slots.
    #[must_use]
    pub fn new(len: usize) -> Self {
        Self {
            slots: vec![None; len],
        }
    }

    /// Build from explicit slots (useful for tests and replays).
    ///
    /// # Errors
    ///
    /// Returns `AnswerError::OptionOutOfRange` if any option is not a valid index.
    pub fn from_slots(slots: Vec<Option<u8>>) -> Result<Self, AnswerError> {
        if let Some(bad) = slots
            .iter()
            .flatten()
            .find(|opt| usize::from(**opt) >= OPTION_COUNT)
        {
            return Err(AnswerError::OptionOutOfRange(*bad));
        }
        Ok(Self { slots })
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    #[must_use]
    pub fn get(&self, index: usize) -> Option<u8> {
        self.slots.get(index).copied().flatten()
    }

    #[must_use]
    pub fn is_answered(&self, index: usize) -> bool {
        self.get(index).is_some()
    }

    #[must_use]
    pub fn answered_count(&self) -> usize {
        self.slots.iter().filter(|slot| slot.is_some()).count()
    }

    /// Record (or overwrite) the chosen option for a question.
    ///
    /// # Errors
    ///
    /// Returns `AnswerError` if the question or option index is out of range.
    pub fn set(&mut self, index: usize, option: u8) -> Result<(), AnswerError> {
        if usize::from(option) >= OPTION_COUNT {
            return Err(AnswerError::OptionOutOfRange(option));
        }
        let len = self.slots.len();
        let slot = self
            .slots
            .get_mut(index)
            .ok_or(AnswerError::QuestionOutOfRange { index, len })?;
        *slot = Some(option);
        Ok(())
    }

    pub fn iter(&self) -> impl Iterator<Item = Option<u8>> + '_ {
        self.slots.iter().copied()
    }
}
