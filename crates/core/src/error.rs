use thiserror::Error;

use crate::model::{
    AnswerError, BeltError, GenerationSettingsError, QuestionError, UserError,
};

#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Belt(#[from] BeltError),
    #[error(transparent)]
    User(#[from] UserError),
    #[error(transparent)]
    Question(#[from] QuestionError),
    #[error(transparent)]
    Answer(#[from] AnswerError),
    #[error(transparent)]
    GenerationSettings(#[from] GenerationSettingsError),
}
