mod answers;
mod belt;
mod generation;
mod question;
mod result;
mod user;

pub use answers::{AnswerError, AnswerSet};
pub use belt::{BeltError, BeltRank};
pub use generation::{
    BELT_PLACEHOLDER, DEFAULT_INSTRUCTION_TEMPLATE, DEFAULT_MODEL, GenerationSettings,
    GenerationSettingsDraft, GenerationSettingsError,
};
pub use question::{OPTION_COUNT, QUIZ_LENGTH, Question, QuestionError, QuestionRecord, Quiz};
pub use result::{NO_ANSWER, QuizResult, ResultDetail, ResultId};
pub use user::{User, UserDraft, UserError};
