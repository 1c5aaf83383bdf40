mod machine;
mod service;
mod timer;

#[cfg(test)]
pub(crate) mod test_support;

// Public API of the quiz session subsystem.
pub use crate::error::SessionError;
pub use machine::{
    AdvanceOutcome, COUNTDOWN_SECS, FetchOutcome, FetchTicket, FinishReason, FinishedQuiz,
    QuizMachine, QuizPhase, TickOutcome,
};
pub use service::{QuizReview, QuizSessionService, SessionSnapshot};
pub use timer::Countdown;
