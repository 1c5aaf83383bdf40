use std::fmt;

use dojo_core::model::{AnswerSet, Question, Quiz};

use crate::error::{ProviderError, SessionError};

/// Seconds a student has to finish a quiz.
pub const COUNTDOWN_SECS: u32 = 120;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum QuizPhase {
    #[default]
    Idle,
    Fetching,
    InProgress,
    Finished,
}

impl fmt::Display for QuizPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            QuizPhase::Idle => "idle",
            QuizPhase::Fetching => "fetching",
            QuizPhase::InProgress => "in progress",
            QuizPhase::Finished => "finished",
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FinishReason {
    Submitted,
    TimeExpired,
}

/// Identifies one fetch. Responses carrying an outdated ticket are dropped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchTicket {
    generation: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchOutcome {
    /// The quiz is now in progress.
    Started,
    /// The fetch was cancelled or superseded; nothing changed.
    Stale,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AdvanceOutcome {
    Moved { current: usize },
    Finished,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    Running { remaining_secs: u32 },
    Expired,
    /// No quiz is running; the timer should stop.
    Inactive,
}

#[derive(Debug, Clone)]
struct ActiveQuiz {
    quiz: Quiz,
    answers: AnswerSet,
    current: usize,
    remaining_secs: u32,
}

/// A quiz that reached the end, by submission or by the clock.
#[derive(Debug, Clone, PartialEq)]
pub struct FinishedQuiz {
    quiz: Quiz,
    answers: AnswerSet,
    reason: FinishReason,
}

impl FinishedQuiz {
    #[must_use]
    pub fn quiz(&self) -> &Quiz {
        &self.quiz
    }

    #[must_use]
    pub fn answers(&self) -> &AnswerSet {
        &self.answers
    }

    #[must_use]
    pub fn reason(&self) -> FinishReason {
        self.reason
    }
}

#[derive(Debug, Clone, Default)]
enum State {
    #[default]
    Idle,
    Fetching,
    InProgress(ActiveQuiz),
    Finished(FinishedQuiz),
}

/// Synchronous core of a quiz session.
///
/// Holds no timers or I/O; the owning service feeds it provider results and
/// one-second ticks.
#[derive(Debug, Clone, Default)]
pub struct QuizMachine {
    state: State,
    generation: u64,
}

impl QuizMachine {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn phase(&self) -> QuizPhase {
        match self.state {
            State::Idle => QuizPhase::Idle,
            State::Fetching => QuizPhase::Fetching,
            State::InProgress(_) => QuizPhase::InProgress,
            State::Finished(_) => QuizPhase::Finished,
        }
    }

    fn invalid(&self, action: &'static str) -> SessionError {
        SessionError::InvalidTransition {
            action,
            phase: self.phase(),
        }
    }

    /// Enter `Fetching`. A finished quiz is discarded first.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::InvalidTransition` while fetching or in progress.
    pub fn begin_fetch(&mut self) -> Result<FetchTicket, SessionError> {
        match self.state {
            State::Idle | State::Finished(_) => {
                self.generation += 1;
                self.state = State::Fetching;
                Ok(FetchTicket {
                    generation: self.generation,
                })
            }
            State::Fetching | State::InProgress(_) => Err(self.invalid("start")),
        }
    }

    /// Apply the provider's answer to the fetch identified by `ticket`.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::Provider` when the current fetch failed; the
    /// machine is back in `Idle` in that case.
    pub fn complete_fetch(
        &mut self,
        ticket: FetchTicket,
        result: Result<Quiz, ProviderError>,
    ) -> Result<FetchOutcome, SessionError> {
        if !matches!(self.state, State::Fetching) || ticket.generation != self.generation {
            return Ok(FetchOutcome::Stale);
        }

        match result {
            Ok(quiz) => {
                self.state = State::InProgress(ActiveQuiz {
                    answers: AnswerSet::new(quiz.len()),
                    quiz,
                    current: 0,
                    remaining_secs: COUNTDOWN_SECS,
                });
                Ok(FetchOutcome::Started)
            }
            Err(err) => {
                self.state = State::Idle;
                Err(err.into())
            }
        }
    }

    /// Record (or change) the answer to `question_index`.
    ///
    /// # Errors
    ///
    /// Returns `SessionError` outside `InProgress` or for out-of-range indices.
    pub fn select_answer(&mut self, question_index: usize, option: u8) -> Result<(), SessionError> {
        let State::InProgress(active) = &mut self.state else {
            return Err(self.invalid("answer"));
        };
        active.answers.set(question_index, option)?;
        Ok(())
    }

    /// Move to the next question, or finish after the last one.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::Unanswered` if the current question has no answer.
    pub fn advance(&mut self) -> Result<AdvanceOutcome, SessionError> {
        let State::InProgress(active) = &mut self.state else {
            return Err(self.invalid("advance"));
        };
        if !active.answers.is_answered(active.current) {
            return Err(SessionError::Unanswered {
                index: active.current,
            });
        }
        if active.current + 1 < active.quiz.len() {
            active.current += 1;
            return Ok(AdvanceOutcome::Moved {
                current: active.current,
            });
        }
        self.finish(FinishReason::Submitted);
        Ok(AdvanceOutcome::Finished)
    }

    /// Count down one second. Reaching zero finishes the quiz as answered so far.
    pub fn tick(&mut self) -> TickOutcome {
        let State::InProgress(active) = &mut self.state else {
            return TickOutcome::Inactive;
        };
        active.remaining_secs = active.remaining_secs.saturating_sub(1);
        if active.remaining_secs > 0 {
            return TickOutcome::Running {
                remaining_secs: active.remaining_secs,
            };
        }
        self.finish(FinishReason::TimeExpired);
        TickOutcome::Expired
    }

    /// Abandon a fetch or a running quiz without producing a result.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::InvalidTransition` when idle or finished.
    pub fn cancel(&mut self) -> Result<(), SessionError> {
        match self.state {
            State::Fetching | State::InProgress(_) => {
                self.state = State::Idle;
                Ok(())
            }
            State::Idle | State::Finished(_) => Err(self.invalid("cancel")),
        }
    }

    /// Drop the fetch identified by `ticket` if it is still the current one.
    ///
    /// Returns `true` when the machine went back to `Idle`.
    pub fn abandon_fetch(&mut self, ticket: FetchTicket) -> bool {
        if !matches!(self.state, State::Fetching) || ticket.generation != self.generation {
            return false;
        }
        self.generation += 1;
        self.state = State::Idle;
        true
    }

    /// Return to `Idle` from any phase, invalidating outstanding fetches.
    pub fn reset(&mut self) {
        self.generation += 1;
        self.state = State::Idle;
    }

    fn finish(&mut self, reason: FinishReason) {
        if let State::InProgress(active) = std::mem::take(&mut self.state) {
            self.state = State::Finished(FinishedQuiz {
                quiz: active.quiz,
                answers: active.answers,
                reason,
            });
        }
    }

    #[must_use]
    pub fn quiz(&self) -> Option<&Quiz> {
        match &self.state {
            State::InProgress(active) => Some(&active.quiz),
            State::Finished(done) => Some(&done.quiz),
            State::Idle | State::Fetching => None,
        }
    }

    #[must_use]
    pub fn answers(&self) -> Option<&AnswerSet> {
        match &self.state {
            State::InProgress(active) => Some(&active.answers),
            State::Finished(done) => Some(&done.answers),
            State::Idle | State::Fetching => None,
        }
    }

    #[must_use]
    pub fn current_index(&self) -> Option<usize> {
        match &self.state {
            State::InProgress(active) => Some(active.current),
            _ => None,
        }
    }

    #[must_use]
    pub fn current_question(&self) -> Option<&Question> {
        match &self.state {
            State::InProgress(active) => active.quiz.get(active.current),
            _ => None,
        }
    }

    #[must_use]
    pub fn remaining_secs(&self) -> Option<u32> {
        match &self.state {
            State::InProgress(active) => Some(active.remaining_secs),
            _ => None,
        }
    }

    #[must_use]
    pub fn finished(&self) -> Option<&FinishedQuiz> {
        match &self.state {
            State::Finished(done) => Some(done),
            _ => None,
        }
    }
}
