use std::ops::ControlFlow;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use tokio::sync::watch;

use dojo_core::model::{AnswerSet, GenerationSettings, Question, QuizResult, User};

use super::machine::{
    AdvanceOutcome, FetchOutcome, FetchTicket, QuizMachine, QuizPhase, TickOutcome,
};
use super::timer::Countdown;
use crate::error::SessionError;
use crate::provider::QuestionProvider;
use crate::result_recorder::ResultRecorder;

const TICK_PERIOD: Duration = Duration::from_secs(1);

//
// ─── SNAPSHOT ──────────────────────────────────────────────────────────────────
//

/// Everything a view needs to render the quiz, published after every change.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SessionSnapshot {
    pub phase: QuizPhase,
    pub current: usize,
    pub total: usize,
    pub remaining_secs: u32,
    pub answers: AnswerSet,
    pub question: Option<Question>,
    pub last_error: Option<String>,
    pub result: Option<QuizResult>,
}

/// A recorded quiz together with the questions that produced it.
#[derive(Debug, Clone, PartialEq)]
pub struct QuizReview {
    pub questions: Vec<Question>,
    pub answers: AnswerSet,
    pub result: QuizResult,
}

//
// ─── SERVICE ───────────────────────────────────────────────────────────────────
//

#[derive(Default)]
struct SessionInner {
    machine: QuizMachine,
    countdown: Option<Countdown>,
    participant: Option<User>,
    recording: bool,
    last_result: Option<QuizResult>,
    last_error: Option<String>,
}

impl SessionInner {
    fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            phase: self.machine.phase(),
            current: self.machine.current_index().unwrap_or_default(),
            total: self.machine.quiz().map_or(0, |quiz| quiz.len()),
            remaining_secs: self.machine.remaining_secs().unwrap_or_default(),
            answers: self.machine.answers().cloned().unwrap_or_default(),
            question: self.machine.current_question().cloned(),
            last_error: self.last_error.clone(),
            result: self.last_result.clone(),
        }
    }
}

struct SessionCore {
    provider: Arc<dyn QuestionProvider>,
    recorder: Arc<ResultRecorder>,
    inner: Mutex<SessionInner>,
    updates: watch::Sender<SessionSnapshot>,
}

impl SessionCore {
    fn lock(&self) -> MutexGuard<'_, SessionInner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn publish(&self, inner: &SessionInner) {
        self.updates.send_replace(inner.snapshot());
    }

    async fn on_tick(&self) -> ControlFlow<()> {
        let expired = {
            let mut inner = self.lock();
            let outcome = inner.machine.tick();
            match outcome {
                TickOutcome::Running { remaining_secs } => {
                    tracing::debug!(remaining_secs, "quiz tick");
                    self.publish(&inner);
                    false
                }
                TickOutcome::Expired => {
                    if let Some(mut countdown) = inner.countdown.take() {
                        countdown.disarm();
                    }
                    self.publish(&inner);
                    true
                }
                TickOutcome::Inactive => return ControlFlow::Break(()),
            }
        };

        if !expired {
            return ControlFlow::Continue(());
        }
        tracing::info!("quiz time expired");
        if let Err(err) = self.finalize().await {
            tracing::warn!(error = %err, "failed to record expired quiz");
        }
        ControlFlow::Break(())
    }

    /// Record the finished quiz once. Later calls are no-ops.
    async fn finalize(&self) -> Result<Option<QuizResult>, SessionError> {
        let (user, questions, answers) = {
            let mut inner = self.lock();
            if inner.recording {
                return Ok(None);
            }
            let Some(done) = inner.machine.finished() else {
                return Ok(None);
            };
            let questions = done.quiz().questions().to_vec();
            let answers = done.answers().clone();
            let Some(user) = inner.participant.clone() else {
                return Ok(None);
            };
            inner.recording = true;
            (user, questions, answers)
        };

        let recorded = self.recorder.record(&user, &questions, &answers).await;

        let mut inner = self.lock();
        match recorded {
            Ok(result) => {
                inner.last_result = Some(result.clone());
                self.publish(&inner);
                Ok(Some(result))
            }
            Err(err) => {
                inner.last_error = Some(err.to_string());
                self.publish(&inner);
                Err(err.into())
            }
        }
    }
}

/// Outstanding fetch of one `start` call. Dropping it before `settle` puts the
/// machine back to `Idle` if that fetch is still the current one.
struct PendingFetch<'a> {
    core: &'a SessionCore,
    ticket: Option<FetchTicket>,
}

impl PendingFetch<'_> {
    fn settle(&mut self) {
        self.ticket = None;
    }
}

impl Drop for PendingFetch<'_> {
    fn drop(&mut self) {
        let Some(ticket) = self.ticket.take() else {
            return;
        };
        let mut inner = self.core.lock();
        if inner.machine.abandon_fetch(ticket) {
            inner.participant = None;
            tracing::info!("quiz fetch dropped before it finished");
            self.core.publish(&inner);
        }
    }
}

/// Runs one student's quiz: fetching, answering, the countdown and recording.
///
/// Cheap to clone; clones share the same session.
#[derive(Clone)]
pub struct QuizSessionService {
    core: Arc<SessionCore>,
}

impl QuizSessionService {
    #[must_use]
    pub fn new(provider: Arc<dyn QuestionProvider>, recorder: Arc<ResultRecorder>) -> Self {
        let (updates, _) = watch::channel(SessionSnapshot::default());
        Self {
            core: Arc::new(SessionCore {
                provider,
                recorder,
                inner: Mutex::new(SessionInner::default()),
                updates,
            }),
        }
    }

    /// Fetch a quiz for `user` and start the countdown.
    ///
    /// Returns `FetchOutcome::Stale` if the session was cancelled or restarted
    /// while the request was in flight. Dropping the returned future before the
    /// provider answers returns the session to idle.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::InvalidTransition` if a quiz is already running,
    /// or `SessionError::Provider` if the quiz could not be fetched.
    pub async fn start(
        &self,
        user: &User,
        settings: &GenerationSettings,
    ) -> Result<FetchOutcome, SessionError> {
        let ticket = {
            let mut inner = self.core.lock();
            let ticket = inner.machine.begin_fetch()?;
            inner.countdown = None;
            inner.participant = Some(user.clone());
            inner.recording = false;
            inner.last_result = None;
            inner.last_error = None;
            self.core.publish(&inner);
            ticket
        };
        tracing::info!(student = user.name(), belt = %user.belt_rank(), "starting quiz");

        let mut pending = PendingFetch {
            core: &self.core,
            ticket: Some(ticket),
        };
        let fetched = self
            .core
            .provider
            .request_quiz(user.belt_rank(), settings, user.personal_api_key())
            .await;
        pending.settle();
        drop(pending);

        let mut inner = self.core.lock();
        let outcome = inner.machine.complete_fetch(ticket, fetched);
        match &outcome {
            Ok(FetchOutcome::Started) => {
                inner.countdown = Some(self.arm_countdown());
            }
            Ok(FetchOutcome::Stale) => {
                tracing::debug!("discarding quiz for a cancelled session");
            }
            Err(err) => {
                tracing::warn!(error = %err, "quiz fetch failed");
                inner.participant = None;
                inner.last_error = Some(err.to_string());
            }
        }
        self.core.publish(&inner);
        outcome
    }

    fn arm_countdown(&self) -> Countdown {
        let weak = Arc::downgrade(&self.core);
        Countdown::start(TICK_PERIOD, move || {
            let weak = weak.clone();
            async move {
                match weak.upgrade() {
                    Some(core) => core.on_tick().await,
                    None => ControlFlow::Break(()),
                }
            }
        })
    }

    /// Record the answer for `question_index`.
    ///
    /// # Errors
    ///
    /// Returns `SessionError` when no quiz is running or an index is out of range.
    pub fn select_answer(&self, question_index: usize, option: u8) -> Result<(), SessionError> {
        let mut inner = self.core.lock();
        inner.machine.select_answer(question_index, option)?;
        self.core.publish(&inner);
        Ok(())
    }

    /// Go to the next question; after the last one, stop the timer and record the result.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::Unanswered` if the current question has no answer,
    /// or `SessionError::Recorder` if the result could not be stored.
    pub async fn advance(&self) -> Result<AdvanceOutcome, SessionError> {
        let outcome = {
            let mut inner = self.core.lock();
            let outcome = inner.machine.advance()?;
            if outcome == AdvanceOutcome::Finished {
                inner.countdown = None;
            }
            self.core.publish(&inner);
            outcome
        };

        if outcome == AdvanceOutcome::Finished {
            self.core.finalize().await?;
        }
        Ok(outcome)
    }

    /// Abandon the current fetch or quiz. No result is recorded.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::InvalidTransition` when nothing is running.
    pub fn cancel(&self) -> Result<(), SessionError> {
        let mut inner = self.core.lock();
        if let Some(mut countdown) = inner.countdown.take() {
            countdown.cancel();
        }
        inner.machine.cancel()?;
        inner.participant = None;
        tracing::info!("quiz cancelled");
        self.core.publish(&inner);
        Ok(())
    }

    /// Drop any session state and return to idle.
    pub fn reset(&self) {
        let mut inner = self.core.lock();
        if let Some(mut countdown) = inner.countdown.take() {
            countdown.cancel();
        }
        inner.machine.reset();
        inner.participant = None;
        inner.recording = false;
        inner.last_result = None;
        inner.last_error = None;
        self.core.publish(&inner);
    }

    #[must_use]
    pub fn snapshot(&self) -> SessionSnapshot {
        self.core.lock().snapshot()
    }

    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<SessionSnapshot> {
        self.core.updates.subscribe()
    }

    /// The finished quiz and its recorded result, once recording succeeded.
    #[must_use]
    pub fn review(&self) -> Option<QuizReview> {
        let inner = self.core.lock();
        let done = inner.machine.finished()?;
        let result = inner.last_result.clone()?;
        Some(QuizReview {
            questions: done.quiz().questions().to_vec(),
            answers: done.answers().clone(),
            result,
        })
    }
}
