use dojo_core::model::OPTION_COUNT;
use services::{QuizPhase, SessionSnapshot};

use crate::vm::time_fmt::format_timer;

/// The timer turns red below this many seconds.
pub const LOW_TIME_SECS: u32 = 15;

const OPTION_LETTERS: [char; OPTION_COUNT] = ['A', 'B', 'C', 'D'];

#[must_use]
pub fn is_low_time(remaining_secs: u32) -> bool {
    remaining_secs < LOW_TIME_SECS
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct QuizOptionVm {
    pub index: u8,
    pub letter: char,
    pub text: String,
    pub text_bengali: String,
    pub selected: bool,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct QuizVm {
    pub question_index: usize,
    pub progress_label: String,
    pub progress_percent: usize,
    pub timer_label: String,
    pub low_time: bool,
    pub prompt: String,
    pub prompt_bengali: String,
    pub options: Vec<QuizOptionVm>,
    pub can_advance: bool,
    pub advance_label: &'static str,
}

/// Map a session snapshot to the question card, or `None` when no question is showing.
#[must_use]
pub fn map_quiz(snapshot: &SessionSnapshot) -> Option<QuizVm> {
    if snapshot.phase != QuizPhase::InProgress {
        return None;
    }
    let question = snapshot.question.as_ref()?;
    let current = snapshot.current;
    let total = snapshot.total.max(1);
    let selected = snapshot.answers.get(current);
    let is_last = current + 1 >= snapshot.total;

    let options = question
        .options()
        .iter()
        .zip(question.options_bengali())
        .zip(OPTION_LETTERS)
        .zip(0u8..)
        .map(|(((text, text_bengali), letter), index)| QuizOptionVm {
            index,
            letter,
            text: text.clone(),
            text_bengali: text_bengali.clone(),
            selected: selected == Some(index),
        })
        .collect();

    Some(QuizVm {
        question_index: current,
        progress_label: format!("Question {} of {}", current + 1, snapshot.total),
        progress_percent: (current + 1) * 100 / total,
        timer_label: format_timer(snapshot.remaining_secs),
        low_time: is_low_time(snapshot.remaining_secs),
        prompt: question.prompt().to_string(),
        prompt_bengali: question.prompt_bengali().to_string(),
        options,
        can_advance: selected.is_some(),
        advance_label: if is_last { "Submit Answers" } else { "Proceed" },
    })
}
