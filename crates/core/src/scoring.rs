//! Quiz scoring.

use crate::model::{AnswerSet, Question};

/// Correct answers out of the number of questions asked.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Score {
    pub correct: u32,
    pub total: u32,
}

impl Score {
    /// Whole percentage rounded down; 0 for an empty quiz.
    #[must_use]
    pub fn percentage(self) -> u32 {
        if self.total == 0 {
            return 0;
        }
        self.correct.saturating_mul(100) / self.total
    }
}

/// Count the questions whose recorded answer equals the correct index.
///
/// Unset slots never match, and slots beyond the end of `answers` count as
/// unset, so the result is always within `0..=questions.len()`.
#[must_use]
pub fn score(questions: &[Question], answers: &AnswerSet) -> Score {
    let correct = questions
        .iter()
        .enumerate()
        .filter(|(idx, question)| answers.get(*idx) == Some(question.correct_index()))
        .count();

    Score {
        correct: u32::try_from(correct).unwrap_or(u32::MAX),
        total: u32::try_from(questions.len()).unwrap_or(u32::MAX),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::QuestionRecord;

    fn question(correct: i64) -> Question {
        Question::try_from(QuestionRecord {
            question: "Q".into(),
            question_bengali: "প্র".into(),
            options: vec!["a".into(), "b".into(), "c".into(), "d".into()],
            options_bengali: vec!["ক".into(), "খ".into(), "গ".into(), "ঘ".into()],
            correct_answer: correct,
            explanation: String::new(),
            explanation_bengali: String::new(),
        })
        .unwrap()
    }

    #[test]
    fn counts_matching_indices() {
        let questions: Vec<_> = [1, 0, 0, 1, 3].into_iter().map(question).collect();
        let answers =
            AnswerSet::from_slots(vec![Some(1), Some(0), Some(2), Some(1), Some(3)]).unwrap();
        assert_eq!(
            score(&questions, &answers),
            Score {
                correct: 4,
                total: 5
            }
        );
    }

    #[test]
    fn unset_slots_never_match() {
        let questions: Vec<_> = [0, 0].into_iter().map(question).collect();
        let answers = AnswerSet::new(2);
        assert_eq!(score(&questions, &answers).correct, 0);
    }

    #[test]
    fn short_answer_set_is_treated_as_unset() {
        let questions: Vec<_> = [2, 2, 2].into_iter().map(question).collect();
        let answers = AnswerSet::from_slots(vec![Some(2)]).unwrap();
        let result = score(&questions, &answers);
        assert_eq!(result.correct, 1);
        assert_eq!(result.total, 3);
    }

    #[test]
    fn score_stays_within_bounds_for_every_answer_pattern() {
        let correct = [0_i64, 1, 2, 3, 0];
        let questions: Vec<_> = correct.into_iter().map(question).collect();
        // Each slot cycles through unset and all four options.
        for pattern in 0..5_u32.pow(5) {
            let mut slots = Vec::with_capacity(5);
            let mut rest = pattern;
            for _ in 0..5 {
                let digit = rest % 5;
                rest /= 5;
                slots.push(if digit == 4 { None } else { Some(digit as u8) });
            }
            let expected = slots
                .iter()
                .zip(correct)
                .filter(|(slot, c)| slot.map(i64::from) == Some(*c))
                .count() as u32;
            let answers = AnswerSet::from_slots(slots).unwrap();
            let result = score(&questions, &answers);
            assert!(result.correct <= result.total);
            assert_eq!(result.correct, expected);
        }
    }

    #[test]
    fn percentage_handles_empty_quiz() {
        assert_eq!(Score { correct: 0, total: 0 }.percentage(), 0);
        assert_eq!(Score { correct: 3, total: 5 }.percentage(), 60);
    }
}
