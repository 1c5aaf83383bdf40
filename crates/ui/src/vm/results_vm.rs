use dojo_core::model::NO_ANSWER;
use services::QuizReview;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ReviewItemVm {
    pub number: usize,
    pub prompt: String,
    pub prompt_bengali: String,
    pub chosen: String,
    pub chosen_bengali: Option<String>,
    pub correct: String,
    pub correct_bengali: String,
    pub is_correct: bool,
    pub explanation: String,
    pub explanation_bengali: String,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ResultsVm {
    pub student_name: String,
    pub belt_label: &'static str,
    pub score_label: String,
    pub percentage: u32,
    pub headline: &'static str,
    pub items: Vec<ReviewItemVm>,
}

fn headline(percentage: u32) -> &'static str {
    match percentage {
        100 => "Perfect technique!",
        80..=99 => "Strong spirit. Osu!",
        50..=79 => "Keep training.",
        _ => "Back to the basics, student.",
    }
}

#[must_use]
pub fn map_results(review: &QuizReview) -> ResultsVm {
    let result = &review.result;
    let items = review
        .questions
        .iter()
        .enumerate()
        .map(|(idx, question)| {
            let chosen_index = review.answers.get(idx);
            let chosen = chosen_index
                .and_then(|opt| question.option(opt))
                .unwrap_or(NO_ANSWER)
                .to_string();
            let chosen_bengali = chosen_index
                .and_then(|opt| question.options_bengali().get(usize::from(opt)))
                .cloned();
            let correct_index = usize::from(question.correct_index());
            ReviewItemVm {
                number: idx + 1,
                prompt: question.prompt().to_string(),
                prompt_bengali: question.prompt_bengali().to_string(),
                chosen,
                chosen_bengali,
                correct: question.correct_option().to_string(),
                correct_bengali: question.options_bengali()[correct_index].clone(),
                is_correct: chosen_index == Some(question.correct_index()),
                explanation: question.explanation().to_string(),
                explanation_bengali: question.explanation_bengali().to_string(),
            }
        })
        .collect();

    ResultsVm {
        student_name: result.student_name().to_string(),
        belt_label: result.belt_rank().label(),
        score_label: format!("{}/{}", result.score(), result.total()),
        percentage: result.percentage(),
        headline: headline(result.percentage()),
        items,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dojo_core::model::{
        AnswerSet, BeltRank, Question, QuestionRecord, QuizResult, ResultId, UserDraft,
    };
    use dojo_core::time::fixed_now;

    fn question(prompt: &str, correct: i64) -> Question {
        Question::try_from(QuestionRecord {
            question: prompt.into(),
            question_bengali: format!("{prompt} (bn)"),
            options: vec!["Rei".into(), "Hajime".into(), "Yame".into(), "Mawatte".into()],
            options_bengali: vec!["রেই".into(), "হাজিমে".into(), "ইয়ামে".into(), "মাওয়াত্তে".into()],
            correct_answer: correct,
            explanation: format!("{prompt} explained"),
            explanation_bengali: format!("{prompt} ব্যাখ্যা"),
        })
        .unwrap()
    }

    #[test]
    fn maps_correct_wrong_and_unanswered() {
        let questions = vec![question("Bow", 0), question("Begin", 1), question("Stop", 2)];
        let answers = AnswerSet::from_slots(vec![Some(0), Some(3), None]).unwrap();
        let user = UserDraft::new("Rumana", "pw", BeltRank::Green)
            .validate()
            .unwrap();
        let result = QuizResult::build(ResultId::new("abc"), &user, &questions, &answers, fixed_now());
        let vm = map_results(&QuizReview {
            questions,
            answers,
            result,
        });

        assert_eq!(vm.score_label, "1/3");
        assert_eq!(vm.percentage, 33);
        assert_eq!(vm.headline, "Back to the basics, student.");
        assert_eq!(vm.belt_label, "Green");

        assert!(vm.items[0].is_correct);
        assert_eq!(vm.items[1].chosen, "Mawatte");
        assert_eq!(vm.items[1].correct_bengali, "হাজিমে");
        assert!(!vm.items[1].is_correct);
        assert_eq!(vm.items[2].chosen, NO_ANSWER);
        assert_eq!(vm.items[2].chosen_bengali, None);
        assert_eq!(vm.items[2].number, 3);
    }

    #[test]
    fn headline_follows_percentage() {
        assert_eq!(headline(100), "Perfect technique!");
        assert_eq!(headline(80), "Strong spirit. Osu!");
        assert_eq!(headline(60), "Keep training.");
        assert_eq!(headline(0), "Back to the basics, student.");
    }
}
