use dojo_core::model::{Question, QuestionRecord, Quiz};

pub fn question(prompt: &str, correct: i64) -> Question {
    Question::try_from(QuestionRecord {
        question: prompt.to_string(),
        question_bengali: format!("{prompt} (bn)"),
        options: vec!["Age".into(), "Gedan".into(), "Chudan".into(), "Jodan".into()],
        options_bengali: vec!["আগে".into(), "গেদান".into(), "চুদান".into(), "জোদান".into()],
        correct_answer: correct,
        explanation: "Explanation".into(),
        explanation_bengali: "ব্যাখ্যা".into(),
    })
    .expect("valid question")
}

/// A five-question quiz whose correct indices are `correct`.
pub fn quiz_with_answers(correct: &[i64]) -> Quiz {
    let questions = correct
        .iter()
        .enumerate()
        .map(|(idx, c)| question(&format!("Q{}", idx + 1), *c))
        .collect();
    Quiz::new(questions).expect("five questions")
}
