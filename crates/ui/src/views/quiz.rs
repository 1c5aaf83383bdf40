use dioxus::prelude::*;
use services::{AppState, QuizPhase, SessionSnapshot};

use crate::context::AppContext;
use crate::vm::map_quiz;

#[component]
pub fn QuizView() -> Element {
    let ctx = use_context::<AppContext>();
    let mut app_state = use_context::<Signal<AppState>>();
    let quiz = ctx.quiz();
    let mut snapshot = use_signal(|| quiz.snapshot());

    let quiz_for_updates = ctx.quiz();
    use_future(move || {
        let quiz = quiz_for_updates.clone();
        async move {
            let mut updates = quiz.subscribe();
            loop {
                let latest = updates.borrow_and_update().clone();
                snapshot.set(latest);
                if updates.changed().await.is_err() {
                    break;
                }
            }
        }
    });

    use_effect(move || {
        let snap = snapshot.read();
        if snap.phase == QuizPhase::Finished && snap.result.is_some() {
            if let Err(err) = app_state.write().router.quiz_finished() {
                tracing::debug!(error = %err, "results already showing");
            }
        }
    });

    let quiz_for_select = ctx.quiz();
    let quiz_for_advance = ctx.quiz();
    let quiz_for_abort = ctx.quiz();
    let quiz_for_leave = ctx.quiz();

    let snap: SessionSnapshot = snapshot();
    let Some(vm) = map_quiz(&snap) else {
        let message = match (snap.phase, snap.last_error.as_deref()) {
            (QuizPhase::Finished, Some(error)) => format!("Your answers could not be saved. {error}"),
            (QuizPhase::Finished, None) => "Grading your answers...".to_string(),
            (QuizPhase::Fetching, _) => "The Sensei is preparing your questions...".to_string(),
            _ => "No quiz is running.".to_string(),
        };
        let stuck = snap.phase != QuizPhase::Finished || snap.last_error.is_some();
        return rsx! {
            div { class: "page quiz-page",
                p { class: "quiz-status", "{message}" }
                if stuck {
                    button {
                        class: "btn btn-secondary",
                        r#type: "button",
                        onclick: move |_| {
                            quiz_for_leave.reset();
                            if let Err(err) = app_state.write().router.quiz_cancelled() {
                                tracing::warn!(error = %err, "cannot leave quiz screen");
                            }
                        },
                        "Return to Dashboard"
                    }
                }
            }
        };
    };

    let question_index = vm.question_index;
    let timer_class = if vm.low_time {
        "quiz-timer quiz-timer--low"
    } else {
        "quiz-timer"
    };
    let options = vm.options.iter().map(|option| {
        let quiz = quiz_for_select.clone();
        let index = option.index;
        let class = if option.selected {
            "quiz-option quiz-option--selected"
        } else {
            "quiz-option"
        };
        rsx! {
            button {
                key: "{index}",
                class: "{class}",
                r#type: "button",
                onclick: move |_| {
                    if let Err(err) = quiz.select_answer(question_index, index) {
                        tracing::warn!(error = %err, "answer rejected");
                    }
                },
                span { class: "quiz-option-letter", "{option.letter}" }
                span { class: "quiz-option-text", "{option.text}" }
                span { class: "quiz-option-bengali", "{option.text_bengali}" }
            }
        }
    });

    rsx! {
        div { class: "page quiz-page",
            header { class: "quiz-header",
                span { class: "quiz-progress-label", "{vm.progress_label}" }
                span { class: "{timer_class}", "{vm.timer_label}" }
            }
            div { class: "quiz-progress",
                div { class: "quiz-progress-fill", style: "width: {vm.progress_percent}%" }
            }
            section { class: "card quiz-card",
                h3 { class: "quiz-prompt", "{vm.prompt}" }
                p { class: "quiz-prompt-bengali", "{vm.prompt_bengali}" }
                div { class: "quiz-options", {options} }
            }
            footer { class: "quiz-footer",
                button {
                    class: "btn btn-link quiz-abort",
                    r#type: "button",
                    onclick: move |_| {
                        if let Err(err) = quiz_for_abort.cancel() {
                            tracing::debug!(error = %err, "quiz already over");
                        }
                        if let Err(err) = app_state.write().router.quiz_cancelled() {
                            tracing::warn!(error = %err, "cannot leave quiz screen");
                        }
                    },
                    "Abort Session"
                }
                button {
                    class: "btn btn-primary",
                    r#type: "button",
                    disabled: !vm.can_advance,
                    onclick: move |_| {
                        let quiz = quiz_for_advance.clone();
                        spawn(async move {
                            if let Err(err) = quiz.advance().await {
                                tracing::warn!(error = %err, "could not advance quiz");
                            }
                        });
                    },
                    "{vm.advance_label}"
                }
            }
        }
    }
}
