use dioxus::prelude::*;
use services::{AppState, FetchOutcome};

use crate::context::AppContext;

#[derive(Clone, Debug, PartialEq, Eq)]
enum StartState {
    Idle,
    Fetching,
    Error(String),
}

/// Fetches a quiz for the logged-in student and moves to the quiz screen.
///
/// Provider failures stay on the current screen as an alert.
#[component]
pub fn StartQuizButton(label: String) -> Element {
    let ctx = use_context::<AppContext>();
    let mut app_state = use_context::<Signal<AppState>>();
    let mut status = use_signal(|| StartState::Idle);
    let quiz = ctx.quiz();
    let quiz_for_cancel = ctx.quiz();

    let on_start = move |_| {
        let (user, settings) = {
            let state = app_state.read();
            let Some(user) = state.router.user().cloned() else {
                return;
            };
            (user, state.settings.clone())
        };
        let quiz = quiz.clone();
        spawn(async move {
            status.set(StartState::Fetching);
            match quiz.start(&user, &settings).await {
                Ok(FetchOutcome::Started) => {
                    status.set(StartState::Idle);
                    if let Err(err) = app_state.write().router.quiz_started() {
                        tracing::warn!(error = %err, "quiz screen unavailable");
                    }
                }
                Ok(FetchOutcome::Stale) => status.set(StartState::Idle),
                Err(err) => status.set(StartState::Error(err.to_string())),
            }
        });
    };

    let fetching = status() == StartState::Fetching;
    rsx! {
        div { class: "start-quiz",
            if fetching {
                p { class: "start-loading", "The Sensei is preparing your questions..." }
                button {
                    class: "btn btn-secondary",
                    r#type: "button",
                    onclick: move |_| {
                        if let Err(err) = quiz_for_cancel.cancel() {
                            tracing::debug!(error = %err, "nothing to cancel");
                        }
                        status.set(StartState::Idle);
                    },
                    "Cancel"
                }
            } else {
                button {
                    class: "btn btn-primary btn-start",
                    r#type: "button",
                    onclick: on_start,
                    "{label}"
                }
            }
            if let StartState::Error(message) = status() {
                p { class: "start-error", role: "alert", "{message}" }
            }
        }
    }
}
