use dioxus::prelude::*;
use services::AppState;

use crate::context::AppContext;
use crate::views::StartQuizButton;
use crate::vm::map_results;

#[component]
pub fn ResultsView() -> Element {
    let ctx = use_context::<AppContext>();
    let mut app_state = use_context::<Signal<AppState>>();
    let review = use_hook(|| ctx.quiz().review());

    let on_back = move |_| {
        if let Err(err) = app_state.write().router.back_to_dashboard() {
            tracing::warn!(error = %err, "cannot leave results");
        }
    };

    let Some(review) = review else {
        return rsx! {
            div { class: "page results-page",
                p { class: "view-subtitle", "No finished quiz to show." }
                button {
                    class: "btn btn-secondary",
                    r#type: "button",
                    onclick: on_back,
                    "Return to Dashboard"
                }
            }
        };
    };

    let vm = map_results(&review);
    let items = vm.items.iter().map(|item| {
        let class = if item.is_correct {
            "review-item review-item--correct"
        } else {
            "review-item review-item--wrong"
        };
        rsx! {
            li { key: "{item.number}", class: "{class}",
                p { class: "review-prompt", "{item.number}. {item.prompt}" }
                p { class: "review-prompt-bengali", "{item.prompt_bengali}" }
                p { class: "review-answer",
                    "Your answer: {item.chosen}"
                    if let Some(bengali) = item.chosen_bengali.as_ref() {
                        span { class: "review-bengali", " ({bengali})" }
                    }
                }
                if !item.is_correct {
                    p { class: "review-correct",
                        "Correct answer: {item.correct}"
                        span { class: "review-bengali", " ({item.correct_bengali})" }
                    }
                }
                div { class: "review-explanation",
                    p { "{item.explanation}" }
                    p { class: "review-bengali", "{item.explanation_bengali}" }
                }
            }
        }
    });

    rsx! {
        div { class: "page results-page",
            header { class: "view-header",
                h2 { class: "view-title", "{vm.headline}" }
                p { class: "view-subtitle", "{vm.student_name} · {vm.belt_label} Belt" }
            }
            section { class: "card results-score",
                span { class: "results-score-value", "{vm.score_label}" }
                span { class: "results-score-percent", "{vm.percentage}%" }
            }
            ol { class: "review-list", {items} }
            footer { class: "results-footer",
                button {
                    class: "btn btn-secondary",
                    r#type: "button",
                    onclick: on_back,
                    "Return to Dashboard"
                }
                StartQuizButton { label: "Train Again" }
            }
        }
    }
}
