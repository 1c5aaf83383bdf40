use dioxus::prelude::*;
use services::Screen;

use crate::context::AppContext;
use crate::views::{AdminView, AuthView, DashboardView, QuizView, ResultsView};

#[component]
pub fn App() -> Element {
    rsx! {
        document::Stylesheet { href: asset!("/assets/style.css") }

        document::Title { "Dojo" }

        // A single root container for global layout CSS hooks.
        div { class: "app-root",
            ErrorBoundary {
                handle_error: |errors: ErrorContext| rsx! {
                    div { class: "fatal",
                        h1 { "Something went wrong" }
                        pre { "{errors:?}" }
                    }
                },
                ScreenSwitch {}
            }
        }
    }
}

/// Owns the application state signal and renders the router's current screen.
#[component]
pub fn ScreenSwitch() -> Element {
    let ctx = use_context::<AppContext>();
    let app_state = use_context_provider(|| Signal::new(ctx.initial_state()));
    let screen = app_state.read().router.screen();

    rsx! {
        match screen {
            Screen::Auth => rsx! { AuthView {} },
            Screen::Dashboard => rsx! { DashboardView {} },
            Screen::QuizSession => rsx! { QuizView {} },
            Screen::Results => rsx! { ResultsView {} },
            Screen::AdminPortal => rsx! { AdminView {} },
        }
    }
}
