use dioxus::prelude::*;
use services::AppState;

use crate::context::AppContext;
use crate::views::StartQuizButton;

#[derive(Clone, Debug, PartialEq, Eq)]
enum KeyStatus {
    Idle,
    Saved,
    Cleared,
    Testing,
    Valid,
    Rejected,
    Error(String),
}

impl KeyStatus {
    fn message(&self) -> Option<String> {
        match self {
            KeyStatus::Idle => None,
            KeyStatus::Saved => Some("Personal key saved.".into()),
            KeyStatus::Cleared => Some("Personal key removed.".into()),
            KeyStatus::Testing => Some("Testing key...".into()),
            KeyStatus::Valid => Some("Key is valid.".into()),
            KeyStatus::Rejected => Some("Key was rejected.".into()),
            KeyStatus::Error(message) => Some(message.clone()),
        }
    }
}

#[component]
pub fn DashboardView() -> Element {
    let ctx = use_context::<AppContext>();
    let mut app_state = use_context::<Signal<AppState>>();
    let mut key_input = use_signal(String::new);
    let mut key_status = use_signal(|| KeyStatus::Idle);

    let Some(user) = app_state.read().router.user().cloned() else {
        return rsx! {
            p { class: "view-subtitle", "No student is logged in." }
        };
    };

    let users = ctx.users();
    let user_for_save = user.clone();
    let on_save_key = move |_| {
        let users = users.clone();
        let user = user_for_save.clone();
        let key = key_input().trim().to_string();
        if key.is_empty() {
            return;
        }
        spawn(async move {
            match users.set_personal_api_key(&user, Some(key)).await {
                Ok(updated) => {
                    app_state.write().router.update_user(updated);
                    key_input.set(String::new());
                    key_status.set(KeyStatus::Saved);
                }
                Err(err) => key_status.set(KeyStatus::Error(err.to_string())),
            }
        });
    };

    let users = ctx.users();
    let user_for_clear = user.clone();
    let on_clear_key = move |_| {
        let users = users.clone();
        let user = user_for_clear.clone();
        spawn(async move {
            match users.set_personal_api_key(&user, None).await {
                Ok(updated) => {
                    app_state.write().router.update_user(updated);
                    key_status.set(KeyStatus::Cleared);
                }
                Err(err) => key_status.set(KeyStatus::Error(err.to_string())),
            }
        });
    };

    let provider = ctx.provider();
    let saved_key = user.personal_api_key().map(str::to_string);
    let on_test_key = move |_| {
        let provider = provider.clone();
        let typed = key_input().trim().to_string();
        let Some(key) = Some(typed)
            .filter(|key| !key.is_empty())
            .or_else(|| saved_key.clone())
        else {
            key_status.set(KeyStatus::Error("Enter a key to test.".into()));
            return;
        };
        spawn(async move {
            key_status.set(KeyStatus::Testing);
            let valid = provider.test_credential(&key).await;
            key_status.set(if valid {
                KeyStatus::Valid
            } else {
                KeyStatus::Rejected
            });
        });
    };

    let users = ctx.users();
    let quiz = ctx.quiz();
    let on_logout = move |_| {
        let users = users.clone();
        let quiz = quiz.clone();
        spawn(async move {
            if let Err(err) = users.logout().await {
                tracing::warn!(error = %err, "failed to clear remembered student");
            }
            quiz.reset();
            if let Err(err) = app_state.write().router.logout() {
                tracing::warn!(error = %err, "logout rejected");
            }
        });
    };

    let belt = user.belt_rank();
    let belt_class = format!("belt-badge belt-{}", belt.level());
    let key_label = if user.has_personal_api_key() {
        "Using your personal key"
    } else {
        "Using the academy key"
    };

    rsx! {
        div { class: "page dashboard-page",
            header { class: "view-header",
                h2 { class: "view-title", "Osu, {user.name()}!" }
                div { class: "dashboard-belt",
                    span { class: "{belt_class}", "{belt.initial()}" }
                    span { class: "belt-label", "{belt.label()} Belt" }
                }
            }
            div { class: "view-divider" }

            section { class: "card dashboard-start",
                h3 { "Today's training" }
                p { "Five questions. Two minutes. Answer in English or Bengali." }
                StartQuizButton { label: "Begin Training" }
            }

            section { class: "card dashboard-key",
                h3 { "Personal AI key" }
                p { class: "key-source", "{key_label}" }
                input {
                    class: "input",
                    r#type: "password",
                    placeholder: "Paste a Gemini API key",
                    value: "{key_input}",
                    oninput: move |evt| key_input.set(evt.value()),
                }
                div { class: "key-actions",
                    button {
                        class: "btn btn-secondary",
                        r#type: "button",
                        onclick: on_save_key,
                        "Save Key"
                    }
                    button {
                        class: "btn btn-secondary",
                        r#type: "button",
                        onclick: on_test_key,
                        "Test Key"
                    }
                    if user.has_personal_api_key() {
                        button {
                            class: "btn btn-link",
                            r#type: "button",
                            onclick: on_clear_key,
                            "Remove Key"
                        }
                    }
                }
                if let Some(message) = key_status.read().message() {
                    p { class: "key-status", "{message}" }
                }
            }

            footer { class: "dashboard-footer",
                button {
                    class: "btn btn-link",
                    r#type: "button",
                    onclick: move |_| {
                        if let Err(err) = app_state.write().router.open_admin() {
                            tracing::warn!(error = %err, "admin portal unavailable");
                        }
                    },
                    "Sensei Portal"
                }
                button {
                    class: "btn btn-secondary",
                    r#type: "button",
                    onclick: on_logout,
                    "Log Out"
                }
            }
        }
    }
}
