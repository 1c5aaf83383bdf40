use dioxus::prelude::*;
use services::{AdminAccess, AppState};

use crate::context::AppContext;
use crate::views::{ViewError, ViewState, view_state_from_resource};
use crate::vm::{SettingsFormVm, map_result_rows};

#[component]
pub fn AdminView() -> Element {
    let ctx = use_context::<AppContext>();
    let mut app_state = use_context::<Signal<AppState>>();
    let mut access = use_signal(|| None::<AdminAccess>);
    let mut pin = use_signal(String::new);
    let mut pin_error = use_signal(|| None::<String>);

    let admin = ctx.admin();
    let on_unlock = move |evt: FormEvent| {
        evt.prevent_default();
        match admin.verify_pin(&pin()) {
            Ok(granted) => {
                pin_error.set(None);
                access.set(Some(granted));
            }
            Err(err) => pin_error.set(Some(err.to_string())),
        }
        pin.set(String::new());
    };

    let on_close = move |_| {
        if let Err(err) = app_state.write().router.close_admin() {
            tracing::warn!(error = %err, "cannot leave admin portal");
        }
    };

    rsx! {
        div { class: "page admin-page",
            header { class: "view-header",
                h2 { class: "view-title", "Sensei Portal" }
                button {
                    class: "btn btn-link",
                    r#type: "button",
                    onclick: on_close,
                    "Close"
                }
            }
            div { class: "view-divider" }
            match access() {
                Some(granted) => rsx! { AdminPanel { access: granted } },
                None => rsx! {
                    form { class: "card admin-gate", onsubmit: on_unlock,
                        label { class: "field",
                            span { class: "field-label", "Sensei code" }
                            input {
                                class: "input",
                                r#type: "password",
                                inputmode: "numeric",
                                maxlength: "4",
                                value: "{pin}",
                                oninput: move |evt| pin.set(evt.value()),
                            }
                        }
                        if let Some(message) = pin_error() {
                            p { class: "form-error", "{message}" }
                        }
                        button { class: "btn btn-primary", r#type: "submit", "Unlock" }
                    }
                },
            }
        }
    }
}

#[component]
fn AdminPanel(access: AdminAccess) -> Element {
    rsx! {
        ResultLog { access }
        SettingsEditor { access }
        CredentialTester { access }
    }
}

#[component]
fn ResultLog(access: AdminAccess) -> Element {
    let ctx = use_context::<AppContext>();
    let admin = ctx.admin();
    let resource = use_resource(move || {
        let admin = admin.clone();
        async move {
            let results = admin
                .list_results(&access)
                .await
                .map_err(|_| ViewError::Unknown)?;
            Ok::<_, ViewError>(map_result_rows(&results))
        }
    });
    let state = view_state_from_resource(resource);

    rsx! {
        section { class: "card admin-results",
            h3 { "Student results" }
            match state {
                ViewState::Idle => rsx! {
                    p { "Idle" }
                },
                ViewState::Loading => rsx! {
                    p { "Loading..." }
                },
                ViewState::Error(err) => rsx! {
                    p { "{err.message()}" }
                    button {
                        class: "btn btn-secondary",
                        r#type: "button",
                        onclick: move |_| {
                            let mut resource = resource;
                            resource.restart();
                        },
                        "Retry"
                    }
                },
                ViewState::Ready(rows) => {
                    if rows.is_empty() {
                        rsx! {
                            p { "No quizzes recorded yet." }
                        }
                    } else {
                        rsx! {
                            table { class: "results-table",
                                thead {
                                    tr {
                                        th { "When" }
                                        th { "Student" }
                                        th { "Belt" }
                                        th { "Score" }
                                        th { "Answers" }
                                    }
                                }
                                tbody {
                                    for row in rows {
                                        tr { key: "{row.id}",
                                            td { "{row.completed_at_str}" }
                                            td { "{row.student}" }
                                            td { "{row.belt_label}" }
                                            td {
                                                div { class: "score-bar",
                                                    div {
                                                        class: "score-bar-fill",
                                                        style: "width: {row.percentage}%",
                                                    }
                                                }
                                                span { class: "score-label", "{row.score_label}" }
                                            }
                                            td { class: "result-marks",
                                                for (idx, correct) in row.marks.iter().enumerate() {
                                                    span {
                                                        key: "{idx}",
                                                        class: if *correct { "mark mark--correct" } else { "mark mark--wrong" },
                                                        if *correct { "✓" } else { "✗" }
                                                    }
                                                }
                                            }
                                        }
                                    }
                                }
                            }
                        }
                    }
                }
            }
        }
    }
}

#[component]
fn SettingsEditor(access: AdminAccess) -> Element {
    let ctx = use_context::<AppContext>();
    let mut app_state = use_context::<Signal<AppState>>();
    let mut form = use_signal(|| SettingsFormVm::from(&app_state.peek().settings));
    let mut message = use_signal(|| None::<String>);

    let admin = ctx.admin();
    let on_save = move |evt: FormEvent| {
        evt.prevent_default();
        let admin = admin.clone();
        let draft = match form.read().to_draft() {
            Ok(draft) => draft,
            Err(err) => {
                message.set(Some(err));
                return;
            }
        };
        spawn(async move {
            match admin.save_settings(&access, draft).await {
                Ok(saved) => {
                    form.set(SettingsFormVm::from(&saved));
                    app_state.write().settings = saved;
                    message.set(Some("Settings saved.".into()));
                }
                Err(err) => message.set(Some(err.to_string())),
            }
        });
    };

    let admin = ctx.admin();
    let on_reset = move |_| {
        let admin = admin.clone();
        spawn(async move {
            match admin.reset_settings(&access).await {
                Ok(defaults) => {
                    form.set(SettingsFormVm::from(&defaults));
                    app_state.write().settings = defaults;
                    message.set(Some("Settings restored to defaults.".into()));
                }
                Err(err) => message.set(Some(err.to_string())),
            }
        });
    };

    let current = form();
    rsx! {
        section { class: "card admin-settings",
            h3 { "Question generation" }
            form { class: "settings-form", onsubmit: on_save,
                label { class: "field",
                    span { class: "field-label", "Model" }
                    input {
                        class: "input",
                        value: "{current.model}",
                        oninput: move |evt| form.write().model = evt.value(),
                    }
                }
                label { class: "field",
                    span { class: "field-label", "Instruction template" }
                    textarea {
                        class: "input settings-template",
                        rows: "10",
                        value: "{current.template}",
                        oninput: move |evt| form.write().template = evt.value(),
                    }
                }
                div { class: "settings-grid",
                    label { class: "field",
                        span { class: "field-label", "Temperature" }
                        input {
                            class: "input",
                            value: "{current.temperature}",
                            oninput: move |evt| form.write().temperature = evt.value(),
                        }
                    }
                    label { class: "field",
                        span { class: "field-label", "Top P" }
                        input {
                            class: "input",
                            value: "{current.top_p}",
                            oninput: move |evt| form.write().top_p = evt.value(),
                        }
                    }
                    label { class: "field",
                        span { class: "field-label", "Top K" }
                        input {
                            class: "input",
                            value: "{current.top_k}",
                            oninput: move |evt| form.write().top_k = evt.value(),
                        }
                    }
                    label { class: "field",
                        span { class: "field-label", "Max output tokens" }
                        input {
                            class: "input",
                            value: "{current.max_output_tokens}",
                            oninput: move |evt| form.write().max_output_tokens = evt.value(),
                        }
                    }
                }
                label { class: "field field--inline",
                    input {
                        r#type: "checkbox",
                        checked: current.use_search_grounding,
                        onchange: move |evt| form.write().use_search_grounding = evt.checked(),
                    }
                    span { class: "field-label", "Ground answers with Google Search" }
                }
                if let Some(text) = message() {
                    p { class: "settings-message", "{text}" }
                }
                div { class: "settings-actions",
                    button { class: "btn btn-primary", r#type: "submit", "Save Settings" }
                    button {
                        class: "btn btn-secondary",
                        r#type: "button",
                        onclick: on_reset,
                        "Reset to Defaults"
                    }
                }
            }
        }
    }
}

#[component]
fn CredentialTester(access: AdminAccess) -> Element {
    let ctx = use_context::<AppContext>();
    let mut key = use_signal(String::new);
    let mut verdict = use_signal(|| None::<bool>);
    let mut testing = use_signal(|| false);

    let admin = ctx.admin();
    let on_test = move |_| {
        let admin = admin.clone();
        let candidate = key().trim().to_string();
        if candidate.is_empty() {
            return;
        }
        spawn(async move {
            testing.set(true);
            verdict.set(Some(admin.test_credential(&access, &candidate).await));
            testing.set(false);
        });
    };

    rsx! {
        section { class: "card admin-credential",
            h3 { "Test an API key" }
            input {
                class: "input",
                r#type: "password",
                placeholder: "Gemini API key",
                value: "{key}",
                oninput: move |evt| {
                    key.set(evt.value());
                    verdict.set(None);
                },
            }
            button {
                class: "btn btn-secondary",
                r#type: "button",
                disabled: testing(),
                onclick: on_test,
                if testing() { "Testing..." } else { "Test Key" }
            }
            match verdict() {
                Some(true) => rsx! { p { class: "key-status key-status--ok", "Key is valid." } },
                Some(false) => rsx! { p { class: "key-status key-status--bad", "Key was rejected." } },
                None => rsx! {},
            }
        }
    }
}
