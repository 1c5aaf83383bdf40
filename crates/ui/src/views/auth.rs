use dioxus::prelude::*;
use dojo_core::model::{BeltRank, UserDraft};
use services::AppState;

use crate::context::AppContext;

#[component]
pub fn AuthView() -> Element {
    let ctx = use_context::<AppContext>();
    let mut app_state = use_context::<Signal<AppState>>();
    let mut name = use_signal(String::new);
    let mut password = use_signal(String::new);
    let mut belt = use_signal(BeltRank::default);
    let mut error = use_signal(|| None::<String>);
    let mut submitting = use_signal(|| false);

    let users = ctx.users();
    let on_submit = move |evt: FormEvent| {
        evt.prevent_default();
        if submitting() {
            return;
        }
        let users = users.clone();
        let draft = UserDraft::new(name(), password(), belt());
        spawn(async move {
            submitting.set(true);
            match users.login(draft).await {
                Ok(user) => {
                    error.set(None);
                    if let Err(err) = app_state.write().router.login(user) {
                        tracing::warn!(error = %err, "login navigation rejected");
                    }
                }
                Err(err) => error.set(Some(err.to_string())),
            }
            submitting.set(false);
        });
    };

    rsx! {
        div { class: "page auth-page",
            header { class: "view-header",
                h1 { class: "view-title", "Dojo" }
                p { class: "view-subtitle", "Enter the dojo to begin your training." }
            }
            form { class: "card auth-form", onsubmit: on_submit,
                label { class: "field",
                    span { class: "field-label", "Name" }
                    input {
                        class: "input",
                        r#type: "text",
                        placeholder: "Your name",
                        value: "{name}",
                        oninput: move |evt| name.set(evt.value()),
                    }
                }
                label { class: "field",
                    span { class: "field-label", "Password" }
                    input {
                        class: "input",
                        r#type: "password",
                        value: "{password}",
                        oninput: move |evt| password.set(evt.value()),
                    }
                }
                label { class: "field",
                    span { class: "field-label", "Belt rank" }
                    select {
                        class: "input",
                        onchange: move |evt| {
                            if let Ok(rank) = evt.value().parse::<BeltRank>() {
                                belt.set(rank);
                            }
                        },
                        for rank in BeltRank::ALL {
                            option {
                                value: rank.label(),
                                selected: rank == belt(),
                                "{rank.label()}"
                            }
                        }
                    }
                }
                if let Some(message) = error() {
                    p { class: "form-error", "{message}" }
                }
                button {
                    class: "btn btn-primary",
                    r#type: "submit",
                    disabled: submitting(),
                    if submitting() { "Entering..." } else { "Enter Dojo" }
                }
            }
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
        }
    }
}
