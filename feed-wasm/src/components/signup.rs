use leptos::ev::SubmitEvent;
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::api;
use crate::components::alert;
use crate::models::{Identity, SignupRequest};
use crate::state::AppState;

#[component]
pub(crate) fn Signup(state: AppState) -> impl IntoView {
    let username = RwSignal::new(String::new());
    let email = RwSignal::new(String::new());
    let password = RwSignal::new(String::new());
    let busy = RwSignal::new(false);

    let on_submit = move |ev: SubmitEvent| {
        ev.prevent_default();

        let payload = SignupRequest {
            username: username.get().trim().to_string(),
            email: email.get().trim().to_string(),
            password: password.get(),
        };
        if payload.username.is_empty() || payload.email.is_empty() || payload.password.is_empty() {
            alert("Fill in username, email and password");
            return;
        }

        busy.set(true);
        spawn_local(async move {
            match api::signup(&payload).await {
                Ok(auth) => state.login(Identity::from(auth)),
                Err(err) => alert(&format!("Signup failed: {err}")),
            }
            busy.set(false);
        });
    };

    view! {
        <h2>"Signup"</h2>
        <form on:submit=on_submit>
            <input
                placeholder="username"
                prop:value=move || username.get()
                on:input=move |ev| username.set(event_target_value(&ev))
            />
            <input
                placeholder="email"
                type="email"
                prop:value=move || email.get()
                on:input=move |ev| email.set(event_target_value(&ev))
            />
            <input
                placeholder="password"
                type="password"
                prop:value=move || password.get()
                on:input=move |ev| password.set(event_target_value(&ev))
            />
            <button type="submit" disabled=move || busy.get()>"Signup"</button>
        </form>
    }
}
