use leptos::prelude::*;

use crate::components::feed::Feed;
use crate::components::login::Login;
use crate::components::signup::Signup;
use crate::state::{AppState, View};

#[component]
pub fn App() -> impl IntoView {
    let state = AppState::restore();

    let username = move || {
        state
            .identity
            .get()
            .map(|identity| identity.username)
            .unwrap_or_default()
    };

    view! {
        <main class="page">
            <nav class="nav">
                <strong>"Feed"</strong>
                <Show when=move || !state.is_authenticated()>
                    <button on:click=move |_| state.view.set(View::Signup)>"Signup"</button>
                    <button on:click=move |_| state.view.set(View::Login)>"Login"</button>
                </Show>
                <button on:click=move |_| state.view.set(View::Feed)>"Feed"</button>
                <Show when=move || state.is_authenticated()>
                    <span class="whoami">{username}</span>
                    <button on:click=move |_| state.logout()>"Logout"</button>
                </Show>
            </nav>

            <section class="container">
                {move || match state.view.get() {
                    View::Signup => view! { <Signup state=state /> }.into_any(),
                    View::Login => view! { <Login state=state /> }.into_any(),
                    View::Feed => view! { <Feed state=state /> }.into_any(),
                }}
            </section>
        </main>
    }
}
