use leptos::ev::SubmitEvent;
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::api;
use crate::components::alert;
use crate::components::post_card::PostCard;
use crate::models::{CreatePostRequest, Post};
use crate::state::AppState;

fn load_posts(posts: RwSignal<Vec<Post>>, loading: RwSignal<bool>) {
    loading.set(true);
    spawn_local(async move {
        match api::list_posts().await {
            Ok(list) => posts.set(list),
            Err(err) => alert(&format!("Could not load posts: {err}")),
        }
        loading.set(false);
    });
}

#[component]
pub(crate) fn Feed(state: AppState) -> impl IntoView {
    let posts = RwSignal::new(Vec::<Post>::new());
    let loading = RwSignal::new(false);
    let text = RwSignal::new(String::new());
    let image_url = RwSignal::new(String::new());
    let busy = RwSignal::new(false);

    load_posts(posts, loading);

    let on_create = move |ev: SubmitEvent| {
        ev.prevent_default();

        let payload = match CreatePostRequest::from_form(&text.get(), &image_url.get()) {
            Ok(payload) => payload,
            Err(message) => {
                alert(message);
                return;
            }
        };
        let Some(token) = state.token() else {
            alert("Please log in first");
            return;
        };

        busy.set(true);
        spawn_local(async move {
            match api::create_post(&token, &payload).await {
                Ok(created) => {
                    posts.update(|posts| posts.insert(0, created));
                    text.set(String::new());
                    image_url.set(String::new());
                }
                Err(err) => alert(&format!("Could not create post: {err}")),
            }
            busy.set(false);
        });
    };

    let on_deleted = Callback::new(move |post_id: i64| {
        posts.update(|posts| posts.retain(|post| post.id != post_id));
    });

    view! {
        <Show when=move || state.is_authenticated()>
            <h2>"New post"</h2>
            <form on:submit=on_create>
                <textarea
                    placeholder="What's new?"
                    prop:value=move || text.get()
                    on:input=move |ev| text.set(event_target_value(&ev))
                ></textarea>
                <input
                    placeholder="image URL (optional)"
                    prop:value=move || image_url.get()
                    on:input=move |ev| image_url.set(event_target_value(&ev))
                />
                <button type="submit" disabled=move || busy.get()>"Post"</button>
            </form>
        </Show>

        <h2>"Feed"</h2>
        <button on:click=move |_| load_posts(posts, loading) disabled=move || loading.get()>
            "Refresh"
        </button>
        <Show when=move || !loading.get() && posts.with(Vec::is_empty)>
            <p>"No posts yet"</p>
        </Show>
        <ul class="posts">
            <For
                each=move || posts.get()
                key=Post::render_key
                children=move |post| view! { <PostCard state=state post=post on_deleted=on_deleted /> }
            />
        </ul>
    }
}
