use leptos::ev::SubmitEvent;
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::api;
use crate::components::{alert, confirm};
use crate::models::{AddCommentRequest, Post};
use crate::state::AppState;

#[component]
pub(crate) fn PostCard(state: AppState, post: Post, on_deleted: Callback<i64>) -> impl IntoView {
    let post_id = post.id;
    let post = RwSignal::new(post);
    let comment = RwSignal::new(String::new());
    let busy = RwSignal::new(false);

    let liked = move || post.with(|post| post.is_liked_by(state.user_id()));
    let is_author = move || post.with(|post| post.is_authored_by(state.user_id()));

    let on_like = move |_| {
        let Some(token) = state.token() else {
            alert("Please log in to like posts");
            return;
        };

        busy.set(true);
        spawn_local(async move {
            match api::toggle_like(&token, post_id).await {
                Ok(updated) => post.set(updated),
                Err(err) => alert(&format!("Could not update like: {err}")),
            }
            busy.set(false);
        });
    };

    let on_comment = move |ev: SubmitEvent| {
        ev.prevent_default();

        let payload = match AddCommentRequest::from_form(&comment.get()) {
            Ok(payload) => payload,
            Err(message) => {
                alert(message);
                return;
            }
        };
        let Some(token) = state.token() else {
            alert("Please log in to comment");
            return;
        };

        busy.set(true);
        spawn_local(async move {
            match api::add_comment(&token, post_id, &payload).await {
                Ok(updated) => {
                    post.set(updated);
                    comment.set(String::new());
                }
                Err(err) => alert(&format!("Could not add comment: {err}")),
            }
            busy.set(false);
        });
    };

    let on_delete = move |_| {
        if !confirm("Delete this post?") {
            return;
        }
        let Some(token) = state.token() else {
            return;
        };

        busy.set(true);
        spawn_local(async move {
            match api::delete_post(&token, post_id).await {
                Ok(_) => on_deleted.run(post_id),
                Err(err) => {
                    alert(&format!("Could not delete post: {err}"));
                    busy.set(false);
                }
            }
        });
    };

    view! {
        <li class="post-card">
            <header>
                <strong>{move || post.with(|post| post.author_name.clone())}</strong>
                <small>{move || post.with(|post| post.created_at.clone())}</small>
            </header>
            {move || post.with(|post| post.text.clone()).map(|text| view! { <p>{text}</p> })}
            {move || {
                post.with(|post| post.image_url.clone())
                    .map(|src| view! { <img src=src alt="post image" /> })
            }}

            <div class="actions">
                <button
                    class:liked=liked
                    on:click=on_like
                    disabled=move || busy.get() || !state.is_authenticated()
                >
                    {move || if liked() { "Unlike" } else { "Like" }}
                    " ("
                    {move || post.with(|post| post.likes.len())}
                    ")"
                </button>
                <Show when=is_author>
                    <button on:click=on_delete disabled=move || busy.get()>"Delete"</button>
                </Show>
            </div>

            <ul class="comments">
                {move || {
                    post.get()
                        .comments
                        .into_iter()
                        .map(|comment| {
                            view! {
                                <li>
                                    <strong>{comment.username}</strong>
                                    ": "
                                    {comment.text}
                                </li>
                            }
                        })
                        .collect_view()
                }}
            </ul>

            <Show when=move || state.is_authenticated()>
                <form on:submit=on_comment>
                    <input
                        placeholder="Add a comment"
                        prop:value=move || comment.get()
                        on:input=move |ev| comment.set(event_target_value(&ev))
                    />
                    <button type="submit" disabled=move || busy.get()>"Comment"</button>
                </form>
            </Show>
        </li>
    }
}
