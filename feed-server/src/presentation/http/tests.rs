use std::sync::Arc;

use async_trait::async_trait;
use axum::Router;
use axum::body::{Body, to_bytes};
use axum::http::{Method, Request, StatusCode, header};
use serde_json::{Value, json};
use tower::ServiceExt;

use super::build_router;
use crate::data::post_repository::{NewPost, PostRepository};
use crate::data::repositories::memory::post_repository::MemoryPostRepository;
use crate::data::repositories::memory::user_repository::MemoryUserRepository;
use crate::domain::error::DomainError;
use crate::domain::post::Post;
use crate::infrastructure::jwt::JwtService;
use crate::presentation::AppState;

const SECRET: &str = "0123456789abcdef0123456789abcdef";

fn app() -> Router {
    app_with_posts(Arc::new(MemoryPostRepository::new()))
}

fn app_with_posts(posts: Arc<dyn PostRepository>) -> Router {
    let state = AppState::new(
        Arc::new(MemoryUserRepository::new()),
        posts,
        Arc::new(JwtService::new(SECRET)),
    );
    build_router(state)
}

async fn send(
    app: &Router,
    method: Method,
    uri: &str,
    token: Option<&str>,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }
    let request = match body {
        Some(body) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string())),
        None => builder.body(Body::empty()),
    }
    .expect("request must build");

    let response = app
        .clone()
        .oneshot(request)
        .await
        .expect("router is infallible");
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body must be readable");
    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(Value::Null)
    };
    (status, json)
}

async fn signup(app: &Router, username: &str, email: &str, password: &str) -> (String, i64) {
    let (status, body) = send(
        app,
        Method::POST,
        "/api/auth/signup",
        None,
        Some(json!({ "email": email, "username": username, "password": password })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "signup failed: {body}");
    (
        body["token"].as_str().expect("token").to_string(),
        body["user"]["id"].as_i64().expect("user id"),
    )
}

async fn create_text_post(app: &Router, token: &str, text: &str) -> Value {
    let (status, body) = send(
        app,
        Method::POST,
        "/api/posts",
        Some(token),
        Some(json!({ "text": text })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "create failed: {body}");
    body
}

#[tokio::test]
async fn healthz_is_ok() {
    let (status, body) = send(&app(), Method::GET, "/healthz", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
}

#[tokio::test]
async fn signup_returns_token_for_stored_identity() {
    let app = app();
    let (status, body) = send(
        &app,
        Method::POST,
        "/api/auth/signup",
        None,
        Some(json!({ "email": "a@x.com", "username": "alice", "password": "pw" })),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["message"], "Signup successful");
    assert_eq!(body["user"]["username"], "alice");

    let claims = JwtService::new(SECRET)
        .verify_token(body["token"].as_str().expect("token"))
        .expect("token must verify");
    assert_eq!(Some(claims.user_id), body["user"]["id"].as_i64());
    assert_eq!(claims.username, "alice");
}

#[tokio::test]
async fn signup_with_duplicate_email_is_bad_request() {
    let app = app();
    signup(&app, "alice", "a@x.com", "pw").await;

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/auth/signup",
        None,
        Some(json!({ "email": "A@X.com", "username": "eve", "password": "other" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["message"].as_str().is_some());
}

#[tokio::test]
async fn signup_with_missing_field_is_bad_request() {
    let (status, _) = send(
        &app(),
        Method::POST,
        "/api/auth/signup",
        None,
        Some(json!({ "email": "a@x.com", "username": "alice" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn login_failures_name_the_rejected_part() {
    let app = app();
    signup(&app, "alice", "a@x.com", "pw").await;

    let (wrong_status, wrong_body) = send(
        &app,
        Method::POST,
        "/api/auth/login",
        None,
        Some(json!({ "email": "a@x.com", "password": "nope" })),
    )
    .await;
    let (unknown_status, unknown_body) = send(
        &app,
        Method::POST,
        "/api/auth/login",
        None,
        Some(json!({ "email": "b@x.com", "password": "pw" })),
    )
    .await;

    assert_eq!(wrong_status, StatusCode::BAD_REQUEST);
    assert_eq!(wrong_body["message"], "Invalid password");
    assert_eq!(unknown_status, StatusCode::BAD_REQUEST);
    assert_eq!(unknown_body["message"], "User not found");
}

#[tokio::test]
async fn protected_routes_distinguish_missing_and_invalid_tokens() {
    let app = app();

    let (status, _) = send(
        &app,
        Method::POST,
        "/api/posts",
        None,
        Some(json!({ "text": "hi" })),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, _) = send(
        &app,
        Method::POST,
        "/api/posts",
        Some("garbage"),
        Some(json!({ "text": "hi" })),
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let request = Request::builder()
        .method(Method::POST)
        .uri("/api/posts/1/like")
        .header(header::AUTHORIZATION, "bearer whatever")
        .body(Body::empty())
        .expect("request must build");
    let response = app.clone().oneshot(request).await.expect("infallible");
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn create_post_requires_text_or_image() {
    let app = app();
    let (token, _) = signup(&app, "alice", "a@x.com", "pw").await;

    let (status, _) = send(
        &app,
        Method::POST,
        "/api/posts",
        Some(&token),
        Some(json!({ "text": "   ", "imageUrl": "" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/posts",
        Some(&token),
        Some(json!({ "imageUrl": " https://img.test/a.png " })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["imageUrl"], "https://img.test/a.png");
    assert_eq!(body["text"], Value::Null);
}

#[tokio::test]
async fn list_posts_is_public_and_newest_first() {
    let app = app();
    let (token, _) = signup(&app, "alice", "a@x.com", "pw").await;
    for text in ["one", "two", "three"] {
        create_text_post(&app, &token, text).await;
    }

    let (status, body) = send(&app, Method::GET, "/api/posts", None, None).await;
    assert_eq!(status, StatusCode::OK);
    let texts: Vec<&str> = body
        .as_array()
        .expect("array")
        .iter()
        .filter_map(|post| post["text"].as_str())
        .collect();
    assert_eq!(texts, vec!["three", "two", "one"]);
}

#[tokio::test]
async fn feed_walkthrough_signup_login_post_like_unlike() {
    let app = app();
    signup(&app, "alice", "a@x.com", "pw").await;
    let (bob_token, bob_id) = signup(&app, "bob", "b@x.com", "pw").await;

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/auth/login",
        None,
        Some(json!({ "email": "a@x.com", "password": "pw" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Login successful");
    let alice_token = body["token"].as_str().expect("token").to_string();

    let post = create_text_post(&app, &alice_token, "hi").await;
    assert_eq!(post["authorName"], "alice");
    assert_eq!(post["likes"], json!([]));
    let like_uri = format!("/api/posts/{}/like", post["id"]);

    let (status, liked) = send(&app, Method::POST, &like_uri, Some(&bob_token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(liked["likes"], json!([bob_id]));

    let (status, unliked) = send(&app, Method::POST, &like_uri, Some(&bob_token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(unliked["likes"], json!([]));
}

#[tokio::test]
async fn like_on_missing_post_is_not_found() {
    let app = app();
    let (token, _) = signup(&app, "alice", "a@x.com", "pw").await;

    let (status, body) = send(&app, Method::POST, "/api/posts/999/like", Some(&token), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "Post not found");
}

#[tokio::test]
async fn comments_are_validated_and_appended_in_order() {
    let app = app();
    let (alice, _) = signup(&app, "alice", "a@x.com", "pw").await;
    let (bob, bob_id) = signup(&app, "bob", "b@x.com", "pw").await;
    let post = create_text_post(&app, &alice, "hi").await;
    let uri = format!("/api/posts/{}/comment", post["id"]);

    let (status, _) = send(&app, Method::POST, &uri, Some(&bob), Some(json!({ "text": "  " }))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = send(
        &app,
        Method::POST,
        "/api/posts/999/comment",
        Some(&bob),
        Some(json!({ "text": "hello" })),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    send(&app, Method::POST, &uri, Some(&bob), Some(json!({ "text": "first" }))).await;
    let (status, body) = send(
        &app,
        Method::POST,
        &uri,
        Some(&alice),
        Some(json!({ "text": " second " })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let comments = body["comments"].as_array().expect("comments");
    assert_eq!(comments.len(), 2);
    assert_eq!(comments[0]["userId"], json!(bob_id));
    assert_eq!(comments[0]["username"], "bob");
    assert_eq!(comments[0]["text"], "first");
    assert_eq!(comments[1]["username"], "alice");
    assert_eq!(comments[1]["text"], "second");
}

#[tokio::test]
async fn only_the_author_can_delete_a_post() {
    let app = app();
    let (alice, _) = signup(&app, "alice", "a@x.com", "pw").await;
    let (bob, _) = signup(&app, "bob", "b@x.com", "pw").await;
    let post = create_text_post(&app, &alice, "hi").await;
    let uri = format!("/api/posts/{}", post["id"]);

    let (status, body) = send(&app, Method::DELETE, &uri, Some(&bob), None).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["message"], "only the author can delete this post");

    let (status, body) = send(&app, Method::DELETE, &uri, Some(&alice), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Post deleted successfully");

    let (status, _) = send(&app, Method::DELETE, &uri, Some(&alice), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (_, listed) = send(&app, Method::GET, "/api/posts", None, None).await;
    assert_eq!(listed, json!([]));
}

struct FailingPostRepository;

#[async_trait]
impl PostRepository for FailingPostRepository {
    async fn create_post(&self, _input: NewPost) -> Result<Post, DomainError> {
        Err(DomainError::Unexpected("connection reset".to_string()))
    }

    async fn get_post(&self, _id: i64) -> Result<Option<Post>, DomainError> {
        Err(DomainError::Unexpected("connection reset".to_string()))
    }

    async fn list_posts(&self) -> Result<Vec<Post>, DomainError> {
        Err(DomainError::Unexpected("connection reset".to_string()))
    }

    async fn save_post(&self, _post: &Post) -> Result<Option<Post>, DomainError> {
        Err(DomainError::Unexpected("connection reset".to_string()))
    }

    async fn delete_post(&self, _id: i64) -> Result<bool, DomainError> {
        Err(DomainError::Unexpected("connection reset".to_string()))
    }
}

#[tokio::test]
async fn store_failures_become_internal_errors() {
    let app = app_with_posts(Arc::new(FailingPostRepository));
    let (token, _) = signup(&app, "alice", "a@x.com", "pw").await;

    let (status, body) = send(&app, Method::GET, "/api/posts", None, None).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["message"], "internal server error");

    let (status, _) = send(&app, Method::POST, "/api/posts/1/like", Some(&token), None).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
}
