use gloo_net::http::{Request, RequestBuilder, Response};
use serde::de::DeserializeOwned;

use crate::models::{
    AddCommentRequest, AuthResponse, CreatePostRequest, LoginRequest, MessageResponse, Post,
    SignupRequest,
};

const API_BASE_URL: &str = match option_env!("FEED_API_BASE_URL") {
    Some(value) => value,
    None => "http://127.0.0.1:4000",
};

#[derive(Debug, Clone)]
pub(crate) enum ApiError {
    Network(String),
    Http { status: u16, message: String },
    Decode(String),
}

impl core::fmt::Display for ApiError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Network(msg) => write!(f, "network error: {msg}"),
            Self::Http { message, .. } => f.write_str(message),
            Self::Decode(msg) => write!(f, "decode error: {msg}"),
        }
    }
}

fn endpoint(path: &str) -> String {
    format!(
        "{}/{}",
        API_BASE_URL.trim_end_matches('/'),
        path.trim_start_matches('/')
    )
}

fn authorized(builder: RequestBuilder, token: &str) -> RequestBuilder {
    builder.header("Authorization", &format!("Bearer {token}"))
}

async fn parse_json<T: DeserializeOwned>(response: Response) -> Result<T, ApiError> {
    if !response.ok() {
        return Err(parse_error_body(response).await);
    }
    response
        .json::<T>()
        .await
        .map_err(|err| ApiError::Decode(err.to_string()))
}

async fn parse_error_body(response: Response) -> ApiError {
    let status = response.status();
    let message = match response.json::<MessageResponse>().await {
        Ok(body) if !body.message.trim().is_empty() => body.message,
        _ => match status {
            401 => "Please log in first".to_string(),
            403 => "You are not allowed to do that".to_string(),
            404 => "Post not found".to_string(),
            500..=599 => "Server error".to_string(),
            _ => format!("Request failed with status {status}"),
        },
    };

    ApiError::Http { status, message }
}

async fn send_json<B, T>(builder: RequestBuilder, body: &B) -> Result<T, ApiError>
where
    B: serde::Serialize,
    T: DeserializeOwned,
{
    let response = builder
        .json(body)
        .map_err(|err| ApiError::Network(err.to_string()))?
        .send()
        .await
        .map_err(|err| ApiError::Network(err.to_string()))?;
    parse_json(response).await
}

async fn send_empty<T: DeserializeOwned>(builder: RequestBuilder) -> Result<T, ApiError> {
    let response = builder
        .send()
        .await
        .map_err(|err| ApiError::Network(err.to_string()))?;
    parse_json(response).await
}

pub(crate) async fn signup(payload: &SignupRequest) -> Result<AuthResponse, ApiError> {
    send_json(Request::post(&endpoint("/api/auth/signup")), payload).await
}

pub(crate) async fn login(payload: &LoginRequest) -> Result<AuthResponse, ApiError> {
    send_json(Request::post(&endpoint("/api/auth/login")), payload).await
}

pub(crate) async fn list_posts() -> Result<Vec<Post>, ApiError> {
    send_empty(Request::get(&endpoint("/api/posts"))).await
}

pub(crate) async fn create_post(token: &str, payload: &CreatePostRequest) -> Result<Post, ApiError> {
    send_json(authorized(Request::post(&endpoint("/api/posts")), token), payload).await
}

pub(crate) async fn toggle_like(token: &str, id: i64) -> Result<Post, ApiError> {
    let url = endpoint(&format!("/api/posts/{id}/like"));
    send_empty(authorized(Request::post(&url), token)).await
}

pub(crate) async fn add_comment(
    token: &str,
    id: i64,
    payload: &AddCommentRequest,
) -> Result<Post, ApiError> {
    let url = endpoint(&format!("/api/posts/{id}/comment"));
    send_json(authorized(Request::post(&url), token), payload).await
}

pub(crate) async fn delete_post(token: &str, id: i64) -> Result<MessageResponse, ApiError> {
    let url = endpoint(&format!("/api/posts/{id}"));
    send_empty(authorized(Request::delete(&url), token)).await
}
