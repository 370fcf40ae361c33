//! Client library for the `feed-server` REST API.
//!
//! `FeedClient` wraps every endpoint and keeps the bearer token returned by
//! `signup`/`login` for the authenticated calls. `session` persists the
//! signed-in identity between runs.
#![warn(missing_docs)]

mod error;
mod http_client;
mod models;
pub mod session;

pub use error::{FeedClientError, FeedClientResult};
pub use models::{AuthResponse, AuthUser, Comment, MessageResponse, Post};

use http_client::HttpClient;

#[derive(Debug, Clone)]
/// Typed client for the feed API.
pub struct FeedClient {
    http: HttpClient,
    token: Option<String>,
}

impl FeedClient {
    /// Creates a client for the server at `base_url`, e.g. `http://127.0.0.1:4000`.
    pub fn new(base_url: impl Into<String>) -> FeedClientResult<Self> {
        Ok(Self {
            http: HttpClient::new(base_url)?,
            token: None,
        })
    }

    /// Sets the bearer token, e.g. one restored from a saved session.
    pub fn set_token(&mut self, token: impl Into<String>) {
        self.token = Some(token.into());
    }

    /// Returns the current token, if any.
    pub fn get_token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    /// Forgets the current token.
    pub fn clear_token(&mut self) {
        self.token = None;
    }

    /// Registers a new account and keeps the issued token.
    pub async fn signup(
        &mut self,
        username: &str,
        email: &str,
        password: &str,
    ) -> FeedClientResult<AuthResponse> {
        let result = self.http.signup(username, email, password).await?;
        self.token = Some(result.token.clone());
        Ok(result)
    }

    /// Signs in and keeps the issued token.
    pub async fn login(&mut self, email: &str, password: &str) -> FeedClientResult<AuthResponse> {
        let result = self.http.login(email, password).await?;
        self.token = Some(result.token.clone());
        Ok(result)
    }

    /// Returns all posts, newest first.
    pub async fn list_posts(&self) -> FeedClientResult<Vec<Post>> {
        self.http.list_posts().await
    }

    /// Creates a post. At least one of `text` and `image_url` must be non-blank.
    ///
    /// Requires a token.
    pub async fn create_post(
        &self,
        text: Option<&str>,
        image_url: Option<&str>,
    ) -> FeedClientResult<Post> {
        let token = self.require_token()?;
        self.http.create_post(token, text, image_url).await
    }

    /// Likes the post, or removes the like if it is already there.
    ///
    /// Requires a token.
    pub async fn toggle_like(&self, post_id: i64) -> FeedClientResult<Post> {
        let token = self.require_token()?;
        self.http.toggle_like(token, post_id).await
    }

    /// Appends a comment and returns the updated post.
    ///
    /// Requires a token.
    pub async fn add_comment(&self, post_id: i64, text: &str) -> FeedClientResult<Post> {
        let token = self.require_token()?;
        self.http.add_comment(token, post_id, text).await
    }

    /// Deletes one of the caller's own posts and returns the server's confirmation.
    ///
    /// Requires a token.
    pub async fn delete_post(&self, post_id: i64) -> FeedClientResult<String> {
        let token = self.require_token()?;
        self.http.delete_post(token, post_id).await
    }

    fn require_token(&self) -> FeedClientResult<&str> {
        self.token.as_deref().ok_or(FeedClientError::Unauthorized)
    }
}
