use std::time::Duration;

use reqwest::{Client, Method, RequestBuilder};
use serde::{Deserialize, Serialize, de::DeserializeOwned};

use crate::error::{FeedClientError, FeedClientResult};
use crate::models::{AuthResponse, MessageResponse, Post};

#[derive(Debug, Serialize)]
struct SignupRequestDto<'a> {
    username: &'a str,
    email: &'a str,
    password: &'a str,
}

#[derive(Debug, Serialize)]
struct LoginRequestDto<'a> {
    email: &'a str,
    password: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct CreatePostRequestDto<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    text: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    image_url: Option<&'a str>,
}

#[derive(Debug, Serialize)]
struct AddCommentRequestDto<'a> {
    text: &'a str,
}

#[derive(Debug, Deserialize)]
struct ErrorResponseDto {
    message: Option<String>,
}

#[derive(Debug, Clone)]
/// REST client for `feed-server`.
pub struct HttpClient {
    base_url: String,
    client: Client,
}

impl HttpClient {
    /// Builds a client for the server at `base_url`.
    pub fn new(base_url: impl Into<String>) -> FeedClientResult<Self> {
        let client = Client::builder()
            .connect_timeout(Duration::from_secs(5))
            .timeout(Duration::from_secs(15))
            .build()?;

        Ok(Self {
            base_url: base_url.into(),
            client,
        })
    }

    fn endpoint(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }

    fn request(&self, method: Method, path: &str, token: Option<&str>) -> RequestBuilder {
        let request = self.client.request(method, self.endpoint(path));
        match token {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    async fn decode_error(response: reqwest::Response) -> FeedClientError {
        let status = response.status();
        let message = response
            .json::<ErrorResponseDto>()
            .await
            .ok()
            .and_then(|body| body.message);
        FeedClientError::from_http_status(status, message)
    }

    /// Sends the request and decodes a JSON body on 2xx.
    async fn send<TRes>(request: RequestBuilder) -> FeedClientResult<TRes>
    where
        TRes: DeserializeOwned,
    {
        let response = request.send().await.map_err(FeedClientError::from_reqwest)?;
        if !response.status().is_success() {
            return Err(Self::decode_error(response).await);
        }

        response
            .json::<TRes>()
            .await
            .map_err(FeedClientError::from_reqwest)
    }

    pub(crate) async fn signup(
        &self,
        username: &str,
        email: &str,
        password: &str,
    ) -> FeedClientResult<AuthResponse> {
        let payload = SignupRequestDto {
            username,
            email,
            password,
        };
        Self::send(self.request(Method::POST, "/api/auth/signup", None).json(&payload)).await
    }

    pub(crate) async fn login(&self, email: &str, password: &str) -> FeedClientResult<AuthResponse> {
        let payload = LoginRequestDto { email, password };
        Self::send(self.request(Method::POST, "/api/auth/login", None).json(&payload)).await
    }

    pub(crate) async fn list_posts(&self) -> FeedClientResult<Vec<Post>> {
        Self::send(self.request(Method::GET, "/api/posts", None)).await
    }

    pub(crate) async fn create_post(
        &self,
        token: &str,
        text: Option<&str>,
        image_url: Option<&str>,
    ) -> FeedClientResult<Post> {
        let payload = CreatePostRequestDto { text, image_url };
        Self::send(self.request(Method::POST, "/api/posts", Some(token)).json(&payload)).await
    }

    pub(crate) async fn toggle_like(&self, token: &str, post_id: i64) -> FeedClientResult<Post> {
        let path = format!("/api/posts/{post_id}/like");
        Self::send(self.request(Method::POST, &path, Some(token))).await
    }

    pub(crate) async fn add_comment(
        &self,
        token: &str,
        post_id: i64,
        text: &str,
    ) -> FeedClientResult<Post> {
        let path = format!("/api/posts/{post_id}/comment");
        let payload = AddCommentRequestDto { text };
        Self::send(self.request(Method::POST, &path, Some(token)).json(&payload)).await
    }

    pub(crate) async fn delete_post(&self, token: &str, post_id: i64) -> FeedClientResult<String> {
        let path = format!("/api/posts/{post_id}");
        let body: MessageResponse = Self::send(self.request(Method::DELETE, &path, Some(token))).await?;
        Ok(body.message)
    }
}
