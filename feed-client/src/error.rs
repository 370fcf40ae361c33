use thiserror::Error;

#[derive(Debug, Error)]
/// Errors returned by `feed-client`.
pub enum FeedClientError {
    /// Transport failure or an undecodable response body.
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    /// No token is held, or the server rejected the request as unauthenticated.
    #[error("unauthorized")]
    Unauthorized,

    /// The server refused the operation for this identity.
    #[error("forbidden: {0}")]
    Forbidden(String),

    /// The requested post does not exist.
    #[error("not found")]
    NotFound,

    /// Validation failure or any other rejected request, with the server's message.
    #[error("{0}")]
    InvalidRequest(String),

    /// The persisted session could not be read or written.
    #[error("session storage error: {0}")]
    Session(#[from] std::io::Error),
}

/// Result of `feed-client` operations.
pub type FeedClientResult<T> = Result<T, FeedClientError>;

impl FeedClientError {
    pub(crate) fn from_http_status(status: reqwest::StatusCode, message: Option<String>) -> Self {
        let message = message.unwrap_or_else(|| format!("http status {status}"));
        match status {
            reqwest::StatusCode::UNAUTHORIZED => Self::Unauthorized,
            reqwest::StatusCode::FORBIDDEN => Self::Forbidden(message),
            reqwest::StatusCode::NOT_FOUND => Self::NotFound,
            _ => Self::InvalidRequest(message),
        }
    }

    pub(crate) fn from_reqwest(err: reqwest::Error) -> Self {
        if let Some(status) = err.status() {
            return Self::from_http_status(status, None);
        }
        Self::Http(err)
    }
}
