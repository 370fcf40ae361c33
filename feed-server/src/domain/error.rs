use thiserror::Error;

#[derive(Debug, Error)]
pub(crate) enum DomainError {
    #[error("{field}: {message}")]
    Validation {
        field: &'static str,
        message: &'static str,
    },

    #[error("{0} not found")]
    NotFound(String),

    #[error("{0} already registered")]
    AlreadyExists(String),

    #[error("only the author can delete this post")]
    Forbidden,

    /// Login with an email that has no account.
    #[error("User not found")]
    UnknownEmail,

    /// Login with a known email and the wrong password.
    #[error("Invalid password")]
    WrongPassword,

    /// Store, hashing or token failure; never shown to clients.
    #[error("feed store or crypto failure: {0}")]
    Unexpected(String),
}
