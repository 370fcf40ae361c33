use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::error::DomainError;

/// A comment lives inside its post and has no identity of its own.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub(crate) struct Comment {
    pub(crate) user_id: i64,
    pub(crate) username: String,
    pub(crate) text: String,
    pub(crate) created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub(crate) struct Post {
    pub(crate) id: i64,
    pub(crate) author_id: i64,
    /// Snapshot of the author's username at creation time.
    pub(crate) author_name: String,
    pub(crate) text: Option<String>,
    pub(crate) image_url: Option<String>,
    pub(crate) likes: Vec<i64>,
    pub(crate) comments: Vec<Comment>,
    pub(crate) created_at: DateTime<Utc>,
    pub(crate) updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub(crate) struct CreatePostRequest {
    pub(crate) text: Option<String>,
    pub(crate) image_url: Option<String>,
}

impl CreatePostRequest {
    pub(crate) fn validate(self) -> Result<Self, DomainError> {
        let text = normalize_optional(self.text);
        let image_url = normalize_optional(self.image_url);

        if text.is_none() && image_url.is_none() {
            return Err(DomainError::Validation {
                field: "text",
                message: "post must have text or image",
            });
        }
        Ok(Self { text, image_url })
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub(crate) struct NewCommentRequest {
    pub(crate) text: String,
}

impl NewCommentRequest {
    pub(crate) fn validate(self) -> Result<Self, DomainError> {
        let text = self.text.trim();
        if text.is_empty() {
            return Err(DomainError::Validation {
                field: "text",
                message: "comment must not be empty",
            });
        }
        Ok(Self {
            text: text.to_string(),
        })
    }
}

impl Post {
    #[allow(clippy::too_many_arguments)]
    pub(crate) fn new(
        id: i64,
        author_id: i64,
        author_name: impl Into<String>,
        text: Option<String>,
        image_url: Option<String>,
        likes: Vec<i64>,
        comments: Vec<Comment>,
        created_at: DateTime<Utc>,
        updated_at: DateTime<Utc>,
    ) -> Result<Self, DomainError> {
        validate_positive_i64("id", id)?;
        validate_positive_i64("author_id", author_id)?;

        let author_name = author_name.into().trim().to_string();
        if author_name.is_empty() {
            return Err(DomainError::Validation {
                field: "author_name",
                message: "must not be empty",
            });
        }

        if updated_at < created_at {
            return Err(DomainError::Validation {
                field: "updated_at",
                message: "must be >= created_at",
            });
        }

        Ok(Self {
            id,
            author_id,
            author_name,
            text: normalize_optional(text),
            image_url: normalize_optional(image_url),
            likes,
            comments,
            created_at,
            updated_at,
        })
    }

    /// Flips the user's membership in `likes`: an existing entry is removed
    /// in place, a missing one is appended. Returns `true` if the user likes
    /// the post afterwards.
    pub(crate) fn toggle_like(&mut self, user_id: i64) -> bool {
        match self.likes.iter().position(|id| *id == user_id) {
            Some(index) => {
                self.likes.remove(index);
                false
            }
            None => {
                self.likes.push(user_id);
                true
            }
        }
    }

    pub(crate) fn add_comment(&mut self, comment: Comment) {
        self.comments.push(comment);
    }

    pub(crate) fn is_authored_by(&self, user_id: i64) -> bool {
        self.author_id == user_id
    }
}

fn validate_positive_i64(field: &'static str, value: i64) -> Result<(), DomainError> {
    if value <= 0 {
        return Err(DomainError::Validation {
            field,
            message: "must be > 0",
        });
    }
    Ok(())
}

fn normalize_optional(value: Option<String>) -> Option<String> {
    value
        .map(|raw| raw.trim().to_string())
        .filter(|trimmed| !trimmed.is_empty())
}
