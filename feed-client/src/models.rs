use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
/// A comment attached to a post.
pub struct Comment {
    /// Id of the commenting user.
    pub user_id: i64,
    /// Username at the time of commenting.
    pub username: String,
    /// Comment body.
    pub text: String,
    /// When the comment was written (UTC).
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
/// A feed post as returned by the server.
pub struct Post {
    /// Post id.
    pub id: i64,
    /// Id of the author.
    pub author_id: i64,
    /// Author's username at the time of posting.
    pub author_name: String,
    /// Post text, if any.
    #[serde(default)]
    pub text: Option<String>,
    /// Image URL, if any.
    #[serde(default)]
    pub image_url: Option<String>,
    /// Ids of users who like the post.
    #[serde(default)]
    pub likes: Vec<i64>,
    /// Comments in the order they were added.
    #[serde(default)]
    pub comments: Vec<Comment>,
    /// Creation time (UTC).
    pub created_at: DateTime<Utc>,
    /// Last update time (UTC).
    pub updated_at: DateTime<Utc>,
}

impl Post {
    /// Whether `user_id` is among the post's likes.
    pub fn is_liked_by(&self, user_id: i64) -> bool {
        self.likes.contains(&user_id)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
/// Public part of the authenticated user.
pub struct AuthUser {
    /// User id.
    pub id: i64,
    /// Username.
    pub username: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
/// Response to a successful signup or login.
pub struct AuthResponse {
    /// Human-readable confirmation.
    pub message: String,
    /// Bearer token for authenticated calls.
    pub token: String,
    /// The user the token was issued for.
    pub user: AuthUser,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
/// Plain confirmation or error body.
pub struct MessageResponse {
    /// Message text.
    pub message: String,
}
