use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct Comment {
    pub(crate) user_id: i64,
    pub(crate) username: String,
    pub(crate) text: String,
    pub(crate) created_at: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct Post {
    pub(crate) id: i64,
    pub(crate) author_id: i64,
    pub(crate) author_name: String,
    #[serde(default)]
    pub(crate) text: Option<String>,
    #[serde(default)]
    pub(crate) image_url: Option<String>,
    #[serde(default)]
    pub(crate) likes: Vec<i64>,
    #[serde(default)]
    pub(crate) comments: Vec<Comment>,
    pub(crate) created_at: String,
    pub(crate) updated_at: String,
}

impl Post {
    pub(crate) fn is_liked_by(&self, user_id: Option<i64>) -> bool {
        user_id.is_some_and(|id| self.likes.contains(&id))
    }

    pub(crate) fn is_authored_by(&self, user_id: Option<i64>) -> bool {
        user_id == Some(self.author_id)
    }

    /// List key for a rendered card. A card keeps its own copy of the post, so a
    /// refreshed post with new likes or comments must get a fresh card.
    pub(crate) fn render_key(&self) -> (i64, String) {
        (self.id, self.updated_at.clone())
    }
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct AuthUser {
    pub(crate) id: i64,
    pub(crate) username: String,
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct AuthResponse {
    pub(crate) token: String,
    pub(crate) user: AuthUser,
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct MessageResponse {
    pub(crate) message: String,
}

/// Record kept in localStorage for the signed-in user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub(crate) struct Identity {
    pub(crate) id: i64,
    pub(crate) username: String,
    pub(crate) token: String,
}

impl From<AuthResponse> for Identity {
    fn from(value: AuthResponse) -> Self {
        Self {
            id: value.user.id,
            username: value.user.username,
            token: value.token,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub(crate) struct SignupRequest {
    pub(crate) username: String,
    pub(crate) email: String,
    pub(crate) password: String,
}

#[derive(Debug, Clone, Serialize)]
pub(crate) struct LoginRequest {
    pub(crate) email: String,
    pub(crate) password: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct CreatePostRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) image_url: Option<String>,
}

impl CreatePostRequest {
    /// Builds the request from raw form input; blank fields are left out.
    pub(crate) fn from_form(text: &str, image_url: &str) -> Result<Self, &'static str> {
        let text = non_blank(text);
        let image_url = non_blank(image_url);
        if text.is_none() && image_url.is_none() {
            return Err("Write something or add an image URL");
        }
        Ok(Self { text, image_url })
    }
}

#[derive(Debug, Clone, Serialize)]
pub(crate) struct AddCommentRequest {
    pub(crate) text: String,
}

impl AddCommentRequest {
    pub(crate) fn from_form(text: &str) -> Result<Self, &'static str> {
        non_blank(text)
            .map(|text| Self { text })
            .ok_or("Comment cannot be empty")
    }
}

fn non_blank(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}
