use chrono::Utc;
use tracing::{debug, info, warn};

use crate::data::post_repository::{NewPost, PostRepository};
use crate::domain::error::DomainError;
use crate::domain::post::{Comment, CreatePostRequest, NewCommentRequest, Post};

/// The authenticated user on whose behalf an operation runs.
#[derive(Debug, Clone)]
pub(crate) struct Actor {
    pub(crate) user_id: i64,
    pub(crate) username: String,
}

pub(crate) struct FeedService<R: PostRepository> {
    repo: R,
}

impl<R: PostRepository> FeedService<R> {
    pub(crate) fn new(repo: R) -> Self {
        Self { repo }
    }

    pub(crate) async fn list_posts(&self) -> Result<Vec<Post>, DomainError> {
        self.repo.list_posts().await
    }

    pub(crate) async fn create_post(
        &self,
        actor: &Actor,
        req: CreatePostRequest,
    ) -> Result<Post, DomainError> {
        let req = req.validate()?;

        let new_post = NewPost {
            author_id: actor.user_id,
            author_name: actor.username.clone(),
            text: req.text,
            image_url: req.image_url,
        };
        let post = self.repo.create_post(new_post).await?;
        info!(post_id = post.id, author_id = actor.user_id, "post created");
        Ok(post)
    }

    pub(crate) async fn toggle_like(&self, actor: &Actor, post_id: i64) -> Result<Post, DomainError> {
        let mut post = self.find_post(post_id).await?;
        post.toggle_like(actor.user_id);
        self.save(post).await
    }

    pub(crate) async fn add_comment(
        &self,
        actor: &Actor,
        post_id: i64,
        req: NewCommentRequest,
    ) -> Result<Post, DomainError> {
        let req = req.validate()?;
        let mut post = self.find_post(post_id).await?;

        post.add_comment(Comment {
            user_id: actor.user_id,
            username: actor.username.clone(),
            text: req.text,
            created_at: Utc::now(),
        });
        self.save(post).await
    }

    pub(crate) async fn delete_post(&self, actor: &Actor, post_id: i64) -> Result<(), DomainError> {
        let post = self.find_post(post_id).await?;

        if !post.is_authored_by(actor.user_id) {
            warn!(post_id, user_id = actor.user_id, "delete rejected: not the author");
            return Err(DomainError::Forbidden);
        }

        if !self.repo.delete_post(post_id).await? {
            return Err(not_found(post_id));
        }
        info!(post_id, "post deleted");
        Ok(())
    }

    async fn find_post(&self, post_id: i64) -> Result<Post, DomainError> {
        self.repo
            .get_post(post_id)
            .await?
            .ok_or_else(|| not_found(post_id))
    }

    async fn save(&self, post: Post) -> Result<Post, DomainError> {
        let post_id = post.id;
        self.repo
            .save_post(&post)
            .await?
            .ok_or_else(|| not_found(post_id))
    }
}

fn not_found(post_id: i64) -> DomainError {
    debug!(post_id, "post not found");
    DomainError::NotFound("Post".to_string())
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::{Actor, FeedService};
    use crate::data::post_repository::PostRepository;
    use crate::data::repositories::memory::post_repository::MemoryPostRepository;
    use crate::domain::error::DomainError;
    use crate::domain::post::{CreatePostRequest, NewCommentRequest};

    fn service() -> (FeedService<Arc<MemoryPostRepository>>, Arc<MemoryPostRepository>) {
        let repo = Arc::new(MemoryPostRepository::new());
        (FeedService::new(repo.clone()), repo)
    }

    fn actor(user_id: i64, username: &str) -> Actor {
        Actor {
            user_id,
            username: username.to_string(),
        }
    }

    fn text_post(text: &str) -> CreatePostRequest {
        CreatePostRequest {
            text: Some(text.to_string()),
            image_url: None,
        }
    }

    #[tokio::test]
    async fn create_post_snapshots_author_and_starts_empty() {
        let (service, _repo) = service();

        let post = service
            .create_post(&actor(1, "alice"), text_post("  hi  "))
            .await
            .expect("create_post must succeed");

        assert_eq!(post.author_id, 1);
        assert_eq!(post.author_name, "alice");
        assert_eq!(post.text.as_deref(), Some("hi"));
        assert!(post.likes.is_empty());
        assert!(post.comments.is_empty());
    }

    #[tokio::test]
    async fn create_post_without_content_is_rejected() {
        let (service, repo) = service();
        let req = CreatePostRequest {
            text: Some("  ".to_string()),
            image_url: Some("".to_string()),
        };

        let err = service
            .create_post(&actor(1, "alice"), req)
            .await
            .expect_err("empty post must fail");
        assert!(matches!(err, DomainError::Validation { .. }));
        assert!(repo.list_posts().await.expect("list").is_empty());
    }

    #[tokio::test]
    async fn list_posts_returns_newest_first() {
        let (service, _repo) = service();
        let alice = actor(1, "alice");
        for text in ["first", "second", "third"] {
            service
                .create_post(&alice, text_post(text))
                .await
                .expect("create");
        }

        let posts = service.list_posts().await.expect("list");
        let texts: Vec<_> = posts.iter().filter_map(|p| p.text.as_deref()).collect();
        assert_eq!(texts, vec!["third", "second", "first"]);
    }

    #[tokio::test]
    async fn toggle_like_twice_restores_likes() {
        let (service, _repo) = service();
        let post = service
            .create_post(&actor(1, "alice"), text_post("hi"))
            .await
            .expect("create");
        let bob = actor(2, "bob");

        let liked = service.toggle_like(&bob, post.id).await.expect("like");
        assert_eq!(liked.likes, vec![2]);

        let unliked = service.toggle_like(&bob, post.id).await.expect("unlike");
        assert!(unliked.likes.is_empty());
    }

    #[tokio::test]
    async fn toggle_like_on_missing_post_is_not_found() {
        let (service, _repo) = service();
        let err = service
            .toggle_like(&actor(2, "bob"), 404)
            .await
            .expect_err("must be missing");
        assert!(matches!(err, DomainError::NotFound(_)));
    }

    #[tokio::test]
    async fn add_comment_appends_in_order_with_username_snapshot() {
        let (service, _repo) = service();
        let post = service
            .create_post(&actor(1, "alice"), text_post("hi"))
            .await
            .expect("create");

        service
            .add_comment(
                &actor(2, "bob"),
                post.id,
                NewCommentRequest {
                    text: "first".to_string(),
                },
            )
            .await
            .expect("first comment");
        let updated = service
            .add_comment(
                &actor(1, "alice"),
                post.id,
                NewCommentRequest {
                    text: "  second  ".to_string(),
                },
            )
            .await
            .expect("second comment");

        assert_eq!(updated.comments.len(), 2);
        assert_eq!(updated.comments[0].username, "bob");
        assert_eq!(updated.comments[0].text, "first");
        assert_eq!(updated.comments[1].user_id, 1);
        assert_eq!(updated.comments[1].text, "second");
    }

    #[tokio::test]
    async fn blank_comment_is_rejected_before_lookup() {
        let (service, _repo) = service();
        let err = service
            .add_comment(
                &actor(2, "bob"),
                999,
                NewCommentRequest {
                    text: "   ".to_string(),
                },
            )
            .await
            .expect_err("blank comment must fail");
        assert!(matches!(err, DomainError::Validation { .. }));
    }

    #[tokio::test]
    async fn delete_post_returns_forbidden_for_non_author() {
        let (service, repo) = service();
        let post = service
            .create_post(&actor(1, "alice"), text_post("hi"))
            .await
            .expect("create");

        let err = service
            .delete_post(&actor(2, "bob"), post.id)
            .await
            .expect_err("must be forbidden");
        assert!(matches!(err, DomainError::Forbidden));
        assert!(repo.get_post(post.id).await.expect("get").is_some());
    }

    #[tokio::test]
    async fn delete_post_by_author_removes_it() {
        let (service, repo) = service();
        let alice = actor(1, "alice");
        let post = service
            .create_post(&alice, text_post("hi"))
            .await
            .expect("create");

        service
            .delete_post(&alice, post.id)
            .await
            .expect("delete must succeed");
        assert!(repo.get_post(post.id).await.expect("get").is_none());

        let err = service
            .delete_post(&alice, post.id)
            .await
            .expect_err("second delete must fail");
        assert!(matches!(err, DomainError::NotFound(_)));
    }
}
