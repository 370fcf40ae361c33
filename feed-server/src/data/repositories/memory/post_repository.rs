use std::collections::BTreeMap;
use std::sync::RwLock;

use async_trait::async_trait;
use chrono::Utc;

use super::poisoned;
use crate::data::post_repository::{NewPost, PostRepository};
use crate::domain::error::DomainError;
use crate::domain::post::Post;

#[derive(Debug, Default)]
pub(crate) struct MemoryPostRepository {
    inner: RwLock<Posts>,
}

#[derive(Debug, Default)]
struct Posts {
    next_id: i64,
    by_id: BTreeMap<i64, Post>,
}

impl MemoryPostRepository {
    pub(crate) fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl PostRepository for MemoryPostRepository {
    async fn create_post(&self, input: NewPost) -> Result<Post, DomainError> {
        let mut posts = self.inner.write().map_err(poisoned)?;
        posts.next_id += 1;

        let now = Utc::now();
        let post = Post::new(
            posts.next_id,
            input.author_id,
            input.author_name,
            input.text,
            input.image_url,
            Vec::new(),
            Vec::new(),
            now,
            now,
        )?;
        posts.by_id.insert(post.id, post.clone());
        Ok(post)
    }

    async fn get_post(&self, id: i64) -> Result<Option<Post>, DomainError> {
        let posts = self.inner.read().map_err(poisoned)?;
        Ok(posts.by_id.get(&id).cloned())
    }

    async fn list_posts(&self) -> Result<Vec<Post>, DomainError> {
        let posts = self.inner.read().map_err(poisoned)?;
        let mut listed: Vec<Post> = posts.by_id.values().cloned().collect();
        listed.sort_by(|a, b| {
            b.created_at
                .cmp(&a.created_at)
                .then_with(|| b.id.cmp(&a.id))
        });
        Ok(listed)
    }

    async fn save_post(&self, post: &Post) -> Result<Option<Post>, DomainError> {
        let mut posts = self.inner.write().map_err(poisoned)?;
        let Some(stored) = posts.by_id.get_mut(&post.id) else {
            return Ok(None);
        };

        stored.likes = post.likes.clone();
        stored.comments = post.comments.clone();
        stored.updated_at = Utc::now().max(stored.created_at);
        Ok(Some(stored.clone()))
    }

    async fn delete_post(&self, id: i64) -> Result<bool, DomainError> {
        let mut posts = self.inner.write().map_err(poisoned)?;
        Ok(posts.by_id.remove(&id).is_some())
    }
}
