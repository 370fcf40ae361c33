use std::sync::RwLock;

use async_trait::async_trait;
use chrono::Utc;

use super::poisoned;
use crate::data::user_repository::{NewUser, UserCredentials, UserRepository};
use crate::domain::error::DomainError;
use crate::domain::user::User;

#[derive(Debug, Default)]
pub(crate) struct MemoryUserRepository {
    inner: RwLock<Users>,
}

#[derive(Debug, Default)]
struct Users {
    next_id: i64,
    records: Vec<UserCredentials>,
}

impl MemoryUserRepository {
    pub(crate) fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserRepository for MemoryUserRepository {
    async fn create_user(&self, input: NewUser) -> Result<User, DomainError> {
        let mut users = self.inner.write().map_err(poisoned)?;

        if users
            .records
            .iter()
            .any(|creds| creds.user.email.eq_ignore_ascii_case(&input.email))
        {
            return Err(DomainError::AlreadyExists("email".to_string()));
        }

        users.next_id += 1;
        let user = User::new(users.next_id, input.username, input.email, Utc::now())?;
        users.records.push(UserCredentials {
            user: user.clone(),
            password_hash: input.password_hash,
        });
        Ok(user)
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<UserCredentials>, DomainError> {
        let users = self.inner.read().map_err(poisoned)?;
        Ok(users
            .records
            .iter()
            .find(|creds| creds.user.email.eq_ignore_ascii_case(email))
            .cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::MemoryUserRepository;
    use crate::data::user_repository::{NewUser, UserRepository};
    use crate::domain::error::DomainError;

    fn new_user(username: &str, email: &str) -> NewUser {
        NewUser {
            username: username.to_string(),
            email: email.to_string(),
            password_hash: "hash".to_string(),
        }
    }

    #[tokio::test]
    async fn create_assigns_increasing_ids() {
        let repo = MemoryUserRepository::new();
        let first = repo
            .create_user(new_user("alice", "a@x.com"))
            .await
            .expect("first user");
        let second = repo
            .create_user(new_user("bob", "b@x.com"))
            .await
            .expect("second user");
        assert!(second.id > first.id);
    }

    #[tokio::test]
    async fn duplicate_email_is_rejected_case_insensitively() {
        let repo = MemoryUserRepository::new();
        repo.create_user(new_user("alice", "a@x.com"))
            .await
            .expect("first user");

        let err = repo
            .create_user(new_user("other", "A@X.COM"))
            .await
            .expect_err("duplicate must fail");
        assert!(matches!(err, DomainError::AlreadyExists(_)));
    }

    #[tokio::test]
    async fn find_by_email_returns_hash() {
        let repo = MemoryUserRepository::new();
        repo.create_user(new_user("alice", "a@x.com"))
            .await
            .expect("user");

        let creds = repo
            .find_by_email("a@x.com")
            .await
            .expect("lookup")
            .expect("must exist");
        assert_eq!(creds.user.username, "alice");
        assert_eq!(creds.password_hash, "hash");
        assert!(repo.find_by_email("nobody@x.com").await.expect("lookup").is_none());
    }
}
