use std::sync::Arc;

use argon2::{
    Algorithm, Argon2, Params, Version,
    password_hash::{
        Error as PasswordHashError, PasswordHash, PasswordHasher, PasswordVerifier, SaltString,
        rand_core::OsRng,
    },
};
use tracing::{debug, info};

use crate::data::user_repository::{NewUser, UserRepository};
use crate::domain::error::DomainError;
use crate::domain::user::{LoginRequest, SignupRequest, User};
use crate::infrastructure::jwt::JwtService;

#[derive(Debug, Clone)]
pub(crate) struct AuthResult {
    pub(crate) user: User,
    pub(crate) access_token: String,
}

pub(crate) struct AuthService<R: UserRepository> {
    repo: R,
    jwt: Arc<JwtService>,
}

impl<R: UserRepository> AuthService<R> {
    pub(crate) fn new(repo: R, jwt: Arc<JwtService>) -> Self {
        Self { repo, jwt }
    }

    pub(crate) async fn signup(&self, req: SignupRequest) -> Result<AuthResult, DomainError> {
        let req = req.validate()?;

        if self.repo.find_by_email(&req.email).await?.is_some() {
            return Err(DomainError::AlreadyExists("email".to_string()));
        }

        let password_hash = self.hash_password(&req.password)?;
        let new_user = Self::into_new_user(req, password_hash);
        // the store enforces email uniqueness too, which covers concurrent signups
        let user = self.repo.create_user(new_user).await?;

        let access_token = self.issue_token(&user)?;
        info!(user_id = user.id, "user signed up");

        Ok(AuthResult { user, access_token })
    }

    pub(crate) async fn login(&self, req: LoginRequest) -> Result<AuthResult, DomainError> {
        let req = req.validate()?;

        let user_creds = match self.repo.find_by_email(&req.email).await? {
            Some(user_creds) => user_creds,
            None => {
                debug!("login rejected: unknown email");
                return Err(DomainError::UnknownEmail);
            }
        };

        if let Err(err) = self.verify_password(&req.password, &user_creds.password_hash) {
            debug!(user_id = user_creds.user.id, "login rejected: wrong password");
            return Err(err);
        }

        let access_token = self.issue_token(&user_creds.user)?;
        info!(user_id = user_creds.user.id, "user logged in");

        Ok(AuthResult {
            user: user_creds.user,
            access_token,
        })
    }

    pub(crate) fn hash_password(&self, raw_password: &str) -> Result<String, DomainError> {
        let salt = SaltString::generate(&mut OsRng);
        let password_hash = Self::argon2()?
            .hash_password(raw_password.as_bytes(), &salt)
            .map_err(|err| DomainError::Unexpected(err.to_string()))?;
        Ok(password_hash.to_string())
    }

    pub(crate) fn verify_password(
        &self,
        raw_password: &str,
        password_hash: &str,
    ) -> Result<(), DomainError> {
        let parsed_hash = PasswordHash::new(password_hash)
            .map_err(|err| DomainError::Unexpected(err.to_string()))?;
        Self::argon2()?
            .verify_password(raw_password.as_bytes(), &parsed_hash)
            .map_err(|err| match err {
                PasswordHashError::Password => DomainError::WrongPassword,
                _ => DomainError::Unexpected(err.to_string()),
            })?;

        Ok(())
    }

    fn issue_token(&self, user: &User) -> Result<String, DomainError> {
        self.jwt
            .generate_token(user.id, &user.email, &user.username)
            .map_err(|err| DomainError::Unexpected(err.to_string()))
    }

    fn into_new_user(req: SignupRequest, password_hash: String) -> NewUser {
        NewUser {
            username: req.username,
            email: req.email,
            password_hash,
        }
    }

    fn argon2() -> Result<Argon2<'static>, DomainError> {
        let params = Params::new(19 * 1024, 2, 1, None)
            .map_err(|err| DomainError::Unexpected(err.to_string()))?;
        Ok(Argon2::new(Algorithm::Argon2id, Version::V0x13, params))
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::AuthService;
    use crate::data::repositories::memory::user_repository::MemoryUserRepository;
    use crate::data::user_repository::UserRepository;
    use crate::domain::error::DomainError;
    use crate::domain::user::{LoginRequest, SignupRequest};
    use crate::infrastructure::jwt::JwtService;

    fn service() -> (AuthService<Arc<MemoryUserRepository>>, Arc<MemoryUserRepository>) {
        let repo = Arc::new(MemoryUserRepository::new());
        let service = AuthService::new(repo.clone(), test_jwt());
        (service, repo)
    }

    fn signup_req(username: &str, email: &str, password: &str) -> SignupRequest {
        SignupRequest {
            username: username.to_string(),
            email: email.to_string(),
            password: password.to_string(),
        }
    }

    fn login_req(email: &str, password: &str) -> LoginRequest {
        LoginRequest {
            email: email.to_string(),
            password: password.to_string(),
        }
    }

    #[tokio::test]
    async fn signup_stores_hash_and_returns_matching_token() {
        let (service, repo) = service();

        let result = service
            .signup(signup_req("  alice ", " A@X.COM ", "pw"))
            .await
            .expect("signup must succeed");

        assert_eq!(result.user.username, "alice");
        let claims = test_jwt()
            .verify_token(&result.access_token)
            .expect("token must verify");
        assert_eq!(claims.user_id, result.user.id);
        assert_eq!(claims.username, "alice");
        assert_eq!(claims.email, "a@x.com");

        let stored = repo
            .find_by_email("a@x.com")
            .await
            .expect("lookup")
            .expect("user must be stored");
        assert_ne!(stored.password_hash, "pw");
        assert!(stored.password_hash.starts_with("$argon2id$"));
    }

    #[tokio::test]
    async fn signup_with_existing_email_conflicts_regardless_of_other_fields() {
        let (service, _repo) = service();
        service
            .signup(signup_req("alice", "a@x.com", "pw"))
            .await
            .expect("first signup");

        let err = service
            .signup(signup_req("mallory", "A@x.com", "different"))
            .await
            .expect_err("second signup must fail");
        assert!(matches!(err, DomainError::AlreadyExists(_)));
    }

    #[tokio::test]
    async fn login_rejects_unknown_email() {
        let (service, _repo) = service();

        let err = service
            .login(login_req("nobody@x.com", "pw"))
            .await
            .expect_err("login must fail");
        assert!(matches!(err, DomainError::UnknownEmail));
    }

    #[tokio::test]
    async fn login_rejects_wrong_password() {
        let (service, _repo) = service();
        service
            .signup(signup_req("alice", "a@x.com", "correct-password"))
            .await
            .expect("signup");

        let err = service
            .login(login_req("a@x.com", "wrong-password"))
            .await
            .expect_err("login must fail");
        assert!(matches!(err, DomainError::WrongPassword));
    }

    #[tokio::test]
    async fn login_returns_token_for_valid_credentials() {
        let (service, _repo) = service();
        let signed_up = service
            .signup(signup_req("alice", "a@x.com", "pw"))
            .await
            .expect("signup");

        let result = service
            .login(login_req(" A@X.com", "pw"))
            .await
            .expect("login must succeed");
        assert_eq!(result.user.id, signed_up.user.id);
        assert!(!result.access_token.is_empty());
    }

    #[tokio::test]
    async fn blank_fields_fail_validation() {
        let (service, _repo) = service();
        let err = service
            .signup(signup_req("", "a@x.com", "pw"))
            .await
            .expect_err("blank username");
        assert!(matches!(err, DomainError::Validation { field: "username", .. }));

        let err = service
            .login(login_req("a@x.com", ""))
            .await
            .expect_err("blank password");
        assert!(matches!(err, DomainError::Validation { field: "password", .. }));
    }

    fn test_jwt() -> Arc<JwtService> {
        Arc::new(JwtService::new("0123456789abcdef0123456789abcdef"))
    }
}
