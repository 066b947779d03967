use std::sync::Arc;

use tracing::{instrument, warn};

use crate::{
    auth::password::verify_password_blocking,
    error::AppResult,
    users::{repo_types::User, services::UserService},
};

/// Result of a credential check. Backend failures are errors, not outcomes.
#[derive(Debug, PartialEq, Eq)]
pub enum LoginOutcome {
    Success(User),
    UserNotFound,
    InvalidPassword,
}

/// Stateless email/password check against the stored hash.
#[derive(Clone)]
pub struct Authenticator {
    users: Arc<UserService>,
}

impl Authenticator {
    pub fn new(users: Arc<UserService>) -> Self {
        Self { users }
    }

    #[instrument(skip(self, password))]
    pub async fn login(&self, email: &str, password: String) -> AppResult<LoginOutcome> {
        let Some(user) = self.users.get_user_by_email(email).await? else {
            warn!("login unknown email");
            return Ok(LoginOutcome::UserNotFound);
        };

        if !verify_password_blocking(password, user.password.clone()).await? {
            warn!(user_id = user.id, "login invalid password");
            return Ok(LoginOutcome::InvalidPassword);
        }

        Ok(LoginOutcome::Success(user))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        error::AppError,
        users::{memory::InMemoryUserStore, repo::UserStore, repo_types::{UserChanges, UserInput}},
    };

    async fn setup() -> Authenticator {
        let users = Arc::new(UserService::new(Arc::new(InMemoryUserStore::new())));
        users
            .create_user(UserInput {
                first_name: "X".into(),
                last_name: "Y".into(),
                email: "x@y.com".into(),
                password: "secret".into(),
            })
            .await
            .unwrap();
        Authenticator::new(users)
    }

    #[tokio::test]
    async fn correct_credentials_succeed() {
        let auth = setup().await;
        match auth.login("x@y.com", "secret".into()).await.unwrap() {
            LoginOutcome::Success(user) => assert_eq!(user.email, "x@y.com"),
            other => panic!("expected success, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn wrong_password_is_reported() {
        let auth = setup().await;
        let outcome = auth.login("x@y.com", "guess".into()).await.unwrap();
        assert_eq!(outcome, LoginOutcome::InvalidPassword);
    }

    #[tokio::test]
    async fn unknown_email_is_reported() {
        let auth = setup().await;
        let outcome = auth.login("nobody@y.com", "secret".into()).await.unwrap();
        assert_eq!(outcome, LoginOutcome::UserNotFound);
    }

    #[tokio::test]
    async fn corrupt_stored_hash_is_an_error() {
        let store = Arc::new(InMemoryUserStore::new());
        store
            .create(&UserChanges {
                first_name: "X".into(),
                last_name: "Y".into(),
                email: "bad@y.com".into(),
                password_hash: "plaintext".into(),
            })
            .await
            .unwrap();
        let auth = Authenticator::new(Arc::new(UserService::new(store)));
        let err = auth.login("bad@y.com", "plaintext".into()).await.unwrap_err();
        assert!(matches!(err, AppError::PasswordHash(_)));
    }
}
