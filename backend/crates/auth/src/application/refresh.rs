//! Token refresh use case
//!
//! Exchanges a valid refresh token for a new access token. The account
//! is re-checked so a deactivated user cannot keep minting sessions for
//! the remainder of their refresh token's life.

use std::sync::Arc;

use chrono::Utc;

use crate::application::token::{TokenService, TokenType};
use crate::domain::repository::UserRepository;
use crate::error::{AuthError, AuthResult};

#[derive(Debug, Clone)]
pub struct RefreshOutput {
    pub access_token: String,
}

pub struct RefreshTokenUseCase<UR> {
    users: Arc<UR>,
    tokens: Arc<TokenService>,
}

impl<UR> RefreshTokenUseCase<UR>
where
    UR: UserRepository,
{
    pub fn new(users: Arc<UR>, tokens: Arc<TokenService>) -> Self {
        Self { users, tokens }
    }

    pub async fn execute(&self, refresh_token: &str) -> AuthResult<RefreshOutput> {
        let claims = self.tokens.verify(refresh_token, TokenType::Refresh)?;
        let user_ref = claims.user_ref()?;

        let user = self
            .users
            .find_by_ref(user_ref)
            .await?
            .ok_or(AuthError::InvalidToken)?;
        if !user.active {
            return Err(AuthError::AccountDisabled);
        }

        let access_token = self.tokens.sign(&user, TokenType::Access, Utc::now())?;
        Ok(RefreshOutput { access_token })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::support::{test_token_service, InMemoryAuthStore};
    use crate::domain::entity::User;
    use crate::domain::value_object::{Email, Mobile};

    async fn seed_user(store: &InMemoryAuthStore, active: bool) -> User {
        let mut user = User::register(
            Mobile::new("9876543210").unwrap(),
            Email::new("a@b.co").unwrap(),
            "Asha".into(),
            "Iyer".into(),
            None,
            Utc::now(),
        );
        user.active = active;
        UserRepository::create(store, &user).await.unwrap();
        user
    }

    #[tokio::test]
    async fn test_refresh_issues_new_access_token() {
        let store = Arc::new(InMemoryAuthStore::default());
        let user = seed_user(&store, true).await;
        let tokens = Arc::new(test_token_service());
        let refresh = tokens.sign(&user, TokenType::Refresh, Utc::now()).unwrap();

        let uc = RefreshTokenUseCase::new(store, tokens.clone());
        let out = uc.execute(&refresh).await.unwrap();

        let claims = tokens.verify(&out.access_token, TokenType::Access).unwrap();
        assert_eq!(claims.user_ref().unwrap(), user.user_ref);
    }

    #[tokio::test]
    async fn test_access_token_cannot_refresh() {
        let store = Arc::new(InMemoryAuthStore::default());
        let user = seed_user(&store, true).await;
        let tokens = Arc::new(test_token_service());
        let access = tokens.sign(&user, TokenType::Access, Utc::now()).unwrap();

        let err = RefreshTokenUseCase::new(store, tokens)
            .execute(&access)
            .await
            .unwrap_err();
        assert!(matches!(err, AuthError::InvalidToken));
    }

    #[tokio::test]
    async fn test_disabled_account_cannot_refresh() {
        let store = Arc::new(InMemoryAuthStore::default());
        let user = seed_user(&store, false).await;
        let tokens = Arc::new(test_token_service());
        let refresh = tokens.sign(&user, TokenType::Refresh, Utc::now()).unwrap();

        let err = RefreshTokenUseCase::new(store, tokens)
            .execute(&refresh)
            .await
            .unwrap_err();
        assert!(matches!(err, AuthError::AccountDisabled));
    }

    #[tokio::test]
    async fn test_unknown_user_rejected() {
        let store = Arc::new(InMemoryAuthStore::default());
        let tokens = Arc::new(test_token_service());
        // Token for a user that was never persisted
        let ghost = User::register(
            Mobile::new("9111111111").unwrap(),
            Email::new("g@h.co").unwrap(),
            "G".into(),
            "H".into(),
            None,
            Utc::now(),
        );
        let refresh = tokens.sign(&ghost, TokenType::Refresh, Utc::now()).unwrap();

        let err = RefreshTokenUseCase::new(store, tokens)
            .execute(&refresh)
            .await
            .unwrap_err();
        assert!(matches!(err, AuthError::InvalidToken));
    }
}
