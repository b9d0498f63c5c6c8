//! JWT session tokens
//!
//! Stateless access/refresh pairs signed with HS256. Access and refresh
//! tokens use separate secrets, and each claim set carries a `type`
//! discriminator so one can never stand in for the other.

use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation};
use kernel::id::UserRef;
use serde::{Deserialize, Serialize};

use crate::domain::entity::User;
use crate::error::{AuthError, AuthResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenType {
    Access,
    Refresh,
}

#[derive(Debug, Clone)]
pub struct TokenConfig {
    pub access_secret: String,
    pub refresh_secret: String,
    pub access_ttl: Duration,
    pub refresh_ttl: Duration,
}

impl TokenConfig {
    pub fn new(access_secret: String, refresh_secret: String) -> Self {
        Self {
            access_secret,
            refresh_secret,
            access_ttl: Duration::minutes(15),
            refresh_ttl: Duration::days(7),
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    /// User ref as a UUID string
    pub sub: String,
    pub mobile: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(rename = "type")]
    pub token_type: TokenType,
    pub iat: i64,
    pub exp: i64,
}

impl Claims {
    pub fn user_ref(&self) -> AuthResult<UserRef> {
        UserRef::parse(&self.sub).map_err(|_| AuthError::InvalidToken)
    }
}

/// A freshly signed access/refresh pair.
#[derive(Debug, Clone)]
pub struct TokenPair {
    pub access_token: String,
    pub refresh_token: String,
}

/// Signs and verifies session tokens.
pub struct TokenService {
    access_encoding: EncodingKey,
    access_decoding: DecodingKey,
    refresh_encoding: EncodingKey,
    refresh_decoding: DecodingKey,
    access_ttl: Duration,
    refresh_ttl: Duration,
}

impl TokenService {
    pub fn new(config: TokenConfig) -> Self {
        Self {
            access_encoding: EncodingKey::from_secret(config.access_secret.as_bytes()),
            access_decoding: DecodingKey::from_secret(config.access_secret.as_bytes()),
            refresh_encoding: EncodingKey::from_secret(config.refresh_secret.as_bytes()),
            refresh_decoding: DecodingKey::from_secret(config.refresh_secret.as_bytes()),
            access_ttl: config.access_ttl,
            refresh_ttl: config.refresh_ttl,
        }
    }

    pub fn sign(
        &self,
        user: &User,
        token_type: TokenType,
        now: DateTime<Utc>,
    ) -> AuthResult<String> {
        let (key, ttl) = match token_type {
            TokenType::Access => (&self.access_encoding, self.access_ttl),
            TokenType::Refresh => (&self.refresh_encoding, self.refresh_ttl),
        };
        let claims = Claims {
            sub: user.user_ref.to_string(),
            mobile: user.mobile.as_str().to_string(),
            email: Some(user.email.as_str().to_string()),
            token_type,
            iat: now.timestamp(),
            exp: (now + ttl).timestamp(),
        };

        jsonwebtoken::encode(&Header::new(Algorithm::HS256), &claims, key)
            .map_err(|e| AuthError::App(kernel::error::app_error::AppError::internal(
                "failed to sign token",
            )
            .with_source(e)))
    }

    /// Issue a matched access/refresh pair for the user.
    pub fn issue_pair(&self, user: &User, now: DateTime<Utc>) -> AuthResult<TokenPair> {
        Ok(TokenPair {
            access_token: self.sign(user, TokenType::Access, now)?,
            refresh_token: self.sign(user, TokenType::Refresh, now)?,
        })
    }

    /// Verify signature, expiry and the `type` discriminator.
    pub fn verify(&self, token: &str, expected: TokenType) -> AuthResult<Claims> {
        let key = match expected {
            TokenType::Access => &self.access_decoding,
            TokenType::Refresh => &self.refresh_decoding,
        };
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;

        let data = jsonwebtoken::decode::<Claims>(token, key, &validation)
            .map_err(|_| AuthError::InvalidToken)?;

        if data.claims.token_type != expected {
            return Err(AuthError::InvalidToken);
        }
        Ok(data.claims)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entity::User;
    use crate::domain::value_object::{Email, Mobile};

    fn service() -> TokenService {
        TokenService::new(TokenConfig::new(
            "access-secret".to_string(),
            "refresh-secret".to_string(),
        ))
    }

    fn user() -> User {
        User::register(
            Mobile::new("9876543210").unwrap(),
            Email::new("student@example.com").unwrap(),
            "Asha".to_string(),
            "Iyer".to_string(),
            None,
            Utc::now(),
        )
    }

    #[test]
    fn test_sign_and_verify_roundtrip() {
        let service = service();
        let user = user();
        let now = Utc::now();

        let pair = service.issue_pair(&user, now).unwrap();
        let claims = service.verify(&pair.access_token, TokenType::Access).unwrap();
        assert_eq!(claims.sub, user.user_ref.to_string());
        assert_eq!(claims.mobile, "9876543210");
        assert_eq!(claims.token_type, TokenType::Access);
        assert_eq!(claims.user_ref().unwrap(), user.user_ref);

        let claims = service
            .verify(&pair.refresh_token, TokenType::Refresh)
            .unwrap();
        assert_eq!(claims.token_type, TokenType::Refresh);
    }

    #[test]
    fn test_type_confusion_rejected() {
        let service = service();
        let pair = service.issue_pair(&user(), Utc::now()).unwrap();

        // A refresh token must not pass as an access token, and vice
        // versa. Different secrets already fail the signature; the type
        // claim is checked on top.
        assert!(service.verify(&pair.refresh_token, TokenType::Access).is_err());
        assert!(service.verify(&pair.access_token, TokenType::Refresh).is_err());
    }

    #[test]
    fn test_expired_token_rejected() {
        let service = service();
        let issued = Utc::now() - Duration::hours(1);
        let token = service.sign(&user(), TokenType::Access, issued).unwrap();
        assert!(service.verify(&token, TokenType::Access).is_err());
    }

    #[test]
    fn test_wrong_secret_rejected() {
        let service = service();
        let other = TokenService::new(TokenConfig::new(
            "different".to_string(),
            "secrets".to_string(),
        ));
        let token = service.sign(&user(), TokenType::Access, Utc::now()).unwrap();
        assert!(other.verify(&token, TokenType::Access).is_err());
    }

    #[test]
    fn test_garbage_rejected() {
        assert!(service().verify("not.a.jwt", TokenType::Access).is_err());
    }
}
