//! Authenticated request principal
//!
//! The auth middleware verifies the Bearer token and inserts a
//! [`Principal`] into request extensions; downstream handlers extract it
//! as an argument. Handlers never see raw tokens.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;

use crate::error::app_error::AppError;
use crate::error::code::ErrorCode;
use crate::id::UserRef;

/// The authenticated caller, as established from the access token claims.
#[derive(Debug, Clone)]
pub struct Principal {
    /// Public user ref (the token `sub`)
    pub user_ref: UserRef,
    /// Mobile number from the token
    pub mobile: String,
    /// Email from the token, if present
    pub email: Option<String>,
}

impl<S> FromRequestParts<S> for Principal
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<Principal>()
            .cloned()
            .ok_or_else(|| {
                AppError::unauthorized("UNAUTHORIZED").with_code(ErrorCode::Unauthorized)
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::Request;

    #[tokio::test]
    async fn test_extract_missing_principal_is_unauthorized() {
        let req = Request::builder().uri("/").body(()).unwrap();
        let (mut parts, _) = req.into_parts();
        let result = Principal::from_request_parts(&mut parts, &()).await;
        assert_eq!(result.unwrap_err().status_code(), 401);
    }

    #[tokio::test]
    async fn test_extract_present_principal() {
        let req = Request::builder().uri("/").body(()).unwrap();
        let (mut parts, _) = req.into_parts();
        parts.extensions.insert(Principal {
            user_ref: UserRef::new(),
            mobile: "9876543210".to_string(),
            email: None,
        });
        let principal = Principal::from_request_parts(&mut parts, &())
            .await
            .unwrap();
        assert_eq!(principal.mobile, "9876543210");
    }
}
