//! Bearer token middleware
//!
//! Verifies the access token on protected routes and stashes a
//! [`Principal`] in the request extensions for handlers to extract.

use std::sync::Arc;

use axum::extract::{Request, State};
use axum::http::header::AUTHORIZATION;
use axum::http::HeaderMap;
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use kernel::principal::Principal;

use crate::application::token::{TokenService, TokenType};
use crate::error::AuthError;

/// State for [`require_auth`]; cheap to clone per route layer.
#[derive(Clone)]
pub struct AuthLayer {
    tokens: Arc<TokenService>,
}

impl AuthLayer {
    pub fn new(tokens: Arc<TokenService>) -> Self {
        Self { tokens }
    }
}

/// Rejects the request unless it carries a valid `Bearer` access token.
pub async fn require_auth(
    State(layer): State<AuthLayer>,
    mut request: Request,
    next: Next,
) -> Response {
    match authenticate(&layer, request.headers()) {
        Some(principal) => {
            request.extensions_mut().insert(principal);
            next.run(request).await
        }
        None => AuthError::InvalidToken.into_response(),
    }
}

fn authenticate(layer: &AuthLayer, headers: &HeaderMap) -> Option<Principal> {
    let header = headers.get(AUTHORIZATION)?.to_str().ok()?;
    let token = header.strip_prefix("Bearer ")?;
    let claims = layer.tokens.verify(token, TokenType::Access).ok()?;

    Some(Principal {
        user_ref: claims.user_ref().ok()?,
        mobile: claims.mobile,
        email: claims.email,
    })
}
