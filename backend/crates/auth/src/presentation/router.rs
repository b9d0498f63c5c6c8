//! Auth route table

use axum::routing::post;
use axum::Router;
use platform::rate_limit::RateLimitStore;
use platform::sms::SmsSender;

use crate::domain::repository::{OtpRepository, UserRepository};
use crate::error::AuthError;
use crate::presentation::handler::{self, AuthState};

/// Routes mounted under `/api/auth`.
pub fn auth_router<R, S>(state: AuthState<R, S>) -> Router
where
    R: OtpRepository + UserRepository + RateLimitStore<Error = AuthError> + Send + Sync + 'static,
    S: SmsSender + Send + Sync + 'static,
{
    Router::new()
        .route("/send-otp", post(handler::send_otp::<R, S>))
        .route("/verify-otp", post(handler::verify_otp::<R, S>))
        .route("/login", post(handler::login::<R, S>))
        .route("/signup", post(handler::signup::<R, S>))
        .route("/refresh", post(handler::refresh::<R, S>))
        .with_state(state)
}
