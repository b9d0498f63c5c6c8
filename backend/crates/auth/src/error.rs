//! Authentication errors
//!
//! One enum for the whole crate. Every variant folds into the kernel
//! [`AppError`] at the HTTP boundary so the wire payload is always
//! `{"error": ..., "code": ...}`.

use axum::response::{IntoResponse, Response};
use kernel::error::app_error::AppError;
use kernel::error::code::ErrorCode;
use platform::sms::SmsError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AuthError {
    /// Request payload failed validation (bad mobile, bad OTP shape, ...)
    #[error("{0}")]
    Validation(String),

    /// Too many OTP sends or verification attempts from one source
    #[error("rate limit exceeded")]
    RateLimited,

    /// The SMS gateway refused or failed to deliver the code
    #[error("failed to send OTP: {0}")]
    SmsSendFailed(#[from] SmsError),

    /// No active code for the mobile, or the code does not match
    #[error("invalid OTP")]
    InvalidOtp,

    /// The code's time-to-live has elapsed
    #[error("OTP expired")]
    OtpExpired,

    /// Too many wrong codes entered against one verification
    #[error("OTP attempts exceeded")]
    OtpAttemptsExceeded,

    /// Verification succeeded but the login/signup window has closed
    #[error("OTP verification window expired")]
    OtpWindowExpired,

    /// Login attempted for a mobile with no account
    #[error("user not found")]
    UserNotFound,

    /// The account exists but has been deactivated
    #[error("account disabled")]
    AccountDisabled,

    /// Signup attempted with a mobile that already has an account
    #[error("mobile number already registered")]
    MobileAlreadyExists,

    /// Signup attempted with an email that already has an account
    #[error("email already registered")]
    EmailAlreadyExists,

    /// Missing, malformed, expired or wrong-typed JWT
    #[error("invalid or expired token")]
    InvalidToken,

    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error(transparent)]
    App(#[from] AppError),
}

pub type AuthResult<T> = Result<T, AuthError>;

impl AuthError {
    pub fn to_app_error(self) -> AppError {
        match self {
            AuthError::Validation(message) => {
                AppError::bad_request(message).with_code(ErrorCode::ValidationError)
            }
            AuthError::RateLimited => AppError::from_code(ErrorCode::RateLimitExceeded),
            AuthError::SmsSendFailed(source) => {
                AppError::from_code(ErrorCode::SmsSendFailed).with_source(source)
            }
            AuthError::InvalidOtp => AppError::from_code(ErrorCode::InvalidOtp),
            AuthError::OtpExpired => AppError::from_code(ErrorCode::OtpExpired),
            AuthError::OtpAttemptsExceeded => AppError::from_code(ErrorCode::OtpAttemptsExceeded),
            AuthError::OtpWindowExpired => AppError::from_code(ErrorCode::OtpWindowExpired),
            // Login probes must not reveal which mobiles have accounts,
            // so this stays a 401 rather than a 404.
            AuthError::UserNotFound => {
                AppError::unauthorized("USER_NOT_FOUND").with_code(ErrorCode::UserNotFound)
            }
            AuthError::AccountDisabled => AppError::from_code(ErrorCode::AccountDisabled),
            AuthError::MobileAlreadyExists => AppError::from_code(ErrorCode::MobileAlreadyExists),
            AuthError::EmailAlreadyExists => AppError::from_code(ErrorCode::EmailAlreadyExists),
            AuthError::InvalidToken => {
                AppError::unauthorized("UNAUTHORIZED").with_code(ErrorCode::Unauthorized)
            }
            AuthError::Database(source) => AppError::from(source),
            AuthError::App(err) => err,
        }
    }

    /// Log at a level matching severity before the error leaves the crate.
    pub fn log(&self) {
        match self {
            AuthError::Database(_) | AuthError::SmsSendFailed(_) => {
                tracing::error!(error = %self, "auth error");
            }
            AuthError::RateLimited | AuthError::OtpAttemptsExceeded => {
                tracing::warn!(error = %self, "auth throttled");
            }
            _ => {
                tracing::debug!(error = %self, "auth rejected");
            }
        }
    }
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        self.log();
        self.to_app_error().into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        assert_eq!(AuthError::RateLimited.to_app_error().status_code(), 429);
        assert_eq!(AuthError::InvalidOtp.to_app_error().status_code(), 400);
        assert_eq!(AuthError::OtpExpired.to_app_error().status_code(), 400);
        assert_eq!(
            AuthError::OtpAttemptsExceeded.to_app_error().status_code(),
            429
        );
        assert_eq!(
            AuthError::OtpWindowExpired.to_app_error().status_code(),
            401
        );
        assert_eq!(AuthError::UserNotFound.to_app_error().status_code(), 401);
        assert_eq!(AuthError::AccountDisabled.to_app_error().status_code(), 403);
        assert_eq!(
            AuthError::MobileAlreadyExists.to_app_error().status_code(),
            409
        );
        assert_eq!(AuthError::InvalidToken.to_app_error().status_code(), 401);
    }

    #[test]
    fn test_wire_codes() {
        assert_eq!(
            AuthError::InvalidOtp.to_app_error().code(),
            Some(ErrorCode::InvalidOtp)
        );
        assert_eq!(
            AuthError::UserNotFound.to_app_error().code(),
            Some(ErrorCode::UserNotFound)
        );
        assert_eq!(
            AuthError::Validation("mobile must be 10 digits".into())
                .to_app_error()
                .code(),
            Some(ErrorCode::ValidationError)
        );
    }
}
