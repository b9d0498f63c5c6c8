//! Users errors

use axum::response::{IntoResponse, Response};
use kernel::error::app_error::AppError;
use kernel::error::code::ErrorCode;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum UsersError {
    #[error("{0}")]
    Validation(String),

    #[error("user not found")]
    UserNotFound,

    #[error("notification not found")]
    NotificationNotFound,

    #[error("complaint not found")]
    ComplaintNotFound,

    /// Another account already holds this mobile number
    #[error("mobile already in use")]
    MobileAlreadyExists,

    /// Another account already holds this email
    #[error("email already in use")]
    EmailAlreadyExists,

    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error(transparent)]
    App(#[from] AppError),
}

pub type UsersResult<T> = Result<T, UsersError>;

impl UsersError {
    pub fn to_app_error(self) -> AppError {
        match self {
            UsersError::Validation(message) => {
                AppError::bad_request(message).with_code(ErrorCode::ValidationError)
            }
            UsersError::UserNotFound => AppError::from_code(ErrorCode::UserNotFound),
            UsersError::NotificationNotFound => {
                AppError::not_found("Notification not found").with_code(ErrorCode::NotFound)
            }
            UsersError::ComplaintNotFound => {
                AppError::not_found("Complaint not found").with_code(ErrorCode::NotFound)
            }
            UsersError::MobileAlreadyExists => AppError::from_code(ErrorCode::MobileAlreadyExists),
            UsersError::EmailAlreadyExists => AppError::from_code(ErrorCode::EmailAlreadyExists),
            UsersError::Database(source) => AppError::from(source),
            UsersError::App(err) => err,
        }
    }
}

impl IntoResponse for UsersError {
    fn into_response(self) -> Response {
        if matches!(self, UsersError::Database(_)) {
            tracing::error!(error = %self, "users error");
        } else {
            tracing::debug!(error = %self, "users rejected");
        }
        self.to_app_error().into_response()
    }
}
