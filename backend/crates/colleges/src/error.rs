//! Colleges errors

use axum::response::{IntoResponse, Response};
use kernel::error::app_error::AppError;
use kernel::error::code::ErrorCode;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CollegesError {
    #[error("{0}")]
    Validation(String),

    #[error("college not found")]
    CollegeNotFound,

    /// The user already has an application for this college
    #[error("application already exists")]
    DuplicateApplication,

    #[error("application not found")]
    ApplicationNotFound,

    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error(transparent)]
    App(#[from] AppError),
}

pub type CollegesResult<T> = Result<T, CollegesError>;

impl CollegesError {
    pub fn to_app_error(self) -> AppError {
        match self {
            CollegesError::Validation(message) => {
                AppError::bad_request(message).with_code(ErrorCode::ValidationError)
            }
            CollegesError::CollegeNotFound => AppError::from_code(ErrorCode::CollegeNotFound),
            CollegesError::DuplicateApplication => {
                AppError::from_code(ErrorCode::DuplicateApplication)
            }
            CollegesError::ApplicationNotFound => {
                AppError::from_code(ErrorCode::ApplicationNotFound)
            }
            CollegesError::Database(source) => AppError::from(source),
            CollegesError::App(err) => err,
        }
    }
}

impl IntoResponse for CollegesError {
    fn into_response(self) -> Response {
        if matches!(self, CollegesError::Database(_)) {
            tracing::error!(error = %self, "colleges error");
        } else {
            tracing::debug!(error = %self, "colleges rejected");
        }
        self.to_app_error().into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        assert_eq!(
            CollegesError::CollegeNotFound.to_app_error().status_code(),
            404
        );
        assert_eq!(
            CollegesError::DuplicateApplication
                .to_app_error()
                .status_code(),
            409
        );
        assert_eq!(
            CollegesError::Validation("bad page".into())
                .to_app_error()
                .status_code(),
            400
        );
    }
}
