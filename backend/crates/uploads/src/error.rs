//! Uploads errors

use axum::response::{IntoResponse, Response};
use kernel::error::app_error::AppError;
use kernel::error::code::ErrorCode;
use platform::storage::StorageError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum UploadsError {
    #[error("{0}")]
    Validation(String),

    /// No file part in the multipart body
    #[error("no file provided")]
    MissingFile,

    /// Content failed the PDF sniff or declared the wrong type
    #[error("file must be a PDF")]
    NotAPdf,

    #[error("file exceeds the {max_bytes} byte limit")]
    FileTooLarge { max_bytes: usize },

    #[error("user not found")]
    UserNotFound,

    #[error("multipart error: {0}")]
    Multipart(#[from] axum::extract::multipart::MultipartError),

    #[error("storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error(transparent)]
    App(#[from] AppError),
}

pub type UploadsResult<T> = Result<T, UploadsError>;

impl UploadsError {
    pub fn to_app_error(self) -> AppError {
        match self {
            UploadsError::Validation(message) => {
                AppError::bad_request(message).with_code(ErrorCode::ValidationError)
            }
            UploadsError::MissingFile => {
                AppError::bad_request("No file provided").with_code(ErrorCode::ValidationError)
            }
            UploadsError::NotAPdf => AppError::bad_request("Only PDF documents are accepted")
                .with_code(ErrorCode::InvalidInput),
            UploadsError::FileTooLarge { max_bytes } => AppError::bad_request(format!(
                "File exceeds the {} MB limit",
                max_bytes / (1024 * 1024)
            ))
            .with_code(ErrorCode::ValidationError),
            UploadsError::UserNotFound => AppError::from_code(ErrorCode::UserNotFound),
            UploadsError::Multipart(source) => AppError::bad_request("Malformed multipart body")
                .with_code(ErrorCode::InvalidInput)
                .with_source(source),
            UploadsError::Storage(source) => {
                AppError::from_code(ErrorCode::ThirdPartyServiceError).with_source(source)
            }
            UploadsError::Database(source) => AppError::from(source),
            UploadsError::App(err) => err,
        }
    }
}

impl IntoResponse for UploadsError {
    fn into_response(self) -> Response {
        match &self {
            UploadsError::Database(_) | UploadsError::Storage(_) => {
                tracing::error!(error = %self, "uploads error");
            }
            _ => {
                tracing::debug!(error = %self, "upload rejected");
            }
        }
        self.to_app_error().into_response()
    }
}
