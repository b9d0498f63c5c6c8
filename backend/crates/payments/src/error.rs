//! Payments errors

use axum::response::{IntoResponse, Response};
use kernel::error::app_error::AppError;
use kernel::error::code::ErrorCode;
use thiserror::Error;

use crate::application::gateway::GatewayError;
use crate::domain::entity::OrderStatus;

#[derive(Debug, Error)]
pub enum PaymentsError {
    #[error("{0}")]
    Validation(String),

    #[error("application not found")]
    ApplicationNotFound,

    /// The application fee was already collected
    #[error("application already paid")]
    AlreadyPaid,

    #[error("order not found")]
    OrderNotFound,

    /// Order state machine refused the move
    #[error("order cannot move from {from:?} to {to:?}")]
    InvalidTransition { from: OrderStatus, to: OrderStatus },

    /// Callback signature did not match our own HMAC
    #[error("payment signature mismatch")]
    SignatureMismatch,

    /// Gateway reports the payment as not captured
    #[error("payment not captured")]
    PaymentNotCaptured,

    /// Paid amount differs from the order amount
    #[error("payment amount mismatch")]
    AmountMismatch,

    #[error("payment gateway error: {0}")]
    Gateway(#[from] GatewayError),

    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error(transparent)]
    App(#[from] AppError),
}

pub type PaymentsResult<T> = Result<T, PaymentsError>;

impl PaymentsError {
    pub fn to_app_error(self) -> AppError {
        match self {
            PaymentsError::Validation(message) => {
                AppError::bad_request(message).with_code(ErrorCode::ValidationError)
            }
            PaymentsError::ApplicationNotFound => {
                AppError::from_code(ErrorCode::ApplicationNotFound)
            }
            PaymentsError::AlreadyPaid => AppError::conflict("Application fee already paid"),
            PaymentsError::OrderNotFound => AppError::from_code(ErrorCode::OrderNotFound),
            PaymentsError::InvalidTransition { from, to } => AppError::conflict(format!(
                "Order cannot move from {} to {}",
                from.as_str(),
                to.as_str()
            )),
            PaymentsError::SignatureMismatch => AppError::from_code(ErrorCode::SignatureMismatch),
            PaymentsError::PaymentNotCaptured => {
                AppError::from_code(ErrorCode::PaymentNotCaptured)
            }
            PaymentsError::AmountMismatch => AppError::from_code(ErrorCode::AmountMismatch),
            PaymentsError::Gateway(source) => {
                AppError::from_code(ErrorCode::ThirdPartyServiceError).with_source(source)
            }
            PaymentsError::Database(source) => AppError::from(source),
            PaymentsError::App(err) => err,
        }
    }
}

impl IntoResponse for PaymentsError {
    fn into_response(self) -> Response {
        match &self {
            PaymentsError::Database(_) | PaymentsError::Gateway(_) => {
                tracing::error!(error = %self, "payments error");
            }
            PaymentsError::SignatureMismatch | PaymentsError::AmountMismatch => {
                tracing::warn!(error = %self, "payment verification rejected");
            }
            _ => {
                tracing::debug!(error = %self, "payments rejected");
            }
        }
        self.to_app_error().into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        assert_eq!(PaymentsError::OrderNotFound.to_app_error().status_code(), 404);
        assert_eq!(
            PaymentsError::SignatureMismatch.to_app_error().status_code(),
            400
        );
        assert_eq!(PaymentsError::AlreadyPaid.to_app_error().status_code(), 409);
        assert_eq!(
            PaymentsError::InvalidTransition {
                from: OrderStatus::Paid,
                to: OrderStatus::Cancelled
            }
            .to_app_error()
            .status_code(),
            409
        );
    }
}
