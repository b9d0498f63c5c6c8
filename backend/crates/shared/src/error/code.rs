//! Stable domain error codes
//!
//! Machine-readable codes returned in error payloads. Mobile clients match
//! on these strings, so they are append-only: never rename an existing
//! variant.

use serde::Serialize;

use super::kind::ErrorKind;

/// Domain error code carried alongside [`ErrorKind`] in API error bodies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[non_exhaustive]
pub enum ErrorCode {
    // General / validation
    ValidationError,
    InvalidInput,
    Unauthorized,
    Forbidden,
    NotFound,
    RateLimitExceeded,

    // OTP
    SmsSendFailed,
    InvalidOtp,
    OtpExpired,
    OtpAttemptsExceeded,
    OtpWindowExpired,
    OtpLimitExceeded,

    // Users
    UserNotFound,
    AccountDisabled,
    MobileAlreadyExists,
    EmailAlreadyExists,

    // Colleges / applications
    CollegeNotFound,
    ApplicationNotFound,
    DuplicateApplication,
    MissingRequiredDocuments,

    // Payments
    PaymentFailed,
    OrderNotFound,
    AmountMismatch,
    SignatureMismatch,
    PaymentNotCaptured,

    // External services
    ThirdPartyServiceError,
}

impl ErrorCode {
    /// Default kind (and therefore status) for this code when the caller
    /// does not choose one explicitly.
    pub const fn default_kind(&self) -> ErrorKind {
        match self {
            ErrorCode::ValidationError | ErrorCode::InvalidInput => ErrorKind::BadRequest,
            ErrorCode::Unauthorized => ErrorKind::Unauthorized,
            ErrorCode::Forbidden => ErrorKind::Forbidden,
            ErrorCode::NotFound
            | ErrorCode::UserNotFound
            | ErrorCode::CollegeNotFound
            | ErrorCode::ApplicationNotFound
            | ErrorCode::OrderNotFound => ErrorKind::NotFound,
            ErrorCode::RateLimitExceeded
            | ErrorCode::OtpAttemptsExceeded
            | ErrorCode::OtpLimitExceeded => ErrorKind::TooManyRequests,
            ErrorCode::SmsSendFailed | ErrorCode::ThirdPartyServiceError => ErrorKind::BadGateway,
            ErrorCode::InvalidOtp | ErrorCode::OtpExpired => ErrorKind::BadRequest,
            ErrorCode::OtpWindowExpired => ErrorKind::Unauthorized,
            ErrorCode::AccountDisabled => ErrorKind::Forbidden,
            ErrorCode::MobileAlreadyExists
            | ErrorCode::EmailAlreadyExists
            | ErrorCode::DuplicateApplication => ErrorKind::Conflict,
            ErrorCode::MissingRequiredDocuments => ErrorKind::BadRequest,
            ErrorCode::PaymentFailed => ErrorKind::PaymentRequired,
            ErrorCode::AmountMismatch
            | ErrorCode::SignatureMismatch
            | ErrorCode::PaymentNotCaptured => ErrorKind::BadRequest,
        }
    }

    /// Wire representation (SCREAMING_SNAKE_CASE), for logs and payloads.
    pub const fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::ValidationError => "VALIDATION_ERROR",
            ErrorCode::InvalidInput => "INVALID_INPUT",
            ErrorCode::Unauthorized => "UNAUTHORIZED",
            ErrorCode::Forbidden => "FORBIDDEN",
            ErrorCode::NotFound => "NOT_FOUND",
            ErrorCode::RateLimitExceeded => "RATE_LIMIT_EXCEEDED",
            ErrorCode::SmsSendFailed => "SMS_SEND_FAILED",
            ErrorCode::InvalidOtp => "INVALID_OTP",
            ErrorCode::OtpExpired => "OTP_EXPIRED",
            ErrorCode::OtpAttemptsExceeded => "OTP_ATTEMPTS_EXCEEDED",
            ErrorCode::OtpWindowExpired => "OTP_WINDOW_EXPIRED",
            ErrorCode::OtpLimitExceeded => "OTP_LIMIT_EXCEEDED",
            ErrorCode::UserNotFound => "USER_NOT_FOUND",
            ErrorCode::AccountDisabled => "ACCOUNT_DISABLED",
            ErrorCode::MobileAlreadyExists => "MOBILE_ALREADY_EXISTS",
            ErrorCode::EmailAlreadyExists => "EMAIL_ALREADY_EXISTS",
            ErrorCode::CollegeNotFound => "COLLEGE_NOT_FOUND",
            ErrorCode::ApplicationNotFound => "APPLICATION_NOT_FOUND",
            ErrorCode::DuplicateApplication => "DUPLICATE_APPLICATION",
            ErrorCode::MissingRequiredDocuments => "MISSING_REQUIRED_DOCUMENTS",
            ErrorCode::PaymentFailed => "PAYMENT_FAILED",
            ErrorCode::OrderNotFound => "ORDER_NOT_FOUND",
            ErrorCode::AmountMismatch => "AMOUNT_MISMATCH",
            ErrorCode::SignatureMismatch => "SIGNATURE_MISMATCH",
            ErrorCode::PaymentNotCaptured => "PAYMENT_NOT_CAPTURED",
            ErrorCode::ThirdPartyServiceError => "THIRD_PARTY_SERVICE_ERROR",
        }
    }
}

impl std::fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wire_format_is_screaming_snake() {
        assert_eq!(ErrorCode::OtpExpired.as_str(), "OTP_EXPIRED");
        assert_eq!(
            ErrorCode::MobileAlreadyExists.as_str(),
            "MOBILE_ALREADY_EXISTS"
        );
        let json = serde_json::to_string(&ErrorCode::SignatureMismatch).unwrap();
        assert_eq!(json, "\"SIGNATURE_MISMATCH\"");
    }

    #[test]
    fn test_default_kinds() {
        assert_eq!(
            ErrorCode::OtpLimitExceeded.default_kind().status_code(),
            429
        );
        assert_eq!(ErrorCode::SmsSendFailed.default_kind().status_code(), 502);
        assert_eq!(ErrorCode::OtpWindowExpired.default_kind().status_code(), 401);
        assert_eq!(ErrorCode::PaymentFailed.default_kind().status_code(), 402);
        assert_eq!(
            ErrorCode::DuplicateApplication.default_kind().status_code(),
            409
        );
    }
}
