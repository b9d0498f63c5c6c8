//! One-time password value object

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{AuthError, AuthResult};

/// A 6-digit one-time password.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OtpCode(String);

impl OtpCode {
    pub const LEN: usize = 6;

    pub fn new(value: impl Into<String>) -> AuthResult<Self> {
        let value = value.into();
        if value.len() != Self::LEN || !value.bytes().all(|b| b.is_ascii_digit()) {
            return Err(AuthError::Validation(
                "OTP must be exactly 6 digits".to_string(),
            ));
        }
        Ok(Self(value))
    }

    /// Generate a fresh random code.
    pub fn generate() -> Self {
        Self(platform::crypto::generate_otp())
    }

    pub(crate) fn from_stored(value: String) -> Self {
        Self(value)
    }

    /// Constant-time comparison against a submitted code.
    pub fn matches(&self, submitted: &OtpCode) -> bool {
        platform::crypto::constant_time_eq(self.0.as_bytes(), submitted.0.as_bytes())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for OtpCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Never print the code itself
        write!(f, "******")
    }
}
