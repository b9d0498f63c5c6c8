//! Mobile number value object
//!
//! Indian 10-digit subscriber numbers, no dialing prefix. The dialing
//! prefix is the SMS gateway's concern, not the domain's.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{AuthError, AuthResult};

/// A validated 10-digit mobile number.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Mobile(String);

impl Mobile {
    pub const LEN: usize = 10;

    pub fn new(value: impl Into<String>) -> AuthResult<Self> {
        let value = value.into();
        if value.len() != Self::LEN || !value.bytes().all(|b| b.is_ascii_digit()) {
            return Err(AuthError::Validation(
                "mobile number must be exactly 10 digits".to_string(),
            ));
        }
        Ok(Self(value))
    }

    /// Wrap a value that was validated before it was persisted.
    pub(crate) fn from_stored(value: String) -> Self {
        Self(value)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for Mobile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Mask all but the last four digits in logs
        write!(f, "******{}", &self.0[6..])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_mobile() {
        let mobile = Mobile::new("9876543210").unwrap();
        assert_eq!(mobile.as_str(), "9876543210");
    }

    #[test]
    fn test_rejects_bad_lengths() {
        assert!(Mobile::new("987654321").is_err());
        assert!(Mobile::new("98765432100").is_err());
        assert!(Mobile::new("").is_err());
    }

    #[test]
    fn test_rejects_non_digits() {
        assert!(Mobile::new("987654321a").is_err());
        assert!(Mobile::new("+919876543").is_err());
        assert!(Mobile::new("98765 4321").is_err());
    }

    #[test]
    fn test_display_masks_digits() {
        let mobile = Mobile::new("9876543210").unwrap();
        assert_eq!(mobile.to_string(), "******3210");
    }
}
