//! Email address value object

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{AuthError, AuthResult};

/// A lightly validated, lowercased email address.
///
/// Validation stops at "looks like an address"; deliverability is proven
/// by the email verification flow, not by parsing.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Email(String);

impl Email {
    pub const MAX_LEN: usize = 254;

    pub fn new(value: impl Into<String>) -> AuthResult<Self> {
        let value = value.into().trim().to_lowercase();
        if value.is_empty() || value.len() > Self::MAX_LEN {
            return Err(AuthError::Validation("invalid email address".to_string()));
        }

        let Some((local, domain)) = value.split_once('@') else {
            return Err(AuthError::Validation("invalid email address".to_string()));
        };
        if local.is_empty() || domain.is_empty() || !domain.contains('.') {
            return Err(AuthError::Validation("invalid email address".to_string()));
        }

        Ok(Self(value))
    }

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

impl fmt::Display for Email {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_email_is_lowercased() {
        let email = Email::new("Student@Example.COM").unwrap();
        assert_eq!(email.as_str(), "student@example.com");
    }

    #[test]
    fn test_trims_whitespace() {
        let email = Email::new("  a@b.co  ").unwrap();
        assert_eq!(email.as_str(), "a@b.co");
    }

    #[test]
    fn test_rejects_malformed() {
        assert!(Email::new("").is_err());
        assert!(Email::new("no-at-sign").is_err());
        assert!(Email::new("@example.com").is_err());
        assert!(Email::new("user@").is_err());
        assert!(Email::new("user@nodot").is_err());
    }

    #[test]
    fn test_rejects_overlong() {
        let long = format!("{}@example.com", "a".repeat(250));
        assert!(Email::new(long).is_err());
    }
}
