//! User entity (authentication view)
//!
//! Only the columns the auth flows touch. Profile fields such as gender,
//! date of birth and document paths belong to the users crate.

use chrono::{DateTime, Utc};
use kernel::id::UserRef;

use crate::domain::value_object::{Email, Mobile};

#[derive(Debug, Clone)]
pub struct User {
    /// Public identifier exposed in tokens and API payloads
    pub user_ref: UserRef,
    pub mobile: Mobile,
    pub email: Email,
    pub first_name: String,
    pub last_name: String,
    /// Course type the student picked during signup
    pub course_type_id: Option<i64>,
    pub mobile_verified: bool,
    pub email_verified: bool,
    pub active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Create a new account from a verified signup.
    ///
    /// The mobile is marked verified immediately since signup only
    /// completes after an OTP round-trip on that number.
    pub fn register(
        mobile: Mobile,
        email: Email,
        first_name: String,
        last_name: String,
        course_type_id: Option<i64>,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            user_ref: UserRef::new(),
            mobile,
            email,
            first_name,
            last_name,
            course_type_id,
            mobile_verified: true,
            email_verified: false,
            active: true,
            created_at: now,
            updated_at: now,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_register() {
        let user = User::register(
            Mobile::new("9876543210").unwrap(),
            Email::new("student@example.com").unwrap(),
            "Asha".to_string(),
            "Iyer".to_string(),
            Some(1),
            Utc::now(),
        );
        assert!(user.mobile_verified);
        assert!(!user.email_verified);
        assert!(user.active);
    }
}
