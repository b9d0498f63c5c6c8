//! Profile, notification and complaint models

use chrono::{DateTime, NaiveDate, Utc};
use kernel::id::{NotificationId, UserRef};

use crate::error::{UsersError, UsersResult};

/// The user's own profile view.
#[derive(Debug, Clone)]
pub struct Profile {
    pub user_ref: UserRef,
    pub mobile: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub gender: Option<String>,
    pub dob: Option<NaiveDate>,
    pub course_type_id: Option<i64>,
    pub mobile_verified: bool,
    pub email_verified: bool,
    /// Object-store paths of account-level documents
    pub hsc_path: Option<String>,
    pub sslc_path: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// A validated profile update.
///
/// Changing the mobile or email here does not re-verify them; the
/// matching `*_verified` flag is cleared by the repository when the
/// value actually changed.
#[derive(Debug, Clone)]
pub struct ProfileUpdate {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub mobile: String,
    pub gender: Option<String>,
    pub dob: Option<NaiveDate>,
}

impl ProfileUpdate {
    pub fn new(
        first_name: String,
        last_name: String,
        email: String,
        mobile: String,
        gender: Option<String>,
        dob: Option<NaiveDate>,
        today: NaiveDate,
    ) -> UsersResult<Self> {
        let first_name = validate_name("firstName", &first_name)?;
        let last_name = validate_name("lastName", &last_name)?;
        let email = normalize_email(&email)?;
        let mobile = validate_mobile(&mobile)?;
        let gender = match gender {
            Some(raw) => Some(validate_gender(&raw)?),
            None => None,
        };
        if let Some(dob) = dob {
            if dob >= today {
                return Err(UsersError::Validation(
                    "dob must be in the past".to_string(),
                ));
            }
        }

        Ok(Self {
            first_name,
            last_name,
            email,
            mobile,
            gender,
            dob,
        })
    }
}

fn validate_name(field: &str, value: &str) -> UsersResult<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() || trimmed.len() > 100 {
        return Err(UsersError::Validation(format!(
            "{field} must be between 1 and 100 characters"
        )));
    }
    Ok(trimmed.to_string())
}

fn validate_mobile(value: &str) -> UsersResult<String> {
    let trimmed = value.trim();
    if trimmed.len() != 10 || !trimmed.bytes().all(|b| b.is_ascii_digit()) {
        return Err(UsersError::Validation(
            "mobile must be exactly 10 digits".to_string(),
        ));
    }
    Ok(trimmed.to_string())
}

fn normalize_email(value: &str) -> UsersResult<String> {
    let normalized = value.trim().to_lowercase();
    let valid = normalized.len() <= 254
        && normalized
            .split_once('@')
            .is_some_and(|(local, domain)| !local.is_empty() && domain.contains('.'));
    if !valid {
        return Err(UsersError::Validation("invalid email".to_string()));
    }
    Ok(normalized)
}

fn validate_gender(value: &str) -> UsersResult<String> {
    let normalized = value.trim().to_lowercase();
    match normalized.as_str() {
        "male" | "female" | "other" => Ok(normalized),
        _ => Err(UsersError::Validation(
            "gender must be male, female or other".to_string(),
        )),
    }
}

/// An in-app notification.
#[derive(Debug, Clone)]
pub struct Notification {
    pub id: NotificationId,
    pub title: String,
    pub body: String,
    pub kind: String,
    pub read: bool,
    pub created_at: DateTime<Utc>,
}

/// A validated notification to insert.
#[derive(Debug, Clone)]
pub struct NewNotification {
    pub title: String,
    pub body: String,
    pub kind: String,
}

impl NewNotification {
    pub const DEFAULT_KIND: &'static str = "general";

    pub fn new(title: String, body: String, kind: Option<String>) -> UsersResult<Self> {
        let title = title.trim().to_string();
        if title.is_empty() || title.len() > 200 {
            return Err(UsersError::Validation(
                "title must be between 1 and 200 characters".to_string(),
            ));
        }
        let body = body.trim().to_string();
        if body.is_empty() || body.len() > 1000 {
            return Err(UsersError::Validation(
                "message must be between 1 and 1000 characters".to_string(),
            ));
        }
        let kind = kind
            .map(|k| k.trim().to_lowercase())
            .filter(|k| !k.is_empty())
            .unwrap_or_else(|| Self::DEFAULT_KIND.to_string());

        Ok(Self { title, body, kind })
    }
}

/// A complaint category from the FAQ catalogue.
#[derive(Debug, Clone)]
pub struct Complaint {
    pub id: i64,
    pub title: String,
    pub description: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 8, 30).unwrap()
    }

    fn update(email: &str, mobile: &str) -> UsersResult<ProfileUpdate> {
        ProfileUpdate::new(
            "Priya".to_string(),
            "Raman".to_string(),
            email.to_string(),
            mobile.to_string(),
            None,
            None,
            today(),
        )
    }

    #[test]
    fn test_update_normalizes_email() {
        let update = update("  Priya.R@Example.COM ", "9876543210").unwrap();
        assert_eq!(update.email, "priya.r@example.com");
    }

    #[test]
    fn test_update_rejects_bad_mobile() {
        assert!(update("a@b.com", "12345").is_err());
        assert!(update("a@b.com", "98765432x0").is_err());
    }

    #[test]
    fn test_update_rejects_bad_email() {
        assert!(update("not-an-email", "9876543210").is_err());
        assert!(update("a@nodot", "9876543210").is_err());
    }

    #[test]
    fn test_update_rejects_future_dob() {
        let result = ProfileUpdate::new(
            "Priya".to_string(),
            "Raman".to_string(),
            "a@b.com".to_string(),
            "9876543210".to_string(),
            None,
            NaiveDate::from_ymd_opt(2030, 1, 1),
            today(),
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_gender_normalized() {
        let update = ProfileUpdate::new(
            "Priya".to_string(),
            "Raman".to_string(),
            "a@b.com".to_string(),
            "9876543210".to_string(),
            Some("Female".to_string()),
            None,
            today(),
        )
        .unwrap();
        assert_eq!(update.gender.as_deref(), Some("female"));
    }

    #[test]
    fn test_notification_defaults_kind() {
        let notification =
            NewNotification::new("Fee due".to_string(), "Pay soon".to_string(), None).unwrap();
        assert_eq!(notification.kind, "general");
    }

    #[test]
    fn test_notification_rejects_blank_title() {
        assert!(NewNotification::new("  ".to_string(), "body".to_string(), None).is_err());
    }
}
