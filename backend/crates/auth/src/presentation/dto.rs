//! Request and response DTOs for the auth endpoints
//!
//! Wire field names are camelCase to match the mobile clients.

use chrono::{DateTime, Utc};
use kernel::id::VerificationId;
use serde::{Deserialize, Serialize};

use crate::application::token::TokenPair;
use crate::application::AuthSuccess;
use crate::domain::entity::User;

#[derive(Debug, Deserialize)]
pub struct SendOtpRequest {
    pub mobile: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SendOtpResponse {
    pub verification_id: VerificationId,
    pub expires_at: DateTime<Utc>,
    pub message: &'static str,
}

#[derive(Debug, Deserialize)]
pub struct VerifyOtpRequest {
    pub mobile: String,
    pub otp: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VerifyOtpResponse {
    pub verification_id: VerificationId,
    pub verified: bool,
    pub message: &'static str,
    pub new_user: bool,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    pub verification_id: String,
    pub mobile: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignupRequest {
    pub verification_id: String,
    pub mobile: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    #[serde(default)]
    pub course_type_id: Option<i64>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RefreshRequest {
    pub refresh_token: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RefreshResponse {
    pub access_token: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserSummary {
    pub id: kernel::id::UserRef,
    pub mobile: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
}

impl From<&User> for UserSummary {
    fn from(user: &User) -> Self {
        Self {
            id: user.user_ref,
            mobile: user.mobile.as_str().to_string(),
            email: user.email.as_str().to_string(),
            first_name: user.first_name.clone(),
            last_name: user.last_name.clone(),
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthResponse {
    pub user: UserSummary,
    pub access_token: String,
    pub refresh_token: String,
}

impl AuthResponse {
    pub fn from_success(success: AuthSuccess) -> Self {
        let AuthSuccess {
            user,
            tokens: TokenPair {
                access_token,
                refresh_token,
            },
        } = success;
        Self {
            user: UserSummary::from(&user),
            access_token,
            refresh_token,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::value_object::{Email, Mobile};

    #[test]
    fn test_auth_response_shape() {
        let user = User::register(
            Mobile::new("9876543210").unwrap(),
            Email::new("a@b.co").unwrap(),
            "Asha".to_string(),
            "Iyer".to_string(),
            None,
            Utc::now(),
        );
        let response = AuthResponse::from_success(AuthSuccess {
            user: user.clone(),
            tokens: TokenPair {
                access_token: "a.b.c".to_string(),
                refresh_token: "d.e.f".to_string(),
            },
        });

        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["user"]["id"], user.user_ref.to_string());
        assert_eq!(json["user"]["firstName"], "Asha");
        assert_eq!(json["accessToken"], "a.b.c");
        assert_eq!(json["refreshToken"], "d.e.f");
    }

    #[test]
    fn test_otp_response_shapes() {
        let send = SendOtpResponse {
            verification_id: VerificationId::new(),
            expires_at: Utc::now(),
            message: "OTP_SENT",
        };
        let json = serde_json::to_value(&send).unwrap();
        assert_eq!(json["message"], "OTP_SENT");
        assert!(json["verificationId"].is_string());

        let verify = VerifyOtpResponse {
            verification_id: VerificationId::new(),
            verified: true,
            message: "OTP_VERIFIED",
            new_user: false,
        };
        let json = serde_json::to_value(&verify).unwrap();
        assert_eq!(json["verified"], true);
        assert_eq!(json["message"], "OTP_VERIFIED");
        assert_eq!(json["newUser"], false);
    }

    #[test]
    fn test_signup_request_accepts_camel_case() {
        let body = r#"{
            "verificationId": "7f8d2f74-51b7-4bd1-9c3c-0d3f6f2f2f2f",
            "mobile": "9876543210",
            "email": "a@b.co",
            "firstName": "Asha",
            "lastName": "Iyer",
            "courseTypeId": 2
        }"#;
        let request: SignupRequest = serde_json::from_str(body).unwrap();
        assert_eq!(request.first_name, "Asha");
        assert_eq!(request.course_type_id, Some(2));
    }
}
