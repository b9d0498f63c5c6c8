//! Signup use case
//!
//! Creates an account for a mobile that passed OTP verification. The
//! signup window is longer than the login window because the user is
//! filling a form in between.

use std::sync::Arc;

use chrono::Utc;
use kernel::id::VerificationId;

use crate::application::config::AuthConfig;
use crate::application::token::TokenService;
use crate::application::AuthSuccess;
use crate::domain::entity::User;
use crate::domain::repository::{OtpRepository, UserRepository};
use crate::domain::value_object::{Email, Mobile};
use crate::error::{AuthError, AuthResult};

#[derive(Debug, Clone)]
pub struct SignupInput {
    pub verification_id: VerificationId,
    pub mobile: Mobile,
    pub email: Email,
    pub first_name: String,
    pub last_name: String,
    pub course_type_id: Option<i64>,
}

pub struct SignupUseCase<OR, UR> {
    otps: Arc<OR>,
    users: Arc<UR>,
    tokens: Arc<TokenService>,
    config: Arc<AuthConfig>,
}

impl<OR, UR> SignupUseCase<OR, UR>
where
    OR: OtpRepository,
    UR: UserRepository,
{
    pub fn new(
        otps: Arc<OR>,
        users: Arc<UR>,
        tokens: Arc<TokenService>,
        config: Arc<AuthConfig>,
    ) -> Self {
        Self {
            otps,
            users,
            tokens,
            config,
        }
    }

    pub async fn execute(&self, input: SignupInput) -> AuthResult<AuthSuccess> {
        let now = Utc::now();

        let first_name = valid_name(&input.first_name, "first name")?;
        let last_name = valid_name(&input.last_name, "last name")?;

        let mut verification = self
            .otps
            .find_by_id(input.verification_id)
            .await?
            .ok_or(AuthError::InvalidOtp)?;
        if verification.mobile != input.mobile {
            return Err(AuthError::InvalidOtp);
        }
        if !verification.verified_within(self.config.signup_window, now) {
            return Err(AuthError::OtpWindowExpired);
        }

        // Uniqueness checks include deactivated accounts; the columns
        // carry unique constraints either way. A disabled account is
        // reported as such, not as a plain duplicate.
        if let Some(existing) = self.users.find_by_mobile(&input.mobile).await? {
            if !existing.active {
                return Err(AuthError::AccountDisabled);
            }
            return Err(AuthError::MobileAlreadyExists);
        }
        if self.users.find_by_email(&input.email).await?.is_some() {
            return Err(AuthError::EmailAlreadyExists);
        }

        let user = User::register(
            input.mobile,
            input.email,
            first_name,
            last_name,
            input.course_type_id,
            now,
        );
        self.users.create(&user).await?;

        verification.deactivate(now);
        self.otps.update(&verification).await?;

        let tokens = self.tokens.issue_pair(&user, now)?;
        tracing::info!(user_ref = %user.user_ref, "account created");
        Ok(AuthSuccess { user, tokens })
    }
}

fn valid_name(value: &str, field: &str) -> AuthResult<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() || trimmed.len() > 100 {
        return Err(AuthError::Validation(format!(
            "{field} must be between 1 and 100 characters"
        )));
    }
    Ok(trimmed.to_string())
}
