//! Verify OTP use case
//!
//! Checks a submitted code against the live verification for a mobile.
//! Tells the caller whether the number belongs to an existing account,
//! which decides between the login and signup screens client-side.

use std::sync::Arc;

use chrono::Utc;
use kernel::id::VerificationId;
use platform::rate_limit::RateLimitStore;

use crate::application::config::AuthConfig;
use crate::domain::repository::{OtpRepository, UserRepository};
use crate::domain::value_object::{Mobile, OtpCode};
use crate::error::{AuthError, AuthResult};

#[derive(Debug, Clone)]
pub struct VerifyOtpOutput {
    pub verification_id: VerificationId,
    /// True when no active account exists for the mobile
    pub new_user: bool,
}

pub struct VerifyOtpUseCase<OR, UR> {
    otps: Arc<OR>,
    users: Arc<UR>,
    config: Arc<AuthConfig>,
}

impl<OR, UR> VerifyOtpUseCase<OR, UR>
where
    OR: OtpRepository + RateLimitStore<Error = AuthError>,
    UR: UserRepository,
{
    pub fn new(otps: Arc<OR>, users: Arc<UR>, config: Arc<AuthConfig>) -> Self {
        Self { otps, users, config }
    }

    /// `client_key` is the caller's IP (or "unknown"); it widens the
    /// rate limit key so one IP cannot brute-force many mobiles.
    pub async fn execute(
        &self,
        mobile: Mobile,
        code: OtpCode,
        client_key: &str,
    ) -> AuthResult<VerifyOtpOutput> {
        let now = Utc::now();

        let key = format!("otp_verify:{}:{}", mobile.as_str(), client_key);
        if !self
            .otps
            .check_and_increment(&key, &self.config.verify_limit)
            .await?
        {
            return Err(AuthError::RateLimited);
        }

        let Some(mut verification) = self.otps.find_active_by_mobile(&mobile).await? else {
            return Err(AuthError::InvalidOtp);
        };

        if verification.attempts_exhausted(self.config.max_verify_attempts) {
            verification.deactivate(now);
            self.otps.update(&verification).await?;
            return Err(AuthError::OtpAttemptsExceeded);
        }

        if verification.is_expired(now) {
            verification.deactivate(now);
            self.otps.update(&verification).await?;
            return Err(AuthError::OtpExpired);
        }

        if !verification.code.matches(&code) {
            verification.record_failed_attempt(now);
            self.otps.update(&verification).await?;
            return Err(AuthError::InvalidOtp);
        }

        verification.mark_verified(now);
        self.otps.update(&verification).await?;

        let new_user = match self.users.find_by_mobile(&mobile).await? {
            Some(user) if user.active => false,
            _ => true,
        };

        tracing::info!(mobile = %mobile, new_user, "OTP verified");
        Ok(VerifyOtpOutput {
            verification_id: verification.id,
            new_user,
        })
    }
}
