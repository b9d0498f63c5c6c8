//! Send OTP use case
//!
//! Issues a fresh code for a mobile number and delivers it by SMS.
//! Sending a new code deactivates every previous one for that number,
//! so at most one verification is live per mobile.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use kernel::id::VerificationId;
use platform::rate_limit::RateLimitStore;
use platform::sms::SmsSender;

use crate::application::config::{AuthConfig, TEST_OTP};
use crate::domain::entity::OtpVerification;
use crate::domain::repository::OtpRepository;
use crate::domain::value_object::{Mobile, OtpCode};
use crate::error::{AuthError, AuthResult};

#[derive(Debug, Clone)]
pub struct SendOtpOutput {
    pub verification_id: VerificationId,
    pub expires_at: DateTime<Utc>,
}

pub struct SendOtpUseCase<OR, S> {
    otps: Arc<OR>,
    sms: Arc<S>,
    config: Arc<AuthConfig>,
}

impl<OR, S> SendOtpUseCase<OR, S>
where
    OR: OtpRepository + RateLimitStore<Error = AuthError>,
    S: SmsSender,
{
    pub fn new(otps: Arc<OR>, sms: Arc<S>, config: Arc<AuthConfig>) -> Self {
        Self { otps, sms, config }
    }

    pub async fn execute(&self, mobile: Mobile) -> AuthResult<SendOtpOutput> {
        let now = Utc::now();

        let key = format!("otp_send:{}", mobile.as_str());
        if !self.otps.check_and_increment(&key, &self.config.send_limit).await? {
            return Err(AuthError::RateLimited);
        }

        let is_test = self.config.is_test_mobile(mobile.as_str());
        let code = if is_test {
            OtpCode::new(TEST_OTP)?
        } else {
            OtpCode::generate()
        };

        let deactivated = self.otps.deactivate_all_for_mobile(&mobile).await?;
        if deactivated > 0 {
            tracing::debug!(mobile = %mobile, count = deactivated, "superseded previous OTPs");
        }

        let verification = OtpVerification::issue(mobile.clone(), code, self.config.otp_ttl, now);
        self.otps.create(&verification).await?;

        if is_test {
            tracing::info!(mobile = %mobile, "test mobile, skipping SMS delivery");
        } else if let Err(send_err) = self
            .sms
            .send(mobile.as_str(), &self.config.otp_message(verification.code.as_str()))
            .await
        {
            // A code the user can never receive must not stay live
            let mut dead = verification;
            dead.deactivate(Utc::now());
            self.otps.update(&dead).await?;
            return Err(AuthError::SmsSendFailed(send_err));
        }

        tracing::info!(mobile = %mobile, verification_id = %verification.id, "OTP issued");
        Ok(SendOtpOutput {
            verification_id: verification.id,
            expires_at: verification.expires_at,
        })
    }
}
