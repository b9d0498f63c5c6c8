//! Login use case
//!
//! Exchanges a recently verified OTP for a session. The verification
//! must still be inside the login window and is burned on success so it
//! cannot be replayed.

use std::sync::Arc;

use chrono::Utc;
use kernel::id::VerificationId;

use crate::application::config::AuthConfig;
use crate::application::token::TokenService;
use crate::application::AuthSuccess;
use crate::domain::repository::{OtpRepository, UserRepository};
use crate::domain::value_object::Mobile;
use crate::error::{AuthError, AuthResult};

pub struct LoginUseCase<OR, UR> {
    otps: Arc<OR>,
    users: Arc<UR>,
    tokens: Arc<TokenService>,
    config: Arc<AuthConfig>,
}

impl<OR, UR> LoginUseCase<OR, UR>
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

    pub async fn execute(
        &self,
        verification_id: VerificationId,
        mobile: Mobile,
    ) -> AuthResult<AuthSuccess> {
        let now = Utc::now();

        let mut verification = self
            .otps
            .find_by_id(verification_id)
            .await?
            .ok_or(AuthError::InvalidOtp)?;
        if verification.mobile != mobile {
            return Err(AuthError::InvalidOtp);
        }
        if !verification.verified_within(self.config.login_window, now) {
            return Err(AuthError::OtpWindowExpired);
        }

        let user = self
            .users
            .find_by_mobile(&mobile)
            .await?
            .ok_or(AuthError::UserNotFound)?;
        if !user.active {
            return Err(AuthError::AccountDisabled);
        }

        if !user.mobile_verified {
            self.users.set_mobile_verified(user.user_ref).await?;
        }

        verification.deactivate(now);
        self.otps.update(&verification).await?;

        let tokens = self.tokens.issue_pair(&user, now)?;
        tracing::info!(user_ref = %user.user_ref, "login succeeded");
        Ok(AuthSuccess { user, tokens })
    }
}
