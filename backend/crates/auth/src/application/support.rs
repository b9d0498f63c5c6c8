//! In-memory fakes for use case tests

use std::collections::HashMap;
use std::sync::Mutex;

use chrono::{DateTime, Utc};
use kernel::id::{UserRef, VerificationId};
use platform::rate_limit::{RateLimitConfig, RateLimitStore};

use crate::application::token::{TokenConfig, TokenService};
use crate::domain::entity::{OtpVerification, User};
use crate::domain::repository::{OtpRepository, UserRepository};
use crate::domain::value_object::{Email, Mobile};
use crate::error::{AuthError, AuthResult};

pub(crate) fn test_token_service() -> TokenService {
    TokenService::new(TokenConfig::new(
        "test-access-secret".to_string(),
        "test-refresh-secret".to_string(),
    ))
}

#[derive(Default)]
pub(crate) struct InMemoryAuthStore {
    verifications: Mutex<HashMap<VerificationId, OtpVerification>>,
    users: Mutex<Vec<User>>,
    counters: Mutex<HashMap<String, u32>>,
}

impl OtpRepository for InMemoryAuthStore {
    async fn create(&self, verification: &OtpVerification) -> AuthResult<()> {
        self.verifications
            .lock()
            .unwrap()
            .insert(verification.id, verification.clone());
        Ok(())
    }

    async fn find_active_by_mobile(&self, mobile: &Mobile) -> AuthResult<Option<OtpVerification>> {
        Ok(self
            .verifications
            .lock()
            .unwrap()
            .values()
            .filter(|v| v.active && &v.mobile == mobile)
            .max_by_key(|v| v.created_at)
            .cloned())
    }

    async fn find_by_id(&self, id: VerificationId) -> AuthResult<Option<OtpVerification>> {
        Ok(self.verifications.lock().unwrap().get(&id).cloned())
    }

    async fn update(&self, verification: &OtpVerification) -> AuthResult<()> {
        self.verifications
            .lock()
            .unwrap()
            .insert(verification.id, verification.clone());
        Ok(())
    }

    async fn deactivate_all_for_mobile(&self, mobile: &Mobile) -> AuthResult<u64> {
        let mut map = self.verifications.lock().unwrap();
        let mut touched = 0;
        for v in map.values_mut() {
            if v.active && &v.mobile == mobile {
                v.active = false;
                touched += 1;
            }
        }
        Ok(touched)
    }

    async fn delete_expired_before(&self, cutoff: DateTime<Utc>) -> AuthResult<u64> {
        let mut map = self.verifications.lock().unwrap();
        let before = map.len();
        map.retain(|_, v| v.expires_at >= cutoff);
        Ok((before - map.len()) as u64)
    }
}

impl UserRepository for InMemoryAuthStore {
    async fn create(&self, user: &User) -> AuthResult<()> {
        self.users.lock().unwrap().push(user.clone());
        Ok(())
    }

    async fn find_by_mobile(&self, mobile: &Mobile) -> AuthResult<Option<User>> {
        Ok(self
            .users
            .lock()
            .unwrap()
            .iter()
            .find(|u| &u.mobile == mobile)
            .cloned())
    }

    async fn find_by_email(&self, email: &Email) -> AuthResult<Option<User>> {
        Ok(self
            .users
            .lock()
            .unwrap()
            .iter()
            .find(|u| &u.email == email)
            .cloned())
    }

    async fn find_by_ref(&self, user_ref: UserRef) -> AuthResult<Option<User>> {
        Ok(self
            .users
            .lock()
            .unwrap()
            .iter()
            .find(|u| u.user_ref == user_ref)
            .cloned())
    }

    async fn set_mobile_verified(&self, user_ref: UserRef) -> AuthResult<()> {
        let mut users = self.users.lock().unwrap();
        if let Some(user) = users.iter_mut().find(|u| u.user_ref == user_ref) {
            user.mobile_verified = true;
        }
        Ok(())
    }
}

impl RateLimitStore for InMemoryAuthStore {
    type Error = AuthError;

    async fn check_and_increment(
        &self,
        key: &str,
        config: &RateLimitConfig,
    ) -> Result<bool, Self::Error> {
        let mut counters = self.counters.lock().unwrap();
        let count = counters.entry(key.to_string()).or_insert(0);
        *count += 1;
        Ok(*count <= config.max_requests)
    }
}
