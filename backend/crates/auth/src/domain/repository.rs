//! Repository traits for the auth domain

use chrono::{DateTime, Utc};
use kernel::id::{UserRef, VerificationId};

use crate::domain::entity::{OtpVerification, User};
use crate::domain::value_object::{Email, Mobile};
use crate::error::AuthResult;

/// Persistence for OTP verifications.
#[trait_variant::make(OtpRepository: Send)]
pub trait LocalOtpRepository {
    async fn create(&self, verification: &OtpVerification) -> AuthResult<()>;

    /// Newest active verification for the mobile, if any.
    async fn find_active_by_mobile(&self, mobile: &Mobile) -> AuthResult<Option<OtpVerification>>;

    async fn find_by_id(&self, id: VerificationId) -> AuthResult<Option<OtpVerification>>;

    /// Persist mutated attempt/verified/active flags.
    async fn update(&self, verification: &OtpVerification) -> AuthResult<()>;

    /// Deactivate every active verification for the mobile. Returns the
    /// number of rows touched.
    async fn deactivate_all_for_mobile(&self, mobile: &Mobile) -> AuthResult<u64>;

    /// Purge rows whose expiry is older than `cutoff`.
    async fn delete_expired_before(&self, cutoff: DateTime<Utc>) -> AuthResult<u64>;
}

/// Persistence for user accounts, restricted to what auth needs.
#[trait_variant::make(UserRepository: Send)]
pub trait LocalUserRepository {
    async fn create(&self, user: &User) -> AuthResult<()>;

    /// Lookup by mobile, including deactivated accounts.
    async fn find_by_mobile(&self, mobile: &Mobile) -> AuthResult<Option<User>>;

    async fn find_by_email(&self, email: &Email) -> AuthResult<Option<User>>;

    async fn find_by_ref(&self, user_ref: UserRef) -> AuthResult<Option<User>>;

    /// Flip `mobile_verified` after a successful OTP login.
    async fn set_mobile_verified(&self, user_ref: UserRef) -> AuthResult<()>;
}
