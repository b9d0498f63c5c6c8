//! Repository trait for the users crate

use kernel::id::{NotificationId, UserRef};

use crate::error::UsersResult;
use crate::model::{Complaint, NewNotification, Notification, Profile, ProfileUpdate};

#[trait_variant::make(ProfileRepository: Send)]
pub trait LocalProfileRepository {
    /// Active user's profile by public ref.
    async fn find_profile(&self, user_ref: UserRef) -> UsersResult<Option<Profile>>;

    /// Apply a validated update and return the fresh profile. Fails with
    /// `MobileAlreadyExists` / `EmailAlreadyExists` when the new value
    /// collides with another account.
    async fn update_profile(
        &self,
        user_ref: UserRef,
        update: &ProfileUpdate,
    ) -> UsersResult<Profile>;

    /// Undeleted notifications, newest first.
    async fn notifications_for(&self, user_ref: UserRef) -> UsersResult<Vec<Notification>>;

    async fn add_notification(
        &self,
        user_ref: UserRef,
        notification: &NewNotification,
    ) -> UsersResult<Notification>;

    /// Stamp `read_at`; keeps the first read time on repeat calls.
    async fn mark_read(&self, user_ref: UserRef, id: NotificationId) -> UsersResult<()>;

    /// Soft-delete the given notifications. Returns how many were
    /// actually deleted; ids that are foreign or already deleted are
    /// skipped.
    async fn delete_notifications(
        &self,
        user_ref: UserRef,
        ids: &[NotificationId],
    ) -> UsersResult<u64>;

    async fn complaints(&self) -> UsersResult<Vec<Complaint>>;

    /// Record a support request against a complaint category.
    async fn record_support(&self, user_ref: UserRef, complaint_id: i64) -> UsersResult<()>;
}
