//! Common ID Types
//!
//! Type-safe wrappers around the public `ref_id` UUIDs. Internal bigserial
//! row ids stay inside the infra layer and never cross crate boundaries.

use std::fmt;
use std::marker::PhantomData;
use uuid::Uuid;

/// Generic typed ID wrapper
///
/// Usage:
/// ```
/// use kernel::id::{Id, markers};
/// type UserRef = Id<markers::User>;
/// ```
pub struct Id<T> {
    value: Uuid,
    _marker: PhantomData<T>,
}

// Manual impls keep the marker type out of the trait bounds; a derive
// would require `T: Clone` etc. on the bare marker structs.
impl<T> Clone for Id<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for Id<T> {}

impl<T> PartialEq for Id<T> {
    fn eq(&self, other: &Self) -> bool {
        self.value == other.value
    }
}

impl<T> Eq for Id<T> {}

impl<T> std::hash::Hash for Id<T> {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.value.hash(state);
    }
}

impl<T> Id<T> {
    /// Create a new random ID (UUID v4)
    pub fn new() -> Self {
        Self {
            value: Uuid::new_v4(),
            _marker: PhantomData,
        }
    }

    /// Create from an existing UUID
    pub fn from_uuid(uuid: Uuid) -> Self {
        Self {
            value: uuid,
            _marker: PhantomData,
        }
    }

    /// Parse from string form
    pub fn parse(s: &str) -> Result<Self, uuid::Error> {
        Ok(Self::from_uuid(Uuid::parse_str(s)?))
    }

    /// Get the underlying UUID
    pub fn as_uuid(&self) -> &Uuid {
        &self.value
    }

    /// Convert to UUID
    pub fn into_uuid(self) -> Uuid {
        self.value
    }
}

impl<T> Default for Id<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> fmt::Debug for Id<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Id({})", self.value)
    }
}

impl<T> fmt::Display for Id<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.value)
    }
}

// Manual serde impls keep the marker type out of the trait bounds
impl<T> serde::Serialize for Id<T> {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.value.serialize(serializer)
    }
}

impl<'de, T> serde::Deserialize<'de> for Id<T> {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Ok(Self::from_uuid(Uuid::deserialize(deserializer)?))
    }
}

impl<T> From<Uuid> for Id<T> {
    fn from(uuid: Uuid) -> Self {
        Self::from_uuid(uuid)
    }
}

impl<T> From<Id<T>> for Uuid {
    fn from(id: Id<T>) -> Self {
        id.value
    }
}

/// Marker types for different entity IDs
pub mod markers {
    /// Marker for user ref ids
    pub struct User;

    /// Marker for OTP verification record ids
    pub struct OtpVerification;

    /// Marker for college ref ids
    pub struct College;

    /// Marker for application ref ids
    pub struct Application;

    /// Marker for order ids
    pub struct Order;

    /// Marker for payment ids
    pub struct Payment;

    /// Marker for notification ids
    pub struct Notification;
}

/// Type aliases for common IDs
pub type UserRef = Id<markers::User>;
pub type VerificationId = Id<markers::OtpVerification>;
pub type CollegeRef = Id<markers::College>;
pub type ApplicationRef = Id<markers::Application>;
pub type OrderId = Id<markers::Order>;
pub type PaymentId = Id<markers::Payment>;
pub type NotificationId = Id<markers::Notification>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_id_type_safety() {
        let user_ref: UserRef = Id::new();
        let order_id: OrderId = Id::new();

        // Different marker types cannot be mixed without going through Uuid
        let _u: Uuid = user_ref.into_uuid();
        let _o: Uuid = order_id.into_uuid();
    }

    #[test]
    fn test_id_parse_roundtrip() {
        let id: CollegeRef = Id::new();
        let parsed = CollegeRef::parse(&id.to_string()).unwrap();
        assert_eq!(id, parsed);
    }

    #[test]
    fn test_id_is_copy_and_hashable_without_marker_bounds() {
        // Marker structs derive nothing; Copy/Eq/Hash must not require
        // anything of them.
        fn takes_by_value(_: UserRef) {}

        let id: UserRef = Id::new();
        takes_by_value(id);
        takes_by_value(id);

        let mut set = std::collections::HashSet::new();
        set.insert(id);
        assert!(set.contains(&id));
    }

    #[test]
    fn test_id_parse_rejects_garbage() {
        assert!(CollegeRef::parse("not-a-uuid").is_err());
    }

    #[test]
    fn test_id_serde_is_plain_uuid() {
        let id: UserRef = Id::new();
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, format!("\"{id}\""));
        let back: UserRef = serde_json::from_str(&json).unwrap();
        assert_eq!(back, id);
    }
}
