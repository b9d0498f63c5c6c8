//! OTP verification entity
//!
//! One row per issued code. Only one verification per mobile is active
//! at a time; issuing a new code deactivates the old ones. A verified
//! record stays usable for login or signup only for a short window
//! counted from the moment it was verified (`updated_at`).

use chrono::{DateTime, Duration, Utc};
use kernel::id::VerificationId;

use crate::domain::value_object::{Mobile, OtpCode};

#[derive(Debug, Clone)]
pub struct OtpVerification {
    pub id: VerificationId,
    pub mobile: Mobile,
    pub code: OtpCode,
    /// Failed verification attempts so far
    pub attempts: i32,
    pub verified: bool,
    pub active: bool,
    pub expires_at: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl OtpVerification {
    /// Issue a fresh verification for `mobile`, valid for `ttl`.
    pub fn issue(mobile: Mobile, code: OtpCode, ttl: Duration, now: DateTime<Utc>) -> Self {
        Self {
            id: VerificationId::new(),
            mobile,
            code,
            attempts: 0,
            verified: false,
            active: true,
            expires_at: now + ttl,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        now >= self.expires_at
    }

    pub fn attempts_exhausted(&self, max_attempts: u32) -> bool {
        self.attempts >= max_attempts as i32
    }

    /// A wrong code was submitted.
    pub fn record_failed_attempt(&mut self, now: DateTime<Utc>) {
        self.attempts += 1;
        self.updated_at = now;
    }

    /// The right code was submitted. `updated_at` becomes the start of
    /// the login/signup window.
    pub fn mark_verified(&mut self, now: DateTime<Utc>) {
        self.verified = true;
        self.updated_at = now;
    }

    pub fn deactivate(&mut self, now: DateTime<Utc>) {
        self.active = false;
        self.updated_at = now;
    }

    /// True while the record is verified, still active, and within
    /// `window` of the verification instant.
    pub fn verified_within(&self, window: Duration, now: DateTime<Utc>) -> bool {
        self.verified && self.active && now.signed_duration_since(self.updated_at) <= window
    }
}
