//! Postgres persistence for the auth domain
//!
//! One repository type backs the OTP store, the auth view of users, and
//! the rate limit counters. Rate limiting uses fixed windows: counters
//! are upserted per (key, window start) and stale windows are purged by
//! the startup cleanup.

use chrono::{DateTime, Utc};
use kernel::id::{UserRef, VerificationId};
use platform::rate_limit::{RateLimitConfig, RateLimitStore};
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::entity::{OtpVerification, User};
use crate::domain::repository::{OtpRepository, UserRepository};
use crate::domain::value_object::{Email, Mobile, OtpCode};
use crate::error::{AuthError, AuthResult};

#[derive(Clone)]
pub struct PgAuthRepository {
    pool: PgPool,
}

impl PgAuthRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Drop rate limit windows that ended before `cutoff_ms`. Called by
    /// the startup cleanup alongside OTP purging.
    pub async fn purge_rate_windows_before(&self, cutoff_ms: i64) -> AuthResult<u64> {
        let result = sqlx::query("DELETE FROM otp_rate_limits WHERE window_start_ms < $1")
            .bind(cutoff_ms)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected())
    }
}

#[derive(sqlx::FromRow)]
struct OtpVerificationRow {
    id: Uuid,
    mobile: String,
    otp_code: String,
    attempts: i32,
    verified: bool,
    is_active: bool,
    expires_at: DateTime<Utc>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl OtpVerificationRow {
    fn into_verification(self) -> OtpVerification {
        OtpVerification {
            id: VerificationId::from_uuid(self.id),
            mobile: Mobile::from_stored(self.mobile),
            code: OtpCode::from_stored(self.otp_code),
            attempts: self.attempts,
            verified: self.verified,
            active: self.is_active,
            expires_at: self.expires_at,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

const OTP_COLUMNS: &str = "id, mobile, otp_code, attempts, verified, is_active, \
     expires_at, created_at, updated_at";

impl OtpRepository for PgAuthRepository {
    async fn create(&self, verification: &OtpVerification) -> AuthResult<()> {
        sqlx::query(
            "INSERT INTO otp_verifications \
             (id, mobile, otp_code, attempts, verified, is_active, expires_at, created_at, updated_at) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)",
        )
        .bind(verification.id.as_uuid())
        .bind(verification.mobile.as_str())
        .bind(verification.code.as_str())
        .bind(verification.attempts)
        .bind(verification.verified)
        .bind(verification.active)
        .bind(verification.expires_at)
        .bind(verification.created_at)
        .bind(verification.updated_at)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn find_active_by_mobile(&self, mobile: &Mobile) -> AuthResult<Option<OtpVerification>> {
        let row = sqlx::query_as::<_, OtpVerificationRow>(&format!(
            "SELECT {OTP_COLUMNS} FROM otp_verifications \
             WHERE mobile = $1 AND is_active = TRUE \
             ORDER BY created_at DESC LIMIT 1",
        ))
        .bind(mobile.as_str())
        .fetch_optional(&self.pool)
        .await?;
        Ok(row.map(OtpVerificationRow::into_verification))
    }

    async fn find_by_id(&self, id: VerificationId) -> AuthResult<Option<OtpVerification>> {
        let row = sqlx::query_as::<_, OtpVerificationRow>(&format!(
            "SELECT {OTP_COLUMNS} FROM otp_verifications WHERE id = $1",
        ))
        .bind(id.as_uuid())
        .fetch_optional(&self.pool)
        .await?;
        Ok(row.map(OtpVerificationRow::into_verification))
    }

    async fn update(&self, verification: &OtpVerification) -> AuthResult<()> {
        sqlx::query(
            "UPDATE otp_verifications \
             SET attempts = $2, verified = $3, is_active = $4, updated_at = $5 \
             WHERE id = $1",
        )
        .bind(verification.id.as_uuid())
        .bind(verification.attempts)
        .bind(verification.verified)
        .bind(verification.active)
        .bind(verification.updated_at)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn deactivate_all_for_mobile(&self, mobile: &Mobile) -> AuthResult<u64> {
        let result = sqlx::query(
            "UPDATE otp_verifications SET is_active = FALSE, updated_at = NOW() \
             WHERE mobile = $1 AND is_active = TRUE",
        )
        .bind(mobile.as_str())
        .execute(&self.pool)
        .await?;
        Ok(result.rows_affected())
    }

    async fn delete_expired_before(&self, cutoff: DateTime<Utc>) -> AuthResult<u64> {
        let result = sqlx::query("DELETE FROM otp_verifications WHERE expires_at < $1")
            .bind(cutoff)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected())
    }
}

#[derive(sqlx::FromRow)]
struct AuthUserRow {
    ref_id: Uuid,
    mobile: String,
    email: String,
    first_name: String,
    last_name: String,
    course_type_id: Option<i64>,
    mobile_verified: bool,
    email_verified: bool,
    is_active: bool,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl AuthUserRow {
    fn into_user(self) -> User {
        User {
            user_ref: UserRef::from_uuid(self.ref_id),
            mobile: Mobile::from_stored(self.mobile),
            email: Email::from_stored(self.email),
            first_name: self.first_name,
            last_name: self.last_name,
            course_type_id: self.course_type_id,
            mobile_verified: self.mobile_verified,
            email_verified: self.email_verified,
            active: self.is_active,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

const USER_COLUMNS: &str = "ref_id, mobile, email, first_name, last_name, course_type_id, \
     mobile_verified, email_verified, is_active, created_at, updated_at";

impl UserRepository for PgAuthRepository {
    async fn create(&self, user: &User) -> AuthResult<()> {
        sqlx::query(
            "INSERT INTO users \
             (ref_id, mobile, email, first_name, last_name, course_type_id, \
              mobile_verified, email_verified, is_active, created_at, updated_at) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)",
        )
        .bind(user.user_ref.as_uuid())
        .bind(user.mobile.as_str())
        .bind(user.email.as_str())
        .bind(&user.first_name)
        .bind(&user.last_name)
        .bind(user.course_type_id)
        .bind(user.mobile_verified)
        .bind(user.email_verified)
        .bind(user.active)
        .bind(user.created_at)
        .bind(user.updated_at)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn find_by_mobile(&self, mobile: &Mobile) -> AuthResult<Option<User>> {
        let row = sqlx::query_as::<_, AuthUserRow>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE mobile = $1",
        ))
        .bind(mobile.as_str())
        .fetch_optional(&self.pool)
        .await?;
        Ok(row.map(AuthUserRow::into_user))
    }

    async fn find_by_email(&self, email: &Email) -> AuthResult<Option<User>> {
        let row = sqlx::query_as::<_, AuthUserRow>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE email = $1",
        ))
        .bind(email.as_str())
        .fetch_optional(&self.pool)
        .await?;
        Ok(row.map(AuthUserRow::into_user))
    }

    async fn find_by_ref(&self, user_ref: UserRef) -> AuthResult<Option<User>> {
        let row = sqlx::query_as::<_, AuthUserRow>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE ref_id = $1",
        ))
        .bind(user_ref.as_uuid())
        .fetch_optional(&self.pool)
        .await?;
        Ok(row.map(AuthUserRow::into_user))
    }

    async fn set_mobile_verified(&self, user_ref: UserRef) -> AuthResult<()> {
        sqlx::query("UPDATE users SET mobile_verified = TRUE, updated_at = NOW() WHERE ref_id = $1")
            .bind(user_ref.as_uuid())
            .execute(&self.pool)
            .await?;
        Ok(())
    }
}

impl RateLimitStore for PgAuthRepository {
    type Error = AuthError;

    async fn check_and_increment(
        &self,
        key: &str,
        config: &RateLimitConfig,
    ) -> Result<bool, Self::Error> {
        let window_ms = config.window_ms();
        let window_start = (Utc::now().timestamp_millis() / window_ms) * window_ms;

        let (count,): (i32,) = sqlx::query_as(
            "INSERT INTO otp_rate_limits (rate_key, window_start_ms, request_count) \
             VALUES ($1, $2, 1) \
             ON CONFLICT (rate_key, window_start_ms) \
             DO UPDATE SET request_count = otp_rate_limits.request_count + 1 \
             RETURNING request_count",
        )
        .bind(key)
        .bind(window_start)
        .fetch_one(&self.pool)
        .await?;

        Ok(count as u32 <= config.max_requests)
    }
}
