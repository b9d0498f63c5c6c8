//! Postgres implementation of the profile repository
//!
//! Notifications are soft-deleted, so clients can undo within a
//! support window and the rows remain for audit. Verified flags on
//! mobile/email are cleared only when the value actually changes.

use chrono::{DateTime, NaiveDate, Utc};
use kernel::id::{NotificationId, UserRef};
use sqlx::{PgPool, Row};
use uuid::Uuid;

use crate::error::{UsersError, UsersResult};
use crate::model::{Complaint, NewNotification, Notification, Profile, ProfileUpdate};
use crate::repository::ProfileRepository;

#[derive(Clone)]
pub struct PgProfileRepository {
    pool: PgPool,
}

impl PgProfileRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(sqlx::FromRow)]
struct ProfileRow {
    ref_id: Uuid,
    mobile: String,
    email: String,
    first_name: String,
    last_name: String,
    gender: Option<String>,
    dob: Option<NaiveDate>,
    course_type_id: Option<i64>,
    mobile_verified: bool,
    email_verified: bool,
    hsc_path: Option<String>,
    sslc_path: Option<String>,
    created_at: DateTime<Utc>,
}

impl ProfileRow {
    fn into_profile(self) -> Profile {
        Profile {
            user_ref: UserRef::from_uuid(self.ref_id),
            mobile: self.mobile,
            email: self.email,
            first_name: self.first_name,
            last_name: self.last_name,
            gender: self.gender,
            dob: self.dob,
            course_type_id: self.course_type_id,
            mobile_verified: self.mobile_verified,
            email_verified: self.email_verified,
            hsc_path: self.hsc_path,
            sslc_path: self.sslc_path,
            created_at: self.created_at,
        }
    }
}

const PROFILE_COLUMNS: &str = "ref_id, mobile, email, first_name, last_name, gender, dob, \
     course_type_id, mobile_verified, email_verified, hsc_path, sslc_path, created_at";

#[derive(sqlx::FromRow)]
struct NotificationRow {
    id: Uuid,
    title: String,
    body: String,
    kind: String,
    read: bool,
    created_at: DateTime<Utc>,
}

impl NotificationRow {
    fn into_notification(self) -> Notification {
        Notification {
            id: NotificationId::from_uuid(self.id),
            title: self.title,
            body: self.body,
            kind: self.kind,
            read: self.read,
            created_at: self.created_at,
        }
    }
}

fn unique_violation_field(err: &sqlx::Error) -> Option<&str> {
    if let sqlx::Error::Database(db) = err {
        if db.code().as_deref() == Some("23505") {
            let constraint = db.constraint().unwrap_or_default();
            if constraint.contains("mobile") {
                return Some("mobile");
            }
            return Some("email");
        }
    }
    None
}

fn is_foreign_key_violation(err: &sqlx::Error) -> bool {
    matches!(
        err,
        sqlx::Error::Database(db) if db.code().as_deref() == Some("23503")
    )
}

impl ProfileRepository for PgProfileRepository {
    async fn find_profile(&self, user_ref: UserRef) -> UsersResult<Option<Profile>> {
        let row = sqlx::query_as::<_, ProfileRow>(&format!(
            "SELECT {PROFILE_COLUMNS} FROM users WHERE ref_id = $1 AND is_active = TRUE",
        ))
        .bind(user_ref.as_uuid())
        .fetch_optional(&self.pool)
        .await?;
        Ok(row.map(ProfileRow::into_profile))
    }

    async fn update_profile(
        &self,
        user_ref: UserRef,
        update: &ProfileUpdate,
    ) -> UsersResult<Profile> {
        let result = sqlx::query_as::<_, ProfileRow>(&format!(
            "UPDATE users SET \
                first_name = $2, \
                last_name = $3, \
                email = $4, \
                mobile = $5, \
                gender = $6, \
                dob = $7, \
                email_verified = email_verified AND email = $4, \
                mobile_verified = mobile_verified AND mobile = $5, \
                updated_at = NOW() \
             WHERE ref_id = $1 AND is_active = TRUE \
             RETURNING {PROFILE_COLUMNS}",
        ))
        .bind(user_ref.as_uuid())
        .bind(&update.first_name)
        .bind(&update.last_name)
        .bind(&update.email)
        .bind(&update.mobile)
        .bind(&update.gender)
        .bind(update.dob)
        .fetch_optional(&self.pool)
        .await;

        match result {
            Ok(Some(row)) => Ok(row.into_profile()),
            Ok(None) => Err(UsersError::UserNotFound),
            Err(err) => match unique_violation_field(&err) {
                Some("mobile") => Err(UsersError::MobileAlreadyExists),
                Some(_) => Err(UsersError::EmailAlreadyExists),
                None => Err(err.into()),
            },
        }
    }

    async fn notifications_for(&self, user_ref: UserRef) -> UsersResult<Vec<Notification>> {
        let rows = sqlx::query_as::<_, NotificationRow>(
            "SELECT n.id, n.title, n.body, n.kind, n.read_at IS NOT NULL AS read, n.created_at \
             FROM notifications n \
             JOIN users u ON u.id = n.user_id \
             WHERE u.ref_id = $1 AND n.deleted_at IS NULL \
             ORDER BY n.created_at DESC",
        )
        .bind(user_ref.as_uuid())
        .fetch_all(&self.pool)
        .await?;
        Ok(rows
            .into_iter()
            .map(NotificationRow::into_notification)
            .collect())
    }

    async fn add_notification(
        &self,
        user_ref: UserRef,
        notification: &NewNotification,
    ) -> UsersResult<Notification> {
        let id = NotificationId::new();
        let row = sqlx::query(
            "INSERT INTO notifications (id, user_id, title, body, kind) \
             SELECT $1, u.id, $2, $3, $4 FROM users u \
             WHERE u.ref_id = $5 AND u.is_active = TRUE \
             RETURNING created_at",
        )
        .bind(id.as_uuid())
        .bind(&notification.title)
        .bind(&notification.body)
        .bind(&notification.kind)
        .bind(user_ref.as_uuid())
        .fetch_optional(&self.pool)
        .await?
        .ok_or(UsersError::UserNotFound)?;

        Ok(Notification {
            id,
            title: notification.title.clone(),
            body: notification.body.clone(),
            kind: notification.kind.clone(),
            read: false,
            created_at: row.get("created_at"),
        })
    }

    async fn mark_read(&self, user_ref: UserRef, id: NotificationId) -> UsersResult<()> {
        let result = sqlx::query(
            "UPDATE notifications n SET read_at = COALESCE(n.read_at, NOW()) \
             FROM users u \
             WHERE n.id = $2 AND n.user_id = u.id AND u.ref_id = $1 \
               AND n.deleted_at IS NULL",
        )
        .bind(user_ref.as_uuid())
        .bind(id.as_uuid())
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(UsersError::NotificationNotFound);
        }
        Ok(())
    }

    async fn delete_notifications(
        &self,
        user_ref: UserRef,
        ids: &[NotificationId],
    ) -> UsersResult<u64> {
        if ids.is_empty() {
            return Ok(0);
        }
        let uuids: Vec<Uuid> = ids.iter().map(|id| id.into_uuid()).collect();
        let result = sqlx::query(
            "UPDATE notifications n SET deleted_at = NOW() \
             FROM users u \
             WHERE n.user_id = u.id AND u.ref_id = $1 \
               AND n.id = ANY($2) AND n.deleted_at IS NULL",
        )
        .bind(user_ref.as_uuid())
        .bind(&uuids)
        .execute(&self.pool)
        .await?;
        Ok(result.rows_affected())
    }

    async fn complaints(&self) -> UsersResult<Vec<Complaint>> {
        let rows = sqlx::query("SELECT id, title, description FROM complaints ORDER BY id")
            .fetch_all(&self.pool)
            .await?;
        Ok(rows
            .into_iter()
            .map(|row| Complaint {
                id: row.get("id"),
                title: row.get("title"),
                description: row.get("description"),
            })
            .collect())
    }

    async fn record_support(&self, user_ref: UserRef, complaint_id: i64) -> UsersResult<()> {
        let result = sqlx::query(
            "INSERT INTO support_requests (user_id, complaint_id) \
             SELECT u.id, $2 FROM users u \
             WHERE u.ref_id = $1 AND u.is_active = TRUE",
        )
        .bind(user_ref.as_uuid())
        .bind(complaint_id)
        .execute(&self.pool)
        .await;

        match result {
            Ok(done) if done.rows_affected() == 0 => Err(UsersError::UserNotFound),
            Ok(_) => Ok(()),
            Err(err) if is_foreign_key_violation(&err) => Err(UsersError::ComplaintNotFound),
            Err(err) => Err(err.into()),
        }
    }
}
