//! Wire DTOs for the user endpoints

use chrono::{DateTime, NaiveDate, Utc};
use kernel::id::{NotificationId, UserRef};
use serde::{Deserialize, Serialize};

use crate::model::{Complaint, Notification, Profile};

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileResponse {
    pub id: UserRef,
    pub mobile: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub gender: Option<String>,
    pub dob: Option<NaiveDate>,
    pub course_type_id: Option<i64>,
    pub mobile_verified: bool,
    pub email_verified: bool,
    pub hsc_path: Option<String>,
    pub sslc_path: Option<String>,
    pub member_since: DateTime<Utc>,
}

impl From<Profile> for ProfileResponse {
    fn from(profile: Profile) -> Self {
        Self {
            id: profile.user_ref,
            mobile: profile.mobile,
            email: profile.email,
            first_name: profile.first_name,
            last_name: profile.last_name,
            gender: profile.gender,
            dob: profile.dob,
            course_type_id: profile.course_type_id,
            mobile_verified: profile.mobile_verified,
            email_verified: profile.email_verified,
            hsc_path: profile.hsc_path,
            sslc_path: profile.sslc_path,
            member_since: profile.created_at,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProfileRequest {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub mobile: String,
    pub gender: Option<String>,
    pub dob: Option<NaiveDate>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NotificationResponse {
    pub id: NotificationId,
    pub title: String,
    pub message: String,
    pub kind: String,
    pub read: bool,
    pub created_at: DateTime<Utc>,
}

impl From<Notification> for NotificationResponse {
    fn from(notification: Notification) -> Self {
        Self {
            id: notification.id,
            title: notification.title,
            message: notification.body,
            kind: notification.kind,
            read: notification.read,
            created_at: notification.created_at,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddNotificationRequest {
    pub title: String,
    pub message: String,
    pub kind: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteNotificationsRequest {
    pub notification_ids: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct DeletedResponse {
    pub deleted: u64,
}

#[derive(Debug, Serialize)]
pub struct ComplaintResponse {
    pub id: i64,
    pub title: String,
    pub description: Option<String>,
}

impl From<Complaint> for ComplaintResponse {
    fn from(complaint: Complaint) -> Self {
        Self {
            id: complaint.id,
            title: complaint.title,
            description: complaint.description,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct SupportQuery {
    pub complaint_id: i64,
}

#[derive(Debug, Serialize)]
pub struct SupportResponse {
    pub success: bool,
}
