//! HTTP handlers for the user endpoints

use std::sync::Arc;

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use chrono::Utc;
use kernel::id::NotificationId;
use kernel::principal::Principal;

use crate::dto::{
    AddNotificationRequest, ComplaintResponse, DeleteNotificationsRequest, DeletedResponse,
    NotificationResponse, ProfileResponse, SupportQuery, SupportResponse, UpdateProfileRequest,
};
use crate::error::{UsersError, UsersResult};
use crate::model::{NewNotification, ProfileUpdate};
use crate::repository::ProfileRepository;

fn parse_notification_id(raw: &str) -> UsersResult<NotificationId> {
    NotificationId::parse(raw)
        .map_err(|_| UsersError::Validation("notification id must be a UUID".to_string()))
}

pub async fn get_profile<R: ProfileRepository>(
    State(repo): State<Arc<R>>,
    principal: Principal,
) -> Result<impl IntoResponse, UsersError> {
    let profile = repo
        .find_profile(principal.user_ref)
        .await?
        .ok_or(UsersError::UserNotFound)?;
    Ok(Json(ProfileResponse::from(profile)))
}

pub async fn update_profile<R: ProfileRepository>(
    State(repo): State<Arc<R>>,
    principal: Principal,
    Json(request): Json<UpdateProfileRequest>,
) -> Result<impl IntoResponse, UsersError> {
    let update = ProfileUpdate::new(
        request.first_name,
        request.last_name,
        request.email,
        request.mobile,
        request.gender,
        request.dob,
        Utc::now().date_naive(),
    )?;
    let profile = repo.update_profile(principal.user_ref, &update).await?;
    tracing::info!(user_ref = %principal.user_ref, "profile updated");
    Ok(Json(ProfileResponse::from(profile)))
}

pub async fn list_notifications<R: ProfileRepository>(
    State(repo): State<Arc<R>>,
    principal: Principal,
) -> Result<impl IntoResponse, UsersError> {
    let notifications = repo.notifications_for(principal.user_ref).await?;
    Ok(Json(
        notifications
            .into_iter()
            .map(NotificationResponse::from)
            .collect::<Vec<_>>(),
    ))
}

pub async fn add_notification<R: ProfileRepository>(
    State(repo): State<Arc<R>>,
    principal: Principal,
    Json(request): Json<AddNotificationRequest>,
) -> Result<impl IntoResponse, UsersError> {
    let notification = NewNotification::new(request.title, request.message, request.kind)?;
    let created = repo
        .add_notification(principal.user_ref, &notification)
        .await?;
    Ok((
        StatusCode::CREATED,
        Json(NotificationResponse::from(created)),
    ))
}

pub async fn mark_notification_read<R: ProfileRepository>(
    State(repo): State<Arc<R>>,
    principal: Principal,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, UsersError> {
    let id = parse_notification_id(&id)?;
    repo.mark_read(principal.user_ref, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn delete_notifications<R: ProfileRepository>(
    State(repo): State<Arc<R>>,
    principal: Principal,
    Json(request): Json<DeleteNotificationsRequest>,
) -> Result<impl IntoResponse, UsersError> {
    let ids = request
        .notification_ids
        .iter()
        .map(|raw| parse_notification_id(raw))
        .collect::<UsersResult<Vec<_>>>()?;
    let deleted = repo.delete_notifications(principal.user_ref, &ids).await?;
    Ok(Json(DeletedResponse { deleted }))
}

pub async fn list_complaints<R: ProfileRepository>(
    State(repo): State<Arc<R>>,
) -> Result<impl IntoResponse, UsersError> {
    let complaints = repo.complaints().await?;
    Ok(Json(
        complaints
            .into_iter()
            .map(ComplaintResponse::from)
            .collect::<Vec<_>>(),
    ))
}

pub async fn record_support<R: ProfileRepository>(
    State(repo): State<Arc<R>>,
    principal: Principal,
    Query(query): Query<SupportQuery>,
) -> Result<impl IntoResponse, UsersError> {
    repo.record_support(principal.user_ref, query.complaint_id)
        .await?;
    tracing::info!(
        user_ref = %principal.user_ref,
        complaint_id = query.complaint_id,
        "support request recorded"
    );
    Ok(Json(SupportResponse { success: true }))
}
