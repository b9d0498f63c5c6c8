//! User route tables
//!
//! The complaint catalogue is public; everything else needs the bearer
//! middleware layered by the caller.

use std::sync::Arc;

use axum::routing::{get, post, put};
use axum::Router;

use crate::handler;
use crate::repository::ProfileRepository;

/// Public routes, mounted under `/api/user`.
pub fn public_router<R>(repo: Arc<R>) -> Router
where
    R: ProfileRepository + Send + Sync + 'static,
{
    Router::new()
        .route("/faqs/complaints", get(handler::list_complaints::<R>))
        .with_state(repo)
}

/// Routes that need an authenticated principal.
pub fn protected_router<R>(repo: Arc<R>) -> Router
where
    R: ProfileRepository + Send + Sync + 'static,
{
    Router::new()
        .route(
            "/profile",
            get(handler::get_profile::<R>).put(handler::update_profile::<R>),
        )
        .route("/notifications/all", get(handler::list_notifications::<R>))
        .route("/notifications/add", post(handler::add_notification::<R>))
        .route(
            "/notifications/mark-read/{id}",
            put(handler::mark_notification_read::<R>),
        )
        .route(
            "/notifications/delete",
            post(handler::delete_notifications::<R>),
        )
        .route("/support", put(handler::record_support::<R>))
        .with_state(repo)
}
