//! College route tables
//!
//! The catalogue is public; bookmarks and applications are mounted
//! separately so the caller can wrap them with the auth middleware.

use std::sync::Arc;

use axum::routing::{get, post};
use axum::Router;

use crate::handler;
use crate::repository::CollegeRepository;

/// Public catalogue routes, mounted under `/api/colleges`.
pub fn public_router<R>(repo: Arc<R>) -> Router
where
    R: CollegeRepository + Send + Sync + 'static,
{
    Router::new()
        .route("/", get(handler::list_colleges::<R>))
        .route("/categories", get(handler::list_categories::<R>))
        .route("/{ref_id}", get(handler::get_college::<R>))
        .with_state(repo)
}

/// Routes that need an authenticated principal; the caller layers the
/// bearer middleware on top before merging.
pub fn protected_router<R>(repo: Arc<R>) -> Router
where
    R: CollegeRepository + Send + Sync + 'static,
{
    Router::new()
        .route("/saved", get(handler::saved_colleges::<R>))
        .route("/applied", get(handler::applied_colleges::<R>))
        .route("/{ref_id}/save", post(handler::save_college::<R>))
        .route("/{ref_id}/apply", post(handler::apply_college::<R>))
        .with_state(repo)
}
