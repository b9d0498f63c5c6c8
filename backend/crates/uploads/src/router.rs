//! Upload route table

use axum::routing::put;
use axum::Router;
use platform::storage::ObjectStore;

use crate::handler::{self, UploadsState};
use crate::repository::DocumentRepository;

/// Routes mounted under `/api/uploads`; the caller layers the bearer
/// middleware on top.
pub fn uploads_router<S, R>(state: UploadsState<S, R>) -> Router
where
    S: ObjectStore + Send + Sync + 'static,
    R: DocumentRepository + Send + Sync + 'static,
{
    Router::new()
        .route(
            "/application/{type}",
            put(handler::upload_application_document::<S, R>),
        )
        .route(
            "/account/{type}",
            put(handler::upload_account_document::<S, R>),
        )
        .with_state(state)
}
