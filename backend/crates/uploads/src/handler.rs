//! HTTP handlers for the upload endpoints

use std::sync::Arc;

use axum::extract::{Multipart, Path, State};
use axum::Json;
use chrono::Utc;
use kernel::principal::Principal;
use platform::storage::ObjectStore;
use serde::Serialize;

use crate::document::{
    is_pdf, object_path, DocumentScope, DocumentType, MAX_FILE_BYTES,
};
use crate::error::{UploadsError, UploadsResult};
use crate::repository::DocumentRepository;

pub struct UploadsState<S, R> {
    pub store: Arc<S>,
    pub repo: Arc<R>,
}

impl<S, R> Clone for UploadsState<S, R> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
            repo: Arc::clone(&self.repo),
        }
    }
}

impl<S, R> UploadsState<S, R> {
    pub fn new(store: Arc<S>, repo: Arc<R>) -> Self {
        Self { store, repo }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadResponse {
    pub message: &'static str,
    pub path: String,
    pub signed_url: Option<String>,
}

struct UploadedFile {
    filename: String,
    content_type: Option<String>,
    bytes: Vec<u8>,
}

/// Pull the first file part out of the multipart body.
async fn read_file(multipart: &mut Multipart) -> UploadsResult<UploadedFile> {
    while let Some(field) = multipart.next_field().await? {
        let Some(filename) = field.file_name().map(str::to_string) else {
            continue;
        };
        let content_type = field.content_type().map(str::to_string);
        let bytes = field.bytes().await?.to_vec();
        return Ok(UploadedFile {
            filename,
            content_type,
            bytes,
        });
    }
    Err(UploadsError::MissingFile)
}

async fn upload_document<S, R>(
    state: &UploadsState<S, R>,
    principal: &Principal,
    scope: DocumentScope,
    raw_type: &str,
    multipart: &mut Multipart,
) -> UploadsResult<UploadResponse>
where
    S: ObjectStore,
    R: DocumentRepository,
{
    let doc_type = DocumentType::parse(raw_type)?;
    let file = read_file(multipart).await?;

    if file.bytes.len() > MAX_FILE_BYTES {
        return Err(UploadsError::FileTooLarge {
            max_bytes: MAX_FILE_BYTES,
        });
    }
    if !is_pdf(&file.bytes, file.content_type.as_deref(), &file.filename) {
        return Err(UploadsError::NotAPdf);
    }

    let path = object_path(
        principal.user_ref,
        scope,
        doc_type,
        Utc::now().timestamp_millis(),
        &file.filename,
    );
    let stored = state
        .store
        .upload(&path, file.bytes, "application/pdf")
        .await?;

    if scope == DocumentScope::Account {
        state
            .repo
            .set_account_document(principal.user_ref, doc_type, &stored.path)
            .await?;
    }

    tracing::info!(
        user_ref = %principal.user_ref,
        scope = scope.as_str(),
        doc_type = doc_type.as_str(),
        path = %stored.path,
        "document uploaded"
    );
    Ok(UploadResponse {
        message: "UPLOADED",
        path: stored.path,
        signed_url: stored.signed_url,
    })
}

pub async fn upload_application_document<S, R>(
    State(state): State<UploadsState<S, R>>,
    principal: Principal,
    Path(raw_type): Path<String>,
    mut multipart: Multipart,
) -> Result<Json<UploadResponse>, UploadsError>
where
    S: ObjectStore + Send + Sync,
    R: DocumentRepository + Send + Sync,
{
    let response = upload_document(
        &state,
        &principal,
        DocumentScope::Application,
        &raw_type,
        &mut multipart,
    )
    .await?;
    Ok(Json(response))
}

pub async fn upload_account_document<S, R>(
    State(state): State<UploadsState<S, R>>,
    principal: Principal,
    Path(raw_type): Path<String>,
    mut multipart: Multipart,
) -> Result<Json<UploadResponse>, UploadsError>
where
    S: ObjectStore + Send + Sync,
    R: DocumentRepository + Send + Sync,
{
    let response = upload_document(
        &state,
        &principal,
        DocumentScope::Account,
        &raw_type,
        &mut multipart,
    )
    .await?;
    Ok(Json(response))
}
