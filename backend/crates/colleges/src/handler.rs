//! HTTP handlers for the colleges endpoints

use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use kernel::id::CollegeRef;
use kernel::principal::Principal;

use crate::dto::{
    ApplicationResponse, CategoryResponse, CollegeListQuery, CollegeListResponse, CollegeResponse,
    SaveResponse, SavedCollegeResponse,
};
use crate::error::{CollegesError, CollegesResult};
use crate::model::CollegeFilter;
use crate::repository::CollegeRepository;

fn parse_college_ref(raw: &str) -> CollegesResult<CollegeRef> {
    CollegeRef::parse(raw)
        .map_err(|_| CollegesError::Validation("college id must be a UUID".to_string()))
}

pub async fn list_colleges<R: CollegeRepository>(
    State(repo): State<Arc<R>>,
    axum::extract::Query(query): axum::extract::Query<CollegeListQuery>,
) -> Result<impl IntoResponse, CollegesError> {
    let filter = CollegeFilter::new(
        query.category,
        query.search,
        query.city,
        query.page,
        query.limit,
    )?;
    let page = repo.list(&filter).await?;
    Ok(Json(CollegeListResponse::from(page)))
}

pub async fn list_categories<R: CollegeRepository>(
    State(repo): State<Arc<R>>,
) -> Result<impl IntoResponse, CollegesError> {
    let categories = repo.categories().await?;
    Ok(Json(
        categories
            .into_iter()
            .map(CategoryResponse::from)
            .collect::<Vec<_>>(),
    ))
}

pub async fn get_college<R: CollegeRepository>(
    State(repo): State<Arc<R>>,
    Path(ref_id): Path<String>,
) -> Result<impl IntoResponse, CollegesError> {
    let college_ref = parse_college_ref(&ref_id)?;
    let college = repo
        .find_by_ref(college_ref)
        .await?
        .ok_or(CollegesError::CollegeNotFound)?;
    Ok(Json(CollegeResponse::from(college)))
}

pub async fn save_college<R: CollegeRepository>(
    State(repo): State<Arc<R>>,
    principal: Principal,
    Path(ref_id): Path<String>,
) -> Result<impl IntoResponse, CollegesError> {
    let college_ref = parse_college_ref(&ref_id)?;
    let saved = repo.toggle_saved(principal.user_ref, college_ref).await?;
    Ok(Json(SaveResponse { saved }))
}

pub async fn saved_colleges<R: CollegeRepository>(
    State(repo): State<Arc<R>>,
    principal: Principal,
) -> Result<impl IntoResponse, CollegesError> {
    let saved = repo.saved_for_user(principal.user_ref).await?;
    Ok(Json(
        saved
            .into_iter()
            .map(SavedCollegeResponse::from)
            .collect::<Vec<_>>(),
    ))
}

pub async fn apply_college<R: CollegeRepository>(
    State(repo): State<Arc<R>>,
    principal: Principal,
    Path(ref_id): Path<String>,
) -> Result<impl IntoResponse, CollegesError> {
    let college_ref = parse_college_ref(&ref_id)?;
    let application = repo
        .create_application(principal.user_ref, college_ref)
        .await?;
    tracing::info!(
        user_ref = %principal.user_ref,
        application_ref = %application.ref_id,
        "application created"
    );
    Ok((
        StatusCode::CREATED,
        Json(ApplicationResponse::from(application)),
    ))
}

pub async fn applied_colleges<R: CollegeRepository>(
    State(repo): State<Arc<R>>,
    principal: Principal,
) -> Result<impl IntoResponse, CollegesError> {
    let applications = repo.applications_for_user(principal.user_ref).await?;
    Ok(Json(
        applications
            .into_iter()
            .map(ApplicationResponse::from)
            .collect::<Vec<_>>(),
    ))
}
