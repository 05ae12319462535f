use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use serde::Deserialize;
use serde_json::json;

use crate::store::{DocumentId, DocumentStore};

use super::domain::{CandidateDraft, CandidateStage, CandidateUpdate};
use super::service::{CandidateError, CandidateService};

pub fn candidate_router<S: DocumentStore + 'static>(service: Arc<CandidateService<S>>) -> Router {
    Router::new()
        .route(
            "/api/v1/candidates",
            post(create_handler::<S>).get(list_handler::<S>),
        )
        .route(
            "/api/v1/candidates/:candidate_id",
            get(get_handler::<S>)
                .put(update_handler::<S>)
                .delete(delete_handler::<S>),
        )
        .with_state(service)
}

fn error_body(message: impl std::fmt::Display) -> axum::Json<serde_json::Value> {
    axum::Json(json!({ "error": message.to_string() }))
}

fn candidate_error_response(error: CandidateError) -> Response {
    match &error {
        CandidateError::Form(_) => {
            (StatusCode::UNPROCESSABLE_ENTITY, error_body(error)).into_response()
        }
        CandidateError::Repository(repository) if repository.is_not_found() => {
            (StatusCode::NOT_FOUND, error_body(error)).into_response()
        }
        CandidateError::Repository(_) => {
            (StatusCode::INTERNAL_SERVER_ERROR, error_body(error)).into_response()
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct CreateParams {
    company_id: String,
}

pub(crate) async fn create_handler<S: DocumentStore + 'static>(
    State(service): State<Arc<CandidateService<S>>>,
    Query(params): Query<CreateParams>,
    axum::Json(draft): axum::Json<CandidateDraft>,
) -> Response {
    match service.add(&params.company_id, &draft) {
        Ok(candidate) => (StatusCode::CREATED, axum::Json(candidate)).into_response(),
        Err(error) => candidate_error_response(error),
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ListParams {
    company_id: String,
    #[serde(default)]
    status: Option<CandidateStage>,
    #[serde(default)]
    search: Option<String>,
}

pub(crate) async fn list_handler<S: DocumentStore + 'static>(
    State(service): State<Arc<CandidateService<S>>>,
    Query(params): Query<ListParams>,
) -> Response {
    match service.for_company(&params.company_id, params.status, params.search.as_deref()) {
        Ok(candidates) => (StatusCode::OK, axum::Json(candidates)).into_response(),
        Err(error) => candidate_error_response(error),
    }
}

pub(crate) async fn get_handler<S: DocumentStore + 'static>(
    State(service): State<Arc<CandidateService<S>>>,
    Path(candidate_id): Path<String>,
) -> Response {
    match service.get(&DocumentId(candidate_id)) {
        Ok(candidate) => (StatusCode::OK, axum::Json(candidate)).into_response(),
        Err(error) => candidate_error_response(error),
    }
}

pub(crate) async fn update_handler<S: DocumentStore + 'static>(
    State(service): State<Arc<CandidateService<S>>>,
    Path(candidate_id): Path<String>,
    axum::Json(update): axum::Json<CandidateUpdate>,
) -> Response {
    match service.update(&DocumentId(candidate_id), &update) {
        Ok(candidate) => (StatusCode::OK, axum::Json(candidate)).into_response(),
        Err(error) => candidate_error_response(error),
    }
}

pub(crate) async fn delete_handler<S: DocumentStore + 'static>(
    State(service): State<Arc<CandidateService<S>>>,
    Path(candidate_id): Path<String>,
) -> Response {
    match service.delete(&DocumentId(candidate_id)) {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(error) => candidate_error_response(error),
    }
}
