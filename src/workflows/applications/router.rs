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

use super::domain::{ApplicationDraft, ApplicationQuery, ApplicationStatus};
use super::service::{ApplicationError, ApplicationService};

pub fn application_router<S: DocumentStore + 'static>(
    service: Arc<ApplicationService<S>>,
) -> Router {
    Router::new()
        .route(
            "/api/v1/applications",
            post(submit_handler::<S>).get(list_handler::<S>),
        )
        .route("/api/v1/applications/:application_id", get(get_handler::<S>))
        .route(
            "/api/v1/applications/:application_id/status",
            post(transition_handler::<S>),
        )
        .with_state(service)
}

fn error_body(message: impl std::fmt::Display) -> axum::Json<serde_json::Value> {
    axum::Json(json!({ "error": message.to_string() }))
}

fn application_error_response(error: ApplicationError) -> Response {
    match &error {
        ApplicationError::Form(_) | ApplicationError::NotAccepting { .. } => {
            (StatusCode::UNPROCESSABLE_ENTITY, error_body(error)).into_response()
        }
        ApplicationError::Transition(_) => {
            (StatusCode::CONFLICT, error_body(error)).into_response()
        }
        ApplicationError::Repository(repository) if repository.is_not_found() => {
            (StatusCode::NOT_FOUND, error_body(error)).into_response()
        }
        ApplicationError::Repository(_) => {
            (StatusCode::INTERNAL_SERVER_ERROR, error_body(error)).into_response()
        }
    }
}

pub(crate) async fn submit_handler<S: DocumentStore + 'static>(
    State(service): State<Arc<ApplicationService<S>>>,
    axum::Json(draft): axum::Json<ApplicationDraft>,
) -> Response {
    match service.submit(&draft) {
        Ok(application) => (StatusCode::CREATED, axum::Json(application)).into_response(),
        Err(error) => application_error_response(error),
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ListParams {
    company_id: String,
    #[serde(default)]
    status: Option<ApplicationStatus>,
    #[serde(default)]
    internship_id: Option<String>,
    #[serde(default)]
    search: Option<String>,
}

pub(crate) async fn list_handler<S: DocumentStore + 'static>(
    State(service): State<Arc<ApplicationService<S>>>,
    Query(params): Query<ListParams>,
) -> Response {
    let query = ApplicationQuery {
        status: params.status,
        internship_id: params.internship_id.map(DocumentId),
        search: params.search,
    };
    match service.for_company(&params.company_id, &query) {
        Ok(applications) => (StatusCode::OK, axum::Json(applications)).into_response(),
        Err(error) => application_error_response(error),
    }
}

pub(crate) async fn get_handler<S: DocumentStore + 'static>(
    State(service): State<Arc<ApplicationService<S>>>,
    Path(application_id): Path<String>,
) -> Response {
    match service.get(&DocumentId(application_id)) {
        Ok(application) => (StatusCode::OK, axum::Json(application)).into_response(),
        Err(error) => application_error_response(error),
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct TransitionRequest {
    pub(crate) status: ApplicationStatus,
}

pub(crate) async fn transition_handler<S: DocumentStore + 'static>(
    State(service): State<Arc<ApplicationService<S>>>,
    Path(application_id): Path<String>,
    axum::Json(request): axum::Json<TransitionRequest>,
) -> Response {
    match service.transition(&DocumentId(application_id), request.status) {
        Ok(application) => (StatusCode::OK, axum::Json(application)).into_response(),
        Err(error) => application_error_response(error),
    }
}
