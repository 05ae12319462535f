use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use serde::Deserialize;
use serde_json::json;

use crate::store::{DocumentId, DocumentStore};

use super::domain::{InternshipDraft, InternshipUpdate};
use super::service::{InternshipError, InternshipService};

/// Header naming the acting user; stands in for the session the UI carries.
pub const OPERATOR_HEADER: &str = "x-operator-id";

pub fn internship_router<S: DocumentStore + 'static>(
    service: Arc<InternshipService<S>>,
) -> Router {
    Router::new()
        .route(
            "/api/v1/internships",
            post(create_handler::<S>).get(list_handler::<S>),
        )
        .route(
            "/api/v1/internships/:internship_id",
            get(get_handler::<S>)
                .put(update_handler::<S>)
                .delete(delete_handler::<S>),
        )
        .with_state(service)
}

pub(crate) fn operator_id(headers: &HeaderMap) -> Option<String> {
    headers
        .get(OPERATOR_HEADER)
        .and_then(|value| value.to_str().ok())
        .map(str::to_string)
        .filter(|value| !value.is_empty())
}

fn error_body(message: impl std::fmt::Display) -> axum::Json<serde_json::Value> {
    axum::Json(json!({ "error": message.to_string() }))
}

fn internship_error_response(error: InternshipError) -> Response {
    match &error {
        InternshipError::Form(_) => {
            (StatusCode::UNPROCESSABLE_ENTITY, error_body(error)).into_response()
        }
        InternshipError::NotOwner { .. } => {
            (StatusCode::FORBIDDEN, error_body(error)).into_response()
        }
        InternshipError::Repository(repository) if repository.is_not_found() => {
            (StatusCode::NOT_FOUND, error_body(error)).into_response()
        }
        InternshipError::Repository(_) => {
            (StatusCode::INTERNAL_SERVER_ERROR, error_body(error)).into_response()
        }
    }
}

pub(crate) async fn create_handler<S: DocumentStore + 'static>(
    State(service): State<Arc<InternshipService<S>>>,
    headers: HeaderMap,
    axum::Json(draft): axum::Json<InternshipDraft>,
) -> Response {
    let Some(actor) = operator_id(&headers) else {
        return (
            StatusCode::UNAUTHORIZED,
            error_body("missing x-operator-id header"),
        )
            .into_response();
    };

    match service.create(&actor, &draft) {
        Ok(internship) => (StatusCode::CREATED, axum::Json(internship)).into_response(),
        Err(error) => internship_error_response(error),
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ListParams {
    company_id: Option<String>,
}

pub(crate) async fn list_handler<S: DocumentStore + 'static>(
    State(service): State<Arc<InternshipService<S>>>,
    Query(params): Query<ListParams>,
) -> Response {
    let result = match params.company_id.as_deref() {
        Some(company_id) => service.for_company(company_id),
        None => service.list_all(),
    };

    match result {
        Ok(internships) => (StatusCode::OK, axum::Json(internships)).into_response(),
        Err(error) => internship_error_response(error),
    }
}

pub(crate) async fn get_handler<S: DocumentStore + 'static>(
    State(service): State<Arc<InternshipService<S>>>,
    Path(internship_id): Path<String>,
) -> Response {
    match service.get(&DocumentId(internship_id)) {
        Ok(internship) => (StatusCode::OK, axum::Json(internship)).into_response(),
        Err(error) => internship_error_response(error),
    }
}

pub(crate) async fn update_handler<S: DocumentStore + 'static>(
    State(service): State<Arc<InternshipService<S>>>,
    Path(internship_id): Path<String>,
    axum::Json(update): axum::Json<InternshipUpdate>,
) -> Response {
    match service.update(&DocumentId(internship_id), &update) {
        Ok(internship) => (StatusCode::OK, axum::Json(internship)).into_response(),
        Err(error) => internship_error_response(error),
    }
}

pub(crate) async fn delete_handler<S: DocumentStore + 'static>(
    State(service): State<Arc<InternshipService<S>>>,
    Path(internship_id): Path<String>,
    headers: HeaderMap,
) -> Response {
    let Some(actor) = operator_id(&headers) else {
        return (
            StatusCode::UNAUTHORIZED,
            error_body("missing x-operator-id header"),
        )
            .into_response();
    };

    match service.delete(&actor, &DocumentId(internship_id)) {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(error) => internship_error_response(error),
    }
}
