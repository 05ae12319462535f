use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use serde::Deserialize;
use serde_json::json;

use crate::store::{DocumentId, DocumentStore};

use super::domain::{CompetitionDraft, SubmissionDraft, SubmissionReview};
use super::service::{CompetitionError, CompetitionService};

pub fn competition_router<S: DocumentStore + 'static>(
    service: Arc<CompetitionService<S>>,
) -> Router {
    Router::new()
        .route(
            "/api/v1/competitions",
            post(create_handler::<S>).get(list_handler::<S>),
        )
        .route("/api/v1/competitions/:competition_id", get(get_handler::<S>))
        .route(
            "/api/v1/competitions/:competition_id/participants",
            post(register_handler::<S>),
        )
        .route(
            "/api/v1/competitions/:competition_id/submissions",
            post(submit_handler::<S>),
        )
        .route(
            "/api/v1/competitions/:competition_id/submissions/:submission_id/review",
            post(review_handler::<S>),
        )
        .with_state(service)
}

fn error_body(message: impl std::fmt::Display) -> axum::Json<serde_json::Value> {
    axum::Json(json!({ "error": message.to_string() }))
}

fn competition_error_response(error: CompetitionError) -> Response {
    match &error {
        CompetitionError::Form(_) => {
            (StatusCode::UNPROCESSABLE_ENTITY, error_body(error)).into_response()
        }
        CompetitionError::CapacityReached { .. }
        | CompetitionError::AlreadyRegistered { .. }
        | CompetitionError::ClosedForEntries => {
            (StatusCode::CONFLICT, error_body(error)).into_response()
        }
        CompetitionError::SubmissionNotFound { .. } => {
            (StatusCode::NOT_FOUND, error_body(error)).into_response()
        }
        CompetitionError::Repository(repository) if repository.is_not_found() => {
            (StatusCode::NOT_FOUND, error_body(error)).into_response()
        }
        CompetitionError::Repository(_) => {
            (StatusCode::INTERNAL_SERVER_ERROR, error_body(error)).into_response()
        }
    }
}

pub(crate) async fn create_handler<S: DocumentStore + 'static>(
    State(service): State<Arc<CompetitionService<S>>>,
    axum::Json(draft): axum::Json<CompetitionDraft>,
) -> Response {
    match service.create(&draft) {
        Ok(competition) => (StatusCode::CREATED, axum::Json(competition)).into_response(),
        Err(error) => competition_error_response(error),
    }
}

pub(crate) async fn list_handler<S: DocumentStore + 'static>(
    State(service): State<Arc<CompetitionService<S>>>,
) -> Response {
    match service.list_all() {
        Ok(competitions) => (StatusCode::OK, axum::Json(competitions)).into_response(),
        Err(error) => competition_error_response(error),
    }
}

pub(crate) async fn get_handler<S: DocumentStore + 'static>(
    State(service): State<Arc<CompetitionService<S>>>,
    Path(competition_id): Path<String>,
) -> Response {
    match service.get(&DocumentId(competition_id)) {
        Ok(competition) => (StatusCode::OK, axum::Json(competition)).into_response(),
        Err(error) => competition_error_response(error),
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct RegisterRequest {
    pub(crate) participant: String,
}

pub(crate) async fn register_handler<S: DocumentStore + 'static>(
    State(service): State<Arc<CompetitionService<S>>>,
    Path(competition_id): Path<String>,
    axum::Json(request): axum::Json<RegisterRequest>,
) -> Response {
    match service.register(&DocumentId(competition_id), &request.participant) {
        Ok(competition) => (StatusCode::OK, axum::Json(competition)).into_response(),
        Err(error) => competition_error_response(error),
    }
}

pub(crate) async fn submit_handler<S: DocumentStore + 'static>(
    State(service): State<Arc<CompetitionService<S>>>,
    Path(competition_id): Path<String>,
    axum::Json(draft): axum::Json<SubmissionDraft>,
) -> Response {
    match service.submit(&DocumentId(competition_id), &draft) {
        Ok(competition) => (StatusCode::CREATED, axum::Json(competition)).into_response(),
        Err(error) => competition_error_response(error),
    }
}

pub(crate) async fn review_handler<S: DocumentStore + 'static>(
    State(service): State<Arc<CompetitionService<S>>>,
    Path((competition_id, submission_id)): Path<(String, String)>,
    axum::Json(review): axum::Json<SubmissionReview>,
) -> Response {
    match service.review(&DocumentId(competition_id), &submission_id, &review) {
        Ok(submission) => (StatusCode::OK, axum::Json(submission)).into_response(),
        Err(error) => competition_error_response(error),
    }
}
