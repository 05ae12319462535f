use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
    Router,
};
use serde::Deserialize;
use serde_json::json;

use crate::store::DocumentStore;

use super::service::{DashboardError, DashboardService};

pub fn dashboard_router<S: DocumentStore + 'static>(service: Arc<DashboardService<S>>) -> Router {
    Router::new()
        .route("/api/v1/dashboard/:company_id", get(snapshot_handler::<S>))
        .with_state(service)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub(crate) enum SnapshotFormat {
    #[default]
    Json,
    Csv,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct SnapshotParams {
    #[serde(default)]
    format: SnapshotFormat,
}

pub(crate) async fn snapshot_handler<S: DocumentStore + 'static>(
    State(service): State<Arc<DashboardService<S>>>,
    Path(company_id): Path<String>,
    Query(params): Query<SnapshotParams>,
) -> Response {
    let snapshot = match service.snapshot(&company_id) {
        Ok(snapshot) => snapshot,
        Err(error) => {
            let body = axum::Json(json!({ "error": error.to_string() }));
            return (StatusCode::INTERNAL_SERVER_ERROR, body).into_response();
        }
    };

    match params.format {
        SnapshotFormat::Json => (StatusCode::OK, axum::Json(snapshot)).into_response(),
        SnapshotFormat::Csv => match snapshot.to_csv() {
            Ok(csv) => (
                StatusCode::OK,
                [(header::CONTENT_TYPE, "text/csv")],
                csv,
            )
                .into_response(),
            Err(error) => {
                let error = DashboardError::from(error);
                let body = axum::Json(json!({ "error": error.to_string() }));
                (StatusCode::INTERNAL_SERVER_ERROR, body).into_response()
            }
        },
    }
}
