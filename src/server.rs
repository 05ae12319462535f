use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use axum::extract::State;
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};
use axum_prometheus::PrometheusMetricLayer;
use metrics_exporter_prometheus::PrometheusHandle;
use serde_json::json;
use tracing::info;

use talentdesk::config::AppConfig;
use talentdesk::error::AppError;
use talentdesk::store::MemoryStore;
use talentdesk::telemetry;
use talentdesk::workflows::applications::{application_router, ApplicationService};
use talentdesk::workflows::candidates::{candidate_router, CandidateService};
use talentdesk::workflows::communication::{communication_router, CommunicationService};
use talentdesk::workflows::competitions::{competition_router, CompetitionService};
use talentdesk::workflows::dashboard::{dashboard_router, DashboardService};
use talentdesk::workflows::internships::{internship_router, InternshipService};

use crate::cli::ServeArgs;

#[derive(Clone)]
struct AppState {
    readiness: Arc<AtomicBool>,
    metrics: Arc<PrometheusHandle>,
}

pub(crate) async fn run(mut args: ServeArgs) -> Result<(), AppError> {
    let mut config = AppConfig::load()?;

    if let Some(host) = args.host.take() {
        config.server.host = host;
    }
    if let Some(port) = args.port.take() {
        config.server.port = port;
    }

    telemetry::init(&config.telemetry, config.environment)?;

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(AtomicBool::new(false));
    let state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
    };

    let infra = Router::new()
        .route("/health", get(healthcheck))
        .route("/ready", get(readiness_endpoint))
        .route("/metrics", get(metrics_endpoint))
        .with_state(state);

    let store = Arc::new(MemoryStore::default());
    let app = workflow_routes(store).merge(infra).layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(?config.environment, %addr, "talentdesk recruiting service ready");

    axum::serve(listener, app).await?;
    Ok(())
}

fn workflow_routes(store: Arc<MemoryStore>) -> Router {
    let internships = Arc::new(InternshipService::new(store.clone()));
    let applications = Arc::new(ApplicationService::new(store.clone()));
    let competitions = Arc::new(CompetitionService::new(store.clone()));
    let candidates = Arc::new(CandidateService::new(store.clone()));
    let communication = Arc::new(CommunicationService::new(store.clone()));
    let dashboard = Arc::new(DashboardService::new(store));

    Router::new()
        .merge(internship_router(internships))
        .merge(application_router(applications))
        .merge(competition_router(competitions))
        .merge(candidate_router(candidates))
        .merge(communication_router(communication))
        .merge(dashboard_router(dashboard))
}

async fn healthcheck() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

async fn readiness_endpoint(State(state): State<AppState>) -> impl IntoResponse {
    let ready = state.readiness.load(Ordering::Relaxed);
    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let payload = if ready {
        json!({ "status": "ready" })
    } else {
        json!({ "status": "initializing" })
    };

    (status, Json(payload))
}

async fn metrics_endpoint(State(state): State<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}
