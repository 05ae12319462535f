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

use super::domain::{AnnouncementDraft, FeedbackDraft, MessageDraft, NotificationDraft};
use super::service::{CommunicationError, CommunicationService};

pub fn communication_router<S: DocumentStore + 'static>(
    service: Arc<CommunicationService<S>>,
) -> Router {
    Router::new()
        .route(
            "/api/v1/announcements",
            post(create_announcement_handler::<S>).get(list_announcements_handler::<S>),
        )
        .route(
            "/api/v1/announcements/:announcement_id",
            axum::routing::delete(delete_announcement_handler::<S>),
        )
        .route(
            "/api/v1/announcements/:announcement_id/publish",
            post(publish_announcement_handler::<S>),
        )
        .route(
            "/api/v1/notifications",
            post(record_notification_handler::<S>).get(list_notifications_handler::<S>),
        )
        .route(
            "/api/v1/notifications/:notification_id/read",
            post(mark_read_handler::<S>),
        )
        .route(
            "/api/v1/notifications/read-all",
            post(mark_all_read_handler::<S>),
        )
        .route(
            "/api/v1/messages",
            post(send_message_handler::<S>).get(inbox_handler::<S>),
        )
        .route("/api/v1/messages/templates", get(templates_handler::<S>))
        .route(
            "/api/v1/feedback",
            post(record_feedback_handler::<S>).get(feedback_summary_handler::<S>),
        )
        .with_state(service)
}

fn error_body(message: impl std::fmt::Display) -> axum::Json<serde_json::Value> {
    axum::Json(json!({ "error": message.to_string() }))
}

fn communication_error_response(error: CommunicationError) -> Response {
    match &error {
        CommunicationError::Form(_) => {
            (StatusCode::UNPROCESSABLE_ENTITY, error_body(error)).into_response()
        }
        CommunicationError::Repository(repository) if repository.is_not_found() => {
            (StatusCode::NOT_FOUND, error_body(error)).into_response()
        }
        CommunicationError::Repository(_) => {
            (StatusCode::INTERNAL_SERVER_ERROR, error_body(error)).into_response()
        }
    }
}

pub(crate) async fn create_announcement_handler<S: DocumentStore + 'static>(
    State(service): State<Arc<CommunicationService<S>>>,
    axum::Json(draft): axum::Json<AnnouncementDraft>,
) -> Response {
    match service.create_announcement(&draft) {
        Ok(announcement) => (StatusCode::CREATED, axum::Json(announcement)).into_response(),
        Err(error) => communication_error_response(error),
    }
}

pub(crate) async fn list_announcements_handler<S: DocumentStore + 'static>(
    State(service): State<Arc<CommunicationService<S>>>,
) -> Response {
    match service.announcements() {
        Ok(announcements) => (StatusCode::OK, axum::Json(announcements)).into_response(),
        Err(error) => communication_error_response(error),
    }
}

pub(crate) async fn publish_announcement_handler<S: DocumentStore + 'static>(
    State(service): State<Arc<CommunicationService<S>>>,
    Path(announcement_id): Path<String>,
) -> Response {
    match service.publish_announcement(&DocumentId(announcement_id)) {
        Ok(announcement) => (StatusCode::OK, axum::Json(announcement)).into_response(),
        Err(error) => communication_error_response(error),
    }
}

pub(crate) async fn delete_announcement_handler<S: DocumentStore + 'static>(
    State(service): State<Arc<CommunicationService<S>>>,
    Path(announcement_id): Path<String>,
) -> Response {
    match service.delete_announcement(&DocumentId(announcement_id)) {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(error) => communication_error_response(error),
    }
}

pub(crate) async fn record_notification_handler<S: DocumentStore + 'static>(
    State(service): State<Arc<CommunicationService<S>>>,
    axum::Json(draft): axum::Json<NotificationDraft>,
) -> Response {
    match service.record_notification(&draft) {
        Ok(notification) => (StatusCode::CREATED, axum::Json(notification)).into_response(),
        Err(error) => communication_error_response(error),
    }
}

pub(crate) async fn list_notifications_handler<S: DocumentStore + 'static>(
    State(service): State<Arc<CommunicationService<S>>>,
) -> Response {
    let notifications = match service.notifications() {
        Ok(notifications) => notifications,
        Err(error) => return communication_error_response(error),
    };
    let unread = notifications.iter().filter(|n| !n.read).count();

    (
        StatusCode::OK,
        axum::Json(json!({ "unread": unread, "notifications": notifications })),
    )
        .into_response()
}

pub(crate) async fn mark_read_handler<S: DocumentStore + 'static>(
    State(service): State<Arc<CommunicationService<S>>>,
    Path(notification_id): Path<String>,
) -> Response {
    match service.mark_read(&DocumentId(notification_id)) {
        Ok(notification) => (StatusCode::OK, axum::Json(notification)).into_response(),
        Err(error) => communication_error_response(error),
    }
}

pub(crate) async fn mark_all_read_handler<S: DocumentStore + 'static>(
    State(service): State<Arc<CommunicationService<S>>>,
) -> Response {
    match service.mark_all_read() {
        Ok(marked) => (StatusCode::OK, axum::Json(json!({ "marked": marked }))).into_response(),
        Err(error) => communication_error_response(error),
    }
}

pub(crate) async fn send_message_handler<S: DocumentStore + 'static>(
    State(service): State<Arc<CommunicationService<S>>>,
    axum::Json(draft): axum::Json<MessageDraft>,
) -> Response {
    match service.send_message(&draft) {
        Ok(message) => (StatusCode::CREATED, axum::Json(message)).into_response(),
        Err(error) => communication_error_response(error),
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct InboxParams {
    recipient: String,
}

pub(crate) async fn inbox_handler<S: DocumentStore + 'static>(
    State(service): State<Arc<CommunicationService<S>>>,
    Query(params): Query<InboxParams>,
) -> Response {
    match service.inbox(&params.recipient) {
        Ok(messages) => (StatusCode::OK, axum::Json(messages)).into_response(),
        Err(error) => communication_error_response(error),
    }
}

pub(crate) async fn templates_handler<S: DocumentStore + 'static>(
    State(service): State<Arc<CommunicationService<S>>>,
) -> Response {
    (StatusCode::OK, axum::Json(service.templates())).into_response()
}

pub(crate) async fn record_feedback_handler<S: DocumentStore + 'static>(
    State(service): State<Arc<CommunicationService<S>>>,
    axum::Json(draft): axum::Json<FeedbackDraft>,
) -> Response {
    match service.record_feedback(&draft) {
        Ok(entry) => (StatusCode::CREATED, axum::Json(entry)).into_response(),
        Err(error) => communication_error_response(error),
    }
}

pub(crate) async fn feedback_summary_handler<S: DocumentStore + 'static>(
    State(service): State<Arc<CommunicationService<S>>>,
) -> Response {
    match service.feedback_summary() {
        Ok(summary) => (StatusCode::OK, axum::Json(summary)).into_response(),
        Err(error) => communication_error_response(error),
    }
}
