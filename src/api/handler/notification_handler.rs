use crate::api::model::notification::CreateNotificationRequest;
use crate::config::app_config::AppState;
use crate::db::entity::notification::Notification;
use crate::error::error_model::{ApiError, AppError};
use crate::middleware::auth::AuthContext;
use crate::service::notification_service;
use axum::extract::{Path, State};
use axum::response::Response;
use axum::routing::{delete, get, post, put};
use axum::{Extension, Json, Router};
use std::sync::Arc;

pub fn notification_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/", get(get_notifications_handler))
        .route("/me", get(get_my_notifications_handler))
        .route("/create", post(create_notification_handler))
        .route("/{id}/read", put(mark_read_handler))
        .route("/{id}", delete(delete_notification_handler))
}

/// List all notifications
///
/// Admin and employee only.
#[utoipa::path(
    get,
    path = "/notifications",
    tag = "Notifications",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Notifications", body = [Notification]),
        (status = 403, description = "Permission denied", body = ApiError),
    )
)]
pub async fn get_notifications_handler(
    State(state): State<Arc<AppState>>,
    Extension(auth): Extension<AuthContext>,
) -> Result<Response, AppError> {
    notification_service::get_notifications(state, auth).await
}

/// My notifications
#[utoipa::path(
    get,
    path = "/notifications/me",
    tag = "Notifications",
    security(("bearer_auth" = [])),
    responses((status = 200, description = "Notifications for the caller", body = [Notification]))
)]
pub async fn get_my_notifications_handler(
    State(state): State<Arc<AppState>>,
    Extension(auth): Extension<AuthContext>,
) -> Result<Response, AppError> {
    notification_service::get_my_notifications(state, auth).await
}

/// Send a notification to a user
#[utoipa::path(
    post,
    path = "/notifications/create",
    tag = "Notifications",
    security(("bearer_auth" = [])),
    request_body = CreateNotificationRequest,
    responses(
        (status = 201, description = "Notification created", body = Notification),
        (status = 403, description = "Permission denied", body = ApiError),
        (status = 404, description = "Recipient not found", body = ApiError),
    )
)]
pub async fn create_notification_handler(
    State(state): State<Arc<AppState>>,
    Extension(auth): Extension<AuthContext>,
    Json(request): Json<CreateNotificationRequest>,
) -> Result<Response, AppError> {
    notification_service::create_notification(state, auth, request).await
}

/// Mark as read
///
/// Only the recipient can mark a notification as read.
#[utoipa::path(
    put,
    path = "/notifications/{id}/read",
    tag = "Notifications",
    security(("bearer_auth" = [])),
    params(("id" = i64, Path, description = "Notification id")),
    responses(
        (status = 200, description = "Notification marked as read", body = Notification),
        (status = 404, description = "No such notification for the caller", body = ApiError),
    )
)]
pub async fn mark_read_handler(
    State(state): State<Arc<AppState>>,
    Extension(auth): Extension<AuthContext>,
    Path(id): Path<i64>,
) -> Result<Response, AppError> {
    notification_service::mark_read(state, auth, id).await
}

#[utoipa::path(
    delete,
    path = "/notifications/{id}",
    tag = "Notifications",
    security(("bearer_auth" = [])),
    params(("id" = i64, Path, description = "Notification id")),
    responses(
        (status = 204, description = "Notification deleted"),
        (status = 403, description = "Permission denied", body = ApiError),
        (status = 404, description = "Notification not found", body = ApiError),
    )
)]
pub async fn delete_notification_handler(
    State(state): State<Arc<AppState>>,
    Extension(auth): Extension<AuthContext>,
    Path(id): Path<i64>,
) -> Result<Response, AppError> {
    notification_service::delete_notification(state, auth, id).await
}
