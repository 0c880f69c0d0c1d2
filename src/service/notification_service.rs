use crate::api::model::notification::CreateNotificationRequest;
use crate::config::app_config::AppState;
use crate::db::repo::{notifications_repository, users_repository};
use crate::error::error_model::AppError;
use crate::middleware::auth::AuthContext;
use crate::middleware::role::STAFF;
use crate::service::validate_request;
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use std::sync::Arc;
use tracing::info;

pub async fn get_notifications(
    state: Arc<AppState>,
    auth: AuthContext,
) -> Result<Response, AppError> {
    auth.require_role(STAFF)?;
    let notifications = notifications_repository::get_notifications(&state.pg_pool).await?;
    Ok((StatusCode::OK, Json(notifications)).into_response())
}

/// Notifications addressed to the caller, newest first.
pub async fn get_my_notifications(
    state: Arc<AppState>,
    auth: AuthContext,
) -> Result<Response, AppError> {
    let notifications =
        notifications_repository::get_user_notifications(&state.pg_pool, auth.user_id).await?;
    Ok((StatusCode::OK, Json(notifications)).into_response())
}

#[tracing::instrument(
    skip(state, auth, request),
    fields(
        service.name = "notification_service",
        service.operation = "create_notification",
        notification.user_id = request.user_id
    )
)]
pub async fn create_notification(
    state: Arc<AppState>,
    auth: AuthContext,
    request: CreateNotificationRequest,
) -> Result<Response, AppError> {
    auth.require_role(STAFF)?;
    validate_request(&request, "CreateNotificationRequest")?;
    if !users_repository::user_exists(&state.pg_pool, request.user_id).await? {
        return Err(AppError::not_found(format!(
            "User not found for ID: {}",
            request.user_id
        )));
    }
    let notification = notifications_repository::create_notification(&state.pg_pool, request).await?;
    info!("Notification {} sent to user {}", notification.id, notification.user_id);
    Ok((
        StatusCode::CREATED,
        [(header::LOCATION, format!("/notifications/{}", notification.id))],
        Json(notification),
    )
        .into_response())
}

/// Only the recipient may mark a notification read; repeating the call keeps the first `read_at`.
pub async fn mark_read(
    state: Arc<AppState>,
    auth: AuthContext,
    id: i64,
) -> Result<Response, AppError> {
    let notification = notifications_repository::mark_read(&state.pg_pool, id, auth.user_id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Notification not found for ID: {}", id)))?;
    Ok((StatusCode::OK, Json(notification)).into_response())
}

pub async fn delete_notification(
    state: Arc<AppState>,
    auth: AuthContext,
    id: i64,
) -> Result<Response, AppError> {
    auth.require_role(STAFF)?;
    if !notifications_repository::delete_notification(&state.pg_pool, id).await? {
        return Err(AppError::not_found(format!(
            "Notification not found for ID: {}",
            id
        )));
    }
    Ok((StatusCode::NO_CONTENT,).into_response())
}
