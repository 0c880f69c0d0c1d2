use crate::api::model::common::Message;
use crate::config::app_config::AppState;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use std::sync::Arc;
use tracing::warn;

pub fn welcome_routes() -> Router<Arc<AppState>> {
    Router::new().route("/", get(welcome_handler))
}

/// Health check
///
/// Reports whether the API is up and the database answers.
#[utoipa::path(
    get,
    path = "/",
    tag = "Health",
    responses(
        (status = 200, description = "Service is healthy", body = Message),
        (status = 503, description = "Database unreachable", body = Message),
    )
)]
pub async fn welcome_handler(State(state): State<Arc<AppState>>) -> Response {
    match sqlx::query_scalar::<_, i32>("SELECT 1")
        .fetch_one(&state.pg_pool)
        .await
    {
        Ok(_) => (StatusCode::OK, Json(Message::success("Learning platform API is running")))
            .into_response(),
        Err(e) => {
            warn!("Health check database query failed: {}", e);
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(Message {
                    message: "Database unavailable".to_string(),
                    status: "Error".to_string(),
                }),
            )
                .into_response()
        }
    }
}
