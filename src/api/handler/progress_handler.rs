use crate::api::model::progress::{ProgressFilter, ProgressRequest, ProgressResponse};
use crate::config::app_config::AppState;
use crate::db::entity::progress::{LeaderboardEntry, LessonProgress};
use crate::error::error_model::{ApiError, AppError};
use crate::middleware::auth::AuthContext;
use crate::service::progress_service;
use axum::extract::{Path, Query, State};
use axum::response::Response;
use axum::routing::{get, post};
use axum::{Extension, Json, Router};
use std::sync::Arc;

/// Progress and leaderboard routes, registered with full paths.
pub fn progress_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/lessons/progress", post(submit_progress_handler))
        .route("/lesson-progress", post(submit_progress_handler))
        .route("/lessons/progress/me", get(get_my_progress_handler))
        .route("/leaderboard", get(get_leaderboard_handler))
        .route("/leaderboard/{user_id}", get(get_user_leaderboard_handler))
}

/// Submit lesson progress
///
/// Completing a lesson for the first time earns 10 points, plus a bonus when the
/// daily streak reaches 7 (10 points) or 14 (15 points) days. Also served at
/// `POST /lesson-progress`.
#[utoipa::path(
    post,
    path = "/lessons/progress",
    tag = "Progress",
    security(("bearer_auth" = [])),
    request_body = ProgressRequest,
    responses(
        (status = 200, description = "Progress recorded", body = ProgressResponse),
        (status = 400, description = "Invalid status", body = ApiError),
        (status = 404, description = "Lesson not found", body = ApiError),
        (status = 500, description = "Update rolled back", body = ApiError),
    )
)]
pub async fn submit_progress_handler(
    State(state): State<Arc<AppState>>,
    Extension(auth): Extension<AuthContext>,
    Json(request): Json<ProgressRequest>,
) -> Result<Response, AppError> {
    progress_service::submit_progress(state, auth, request).await
}

#[utoipa::path(
    get,
    path = "/lessons/progress/me",
    tag = "Progress",
    security(("bearer_auth" = [])),
    params(ProgressFilter),
    responses((status = 200, description = "Caller's lesson progress", body = [LessonProgress]))
)]
pub async fn get_my_progress_handler(
    State(state): State<Arc<AppState>>,
    Extension(auth): Extension<AuthContext>,
    Query(filter): Query<ProgressFilter>,
) -> Result<Response, AppError> {
    progress_service::get_my_progress(state, auth, filter.course_id).await
}

/// Top 10
///
/// Ordered by points, then streak, then most recent activity.
#[utoipa::path(
    get,
    path = "/leaderboard",
    tag = "Progress",
    security(("bearer_auth" = [])),
    responses((status = 200, description = "Top learners", body = [LeaderboardEntry]))
)]
pub async fn get_leaderboard_handler(
    State(state): State<Arc<AppState>>,
) -> Result<Response, AppError> {
    progress_service::get_leaderboard(state).await
}

/// Leaderboard entry of one user
///
/// Customers can only read their own entry.
#[utoipa::path(
    get,
    path = "/leaderboard/{user_id}",
    tag = "Progress",
    security(("bearer_auth" = [])),
    params(("user_id" = i64, Path, description = "User id")),
    responses(
        (status = 200, description = "Leaderboard entry", body = LeaderboardEntry),
        (status = 403, description = "Another user's entry", body = ApiError),
        (status = 404, description = "No entry yet", body = ApiError),
    )
)]
pub async fn get_user_leaderboard_handler(
    State(state): State<Arc<AppState>>,
    Extension(auth): Extension<AuthContext>,
    Path(user_id): Path<i64>,
) -> Result<Response, AppError> {
    progress_service::get_user_leaderboard(state, auth, user_id).await
}
