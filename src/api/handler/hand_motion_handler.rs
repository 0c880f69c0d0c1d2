use crate::api::model::ai_model::{CreateHandMotionRequest, UpdateHandMotionRequest};
use crate::api::model::course::LessonScopedFilter;
use crate::config::app_config::AppState;
use crate::db::entity::ai_model::HandMotion;
use crate::error::error_model::{ApiError, AppError};
use crate::middleware::auth::AuthContext;
use crate::service::ai_model_service;
use axum::extract::{Path, Query, State};
use axum::response::Response;
use axum::routing::{get, post};
use axum::{Extension, Json, Router};
use std::sync::Arc;

pub fn hand_motion_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/", get(get_hand_motions_handler))
        .route("/create", post(create_hand_motion_handler))
        .route(
            "/{id}",
            get(get_hand_motion_handler)
                .put(update_hand_motion_handler)
                .delete(delete_hand_motion_handler),
        )
}

#[utoipa::path(
    get,
    path = "/hand-motions",
    tag = "Hand Motions",
    security(("bearer_auth" = [])),
    params(LessonScopedFilter),
    responses((status = 200, description = "Hand motions", body = [HandMotion]))
)]
pub async fn get_hand_motions_handler(
    State(state): State<Arc<AppState>>,
    Query(filter): Query<LessonScopedFilter>,
) -> Result<Response, AppError> {
    ai_model_service::get_hand_motions(state, filter.lesson_id).await
}

#[utoipa::path(
    get,
    path = "/hand-motions/{id}",
    tag = "Hand Motions",
    security(("bearer_auth" = [])),
    params(("id" = i64, Path, description = "Hand motion id")),
    responses(
        (status = 200, description = "Hand motion", body = HandMotion),
        (status = 404, description = "Hand motion not found", body = ApiError),
    )
)]
pub async fn get_hand_motion_handler(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> Result<Response, AppError> {
    ai_model_service::get_hand_motion(state, id).await
}

/// Create a hand motion
///
/// The lesson and the AI model must exist.
#[utoipa::path(
    post,
    path = "/hand-motions/create",
    tag = "Hand Motions",
    security(("bearer_auth" = [])),
    request_body = CreateHandMotionRequest,
    responses(
        (status = 201, description = "Hand motion created", body = HandMotion),
        (status = 403, description = "Permission denied", body = ApiError),
        (status = 404, description = "Lesson or AI model not found", body = ApiError),
    )
)]
pub async fn create_hand_motion_handler(
    State(state): State<Arc<AppState>>,
    Extension(auth): Extension<AuthContext>,
    Json(request): Json<CreateHandMotionRequest>,
) -> Result<Response, AppError> {
    ai_model_service::create_hand_motion(state, auth, request).await
}

#[utoipa::path(
    put,
    path = "/hand-motions/{id}",
    tag = "Hand Motions",
    security(("bearer_auth" = [])),
    params(("id" = i64, Path, description = "Hand motion id")),
    request_body = UpdateHandMotionRequest,
    responses(
        (status = 200, description = "Hand motion updated", body = HandMotion),
        (status = 403, description = "Permission denied", body = ApiError),
        (status = 404, description = "Hand motion, lesson or AI model not found", body = ApiError),
    )
)]
pub async fn update_hand_motion_handler(
    State(state): State<Arc<AppState>>,
    Extension(auth): Extension<AuthContext>,
    Path(id): Path<i64>,
    Json(request): Json<UpdateHandMotionRequest>,
) -> Result<Response, AppError> {
    ai_model_service::update_hand_motion(state, auth, id, request).await
}

#[utoipa::path(
    delete,
    path = "/hand-motions/{id}",
    tag = "Hand Motions",
    security(("bearer_auth" = [])),
    params(("id" = i64, Path, description = "Hand motion id")),
    responses(
        (status = 204, description = "Hand motion deleted"),
        (status = 403, description = "Permission denied", body = ApiError),
        (status = 404, description = "Hand motion not found", body = ApiError),
    )
)]
pub async fn delete_hand_motion_handler(
    State(state): State<Arc<AppState>>,
    Extension(auth): Extension<AuthContext>,
    Path(id): Path<i64>,
) -> Result<Response, AppError> {
    ai_model_service::delete_hand_motion(state, auth, id).await
}
