use crate::api::model::course::{CreateLessonRequest, LessonFilter, UpdateLessonRequest};
use crate::config::app_config::AppState;
use crate::db::entity::course::Lesson;
use crate::error::error_model::{ApiError, AppError};
use crate::middleware::auth::AuthContext;
use crate::service::lesson_content_service;
use axum::extract::{Path, Query, State};
use axum::response::Response;
use axum::routing::{get, post};
use axum::{Extension, Json, Router};
use std::sync::Arc;

pub fn lesson_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/", get(get_lessons_handler))
        .route("/create", post(create_lesson_handler))
        .route(
            "/{id}",
            get(get_lesson_handler)
                .put(update_lesson_handler)
                .delete(delete_lesson_handler),
        )
}

/// List lessons
///
/// Ordered by course, then lesson order.
#[utoipa::path(
    get,
    path = "/lessons",
    tag = "Lessons",
    security(("bearer_auth" = [])),
    params(LessonFilter),
    responses(
        (status = 200, description = "Lessons", body = [Lesson]),
    )
)]
pub async fn get_lessons_handler(
    State(state): State<Arc<AppState>>,
    Query(filter): Query<LessonFilter>,
) -> Result<Response, AppError> {
    lesson_content_service::get_lessons(state, filter.course_id).await
}

/// Get lesson by id
#[utoipa::path(
    get,
    path = "/lessons/{id}",
    tag = "Lessons",
    security(("bearer_auth" = [])),
    params(("id" = i64, Path, description = "Lesson id")),
    responses(
        (status = 200, description = "Lesson", body = Lesson),
        (status = 404, description = "Lesson not found", body = ApiError),
    )
)]
pub async fn get_lesson_handler(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> Result<Response, AppError> {
    lesson_content_service::get_lesson(state, id).await
}

/// Create lesson
#[utoipa::path(
    post,
    path = "/lessons/create",
    tag = "Lessons",
    security(("bearer_auth" = [])),
    request_body = CreateLessonRequest,
    responses(
        (status = 201, description = "Lesson created", body = Lesson),
        (status = 400, description = "Invalid request", body = ApiError),
        (status = 403, description = "Permission denied", body = ApiError),
        (status = 404, description = "Course not found", body = ApiError),
    )
)]
pub async fn create_lesson_handler(
    State(state): State<Arc<AppState>>,
    Extension(auth): Extension<AuthContext>,
    Json(request): Json<CreateLessonRequest>,
) -> Result<Response, AppError> {
    lesson_content_service::create_lesson(state, auth, request).await
}

/// Update lesson
#[utoipa::path(
    put,
    path = "/lessons/{id}",
    tag = "Lessons",
    security(("bearer_auth" = [])),
    params(("id" = i64, Path, description = "Lesson id")),
    request_body = UpdateLessonRequest,
    responses(
        (status = 200, description = "Lesson updated", body = Lesson),
        (status = 403, description = "Permission denied", body = ApiError),
        (status = 404, description = "Lesson or course not found", body = ApiError),
    )
)]
pub async fn update_lesson_handler(
    State(state): State<Arc<AppState>>,
    Extension(auth): Extension<AuthContext>,
    Path(id): Path<i64>,
    Json(request): Json<UpdateLessonRequest>,
) -> Result<Response, AppError> {
    lesson_content_service::update_lesson(state, auth, id, request).await
}

/// Delete lesson
///
/// Also removes the lesson's resources, comments, hand motions and progress.
#[utoipa::path(
    delete,
    path = "/lessons/{id}",
    tag = "Lessons",
    security(("bearer_auth" = [])),
    params(("id" = i64, Path, description = "Lesson id")),
    responses(
        (status = 204, description = "Lesson deleted"),
        (status = 403, description = "Permission denied", body = ApiError),
        (status = 404, description = "Lesson not found", body = ApiError),
    )
)]
pub async fn delete_lesson_handler(
    State(state): State<Arc<AppState>>,
    Extension(auth): Extension<AuthContext>,
    Path(id): Path<i64>,
) -> Result<Response, AppError> {
    lesson_content_service::delete_lesson(state, auth, id).await
}
