use crate::api::model::course::{CreateCourseRequest, UpdateCourseRequest};
use crate::config::app_config::AppState;
use crate::db::entity::course::Course;
use crate::error::error_model::{ApiError, AppError};
use crate::middleware::auth::AuthContext;
use crate::service::course_service;
use axum::extract::{Path, State};
use axum::response::Response;
use axum::routing::{get, post};
use axum::{Extension, Json, Router};
use std::sync::Arc;

pub fn course_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/", get(get_courses_handler))
        .route("/create", post(create_course_handler))
        .route(
            "/{id}",
            get(get_course_handler)
                .put(update_course_handler)
                .delete(delete_course_handler),
        )
}

/// List courses
#[utoipa::path(
    get,
    path = "/courses",
    tag = "Courses",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Courses", body = [Course]),
        (status = 401, description = "Missing or invalid token", body = ApiError),
    )
)]
pub async fn get_courses_handler(State(state): State<Arc<AppState>>) -> Result<Response, AppError> {
    course_service::get_courses(state).await
}

/// Get course by id
#[utoipa::path(
    get,
    path = "/courses/{id}",
    tag = "Courses",
    security(("bearer_auth" = [])),
    params(("id" = i64, Path, description = "Course id")),
    responses(
        (status = 200, description = "Course", body = Course),
        (status = 404, description = "Course not found", body = ApiError),
    )
)]
pub async fn get_course_handler(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> Result<Response, AppError> {
    course_service::get_course(state, id).await
}

/// Create course
///
/// Admin and employee only. The caller is recorded as the author.
#[utoipa::path(
    post,
    path = "/courses/create",
    tag = "Courses",
    security(("bearer_auth" = [])),
    request_body = CreateCourseRequest,
    responses(
        (status = 201, description = "Course created", body = Course),
        (status = 400, description = "Invalid request", body = ApiError),
        (status = 403, description = "Permission denied", body = ApiError),
    )
)]
pub async fn create_course_handler(
    State(state): State<Arc<AppState>>,
    Extension(auth): Extension<AuthContext>,
    Json(request): Json<CreateCourseRequest>,
) -> Result<Response, AppError> {
    course_service::create_course(state, auth, request).await
}

/// Update course
#[utoipa::path(
    put,
    path = "/courses/{id}",
    tag = "Courses",
    security(("bearer_auth" = [])),
    params(("id" = i64, Path, description = "Course id")),
    request_body = UpdateCourseRequest,
    responses(
        (status = 200, description = "Course updated", body = Course),
        (status = 403, description = "Permission denied", body = ApiError),
        (status = 404, description = "Course not found", body = ApiError),
    )
)]
pub async fn update_course_handler(
    State(state): State<Arc<AppState>>,
    Extension(auth): Extension<AuthContext>,
    Path(id): Path<i64>,
    Json(request): Json<UpdateCourseRequest>,
) -> Result<Response, AppError> {
    course_service::update_course(state, auth, id, request).await
}

/// Delete course
///
/// Refused while the course still has lessons.
#[utoipa::path(
    delete,
    path = "/courses/{id}",
    tag = "Courses",
    security(("bearer_auth" = [])),
    params(("id" = i64, Path, description = "Course id")),
    responses(
        (status = 204, description = "Course deleted"),
        (status = 400, description = "Course still has lessons", body = ApiError),
        (status = 403, description = "Permission denied", body = ApiError),
        (status = 404, description = "Course not found", body = ApiError),
    )
)]
pub async fn delete_course_handler(
    State(state): State<Arc<AppState>>,
    Extension(auth): Extension<AuthContext>,
    Path(id): Path<i64>,
) -> Result<Response, AppError> {
    course_service::delete_course(state, auth, id).await
}
