use crate::api::model::course::{CreateCourseRequest, UpdateCourseRequest};
use crate::config::app_config::AppState;
use crate::db::repo::courses_repository;
use crate::error::error_model::AppError;
use crate::middleware::auth::AuthContext;
use crate::middleware::role::STAFF;
use crate::service::validate_request;
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use std::sync::Arc;
use tracing::info;

fn course_not_found(id: i64) -> AppError {
    AppError::not_found(format!("Course not found for ID: {}", id))
}

pub async fn get_courses(state: Arc<AppState>) -> Result<Response, AppError> {
    let courses = courses_repository::get_courses(&state.pg_pool).await?;
    Ok((StatusCode::OK, Json(courses)).into_response())
}

pub async fn get_course(state: Arc<AppState>, id: i64) -> Result<Response, AppError> {
    let course = courses_repository::get_course(&state.pg_pool, id)
        .await?
        .ok_or_else(|| course_not_found(id))?;
    Ok((StatusCode::OK, Json(course)).into_response())
}

#[tracing::instrument(
    skip(state, auth, request),
    fields(service.name = "course_service", service.operation = "create_course")
)]
pub async fn create_course(
    state: Arc<AppState>,
    auth: AuthContext,
    request: CreateCourseRequest,
) -> Result<Response, AppError> {
    auth.require_role(STAFF)?;
    validate_request(&request, "CreateCourseRequest")?;
    let course = courses_repository::create_course(&state.pg_pool, request, auth.user_id).await?;
    info!("Course {} created by {}", course.id, auth.user_id);
    Ok((
        StatusCode::CREATED,
        [(header::LOCATION, format!("/courses/{}", course.id))],
        Json(course),
    )
        .into_response())
}

pub async fn update_course(
    state: Arc<AppState>,
    auth: AuthContext,
    id: i64,
    request: UpdateCourseRequest,
) -> Result<Response, AppError> {
    auth.require_role(STAFF)?;
    validate_request(&request, "UpdateCourseRequest")?;
    let course = courses_repository::update_course(&state.pg_pool, id, request)
        .await?
        .ok_or_else(|| course_not_found(id))?;
    Ok((StatusCode::OK, Json(course)).into_response())
}

/// Deletes a course that has no lessons left.
#[tracing::instrument(
    skip(state, auth),
    fields(service.name = "course_service", service.operation = "delete_course")
)]
pub async fn delete_course(
    state: Arc<AppState>,
    auth: AuthContext,
    id: i64,
) -> Result<Response, AppError> {
    auth.require_role(STAFF)?;
    if courses_repository::count_lessons(&state.pg_pool, id).await? > 0 {
        return Err(AppError::bad_request(
            "Course still has lessons. Delete them first.",
        ));
    }
    if !courses_repository::delete_course(&state.pg_pool, id).await? {
        return Err(course_not_found(id));
    }
    info!("Course {} deleted by {}", id, auth.user_id);
    Ok((StatusCode::NO_CONTENT,).into_response())
}
