//! Lessons and the content hanging off them: resources and comments.

use crate::api::model::course::{
    CreateCommentRequest, CreateLessonRequest, CreateResourceRequest, UpdateCommentRequest,
    UpdateLessonRequest, UpdateResourceRequest,
};
use crate::config::app_config::AppState;
use crate::db::repo::{
    comments_repository, courses_repository, lessons_repository, resources_repository,
};
use crate::error::error_model::AppError;
use crate::middleware::auth::AuthContext;
use crate::middleware::role::STAFF;
use crate::service::validate_request;
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use sqlx::PgPool;
use std::sync::Arc;
use tracing::info;

async fn ensure_course(pool: &PgPool, course_id: i64) -> Result<(), AppError> {
    if courses_repository::course_exists(pool, course_id).await? {
        Ok(())
    } else {
        Err(AppError::not_found(format!(
            "Course not found for ID: {}",
            course_id
        )))
    }
}

pub(crate) async fn ensure_lesson(pool: &PgPool, lesson_id: i64) -> Result<(), AppError> {
    if lessons_repository::lesson_exists(pool, lesson_id).await? {
        Ok(())
    } else {
        Err(AppError::not_found(format!(
            "Lesson not found for ID: {}",
            lesson_id
        )))
    }
}

// Lessons

pub async fn get_lessons(
    state: Arc<AppState>,
    course_id: Option<i64>,
) -> Result<Response, AppError> {
    let lessons = lessons_repository::get_lessons(&state.pg_pool, course_id).await?;
    Ok((StatusCode::OK, Json(lessons)).into_response())
}

pub async fn get_lesson(state: Arc<AppState>, id: i64) -> Result<Response, AppError> {
    let lesson = lessons_repository::get_lesson(&state.pg_pool, id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Lesson not found for ID: {}", id)))?;
    Ok((StatusCode::OK, Json(lesson)).into_response())
}

#[tracing::instrument(
    skip(state, auth, request),
    fields(service.name = "lesson_content_service", service.operation = "create_lesson")
)]
pub async fn create_lesson(
    state: Arc<AppState>,
    auth: AuthContext,
    request: CreateLessonRequest,
) -> Result<Response, AppError> {
    auth.require_role(STAFF)?;
    validate_request(&request, "CreateLessonRequest")?;
    ensure_course(&state.pg_pool, request.course_id).await?;
    let lesson = lessons_repository::create_lesson(&state.pg_pool, request).await?;
    info!("Lesson {} created in course {}", lesson.id, lesson.course_id);
    Ok((
        StatusCode::CREATED,
        [(header::LOCATION, format!("/lessons/{}", lesson.id))],
        Json(lesson),
    )
        .into_response())
}

pub async fn update_lesson(
    state: Arc<AppState>,
    auth: AuthContext,
    id: i64,
    request: UpdateLessonRequest,
) -> Result<Response, AppError> {
    auth.require_role(STAFF)?;
    validate_request(&request, "UpdateLessonRequest")?;
    if let Some(course_id) = request.course_id {
        ensure_course(&state.pg_pool, course_id).await?;
    }
    let lesson = lessons_repository::update_lesson(&state.pg_pool, id, request)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Lesson not found for ID: {}", id)))?;
    Ok((StatusCode::OK, Json(lesson)).into_response())
}

/// Deleting a lesson removes its resources, comments, hand motions and progress rows.
pub async fn delete_lesson(
    state: Arc<AppState>,
    auth: AuthContext,
    id: i64,
) -> Result<Response, AppError> {
    auth.require_role(STAFF)?;
    if !lessons_repository::delete_lesson(&state.pg_pool, id).await? {
        return Err(AppError::not_found(format!("Lesson not found for ID: {}", id)));
    }
    info!("Lesson {} deleted by {}", id, auth.user_id);
    Ok((StatusCode::NO_CONTENT,).into_response())
}

// Resources

pub async fn get_resources(
    state: Arc<AppState>,
    lesson_id: Option<i64>,
) -> Result<Response, AppError> {
    let resources = resources_repository::get_resources(&state.pg_pool, lesson_id).await?;
    Ok((StatusCode::OK, Json(resources)).into_response())
}

pub async fn get_resource(state: Arc<AppState>, id: i64) -> Result<Response, AppError> {
    let resource = resources_repository::get_resource(&state.pg_pool, id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Resource not found for ID: {}", id)))?;
    Ok((StatusCode::OK, Json(resource)).into_response())
}

pub async fn create_resource(
    state: Arc<AppState>,
    auth: AuthContext,
    request: CreateResourceRequest,
) -> Result<Response, AppError> {
    auth.require_role(STAFF)?;
    validate_request(&request, "CreateResourceRequest")?;
    ensure_lesson(&state.pg_pool, request.lesson_id).await?;
    let resource = resources_repository::create_resource(&state.pg_pool, request).await?;
    Ok((
        StatusCode::CREATED,
        [(header::LOCATION, format!("/resources/{}", resource.id))],
        Json(resource),
    )
        .into_response())
}

pub async fn update_resource(
    state: Arc<AppState>,
    auth: AuthContext,
    id: i64,
    request: UpdateResourceRequest,
) -> Result<Response, AppError> {
    auth.require_role(STAFF)?;
    validate_request(&request, "UpdateResourceRequest")?;
    if let Some(lesson_id) = request.lesson_id {
        ensure_lesson(&state.pg_pool, lesson_id).await?;
    }
    let resource = resources_repository::update_resource(&state.pg_pool, id, request)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Resource not found for ID: {}", id)))?;
    Ok((StatusCode::OK, Json(resource)).into_response())
}

pub async fn delete_resource(
    state: Arc<AppState>,
    auth: AuthContext,
    id: i64,
) -> Result<Response, AppError> {
    auth.require_role(STAFF)?;
    if !resources_repository::delete_resource(&state.pg_pool, id).await? {
        return Err(AppError::not_found(format!("Resource not found for ID: {}", id)));
    }
    Ok((StatusCode::NO_CONTENT,).into_response())
}

// Comments

pub async fn get_comments(
    state: Arc<AppState>,
    lesson_id: Option<i64>,
) -> Result<Response, AppError> {
    let comments = comments_repository::get_comments(&state.pg_pool, lesson_id).await?;
    Ok((StatusCode::OK, Json(comments)).into_response())
}

pub async fn get_comment(state: Arc<AppState>, id: i64) -> Result<Response, AppError> {
    let comment = comments_repository::get_comment(&state.pg_pool, id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Comment not found for ID: {}", id)))?;
    Ok((StatusCode::OK, Json(comment)).into_response())
}

/// Any authenticated user may comment; the author is always the caller.
#[tracing::instrument(
    skip(state, auth, request),
    fields(service.name = "lesson_content_service", service.operation = "create_comment")
)]
pub async fn create_comment(
    state: Arc<AppState>,
    auth: AuthContext,
    request: CreateCommentRequest,
) -> Result<Response, AppError> {
    validate_request(&request, "CreateCommentRequest")?;
    ensure_lesson(&state.pg_pool, request.lesson_id).await?;
    let comment = comments_repository::create_comment(
        &state.pg_pool,
        request.lesson_id,
        auth.user_id,
        request.content.trim(),
    )
    .await?;
    Ok((
        StatusCode::CREATED,
        [(header::LOCATION, format!("/comments/{}", comment.id))],
        Json(comment),
    )
        .into_response())
}

pub async fn update_comment(
    state: Arc<AppState>,
    auth: AuthContext,
    id: i64,
    request: UpdateCommentRequest,
) -> Result<Response, AppError> {
    validate_request(&request, "UpdateCommentRequest")?;
    let existing = comments_repository::get_comment(&state.pg_pool, id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Comment not found for ID: {}", id)))?;
    auth.require_self_or(existing.user_id, STAFF)?;
    let comment = comments_repository::update_comment(&state.pg_pool, id, request.content.trim())
        .await?
        .ok_or_else(|| AppError::not_found(format!("Comment not found for ID: {}", id)))?;
    Ok((StatusCode::OK, Json(comment)).into_response())
}

pub async fn delete_comment(
    state: Arc<AppState>,
    auth: AuthContext,
    id: i64,
) -> Result<Response, AppError> {
    let existing = comments_repository::get_comment(&state.pg_pool, id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Comment not found for ID: {}", id)))?;
    auth.require_self_or(existing.user_id, STAFF)?;
    comments_repository::delete_comment(&state.pg_pool, id).await?;
    Ok((StatusCode::NO_CONTENT,).into_response())
}
