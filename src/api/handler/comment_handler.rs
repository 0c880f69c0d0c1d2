use crate::api::model::course::{CreateCommentRequest, LessonScopedFilter, UpdateCommentRequest};
use crate::config::app_config::AppState;
use crate::db::entity::course::{Comment, CommentWithAuthor};
use crate::error::error_model::{ApiError, AppError};
use crate::middleware::auth::AuthContext;
use crate::service::lesson_content_service;
use axum::extract::{Path, Query, State};
use axum::response::Response;
use axum::routing::{get, post};
use axum::{Extension, Json, Router};
use std::sync::Arc;

pub fn comment_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/", get(get_comments_handler))
        .route("/create", post(create_comment_handler))
        .route(
            "/{id}",
            get(get_comment_handler)
                .put(update_comment_handler)
                .delete(delete_comment_handler),
        )
}

/// List comments
///
/// Comments include the author's name and picture.
#[utoipa::path(
    get,
    path = "/comments",
    tag = "Comments",
    security(("bearer_auth" = [])),
    params(LessonScopedFilter),
    responses((status = 200, description = "Comments", body = [CommentWithAuthor]))
)]
pub async fn get_comments_handler(
    State(state): State<Arc<AppState>>,
    Query(filter): Query<LessonScopedFilter>,
) -> Result<Response, AppError> {
    lesson_content_service::get_comments(state, filter.lesson_id).await
}

#[utoipa::path(
    get,
    path = "/comments/{id}",
    tag = "Comments",
    security(("bearer_auth" = [])),
    params(("id" = i64, Path, description = "Comment id")),
    responses(
        (status = 200, description = "Comment", body = Comment),
        (status = 404, description = "Comment not found", body = ApiError),
    )
)]
pub async fn get_comment_handler(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> Result<Response, AppError> {
    lesson_content_service::get_comment(state, id).await
}

/// Comment on a lesson
#[utoipa::path(
    post,
    path = "/comments/create",
    tag = "Comments",
    security(("bearer_auth" = [])),
    request_body = CreateCommentRequest,
    responses(
        (status = 201, description = "Comment created", body = Comment),
        (status = 400, description = "Invalid request", body = ApiError),
        (status = 404, description = "Lesson not found", body = ApiError),
    )
)]
pub async fn create_comment_handler(
    State(state): State<Arc<AppState>>,
    Extension(auth): Extension<AuthContext>,
    Json(request): Json<CreateCommentRequest>,
) -> Result<Response, AppError> {
    lesson_content_service::create_comment(state, auth, request).await
}

/// Edit a comment
///
/// Only the author, an admin or an employee may edit.
#[utoipa::path(
    put,
    path = "/comments/{id}",
    tag = "Comments",
    security(("bearer_auth" = [])),
    params(("id" = i64, Path, description = "Comment id")),
    request_body = UpdateCommentRequest,
    responses(
        (status = 200, description = "Comment updated", body = Comment),
        (status = 403, description = "Not the author", body = ApiError),
        (status = 404, description = "Comment not found", body = ApiError),
    )
)]
pub async fn update_comment_handler(
    State(state): State<Arc<AppState>>,
    Extension(auth): Extension<AuthContext>,
    Path(id): Path<i64>,
    Json(request): Json<UpdateCommentRequest>,
) -> Result<Response, AppError> {
    lesson_content_service::update_comment(state, auth, id, request).await
}

#[utoipa::path(
    delete,
    path = "/comments/{id}",
    tag = "Comments",
    security(("bearer_auth" = [])),
    params(("id" = i64, Path, description = "Comment id")),
    responses(
        (status = 204, description = "Comment deleted"),
        (status = 403, description = "Not the author", body = ApiError),
        (status = 404, description = "Comment not found", body = ApiError),
    )
)]
pub async fn delete_comment_handler(
    State(state): State<Arc<AppState>>,
    Extension(auth): Extension<AuthContext>,
    Path(id): Path<i64>,
) -> Result<Response, AppError> {
    lesson_content_service::delete_comment(state, auth, id).await
}
