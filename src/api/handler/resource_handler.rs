use crate::api::model::course::{CreateResourceRequest, LessonScopedFilter, UpdateResourceRequest};
use crate::config::app_config::AppState;
use crate::db::entity::course::Resource;
use crate::error::error_model::{ApiError, AppError};
use crate::middleware::auth::AuthContext;
use crate::service::lesson_content_service;
use axum::extract::{Path, Query, State};
use axum::response::Response;
use axum::routing::{get, post};
use axum::{Extension, Json, Router};
use std::sync::Arc;

pub fn resource_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/", get(get_resources_handler))
        .route("/create", post(create_resource_handler))
        .route(
            "/{id}",
            get(get_resource_handler)
                .put(update_resource_handler)
                .delete(delete_resource_handler),
        )
}

/// List lesson resources
#[utoipa::path(
    get,
    path = "/resources",
    tag = "Resources",
    security(("bearer_auth" = [])),
    params(LessonScopedFilter),
    responses((status = 200, description = "Resources", body = [Resource]))
)]
pub async fn get_resources_handler(
    State(state): State<Arc<AppState>>,
    Query(filter): Query<LessonScopedFilter>,
) -> Result<Response, AppError> {
    lesson_content_service::get_resources(state, filter.lesson_id).await
}

#[utoipa::path(
    get,
    path = "/resources/{id}",
    tag = "Resources",
    security(("bearer_auth" = [])),
    params(("id" = i64, Path, description = "Resource id")),
    responses(
        (status = 200, description = "Resource", body = Resource),
        (status = 404, description = "Resource not found", body = ApiError),
    )
)]
pub async fn get_resource_handler(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> Result<Response, AppError> {
    lesson_content_service::get_resource(state, id).await
}

#[utoipa::path(
    post,
    path = "/resources/create",
    tag = "Resources",
    security(("bearer_auth" = [])),
    request_body = CreateResourceRequest,
    responses(
        (status = 201, description = "Resource created", body = Resource),
        (status = 403, description = "Permission denied", body = ApiError),
        (status = 404, description = "Lesson not found", body = ApiError),
    )
)]
pub async fn create_resource_handler(
    State(state): State<Arc<AppState>>,
    Extension(auth): Extension<AuthContext>,
    Json(request): Json<CreateResourceRequest>,
) -> Result<Response, AppError> {
    lesson_content_service::create_resource(state, auth, request).await
}

#[utoipa::path(
    put,
    path = "/resources/{id}",
    tag = "Resources",
    security(("bearer_auth" = [])),
    params(("id" = i64, Path, description = "Resource id")),
    request_body = UpdateResourceRequest,
    responses(
        (status = 200, description = "Resource updated", body = Resource),
        (status = 403, description = "Permission denied", body = ApiError),
        (status = 404, description = "Resource or lesson not found", body = ApiError),
    )
)]
pub async fn update_resource_handler(
    State(state): State<Arc<AppState>>,
    Extension(auth): Extension<AuthContext>,
    Path(id): Path<i64>,
    Json(request): Json<UpdateResourceRequest>,
) -> Result<Response, AppError> {
    lesson_content_service::update_resource(state, auth, id, request).await
}

#[utoipa::path(
    delete,
    path = "/resources/{id}",
    tag = "Resources",
    security(("bearer_auth" = [])),
    params(("id" = i64, Path, description = "Resource id")),
    responses(
        (status = 204, description = "Resource deleted"),
        (status = 403, description = "Permission denied", body = ApiError),
        (status = 404, description = "Resource not found", body = ApiError),
    )
)]
pub async fn delete_resource_handler(
    State(state): State<Arc<AppState>>,
    Extension(auth): Extension<AuthContext>,
    Path(id): Path<i64>,
) -> Result<Response, AppError> {
    lesson_content_service::delete_resource(state, auth, id).await
}
