use crate::api::model::ai_model::{CreateAiModelRequest, UpdateAiModelRequest};
use crate::config::app_config::AppState;
use crate::db::entity::ai_model::AiModel;
use crate::error::error_model::{ApiError, AppError};
use crate::middleware::auth::AuthContext;
use crate::service::ai_model_service;
use axum::extract::{Path, State};
use axum::response::Response;
use axum::routing::{get, post};
use axum::{Extension, Json, Router};
use std::sync::Arc;

pub fn ai_model_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/", get(get_ai_models_handler))
        .route("/create", post(create_ai_model_handler))
        .route(
            "/{id}",
            get(get_ai_model_handler)
                .put(update_ai_model_handler)
                .delete(delete_ai_model_handler),
        )
}

#[utoipa::path(
    get,
    path = "/ai-models",
    tag = "AI Models",
    security(("bearer_auth" = [])),
    responses((status = 200, description = "AI models", body = [AiModel]))
)]
pub async fn get_ai_models_handler(
    State(state): State<Arc<AppState>>,
) -> Result<Response, AppError> {
    ai_model_service::get_ai_models(state).await
}

#[utoipa::path(
    get,
    path = "/ai-models/{id}",
    tag = "AI Models",
    security(("bearer_auth" = [])),
    params(("id" = i64, Path, description = "AI model id")),
    responses(
        (status = 200, description = "AI model", body = AiModel),
        (status = 404, description = "AI model not found", body = ApiError),
    )
)]
pub async fn get_ai_model_handler(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> Result<Response, AppError> {
    ai_model_service::get_ai_model(state, id).await
}

/// Register an AI model
///
/// Admin only.
#[utoipa::path(
    post,
    path = "/ai-models/create",
    tag = "AI Models",
    security(("bearer_auth" = [])),
    request_body = CreateAiModelRequest,
    responses(
        (status = 201, description = "AI model created", body = AiModel),
        (status = 400, description = "Invalid request or duplicate name", body = ApiError),
        (status = 403, description = "Permission denied", body = ApiError),
    )
)]
pub async fn create_ai_model_handler(
    State(state): State<Arc<AppState>>,
    Extension(auth): Extension<AuthContext>,
    Json(request): Json<CreateAiModelRequest>,
) -> Result<Response, AppError> {
    ai_model_service::create_ai_model(state, auth, request).await
}

#[utoipa::path(
    put,
    path = "/ai-models/{id}",
    tag = "AI Models",
    security(("bearer_auth" = [])),
    params(("id" = i64, Path, description = "AI model id")),
    request_body = UpdateAiModelRequest,
    responses(
        (status = 200, description = "AI model updated", body = AiModel),
        (status = 403, description = "Permission denied", body = ApiError),
        (status = 404, description = "AI model not found", body = ApiError),
    )
)]
pub async fn update_ai_model_handler(
    State(state): State<Arc<AppState>>,
    Extension(auth): Extension<AuthContext>,
    Path(id): Path<i64>,
    Json(request): Json<UpdateAiModelRequest>,
) -> Result<Response, AppError> {
    ai_model_service::update_ai_model(state, auth, id, request).await
}

/// Delete an AI model
///
/// Refused while hand motions reference the model.
#[utoipa::path(
    delete,
    path = "/ai-models/{id}",
    tag = "AI Models",
    security(("bearer_auth" = [])),
    params(("id" = i64, Path, description = "AI model id")),
    responses(
        (status = 204, description = "AI model deleted"),
        (status = 400, description = "AI model still in use", body = ApiError),
        (status = 403, description = "Permission denied", body = ApiError),
        (status = 404, description = "AI model not found", body = ApiError),
    )
)]
pub async fn delete_ai_model_handler(
    State(state): State<Arc<AppState>>,
    Extension(auth): Extension<AuthContext>,
    Path(id): Path<i64>,
) -> Result<Response, AppError> {
    ai_model_service::delete_ai_model(state, auth, id).await
}
