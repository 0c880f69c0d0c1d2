use crate::api::model::ai_model::{
    CreateAiModelRequest, CreateHandMotionRequest, UpdateAiModelRequest, UpdateHandMotionRequest,
};
use crate::config::app_config::AppState;
use crate::db::repo::{ai_models_repository, hand_motions_repository};
use crate::error::error_model::AppError;
use crate::middleware::auth::AuthContext;
use crate::middleware::role::{ADMIN_ONLY, STAFF};
use crate::service::lesson_content_service::ensure_lesson;
use crate::service::validate_request;
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use sqlx::PgPool;
use std::sync::Arc;
use tracing::info;

async fn ensure_ai_model(pool: &PgPool, ai_model_id: i64) -> Result<(), AppError> {
    if ai_models_repository::ai_model_exists(pool, ai_model_id).await? {
        Ok(())
    } else {
        Err(AppError::not_found(format!(
            "AI model not found for ID: {}",
            ai_model_id
        )))
    }
}

pub async fn get_ai_models(state: Arc<AppState>) -> Result<Response, AppError> {
    let models = ai_models_repository::get_ai_models(&state.pg_pool).await?;
    Ok((StatusCode::OK, Json(models)).into_response())
}

pub async fn get_ai_model(state: Arc<AppState>, id: i64) -> Result<Response, AppError> {
    let model = ai_models_repository::get_ai_model(&state.pg_pool, id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("AI model not found for ID: {}", id)))?;
    Ok((StatusCode::OK, Json(model)).into_response())
}

#[tracing::instrument(
    skip(state, auth, request),
    fields(service.name = "ai_model_service", service.operation = "create_ai_model")
)]
pub async fn create_ai_model(
    state: Arc<AppState>,
    auth: AuthContext,
    request: CreateAiModelRequest,
) -> Result<Response, AppError> {
    auth.require_role(ADMIN_ONLY)?;
    validate_request(&request, "CreateAiModelRequest")?;
    let model = ai_models_repository::create_ai_model(&state.pg_pool, request).await?;
    info!("AI model {} {} registered", model.name, model.version);
    Ok((
        StatusCode::CREATED,
        [(header::LOCATION, format!("/ai-models/{}", model.id))],
        Json(model),
    )
        .into_response())
}

pub async fn update_ai_model(
    state: Arc<AppState>,
    auth: AuthContext,
    id: i64,
    request: UpdateAiModelRequest,
) -> Result<Response, AppError> {
    auth.require_role(ADMIN_ONLY)?;
    validate_request(&request, "UpdateAiModelRequest")?;
    let model = ai_models_repository::update_ai_model(&state.pg_pool, id, request)
        .await?
        .ok_or_else(|| AppError::not_found(format!("AI model not found for ID: {}", id)))?;
    Ok((StatusCode::OK, Json(model)).into_response())
}

/// Refused while hand motions still reference the model.
pub async fn delete_ai_model(
    state: Arc<AppState>,
    auth: AuthContext,
    id: i64,
) -> Result<Response, AppError> {
    auth.require_role(ADMIN_ONLY)?;
    if ai_models_repository::count_hand_motions(&state.pg_pool, id).await? > 0 {
        return Err(AppError::bad_request(
            "AI model is still used by hand motions",
        ));
    }
    if !ai_models_repository::delete_ai_model(&state.pg_pool, id).await? {
        return Err(AppError::not_found(format!("AI model not found for ID: {}", id)));
    }
    Ok((StatusCode::NO_CONTENT,).into_response())
}

pub async fn get_hand_motions(
    state: Arc<AppState>,
    lesson_id: Option<i64>,
) -> Result<Response, AppError> {
    let motions = hand_motions_repository::get_hand_motions(&state.pg_pool, lesson_id).await?;
    Ok((StatusCode::OK, Json(motions)).into_response())
}

pub async fn get_hand_motion(state: Arc<AppState>, id: i64) -> Result<Response, AppError> {
    let motion = hand_motions_repository::get_hand_motion(&state.pg_pool, id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Hand motion not found for ID: {}", id)))?;
    Ok((StatusCode::OK, Json(motion)).into_response())
}

#[tracing::instrument(
    skip(state, auth, request),
    fields(service.name = "ai_model_service", service.operation = "create_hand_motion")
)]
pub async fn create_hand_motion(
    state: Arc<AppState>,
    auth: AuthContext,
    request: CreateHandMotionRequest,
) -> Result<Response, AppError> {
    auth.require_role(STAFF)?;
    validate_request(&request, "CreateHandMotionRequest")?;
    ensure_lesson(&state.pg_pool, request.lesson_id).await?;
    ensure_ai_model(&state.pg_pool, request.ai_model_id).await?;
    let motion = hand_motions_repository::create_hand_motion(&state.pg_pool, request).await?;
    Ok((
        StatusCode::CREATED,
        [(header::LOCATION, format!("/hand-motions/{}", motion.id))],
        Json(motion),
    )
        .into_response())
}

pub async fn update_hand_motion(
    state: Arc<AppState>,
    auth: AuthContext,
    id: i64,
    request: UpdateHandMotionRequest,
) -> Result<Response, AppError> {
    auth.require_role(STAFF)?;
    validate_request(&request, "UpdateHandMotionRequest")?;
    if let Some(lesson_id) = request.lesson_id {
        ensure_lesson(&state.pg_pool, lesson_id).await?;
    }
    if let Some(ai_model_id) = request.ai_model_id {
        ensure_ai_model(&state.pg_pool, ai_model_id).await?;
    }
    let motion = hand_motions_repository::update_hand_motion(&state.pg_pool, id, request)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Hand motion not found for ID: {}", id)))?;
    Ok((StatusCode::OK, Json(motion)).into_response())
}

pub async fn delete_hand_motion(
    state: Arc<AppState>,
    auth: AuthContext,
    id: i64,
) -> Result<Response, AppError> {
    auth.require_role(STAFF)?;
    if !hand_motions_repository::delete_hand_motion(&state.pg_pool, id).await? {
        return Err(AppError::not_found(format!(
            "Hand motion not found for ID: {}",
            id
        )));
    }
    Ok((StatusCode::NO_CONTENT,).into_response())
}
