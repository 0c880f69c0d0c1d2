use crate::api::model::subscription::{
    CreatePlanRequest, CreateSubscriptionRequest, UpdatePlanRequest, UpdateSubscriptionRequest,
};
use crate::config::app_config::AppState;
use crate::db::repo::{subscriptions_repository, users_repository};
use crate::error::error_model::AppError;
use crate::middleware::auth::AuthContext;
use crate::middleware::role::{ADMIN_ONLY, STAFF};
use crate::service::validate_request;
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use chrono::Utc;
use std::sync::Arc;
use tracing::info;

// Plans

pub async fn get_plans(state: Arc<AppState>) -> Result<Response, AppError> {
    let plans = subscriptions_repository::get_plans(&state.pg_pool).await?;
    Ok((StatusCode::OK, Json(plans)).into_response())
}

pub async fn get_plan(state: Arc<AppState>, id: i64) -> Result<Response, AppError> {
    let plan = subscriptions_repository::get_plan(&state.pg_pool, id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Subscription plan not found for ID: {}", id)))?;
    Ok((StatusCode::OK, Json(plan)).into_response())
}

pub async fn create_plan(
    state: Arc<AppState>,
    auth: AuthContext,
    request: CreatePlanRequest,
) -> Result<Response, AppError> {
    auth.require_role(ADMIN_ONLY)?;
    validate_request(&request, "CreatePlanRequest")?;
    let plan = subscriptions_repository::create_plan(&state.pg_pool, request).await?;
    info!("Subscription plan {} created", plan.id);
    Ok((
        StatusCode::CREATED,
        [(header::LOCATION, format!("/subscription-plans/{}", plan.id))],
        Json(plan),
    )
        .into_response())
}

pub async fn update_plan(
    state: Arc<AppState>,
    auth: AuthContext,
    id: i64,
    request: UpdatePlanRequest,
) -> Result<Response, AppError> {
    auth.require_role(ADMIN_ONLY)?;
    validate_request(&request, "UpdatePlanRequest")?;
    let plan = subscriptions_repository::update_plan(&state.pg_pool, id, request)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Subscription plan not found for ID: {}", id)))?;
    Ok((StatusCode::OK, Json(plan)).into_response())
}

/// Plans with subscriptions or payments are kept; deactivate them instead.
pub async fn delete_plan(
    state: Arc<AppState>,
    auth: AuthContext,
    id: i64,
) -> Result<Response, AppError> {
    auth.require_role(ADMIN_ONLY)?;
    if !subscriptions_repository::delete_plan(&state.pg_pool, id).await? {
        return Err(AppError::not_found(format!(
            "Subscription plan not found for ID: {}",
            id
        )));
    }
    Ok((StatusCode::NO_CONTENT,).into_response())
}

// User subscriptions

pub async fn get_subscriptions(
    state: Arc<AppState>,
    auth: AuthContext,
) -> Result<Response, AppError> {
    auth.require_role(STAFF)?;
    let subscriptions = subscriptions_repository::get_subscriptions(&state.pg_pool).await?;
    Ok((StatusCode::OK, Json(subscriptions)).into_response())
}

pub async fn get_my_subscriptions(
    state: Arc<AppState>,
    auth: AuthContext,
) -> Result<Response, AppError> {
    let subscriptions =
        subscriptions_repository::get_user_subscriptions(&state.pg_pool, auth.user_id).await?;
    Ok((StatusCode::OK, Json(subscriptions)).into_response())
}

pub async fn get_subscription(
    state: Arc<AppState>,
    auth: AuthContext,
    id: i64,
) -> Result<Response, AppError> {
    let subscription = subscriptions_repository::get_subscription(&state.pg_pool, id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Subscription not found for ID: {}", id)))?;
    auth.require_self_or(subscription.user_id, STAFF)?;
    Ok((StatusCode::OK, Json(subscription)).into_response())
}

/// Manual activation by an admin. The end date follows the plan's duration.
#[tracing::instrument(
    skip(state, auth, request),
    fields(
        service.name = "subscription_service",
        service.operation = "create_subscription",
        subscription.user_id = request.user_id,
        subscription.plan_id = request.plan_id
    )
)]
pub async fn create_subscription(
    state: Arc<AppState>,
    auth: AuthContext,
    request: CreateSubscriptionRequest,
) -> Result<Response, AppError> {
    auth.require_role(ADMIN_ONLY)?;
    validate_request(&request, "CreateSubscriptionRequest")?;
    if !users_repository::user_exists(&state.pg_pool, request.user_id).await? {
        return Err(AppError::not_found(format!(
            "User not found for ID: {}",
            request.user_id
        )));
    }
    let plan = subscriptions_repository::get_plan(&state.pg_pool, request.plan_id)
        .await?
        .ok_or_else(|| {
            AppError::not_found(format!(
                "Subscription plan not found for ID: {}",
                request.plan_id
            ))
        })?;

    let mut conn = state.pg_pool.acquire().await?;
    let subscription = subscriptions_repository::create_subscription(
        &mut conn,
        request.user_id,
        plan.id,
        request.start_date.unwrap_or_else(Utc::now),
        plan.duration_days,
    )
    .await?;
    info!(
        "Subscription {} activated for user {} by admin {}",
        subscription.id, subscription.user_id, auth.user_id
    );
    Ok((
        StatusCode::CREATED,
        [(header::LOCATION, format!("/subscriptions/{}", subscription.id))],
        Json(subscription),
    )
        .into_response())
}

pub async fn update_subscription(
    state: Arc<AppState>,
    auth: AuthContext,
    id: i64,
    request: UpdateSubscriptionRequest,
) -> Result<Response, AppError> {
    auth.require_role(ADMIN_ONLY)?;
    validate_request(&request, "UpdateSubscriptionRequest")?;
    let subscription = subscriptions_repository::update_subscription(&state.pg_pool, id, request)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Subscription not found for ID: {}", id)))?;
    Ok((StatusCode::OK, Json(subscription)).into_response())
}

pub async fn delete_subscription(
    state: Arc<AppState>,
    auth: AuthContext,
    id: i64,
) -> Result<Response, AppError> {
    auth.require_role(ADMIN_ONLY)?;
    if !subscriptions_repository::delete_subscription(&state.pg_pool, id).await? {
        return Err(AppError::not_found(format!(
            "Subscription not found for ID: {}",
            id
        )));
    }
    Ok((StatusCode::NO_CONTENT,).into_response())
}
