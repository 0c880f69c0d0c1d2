use crate::api::model::subscription::{
    CreatePlanRequest, CreateSubscriptionRequest, UpdatePlanRequest, UpdateSubscriptionRequest,
};
use crate::config::app_config::AppState;
use crate::db::entity::subscription::{SubscriptionPlan, UserSubscription};
use crate::error::error_model::{ApiError, AppError};
use crate::middleware::auth::AuthContext;
use crate::service::subscription_service;
use axum::extract::{Path, State};
use axum::response::Response;
use axum::routing::{get, post};
use axum::{Extension, Json, Router};
use std::sync::Arc;

pub fn plan_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/", get(get_plans_handler))
        .route("/create", post(create_plan_handler))
        .route(
            "/{id}",
            get(get_plan_handler)
                .put(update_plan_handler)
                .delete(delete_plan_handler),
        )
}

pub fn subscription_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/", get(get_subscriptions_handler))
        .route("/me", get(get_my_subscriptions_handler))
        .route("/create", post(create_subscription_handler))
        .route(
            "/{id}",
            get(get_subscription_handler)
                .put(update_subscription_handler)
                .delete(delete_subscription_handler),
        )
}

#[utoipa::path(
    get,
    path = "/subscription-plans",
    tag = "Subscription Plans",
    security(("bearer_auth" = [])),
    responses((status = 200, description = "Plans ordered by price", body = [SubscriptionPlan]))
)]
pub async fn get_plans_handler(State(state): State<Arc<AppState>>) -> Result<Response, AppError> {
    subscription_service::get_plans(state).await
}

#[utoipa::path(
    get,
    path = "/subscription-plans/{id}",
    tag = "Subscription Plans",
    security(("bearer_auth" = [])),
    params(("id" = i64, Path, description = "Plan id")),
    responses(
        (status = 200, description = "Plan", body = SubscriptionPlan),
        (status = 404, description = "Plan not found", body = ApiError),
    )
)]
pub async fn get_plan_handler(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> Result<Response, AppError> {
    subscription_service::get_plan(state, id).await
}

#[utoipa::path(
    post,
    path = "/subscription-plans/create",
    tag = "Subscription Plans",
    security(("bearer_auth" = [])),
    request_body = CreatePlanRequest,
    responses(
        (status = 201, description = "Plan created", body = SubscriptionPlan),
        (status = 400, description = "Invalid request", body = ApiError),
        (status = 403, description = "Permission denied", body = ApiError),
    )
)]
pub async fn create_plan_handler(
    State(state): State<Arc<AppState>>,
    Extension(auth): Extension<AuthContext>,
    Json(request): Json<CreatePlanRequest>,
) -> Result<Response, AppError> {
    subscription_service::create_plan(state, auth, request).await
}

#[utoipa::path(
    put,
    path = "/subscription-plans/{id}",
    tag = "Subscription Plans",
    security(("bearer_auth" = [])),
    params(("id" = i64, Path, description = "Plan id")),
    request_body = UpdatePlanRequest,
    responses(
        (status = 200, description = "Plan updated", body = SubscriptionPlan),
        (status = 403, description = "Permission denied", body = ApiError),
        (status = 404, description = "Plan not found", body = ApiError),
    )
)]
pub async fn update_plan_handler(
    State(state): State<Arc<AppState>>,
    Extension(auth): Extension<AuthContext>,
    Path(id): Path<i64>,
    Json(request): Json<UpdatePlanRequest>,
) -> Result<Response, AppError> {
    subscription_service::update_plan(state, auth, id, request).await
}

/// Delete a plan
///
/// Plans referenced by subscriptions or payments cannot be deleted.
#[utoipa::path(
    delete,
    path = "/subscription-plans/{id}",
    tag = "Subscription Plans",
    security(("bearer_auth" = [])),
    params(("id" = i64, Path, description = "Plan id")),
    responses(
        (status = 204, description = "Plan deleted"),
        (status = 400, description = "Plan still referenced", body = ApiError),
        (status = 403, description = "Permission denied", body = ApiError),
        (status = 404, description = "Plan not found", body = ApiError),
    )
)]
pub async fn delete_plan_handler(
    State(state): State<Arc<AppState>>,
    Extension(auth): Extension<AuthContext>,
    Path(id): Path<i64>,
) -> Result<Response, AppError> {
    subscription_service::delete_plan(state, auth, id).await
}

#[utoipa::path(
    get,
    path = "/subscriptions",
    tag = "Subscriptions",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "All subscriptions", body = [UserSubscription]),
        (status = 403, description = "Permission denied", body = ApiError),
    )
)]
pub async fn get_subscriptions_handler(
    State(state): State<Arc<AppState>>,
    Extension(auth): Extension<AuthContext>,
) -> Result<Response, AppError> {
    subscription_service::get_subscriptions(state, auth).await
}

#[utoipa::path(
    get,
    path = "/subscriptions/me",
    tag = "Subscriptions",
    security(("bearer_auth" = [])),
    responses((status = 200, description = "Caller's subscriptions", body = [UserSubscription]))
)]
pub async fn get_my_subscriptions_handler(
    State(state): State<Arc<AppState>>,
    Extension(auth): Extension<AuthContext>,
) -> Result<Response, AppError> {
    subscription_service::get_my_subscriptions(state, auth).await
}

#[utoipa::path(
    get,
    path = "/subscriptions/{id}",
    tag = "Subscriptions",
    security(("bearer_auth" = [])),
    params(("id" = i64, Path, description = "Subscription id")),
    responses(
        (status = 200, description = "Subscription", body = UserSubscription),
        (status = 403, description = "Permission denied", body = ApiError),
        (status = 404, description = "Subscription not found", body = ApiError),
    )
)]
pub async fn get_subscription_handler(
    State(state): State<Arc<AppState>>,
    Extension(auth): Extension<AuthContext>,
    Path(id): Path<i64>,
) -> Result<Response, AppError> {
    subscription_service::get_subscription(state, auth, id).await
}

/// Activate a subscription manually
#[utoipa::path(
    post,
    path = "/subscriptions/create",
    tag = "Subscriptions",
    security(("bearer_auth" = [])),
    request_body = CreateSubscriptionRequest,
    responses(
        (status = 201, description = "Subscription created", body = UserSubscription),
        (status = 403, description = "Permission denied", body = ApiError),
        (status = 404, description = "User or plan not found", body = ApiError),
    )
)]
pub async fn create_subscription_handler(
    State(state): State<Arc<AppState>>,
    Extension(auth): Extension<AuthContext>,
    Json(request): Json<CreateSubscriptionRequest>,
) -> Result<Response, AppError> {
    subscription_service::create_subscription(state, auth, request).await
}

#[utoipa::path(
    put,
    path = "/subscriptions/{id}",
    tag = "Subscriptions",
    security(("bearer_auth" = [])),
    params(("id" = i64, Path, description = "Subscription id")),
    request_body = UpdateSubscriptionRequest,
    responses(
        (status = 200, description = "Subscription updated", body = UserSubscription),
        (status = 403, description = "Permission denied", body = ApiError),
        (status = 404, description = "Subscription not found", body = ApiError),
    )
)]
pub async fn update_subscription_handler(
    State(state): State<Arc<AppState>>,
    Extension(auth): Extension<AuthContext>,
    Path(id): Path<i64>,
    Json(request): Json<UpdateSubscriptionRequest>,
) -> Result<Response, AppError> {
    subscription_service::update_subscription(state, auth, id, request).await
}

#[utoipa::path(
    delete,
    path = "/subscriptions/{id}",
    tag = "Subscriptions",
    security(("bearer_auth" = [])),
    params(("id" = i64, Path, description = "Subscription id")),
    responses(
        (status = 204, description = "Subscription deleted"),
        (status = 403, description = "Permission denied", body = ApiError),
        (status = 404, description = "Subscription not found", body = ApiError),
    )
)]
pub async fn delete_subscription_handler(
    State(state): State<Arc<AppState>>,
    Extension(auth): Extension<AuthContext>,
    Path(id): Path<i64>,
) -> Result<Response, AppError> {
    subscription_service::delete_subscription(state, auth, id).await
}
