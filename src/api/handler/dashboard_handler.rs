use crate::api::model::dashboard::{MonthlySeries, YearQuery};
use crate::config::app_config::AppState;
use crate::error::error_model::{ApiError, AppError};
use crate::service::dashboard_service::{self, Series};
use axum::extract::{Query, State};
use axum::response::Response;
use axum::routing::get;
use axum::Router;
use std::sync::Arc;

/// Monthly statistics. The router is gated to admin and employee.
pub fn dashboard_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/user-stats-by-month", get(user_stats_handler))
        .route("/revenue-stats-by-month", get(revenue_stats_handler))
        .route("/subscription-stats-by-month", get(subscription_stats_handler))
        .route(
            "/lesson-completion-stats-by-month",
            get(lesson_completion_stats_handler),
        )
}

/// New users per month
#[utoipa::path(
    get,
    path = "/dashboard/user-stats-by-month",
    tag = "Dashboard",
    security(("bearer_auth" = [])),
    params(YearQuery),
    responses(
        (status = 200, description = "Twelve monthly rows", body = MonthlySeries),
        (status = 400, description = "Year out of range", body = ApiError),
        (status = 403, description = "Permission denied", body = ApiError),
    )
)]
pub async fn user_stats_handler(
    State(state): State<Arc<AppState>>,
    Query(query): Query<YearQuery>,
) -> Result<Response, AppError> {
    dashboard_service::monthly_stats(state, Series::Users, query.year).await
}

/// Paid orders and revenue per month
#[utoipa::path(
    get,
    path = "/dashboard/revenue-stats-by-month",
    tag = "Dashboard",
    security(("bearer_auth" = [])),
    params(YearQuery),
    responses(
        (status = 200, description = "Twelve monthly rows with amounts", body = MonthlySeries),
        (status = 400, description = "Year out of range", body = ApiError),
        (status = 403, description = "Permission denied", body = ApiError),
    )
)]
pub async fn revenue_stats_handler(
    State(state): State<Arc<AppState>>,
    Query(query): Query<YearQuery>,
) -> Result<Response, AppError> {
    dashboard_service::monthly_stats(state, Series::Revenue, query.year).await
}

/// New subscriptions per month
#[utoipa::path(
    get,
    path = "/dashboard/subscription-stats-by-month",
    tag = "Dashboard",
    security(("bearer_auth" = [])),
    params(YearQuery),
    responses(
        (status = 200, description = "Twelve monthly rows", body = MonthlySeries),
        (status = 400, description = "Year out of range", body = ApiError),
        (status = 403, description = "Permission denied", body = ApiError),
    )
)]
pub async fn subscription_stats_handler(
    State(state): State<Arc<AppState>>,
    Query(query): Query<YearQuery>,
) -> Result<Response, AppError> {
    dashboard_service::monthly_stats(state, Series::Subscriptions, query.year).await
}

/// Completed lessons per month
#[utoipa::path(
    get,
    path = "/dashboard/lesson-completion-stats-by-month",
    tag = "Dashboard",
    security(("bearer_auth" = [])),
    params(YearQuery),
    responses(
        (status = 200, description = "Twelve monthly rows", body = MonthlySeries),
        (status = 400, description = "Year out of range", body = ApiError),
        (status = 403, description = "Permission denied", body = ApiError),
    )
)]
pub async fn lesson_completion_stats_handler(
    State(state): State<Arc<AppState>>,
    Query(query): Query<YearQuery>,
) -> Result<Response, AppError> {
    dashboard_service::monthly_stats(state, Series::LessonCompletions, query.year).await
}
