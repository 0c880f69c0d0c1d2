use crate::api::model::common::PaginationQuery;
use crate::api::model::payment::{
    CreatePaymentRequest, CreatePaymentResponse, PaymentPage, PaymentReturnQuery, WebhookAck,
};
use crate::config::app_config::AppState;
use crate::db::entity::payment::Payment;
use crate::error::error_model::{ApiError, AppError};
use crate::middleware::auth::AuthContext;
use crate::service::payment_service;
use crate::service::payos::WebhookPayload;
use axum::extract::{Path, Query, State};
use axum::response::Response;
use axum::routing::{get, post};
use axum::{Extension, Json, Router};
use std::sync::Arc;
use tracing::info;

/// Payment routes for signed-in users.
pub fn payment_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/", get(get_payments_handler))
        .route("/me", get(get_my_payments_handler))
        .route("/payos/create", post(create_payment_handler))
        .route("/{id}", get(get_payment_handler))
}

/// Gateway callbacks. PayOS calls these without a bearer token.
pub fn payos_callback_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/payments/payos/return", get(payos_return_handler))
        .route("/payments/payos/webhook", post(payos_webhook_handler))
}

/// Create a PayOS payment link
///
/// Prices the plan, applies the optional voucher and returns the checkout URL.
#[utoipa::path(
    post,
    path = "/payments/payos/create",
    tag = "Payments",
    security(("bearer_auth" = [])),
    request_body = CreatePaymentRequest,
    responses(
        (status = 201, description = "Payment link created", body = CreatePaymentResponse),
        (status = 400, description = "Inactive plan, unusable voucher or zero amount", body = ApiError),
        (status = 500, description = "Gateway or internal error", body = ApiError),
    )
)]
pub async fn create_payment_handler(
    State(state): State<Arc<AppState>>,
    Extension(auth): Extension<AuthContext>,
    Json(request): Json<CreatePaymentRequest>,
) -> Result<Response, AppError> {
    payment_service::create_payment(state, auth, request).await
}

/// PayOS return URL
///
/// Unauthenticated and unsigned: the `status` query parameter is taken as reported
/// by the browser redirect. Reconciles the payment and redirects the browser to the
/// frontend result page.
#[utoipa::path(
    get,
    path = "/payments/payos/return",
    tag = "Payments",
    security(()),
    params(PaymentReturnQuery),
    responses(
        (status = 303, description = "Redirect to the frontend result page"),
        (status = 400, description = "Missing or invalid orderCode", body = ApiError),
        (status = 404, description = "Unknown order code", body = ApiError),
    )
)]
pub async fn payos_return_handler(
    State(state): State<Arc<AppState>>,
    Query(query): Query<PaymentReturnQuery>,
) -> Result<Response, AppError> {
    info!(
        "PayOS return for order {:?} with status {:?}",
        query.order_code, query.status
    );
    payment_service::handle_return(state, query).await
}

/// PayOS webhook
///
/// Unauthenticated; the payload signature is verified before the payment is reconciled.
#[utoipa::path(
    post,
    path = "/payments/payos/webhook",
    tag = "Payments",
    security(()),
    request_body = WebhookPayload,
    responses(
        (status = 200, description = "Webhook processed", body = WebhookAck),
        (status = 400, description = "Invalid signature or payload", body = ApiError),
    )
)]
pub async fn payos_webhook_handler(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<WebhookPayload>,
) -> Result<Response, AppError> {
    payment_service::handle_webhook(state, payload).await
}

/// List payments
///
/// Admin and employee only.
#[utoipa::path(
    get,
    path = "/payments",
    tag = "Payments",
    security(("bearer_auth" = [])),
    params(PaginationQuery),
    responses(
        (status = 200, description = "Payments, newest first", body = PaymentPage),
        (status = 403, description = "Permission denied", body = ApiError),
    )
)]
pub async fn get_payments_handler(
    State(state): State<Arc<AppState>>,
    Extension(auth): Extension<AuthContext>,
    Query(query): Query<PaginationQuery>,
) -> Result<Response, AppError> {
    payment_service::get_payments(state, auth, query).await
}

#[utoipa::path(
    get,
    path = "/payments/me",
    tag = "Payments",
    security(("bearer_auth" = [])),
    responses((status = 200, description = "Caller's payments", body = [Payment]))
)]
pub async fn get_my_payments_handler(
    State(state): State<Arc<AppState>>,
    Extension(auth): Extension<AuthContext>,
) -> Result<Response, AppError> {
    payment_service::get_my_payments(state, auth).await
}

#[utoipa::path(
    get,
    path = "/payments/{id}",
    tag = "Payments",
    security(("bearer_auth" = [])),
    params(("id" = i64, Path, description = "Payment id")),
    responses(
        (status = 200, description = "Payment", body = Payment),
        (status = 403, description = "Permission denied", body = ApiError),
        (status = 404, description = "Payment not found", body = ApiError),
    )
)]
pub async fn get_payment_handler(
    State(state): State<Arc<AppState>>,
    Extension(auth): Extension<AuthContext>,
    Path(id): Path<i64>,
) -> Result<Response, AppError> {
    payment_service::get_payment(state, auth, id).await
}
