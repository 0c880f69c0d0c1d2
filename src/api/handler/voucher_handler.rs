use crate::api::model::voucher::{CreateVoucherRequest, UpdateVoucherRequest};
use crate::config::app_config::AppState;
use crate::db::entity::voucher::Voucher;
use crate::error::error_model::{ApiError, AppError};
use crate::middleware::auth::AuthContext;
use crate::service::voucher_service;
use axum::extract::{Path, State};
use axum::response::Response;
use axum::routing::{get, post};
use axum::{Extension, Json, Router};
use std::sync::Arc;

pub fn voucher_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/", get(get_vouchers_handler))
        .route("/create", post(create_voucher_handler))
        .route("/code/{code}", get(get_voucher_by_code_handler))
        .route(
            "/{id}",
            get(get_voucher_handler)
                .put(update_voucher_handler)
                .delete(delete_voucher_handler),
        )
}

#[utoipa::path(
    get,
    path = "/vouchers",
    tag = "Vouchers",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Vouchers", body = [Voucher]),
        (status = 403, description = "Permission denied", body = ApiError),
    )
)]
pub async fn get_vouchers_handler(
    State(state): State<Arc<AppState>>,
    Extension(auth): Extension<AuthContext>,
) -> Result<Response, AppError> {
    voucher_service::get_vouchers(state, auth).await
}

#[utoipa::path(
    get,
    path = "/vouchers/{id}",
    tag = "Vouchers",
    security(("bearer_auth" = [])),
    params(("id" = i64, Path, description = "Voucher id")),
    responses(
        (status = 200, description = "Voucher", body = Voucher),
        (status = 403, description = "Permission denied", body = ApiError),
        (status = 404, description = "Voucher not found", body = ApiError),
    )
)]
pub async fn get_voucher_handler(
    State(state): State<Arc<AppState>>,
    Extension(auth): Extension<AuthContext>,
    Path(id): Path<i64>,
) -> Result<Response, AppError> {
    voucher_service::get_voucher(state, auth, id).await
}

/// Look up a voucher by code
///
/// Available to every signed-in user so the checkout page can preview a discount.
#[utoipa::path(
    get,
    path = "/vouchers/code/{code}",
    tag = "Vouchers",
    security(("bearer_auth" = [])),
    params(("code" = String, Path, description = "Voucher code", example = "SPRING25")),
    responses(
        (status = 200, description = "Voucher", body = Voucher),
        (status = 404, description = "Voucher not found", body = ApiError),
    )
)]
pub async fn get_voucher_by_code_handler(
    State(state): State<Arc<AppState>>,
    Path(code): Path<String>,
) -> Result<Response, AppError> {
    voucher_service::get_voucher_by_code(state, code).await
}

/// Create a voucher
///
/// The code is generated by the server.
#[utoipa::path(
    post,
    path = "/vouchers/create",
    tag = "Vouchers",
    security(("bearer_auth" = [])),
    request_body = CreateVoucherRequest,
    responses(
        (status = 201, description = "Voucher created", body = Voucher),
        (status = 400, description = "Invalid request", body = ApiError),
        (status = 403, description = "Permission denied", body = ApiError),
    )
)]
pub async fn create_voucher_handler(
    State(state): State<Arc<AppState>>,
    Extension(auth): Extension<AuthContext>,
    Json(request): Json<CreateVoucherRequest>,
) -> Result<Response, AppError> {
    voucher_service::create_voucher(state, auth, request).await
}

#[utoipa::path(
    put,
    path = "/vouchers/{id}",
    tag = "Vouchers",
    security(("bearer_auth" = [])),
    params(("id" = i64, Path, description = "Voucher id")),
    request_body = UpdateVoucherRequest,
    responses(
        (status = 200, description = "Voucher updated", body = Voucher),
        (status = 400, description = "Invalid request", body = ApiError),
        (status = 403, description = "Permission denied", body = ApiError),
        (status = 404, description = "Voucher not found", body = ApiError),
    )
)]
pub async fn update_voucher_handler(
    State(state): State<Arc<AppState>>,
    Extension(auth): Extension<AuthContext>,
    Path(id): Path<i64>,
    Json(request): Json<UpdateVoucherRequest>,
) -> Result<Response, AppError> {
    voucher_service::update_voucher(state, auth, id, request).await
}

#[utoipa::path(
    delete,
    path = "/vouchers/{id}",
    tag = "Vouchers",
    security(("bearer_auth" = [])),
    params(("id" = i64, Path, description = "Voucher id")),
    responses(
        (status = 204, description = "Voucher deleted"),
        (status = 403, description = "Permission denied", body = ApiError),
        (status = 404, description = "Voucher not found", body = ApiError),
    )
)]
pub async fn delete_voucher_handler(
    State(state): State<Arc<AppState>>,
    Extension(auth): Extension<AuthContext>,
    Path(id): Path<i64>,
) -> Result<Response, AppError> {
    voucher_service::delete_voucher(state, auth, id).await
}
