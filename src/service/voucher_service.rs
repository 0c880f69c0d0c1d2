use crate::api::model::voucher::{CreateVoucherRequest, UpdateVoucherRequest};
use crate::config::app_config::AppState;
use crate::db::entity::voucher::DiscountType;
use crate::db::repo::vouchers_repository;
use crate::error::error_model::AppError;
use crate::middleware::auth::AuthContext;
use crate::middleware::role::STAFF;
use crate::service::validate_request;
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use nanoid::nanoid;
use std::sync::Arc;
use tracing::{info, warn};

const CODE_ALPHABET: [char; 36] = [
    'A', 'B', 'C', 'D', 'E', 'F', 'G', 'H', 'I', 'J', 'K', 'L', 'M', 'N', 'O', 'P', 'Q', 'R',
    'S', 'T', 'U', 'V', 'W', 'X', 'Y', 'Z', '0', '1', '2', '3', '4', '5', '6', '7', '8', '9',
];
const CODE_LENGTH: usize = 8;
const CODE_ATTEMPTS: usize = 5;

/// Random 8 character uppercase alphanumeric voucher code.
pub fn generate_code() -> String {
    nanoid!(CODE_LENGTH, &CODE_ALPHABET)
}

pub async fn get_vouchers(state: Arc<AppState>, auth: AuthContext) -> Result<Response, AppError> {
    auth.require_role(STAFF)?;
    let vouchers = vouchers_repository::get_vouchers(&state.pg_pool).await?;
    Ok((StatusCode::OK, Json(vouchers)).into_response())
}

pub async fn get_voucher(
    state: Arc<AppState>,
    auth: AuthContext,
    id: i64,
) -> Result<Response, AppError> {
    auth.require_role(STAFF)?;
    let voucher = vouchers_repository::get_voucher(&state.pg_pool, id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Voucher not found for ID: {}", id)))?;
    Ok((StatusCode::OK, Json(voucher)).into_response())
}

/// Looks a voucher up by the code a customer typed in.
pub async fn get_voucher_by_code(state: Arc<AppState>, code: String) -> Result<Response, AppError> {
    let voucher = vouchers_repository::get_voucher_by_code(&state.pg_pool, code.trim())
        .await?
        .ok_or_else(|| AppError::not_found(format!("Voucher not found for code: {}", code)))?;
    Ok((StatusCode::OK, Json(voucher)).into_response())
}

#[tracing::instrument(
    skip(state, auth, request),
    fields(service.name = "voucher_service", service.operation = "create_voucher")
)]
pub async fn create_voucher(
    state: Arc<AppState>,
    auth: AuthContext,
    request: CreateVoucherRequest,
) -> Result<Response, AppError> {
    auth.require_role(STAFF)?;
    validate_request(&request, "CreateVoucherRequest")?;

    let mut code = generate_code();
    let mut attempts = 1;
    while vouchers_repository::get_voucher_by_code(&state.pg_pool, &code)
        .await?
        .is_some()
    {
        if attempts == CODE_ATTEMPTS {
            warn!("Could not generate a free voucher code");
            return Err(AppError::internal());
        }
        code = generate_code();
        attempts += 1;
    }

    let voucher = vouchers_repository::create_voucher(&state.pg_pool, &code, request).await?;
    info!("Voucher {} created by {}", voucher.code, auth.user_id);
    Ok((
        StatusCode::CREATED,
        [(header::LOCATION, format!("/vouchers/{}", voucher.id))],
        Json(voucher),
    )
        .into_response())
}

/// Applies a partial update; the resulting validity window and percentage are re-checked
/// against the stored values.
pub async fn update_voucher(
    state: Arc<AppState>,
    auth: AuthContext,
    id: i64,
    request: UpdateVoucherRequest,
) -> Result<Response, AppError> {
    auth.require_role(STAFF)?;
    validate_request(&request, "UpdateVoucherRequest")?;
    let existing = vouchers_repository::get_voucher(&state.pg_pool, id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Voucher not found for ID: {}", id)))?;

    let valid_from = request.valid_from.unwrap_or(existing.valid_from);
    let valid_until = request.valid_until.unwrap_or(existing.valid_until);
    if valid_until <= valid_from {
        return Err(AppError::bad_request("valid_until must be after valid_from"));
    }
    let discount_type = request.discount_type.unwrap_or(existing.discount_type);
    let discount_value = request.discount_value.unwrap_or(existing.discount_value);
    if discount_type == DiscountType::Percentage && discount_value > 100 {
        return Err(AppError::bad_request(
            "Percentage discount cannot exceed 100",
        ));
    }
    if let Some(max_usage) = request.max_usage {
        if max_usage < existing.used_count {
            return Err(AppError::bad_request(
                "max_usage cannot be lower than the number of uses so far",
            ));
        }
    }

    let voucher = vouchers_repository::update_voucher(&state.pg_pool, id, request)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Voucher not found for ID: {}", id)))?;
    Ok((StatusCode::OK, Json(voucher)).into_response())
}

/// Vouchers referenced by payments are detached from them (`voucher_id` set to null).
pub async fn delete_voucher(
    state: Arc<AppState>,
    auth: AuthContext,
    id: i64,
) -> Result<Response, AppError> {
    auth.require_role(STAFF)?;
    if !vouchers_repository::delete_voucher(&state.pg_pool, id).await? {
        return Err(AppError::not_found(format!("Voucher not found for ID: {}", id)));
    }
    Ok((StatusCode::NO_CONTENT,).into_response())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generated_codes_are_uppercase_alphanumeric() {
        for _ in 0..50 {
            let code = generate_code();
            assert_eq!(code.len(), 8);
            assert!(code
                .chars()
                .all(|c| c.is_ascii_uppercase() || c.is_ascii_digit()));
        }
    }
}
