//! Payment link creation and reconciliation of gateway callbacks.

use crate::api::model::common::{total_pages, PaginationQuery};
use crate::api::model::payment::{
    CreatePaymentRequest, CreatePaymentResponse, PaymentPage, PaymentReturnQuery, WebhookAck,
};
use crate::config::app_config::AppState;
use crate::db::entity::payment::{Payment, PaymentStatus};
use crate::db::entity::voucher::{DiscountType, Voucher};
use crate::db::repo::{payments_repository, subscriptions_repository, vouchers_repository};
use crate::db::repo::payments_repository::NewPayment;
use crate::db::unit_of_work::in_transaction;
use crate::error::error_model::AppError;
use crate::middleware::auth::AuthContext;
use crate::middleware::role::STAFF;
use crate::service::payos::WebhookPayload;
use crate::service::validate_request;
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Redirect, Response};
use axum::Json;
use chrono::{DateTime, Utc};
use rand::Rng;
use serde_json::Value;
use sqlx::PgPool;
use std::sync::Arc;
use tracing::{error, info, warn};

/// Discount granted by `voucher` on `original_amount`, never more than the amount itself.
pub fn discount_for(voucher: &Voucher, original_amount: i64) -> i64 {
    let discount = match voucher.discount_type {
        DiscountType::Percentage => {
            let discount = i128::from(original_amount) * i128::from(voucher.discount_value) / 100;
            i64::try_from(discount).unwrap_or(i64::MAX)
        }
        DiscountType::Fixed => voucher.discount_value,
    };
    discount.clamp(0, original_amount.max(0))
}

pub fn final_amount(original_amount: i64, discount_amount: i64) -> i64 {
    (original_amount - discount_amount).max(0)
}

/// Checks that a voucher can be redeemed at `now`.
pub fn check_voucher_usable(voucher: &Voucher, now: DateTime<Utc>) -> Result<(), AppError> {
    if !voucher.is_active {
        return Err(AppError::bad_request("Voucher is not active"));
    }
    if now < voucher.valid_from || now > voucher.valid_until {
        return Err(AppError::bad_request("Voucher is not valid at this time"));
    }
    if voucher.used_count >= voucher.max_usage {
        return Err(AppError::bad_request("Voucher usage limit reached"));
    }
    Ok(())
}

/// Order code from a millisecond timestamp and a random suffix in `0..1000`.
///
/// Stays below 2^53 until the year 2255, so JSON consumers keep full precision.
pub fn order_code_from(timestamp_millis: i64, suffix: u16) -> i64 {
    timestamp_millis * 1000 + i64::from(suffix % 1000)
}

fn new_order_code() -> i64 {
    let suffix = rand::thread_rng().gen_range(0..1000u16);
    order_code_from(Utc::now().timestamp_millis(), suffix)
}

/// Creates a PayOS checkout link for a plan, optionally discounted by a voucher.
///
/// The payment row is only written once the gateway accepted the request, so a
/// gateway failure leaves nothing behind.
#[tracing::instrument(
    skip(state, auth, request),
    fields(
        service.name = "payment_service",
        service.operation = "create_payment",
        payment.user_id = auth.user_id,
        payment.plan_id = request.plan_id
    )
)]
pub async fn create_payment(
    state: Arc<AppState>,
    auth: AuthContext,
    request: CreatePaymentRequest,
) -> Result<Response, AppError> {
    validate_request(&request, "CreatePaymentRequest")?;

    let plan = subscriptions_repository::get_plan(&state.pg_pool, request.plan_id)
        .await?
        .filter(|plan| plan.is_active)
        .ok_or_else(|| AppError::bad_request("Subscription plan does not exist or is inactive"))?;

    let voucher = match request.voucher_id {
        Some(voucher_id) => {
            let voucher = vouchers_repository::get_voucher(&state.pg_pool, voucher_id)
                .await?
                .ok_or_else(|| AppError::bad_request("Voucher does not exist"))?;
            check_voucher_usable(&voucher, Utc::now())?;
            Some(voucher)
        }
        None => None,
    };

    let original_amount = plan.price;
    let discount_amount = voucher
        .as_ref()
        .map(|v| discount_for(v, original_amount))
        .unwrap_or(0);
    let final_amount = final_amount(original_amount, discount_amount);
    if final_amount <= 0 {
        return Err(AppError::bad_request(
            "Final amount must be greater than zero",
        ));
    }

    let order_code = new_order_code();
    let description = format!("Order {}", order_code);
    let link = state
        .payos
        .create_payment_link(order_code, final_amount, &description)
        .await
        .map_err(|e| {
            error!("Could not create payment link: {}", e);
            AppError::internal()
        })?;

    let payment = payments_repository::create_payment(
        &state.pg_pool,
        NewPayment {
            user_id: auth.user_id,
            plan_id: plan.id,
            voucher_id: voucher.as_ref().map(|v| v.id),
            order_code,
            original_amount,
            discount_amount,
            final_amount,
            checkout_url: &link.checkout_url,
            description: &description,
        },
    )
    .await?;
    info!("Payment {} created with order code {}", payment.id, order_code);

    Ok((
        StatusCode::CREATED,
        [(header::LOCATION, format!("/payments/{}", payment.id))],
        Json(CreatePaymentResponse {
            payment_id: payment.id,
            order_code: payment.order_code,
            checkout_url: link.checkout_url,
            original_amount: payment.original_amount,
            discount_amount: payment.discount_amount,
            final_amount: payment.final_amount,
            status: payment.status,
        }),
    )
        .into_response())
}

/// Applies a gateway outcome to a pending payment in one transaction.
///
/// Returns `Ok(None)` for unknown order codes. Payments that already left `pending`
/// are returned unchanged, so repeated callbacks are harmless. A successful payment
/// consumes one voucher use and activates the plan, unless a subscription for the
/// same user and plan was created in the last five minutes.
#[tracing::instrument(
    skip(pool),
    fields(service.name = "payment_service", service.operation = "reconcile")
)]
pub async fn reconcile(
    pool: &PgPool,
    order_code: i64,
    outcome: PaymentStatus,
) -> Result<Option<Payment>, AppError> {
    in_transaction(pool, move |conn| {
        Box::pin(async move {
            let Some(payment) = payments_repository::lock_by_order_code(&mut *conn, order_code).await?
            else {
                return Ok(None);
            };
            if payment.status != PaymentStatus::Pending {
                info!(
                    "Order {} already {}, ignoring {}",
                    order_code,
                    payment.status.as_str(),
                    outcome.as_str()
                );
                return Ok(Some(payment));
            }

            let payment = payments_repository::update_status(&mut *conn, payment.id, outcome).await?;
            if outcome != PaymentStatus::Success {
                info!("Order {} marked {}", order_code, outcome.as_str());
                return Ok(Some(payment));
            }

            if let Some(voucher_id) = payment.voucher_id {
                if !vouchers_repository::increment_used_count(&mut *conn, voucher_id).await? {
                    warn!(
                        "Voucher {} exhausted when order {} was paid",
                        voucher_id, order_code
                    );
                }
            }

            if subscriptions_repository::recent_subscription_exists(
                &mut *conn,
                payment.user_id,
                payment.plan_id,
            )
            .await?
            {
                info!(
                    "Recent subscription exists for user {} plan {}, not activating again",
                    payment.user_id, payment.plan_id
                );
                return Ok(Some(payment));
            }

            let duration_days =
                subscriptions_repository::plan_duration_days(&mut *conn, payment.plan_id)
                    .await?
                    .ok_or_else(|| {
                        error!("Plan {} of order {} is gone", payment.plan_id, order_code);
                        AppError::internal()
                    })?;
            let subscription = subscriptions_repository::create_subscription(
                &mut *conn,
                payment.user_id,
                payment.plan_id,
                Utc::now(),
                duration_days,
            )
            .await?;
            info!(
                "Order {} paid, subscription {} activated",
                order_code, subscription.id
            );
            Ok(Some(payment))
        })
    })
    .await
}

fn parse_order_code(raw: Option<&str>) -> Result<i64, AppError> {
    raw.map(str::trim)
        .filter(|s| !s.is_empty())
        .and_then(|s| s.parse::<i64>().ok())
        .ok_or_else(|| AppError::bad_request("Missing or invalid orderCode"))
}

/// Handles the buyer's browser coming back from the checkout page.
///
/// Trusts the `status` query parameter, reconciles, and redirects to the frontend
/// result page.
pub async fn handle_return(
    state: Arc<AppState>,
    query: PaymentReturnQuery,
) -> Result<Response, AppError> {
    let order_code = parse_order_code(query.order_code.as_deref())?;
    let cancelled = query
        .cancel
        .as_deref()
        .is_some_and(|c| c.eq_ignore_ascii_case("true"));
    let outcome = match query.status.as_deref() {
        Some(status) => PaymentStatus::from_gateway(status),
        None if cancelled => PaymentStatus::Cancelled,
        None => PaymentStatus::Failed,
    };
    if outcome == PaymentStatus::Success {
        warn!(
            "Order {} marked paid from the unsigned return URL",
            order_code
        );
    }

    let payment = reconcile(&state.pg_pool, order_code, outcome)
        .await?
        .ok_or_else(|| {
            AppError::not_found(format!("Payment not found for order code: {}", order_code))
        })?;

    let target = format!(
        "{}/payment/result?orderCode={}&status={}",
        state.frontend_url,
        order_code,
        payment.status.as_str()
    );
    Ok(Redirect::to(&target).into_response())
}

fn order_code_in(data: &serde_json::Map<String, Value>) -> Option<i64> {
    match data.get("orderCode")? {
        Value::Number(n) => n.as_i64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

/// Handles the server-to-server PayOS webhook.
pub async fn handle_webhook(
    state: Arc<AppState>,
    payload: WebhookPayload,
) -> Result<Response, AppError> {
    if !state.payos.verify_webhook(&payload) {
        warn!("Rejected webhook with invalid signature");
        return Err(AppError::bad_request("Invalid webhook signature"));
    }
    let order_code = order_code_in(&payload.data)
        .ok_or_else(|| AppError::bad_request("Webhook data has no orderCode"))?;
    let data_code = payload.data.get("code").and_then(Value::as_str);
    let outcome = if payload.success && data_code == Some("00") {
        PaymentStatus::Success
    } else {
        PaymentStatus::Failed
    };

    let message = match reconcile(&state.pg_pool, order_code, outcome).await? {
        Some(payment) => format!("Payment {} is {}", order_code, payment.status.as_str()),
        None => {
            info!("Webhook for unknown order {} acknowledged", order_code);
            format!("Unknown order {}", order_code)
        }
    };
    Ok((
        StatusCode::OK,
        Json(WebhookAck {
            success: true,
            message,
        }),
    )
        .into_response())
}

pub async fn get_payments(
    state: Arc<AppState>,
    auth: AuthContext,
    pagination: PaginationQuery,
) -> Result<Response, AppError> {
    auth.require_role(STAFF)?;
    let (page, limit) = pagination.normalized();
    let payments = payments_repository::get_payments(&state.pg_pool, limit, page).await?;
    let total_items = payments_repository::count_payments(&state.pg_pool).await?;
    Ok((
        StatusCode::OK,
        Json(PaymentPage {
            payments,
            current_page: page,
            total_items,
            total_pages: total_pages(total_items, limit),
            items_per_page: limit,
        }),
    )
        .into_response())
}

pub async fn get_my_payments(
    state: Arc<AppState>,
    auth: AuthContext,
) -> Result<Response, AppError> {
    let payments = payments_repository::get_user_payments(&state.pg_pool, auth.user_id).await?;
    Ok((StatusCode::OK, Json(payments)).into_response())
}

pub async fn get_payment(
    state: Arc<AppState>,
    auth: AuthContext,
    id: i64,
) -> Result<Response, AppError> {
    let payment = payments_repository::get_payment(&state.pg_pool, id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Payment not found for ID: {}", id)))?;
    auth.require_self_or(payment.user_id, STAFF)?;
    Ok((StatusCode::OK, Json(payment)).into_response())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use serde_json::json;

    fn voucher(discount_type: DiscountType, discount_value: i64) -> Voucher {
        let now = Utc::now();
        Voucher {
            id: 1,
            code: "ABCD1234".to_string(),
            description: None,
            discount_type,
            discount_value,
            max_usage: 5,
            used_count: 0,
            valid_from: now - Duration::days(1),
            valid_until: now + Duration::days(1),
            is_active: true,
            created_at: now,
        }
    }

    #[test]
    fn percentage_and_fixed_discounts() {
        assert_eq!(discount_for(&voucher(DiscountType::Percentage, 20), 100_000), 20_000);
        assert_eq!(discount_for(&voucher(DiscountType::Fixed, 30_000), 100_000), 30_000);
        // Capped at the original amount.
        assert_eq!(discount_for(&voucher(DiscountType::Fixed, 150_000), 100_000), 100_000);
        assert_eq!(discount_for(&voucher(DiscountType::Percentage, 100), 99_000), 99_000);
    }

    #[test]
    fn percentage_of_huge_price_does_not_overflow() {
        let price = i64::MAX - 1;
        let discount = discount_for(&voucher(DiscountType::Percentage, 50), price);
        assert_eq!(discount, price / 2);
        assert_eq!(
            discount_for(&voucher(DiscountType::Percentage, 100), price),
            price
        );
    }

    #[test]
    fn final_amount_never_goes_negative() {
        assert_eq!(final_amount(100_000, 20_000), 80_000);
        assert_eq!(final_amount(100_000, 100_000), 0);
        assert_eq!(final_amount(10, 50), 0);
    }

    #[test]
    fn voucher_usability_rules() {
        let now = Utc::now();
        let mut v = voucher(DiscountType::Fixed, 1000);
        assert!(check_voucher_usable(&v, now).is_ok());

        v.used_count = v.max_usage;
        assert!(check_voucher_usable(&v, now).is_err());

        v.used_count = 0;
        v.is_active = false;
        assert!(check_voucher_usable(&v, now).is_err());

        v.is_active = true;
        assert!(check_voucher_usable(&v, now + Duration::days(2)).is_err());
        assert!(check_voucher_usable(&v, now - Duration::days(2)).is_err());
    }

    #[test]
    fn order_codes_fit_in_a_json_safe_integer() {
        let millis = Utc::now().timestamp_millis();
        let code = order_code_from(millis, 999);
        assert_eq!(code, millis * 1000 + 999);
        assert!(code < (1_i64 << 53));
        assert_eq!(order_code_from(5, 1999), 5999);
        assert!(new_order_code() > 0);
    }

    #[test]
    fn order_code_parsing() {
        assert_eq!(parse_order_code(Some(" 123 ")).unwrap(), 123);
        assert!(parse_order_code(Some("abc")).is_err());
        assert!(parse_order_code(Some("")).is_err());
        assert!(parse_order_code(None).is_err());

        let data = json!({"orderCode": 42, "code": "00"});
        assert_eq!(order_code_in(data.as_object().unwrap()), Some(42));
        let data = json!({"orderCode": "43"});
        assert_eq!(order_code_in(data.as_object().unwrap()), Some(43));
        let data = json!({"code": "00"});
        assert_eq!(order_code_in(data.as_object().unwrap()), None);
    }
}
