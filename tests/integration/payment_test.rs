use crate::helpers;
use axum::http::{header, Method, StatusCode};
use chrono::{Duration, Utc};
use learnhub_api::api::model::subscription::CreatePlanRequest;
use learnhub_api::api::model::voucher::CreateVoucherRequest;
use learnhub_api::db::entity::subscription::SubscriptionPlan;
use learnhub_api::db::entity::user::Role;
use learnhub_api::db::entity::voucher::DiscountType;
use learnhub_api::db::repo::payments_repository::{self, NewPayment};
use learnhub_api::db::repo::{subscriptions_repository, vouchers_repository};
use learnhub_api::service::payos::{sign, webhook_signing_data};
use nanoid::nanoid;
use serde_json::{json, Map, Value};
use sqlx::PgPool;

fn signed_webhook(data: Value, success: bool) -> String {
    let data: Map<String, Value> = data.as_object().cloned().unwrap();
    let signature = sign(helpers::TEST_CHECKSUM_KEY, &webhook_signing_data(&data));
    json!({
        "code": "00",
        "desc": "success",
        "success": success,
        "data": data,
        "signature": signature
    })
    .to_string()
}

#[tokio::test]
async fn test_webhook_with_bad_signature_is_rejected() {
    let app = helpers::setup_test_app();
    let body = json!({
        "code": "00",
        "desc": "success",
        "success": true,
        "data": { "orderCode": 123, "amount": 99000, "code": "00" },
        "signature": "deadbeef"
    });

    let response = helpers::make_request(
        app,
        Method::POST,
        "/payments/payos/webhook",
        None,
        Some(body.to_string()),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_signed_webhook_without_order_code_is_rejected() {
    let app = helpers::setup_test_app();
    let body = signed_webhook(json!({ "amount": 99000, "code": "00" }), true);

    let response =
        helpers::make_request(app, Method::POST, "/payments/payos/webhook", None, Some(body))
            .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_return_without_order_code_is_rejected() {
    let app = helpers::setup_test_app();

    let response = helpers::make_request(
        app,
        Method::GET,
        "/payments/payos/return?status=PAID",
        None,
        None,
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_return_with_non_numeric_order_code_is_rejected() {
    let app = helpers::setup_test_app();

    let response = helpers::make_request(
        app,
        Method::GET,
        "/payments/payos/return?orderCode=abc&status=PAID",
        None,
        None,
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_create_payment_requires_token() {
    let app = helpers::setup_test_app();
    let body = json!({ "plan_id": 1 });

    let response = helpers::make_request(
        app,
        Method::POST,
        "/payments/payos/create",
        None,
        Some(body.to_string()),
    )
    .await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_create_payment_validation_error() {
    let app = helpers::setup_test_app();
    let token = helpers::token_for(7, Role::Customer);
    let body = json!({ "plan_id": 0 });

    let response = helpers::make_request(
        app,
        Method::POST,
        "/payments/payos/create",
        Some(&token),
        Some(body.to_string()),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = helpers::body_json(response).await;
    assert_eq!(body["subErrors"][0]["field"], "plan_id");
}

#[tokio::test]
#[ignore = "requires TEST_DATABASE_URL"]
async fn test_webhook_for_unknown_order_is_acknowledged() {
    let state = helpers::setup_db_app_state().await;
    let app = learnhub_api::api::router::create_router(state);
    let body = signed_webhook(json!({ "orderCode": 42, "amount": 1000, "code": "00" }), true);

    let response =
        helpers::make_request(app, Method::POST, "/payments/payos/webhook", None, Some(body))
            .await;

    assert_eq!(response.status(), StatusCode::OK);
    let body = helpers::body_json(response).await;
    assert_eq!(body["success"], true);
}

async fn create_test_plan(pool: &PgPool) -> SubscriptionPlan {
    subscriptions_repository::create_plan(
        pool,
        CreatePlanRequest {
            name: format!("Plan {}", nanoid!(8)),
            description: None,
            price: 99000,
            duration_days: 30,
            is_active: Some(true),
        },
    )
    .await
    .unwrap()
}

async fn insert_pending_payment(
    pool: &PgPool,
    user_id: i64,
    plan_id: i64,
    voucher_id: Option<i64>,
    suffix: i64,
) -> i64 {
    let order_code = Utc::now().timestamp_millis() * 1000 + suffix;
    payments_repository::create_payment(
        pool,
        NewPayment {
            user_id,
            plan_id,
            voucher_id,
            order_code,
            original_amount: 99000,
            discount_amount: 0,
            final_amount: 99000,
            checkout_url: "https://pay.example/checkout",
            description: "Order test",
        },
    )
    .await
    .unwrap();
    order_code
}

#[tokio::test]
#[ignore = "requires TEST_DATABASE_URL"]
async fn test_paid_return_activates_subscription_once() {
    let state = helpers::setup_db_app_state().await;
    let pool = state.pg_pool.clone();
    let user = helpers::create_test_user(&pool, Role::Customer).await;
    let plan = create_test_plan(&pool).await;
    let order_code = insert_pending_payment(&pool, user.id, plan.id, None, 7).await;

    let app = learnhub_api::api::router::create_router(state);
    let uri = format!("/payments/payos/return?orderCode={}&status=PAID", order_code);
    for _ in 0..2 {
        let response = helpers::make_request(app.clone(), Method::GET, &uri, None, None).await;
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        let location = response.headers()[header::LOCATION].to_str().unwrap().to_string();
        assert!(location.ends_with("status=success"), "{}", location);
    }

    let subscriptions = subscriptions_repository::get_user_subscriptions(&pool, user.id)
        .await
        .unwrap();
    assert_eq!(subscriptions.len(), 1);
    assert_eq!(
        (subscriptions[0].end_date - subscriptions[0].start_date).num_days(),
        30
    );
}

#[tokio::test]
#[ignore = "requires TEST_DATABASE_URL"]
async fn test_voucher_use_is_counted_only_for_paid_orders() {
    let state = helpers::setup_db_app_state().await;
    let pool = state.pg_pool.clone();
    let user = helpers::create_test_user(&pool, Role::Customer).await;
    let plan = create_test_plan(&pool).await;
    let now = Utc::now();
    let voucher = vouchers_repository::create_voucher(
        &pool,
        &nanoid!(8, &['A', 'B', 'C', 'D', 'E', 'F', '1', '2', '3', '4']),
        CreateVoucherRequest {
            description: None,
            discount_type: DiscountType::Percentage,
            discount_value: 10,
            max_usage: 5,
            valid_from: now - Duration::days(1),
            valid_until: now + Duration::days(1),
            is_active: Some(true),
        },
    )
    .await
    .unwrap();
    let cancelled_order = insert_pending_payment(&pool, user.id, plan.id, Some(voucher.id), 11).await;
    let paid_order = insert_pending_payment(&pool, user.id, plan.id, Some(voucher.id), 12).await;

    let app = learnhub_api::api::router::create_router(state);
    let uri = format!(
        "/payments/payos/return?orderCode={}&status=CANCELLED",
        cancelled_order
    );
    let response = helpers::make_request(app.clone(), Method::GET, &uri, None, None).await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    let used = vouchers_repository::get_voucher(&pool, voucher.id).await.unwrap().unwrap();
    assert_eq!(used.used_count, 0);

    let body = signed_webhook(json!({ "orderCode": paid_order, "amount": 89100, "code": "00" }), true);
    let response =
        helpers::make_request(app.clone(), Method::POST, "/payments/payos/webhook", None, Some(body))
            .await;
    assert_eq!(response.status(), StatusCode::OK);
    let used = vouchers_repository::get_voucher(&pool, voucher.id).await.unwrap().unwrap();
    assert_eq!(used.used_count, 1);

    // Replayed callbacks leave the count alone.
    let body = signed_webhook(json!({ "orderCode": paid_order, "amount": 89100, "code": "00" }), true);
    let response =
        helpers::make_request(app, Method::POST, "/payments/payos/webhook", None, Some(body)).await;
    assert_eq!(response.status(), StatusCode::OK);
    let used = vouchers_repository::get_voucher(&pool, voucher.id).await.unwrap().unwrap();
    assert_eq!(used.used_count, 1);
}
