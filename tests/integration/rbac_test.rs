use crate::helpers;
use axum::http::{Method, StatusCode};
use learnhub_api::db::entity::user::Role;
use serde_json::json;

#[tokio::test]
async fn test_customer_cannot_list_users() {
    let app = helpers::setup_test_app();
    let token = helpers::token_for(7, Role::Customer);

    let response = helpers::make_request(app, Method::GET, "/users", Some(&token), None).await;

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_customer_cannot_create_course() {
    let app = helpers::setup_test_app();
    let token = helpers::token_for(7, Role::Customer);
    let body = json!({ "title": "Sign language basics" });

    let response = helpers::make_request(
        app,
        Method::POST,
        "/courses/create",
        Some(&token),
        Some(body.to_string()),
    )
    .await;

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_employee_cannot_create_plan() {
    let app = helpers::setup_test_app();
    let token = helpers::token_for(3, Role::Employee);
    let body = json!({ "name": "Monthly", "price": 99000, "duration_days": 30 });

    let response = helpers::make_request(
        app,
        Method::POST,
        "/subscription-plans/create",
        Some(&token),
        Some(body.to_string()),
    )
    .await;

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_dashboard_is_staff_only() {
    let app = helpers::setup_test_app();
    let token = helpers::token_for(7, Role::Customer);

    for path in [
        "/dashboard/user-stats-by-month",
        "/dashboard/revenue-stats-by-month",
        "/dashboard/subscription-stats-by-month",
        "/dashboard/lesson-completion-stats-by-month",
    ] {
        let response =
            helpers::make_request(app.clone(), Method::GET, path, Some(&token), None).await;
        assert_eq!(response.status(), StatusCode::FORBIDDEN, "{}", path);
    }
}

#[tokio::test]
async fn test_dashboard_rejects_year_out_of_range() {
    let app = helpers::setup_test_app();
    let token = helpers::token_for(3, Role::Employee);

    let response = helpers::make_request(
        app,
        Method::GET,
        "/dashboard/revenue-stats-by-month?year=1999",
        Some(&token),
        None,
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_customer_cannot_read_other_leaderboard_entry() {
    let app = helpers::setup_test_app();
    let token = helpers::token_for(7, Role::Customer);

    let response =
        helpers::make_request(app, Method::GET, "/leaderboard/8", Some(&token), None).await;

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_customer_cannot_list_payments() {
    let app = helpers::setup_test_app();
    let token = helpers::token_for(7, Role::Customer);

    let response =
        helpers::make_request(app, Method::GET, "/payments?page=1&limit=10", Some(&token), None)
            .await;

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}
