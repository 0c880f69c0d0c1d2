use crate::helpers;
use axum::http::{Method, StatusCode};
use learnhub_api::db::entity::user::Role;
use learnhub_api::middleware::auth::issue_token;
use serde_json::json;

#[tokio::test]
async fn test_protected_route_requires_bearer_token() {
    let app = helpers::setup_test_app();

    let response = helpers::make_request(app, Method::GET, "/auth/me", None, None).await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let body = helpers::body_json(response).await;
    assert_eq!(body["status"], 401);
}

#[tokio::test]
async fn test_garbage_token_is_rejected() {
    let app = helpers::setup_test_app();

    let response =
        helpers::make_request(app, Method::GET, "/courses", Some("not.a.jwt"), None).await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_token_signed_with_other_secret_is_rejected() {
    let app = helpers::setup_test_app();
    let forged = issue_token(
        &"some-other-secret".to_string().into(),
        3600,
        1,
        "Mallory",
        Role::Admin,
    )
    .unwrap();

    let response =
        helpers::make_request(app, Method::GET, "/dashboard/user-stats-by-month", Some(&forged), None)
            .await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_register_validation_error() {
    let app = helpers::setup_test_app();
    let body = json!({
        "email": "not-an-email",
        "password": "secret123",
        "full_name": "Test User"
    });

    let response =
        helpers::make_request(app, Method::POST, "/auth/register", None, Some(body.to_string()))
            .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = helpers::body_json(response).await;
    let sub_errors = body["subErrors"].as_array().unwrap();
    assert!(sub_errors.iter().any(|e| e["field"] == "email"));
}

#[tokio::test]
async fn test_register_rejects_short_password() {
    let app = helpers::setup_test_app();
    let body = json!({
        "email": helpers::get_test_email(),
        "password": "abc",
        "full_name": "Test User"
    });

    let response =
        helpers::make_request(app, Method::POST, "/auth/register", None, Some(body.to_string()))
            .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
#[ignore = "requires TEST_DATABASE_URL"]
async fn test_register_then_login_and_me() {
    let state = helpers::setup_db_app_state().await;
    let app = learnhub_api::api::router::create_router(state);
    let email = helpers::get_test_email();
    let register = json!({
        "email": email,
        "password": "SecretPassword123!",
        "full_name": "New Learner"
    });

    let response = helpers::make_request(
        app.clone(),
        Method::POST,
        "/auth/register",
        None,
        Some(register.to_string()),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let login = json!({ "email": email, "password": "SecretPassword123!" });
    let response =
        helpers::make_request(app.clone(), Method::POST, "/auth/login", None, Some(login.to_string()))
            .await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = helpers::body_json(response).await;
    let token = body["access_token"].as_str().unwrap().to_string();

    let response = helpers::make_request(app.clone(), Method::GET, "/auth/me", Some(&token), None).await;
    assert_eq!(response.status(), StatusCode::OK);
    let me = helpers::body_json(response).await;
    assert_eq!(me["email"], email.as_str());
    assert_eq!(me["role"], "customer");
    assert!(me.get("password_hash").is_none());

    let wrong = json!({ "email": email, "password": "WrongPassword!" });
    let response =
        helpers::make_request(app, Method::POST, "/auth/login", None, Some(wrong.to_string())).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}
