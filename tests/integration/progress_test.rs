use crate::helpers;
use axum::http::{Method, StatusCode};
use learnhub_api::db::entity::user::Role;
use serde_json::json;

#[tokio::test]
async fn test_progress_requires_token() {
    let app = helpers::setup_test_app();
    let body = json!({ "lesson_id": 1, "status": "completed" });

    let response = helpers::make_request(
        app,
        Method::POST,
        "/lessons/progress",
        None,
        Some(body.to_string()),
    )
    .await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_progress_rejects_unknown_status() {
    let app = helpers::setup_test_app();
    let token = helpers::token_for(7, Role::Customer);
    let body = json!({ "lesson_id": 1, "status": "watching" });

    let response = helpers::make_request(
        app,
        Method::POST,
        "/lesson-progress",
        Some(&token),
        Some(body.to_string()),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_progress_rejects_non_positive_lesson_id() {
    let app = helpers::setup_test_app();
    let token = helpers::token_for(7, Role::Customer);
    let body = json!({ "lesson_id": 0, "status": "completed" });

    let response = helpers::make_request(
        app,
        Method::POST,
        "/lessons/progress",
        Some(&token),
        Some(body.to_string()),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = helpers::body_json(response).await;
    assert_eq!(body["subErrors"][0]["field"], "lesson_id");
}

#[tokio::test]
#[ignore = "requires TEST_DATABASE_URL"]
async fn test_completing_a_lesson_awards_points_once() {
    let state = helpers::setup_db_app_state().await;
    let pool = state.pg_pool.clone();
    let user = helpers::create_test_user(&pool, Role::Customer).await;
    let (_, lessons) = helpers::create_test_course(&pool, user.id, 1).await;

    let app = learnhub_api::api::router::create_router(state);
    let token = helpers::token_for(user.id, Role::Customer);
    let body = json!({ "lesson_id": lessons[0].id, "status": "completed" }).to_string();

    let response = helpers::make_request(
        app.clone(),
        Method::POST,
        "/lessons/progress",
        Some(&token),
        Some(body.clone()),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let first = helpers::body_json(response).await;
    assert_eq!(first["points_awarded"], 10);
    assert_eq!(first["leaderboard"]["total_points"], 10);
    assert_eq!(first["leaderboard"]["streak_days"], 1);

    let response = helpers::make_request(
        app.clone(),
        Method::POST,
        "/lessons/progress",
        Some(&token),
        Some(body),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let second = helpers::body_json(response).await;
    assert_eq!(second["points_awarded"], 0);

    let uri = format!("/leaderboard/{}", user.id);
    let response = helpers::make_request(app, Method::GET, &uri, Some(&token), None).await;
    assert_eq!(response.status(), StatusCode::OK);
    let entry = helpers::body_json(response).await;
    assert_eq!(entry["total_points"], 10);
}

#[tokio::test]
#[ignore = "requires TEST_DATABASE_URL"]
async fn test_concurrent_first_completions_award_points_once() {
    let state = helpers::setup_db_app_state().await;
    let pool = state.pg_pool.clone();
    let user = helpers::create_test_user(&pool, Role::Customer).await;
    let (_, lessons) = helpers::create_test_course(&pool, user.id, 1).await;

    let app = learnhub_api::api::router::create_router(state);
    let token = helpers::token_for(user.id, Role::Customer);
    let body = json!({ "lesson_id": lessons[0].id, "status": "completed" }).to_string();

    let (first, second) = tokio::join!(
        helpers::make_request(
            app.clone(),
            Method::POST,
            "/lessons/progress",
            Some(&token),
            Some(body.clone()),
        ),
        helpers::make_request(
            app.clone(),
            Method::POST,
            "/lessons/progress",
            Some(&token),
            Some(body.clone()),
        ),
    );
    assert_eq!(first.status(), StatusCode::OK);
    assert_eq!(second.status(), StatusCode::OK);

    let total_points = sqlx::query_scalar::<_, i32>(
        "SELECT total_points FROM leaderboard WHERE user_id = $1",
    )
    .bind(user.id)
    .fetch_one(&pool)
    .await
    .unwrap();
    assert_eq!(total_points, 10);
}

#[tokio::test]
#[ignore = "requires TEST_DATABASE_URL"]
async fn test_two_lessons_same_day_log_one_activity_row() {
    let state = helpers::setup_db_app_state().await;
    let pool = state.pg_pool.clone();
    let user = helpers::create_test_user(&pool, Role::Customer).await;
    let (_, lessons) = helpers::create_test_course(&pool, user.id, 2).await;

    let app = learnhub_api::api::router::create_router(state);
    let token = helpers::token_for(user.id, Role::Customer);
    for lesson in &lessons {
        let body = json!({ "lesson_id": lesson.id, "status": "completed" }).to_string();
        let response = helpers::make_request(
            app.clone(),
            Method::POST,
            "/lesson-progress",
            Some(&token),
            Some(body),
        )
        .await;
        assert_eq!(response.status(), StatusCode::OK);
    }

    let activity_rows = sqlx::query_scalar::<_, i64>(
        "SELECT COUNT(*) FROM user_activity_log WHERE user_id = $1",
    )
    .bind(user.id)
    .fetch_one(&pool)
    .await
    .unwrap();
    assert_eq!(activity_rows, 1);

    let progress_rows = sqlx::query_scalar::<_, i64>(
        "SELECT COUNT(*) FROM lesson_progress WHERE user_id = $1",
    )
    .bind(user.id)
    .fetch_one(&pool)
    .await
    .unwrap();
    assert_eq!(progress_rows, 2);
}

#[tokio::test]
#[ignore = "requires TEST_DATABASE_URL"]
async fn test_admin_reads_any_leaderboard_entry() {
    let state = helpers::setup_db_app_state().await;
    let pool = state.pg_pool.clone();
    let learner = helpers::create_test_user(&pool, Role::Customer).await;
    let admin = helpers::create_test_user(&pool, Role::Admin).await;
    let (_, lessons) = helpers::create_test_course(&pool, admin.id, 1).await;

    let app = learnhub_api::api::router::create_router(state);
    let learner_token = helpers::token_for(learner.id, Role::Customer);
    let body = json!({ "lesson_id": lessons[0].id, "status": "completed" }).to_string();
    let response = helpers::make_request(
        app.clone(),
        Method::POST,
        "/lessons/progress",
        Some(&learner_token),
        Some(body),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let uri = format!("/leaderboard/{}", learner.id);
    let admin_token = helpers::token_for(admin.id, Role::Admin);
    let response =
        helpers::make_request(app.clone(), Method::GET, &uri, Some(&admin_token), None).await;
    assert_eq!(response.status(), StatusCode::OK);
    let entry = helpers::body_json(response).await;
    assert_eq!(entry["user_id"], learner.id);

    let other_token = helpers::token_for(admin.id, Role::Customer);
    let response = helpers::make_request(app, Method::GET, &uri, Some(&other_token), None).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
#[ignore = "requires TEST_DATABASE_URL"]
async fn test_progress_for_missing_lesson_is_not_found() {
    let state = helpers::setup_db_app_state().await;
    let app = learnhub_api::api::router::create_router(state);
    let token = helpers::token_for(7, Role::Customer);
    let body = json!({ "lesson_id": i64::MAX, "status": "in_progress" });

    let response = helpers::make_request(
        app,
        Method::POST,
        "/lessons/progress",
        Some(&token),
        Some(body.to_string()),
    )
    .await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
