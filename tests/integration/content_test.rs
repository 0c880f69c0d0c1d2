use crate::helpers;
use axum::http::{Method, StatusCode};
use learnhub_api::api::model::ai_model::{CreateAiModelRequest, CreateHandMotionRequest};
use learnhub_api::db::entity::user::Role;
use learnhub_api::db::repo::{ai_models_repository, courses_repository, hand_motions_repository};
use nanoid::nanoid;
use serde_json::json;

#[tokio::test]
#[ignore = "requires TEST_DATABASE_URL"]
async fn test_course_with_lessons_cannot_be_deleted() {
    let state = helpers::setup_db_app_state().await;
    let pool = state.pg_pool.clone();
    let admin = helpers::create_test_user(&pool, Role::Admin).await;
    let (course, _) = helpers::create_test_course(&pool, admin.id, 1).await;
    let (empty_course, _) = helpers::create_test_course(&pool, admin.id, 0).await;

    let app = learnhub_api::api::router::create_router(state);
    let token = helpers::token_for(admin.id, Role::Admin);

    let uri = format!("/courses/{}", course.id);
    let response = helpers::make_request(app.clone(), Method::DELETE, &uri, Some(&token), None).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert!(courses_repository::course_exists(&pool, course.id).await.unwrap());

    let uri = format!("/courses/{}", empty_course.id);
    let response = helpers::make_request(app, Method::DELETE, &uri, Some(&token), None).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);
    assert!(!courses_repository::course_exists(&pool, empty_course.id).await.unwrap());
}

#[tokio::test]
#[ignore = "requires TEST_DATABASE_URL"]
async fn test_ai_model_with_hand_motions_cannot_be_deleted() {
    let state = helpers::setup_db_app_state().await;
    let pool = state.pg_pool.clone();
    let admin = helpers::create_test_user(&pool, Role::Admin).await;
    let (_, lessons) = helpers::create_test_course(&pool, admin.id, 1).await;
    let model = ai_models_repository::create_ai_model(
        &pool,
        CreateAiModelRequest {
            name: format!("hand-pose-{}", nanoid!(8)),
            version: "1.0.0".to_string(),
            description: None,
            model_url: None,
        },
    )
    .await
    .unwrap();
    hand_motions_repository::create_hand_motion(
        &pool,
        CreateHandMotionRequest {
            lesson_id: lessons[0].id,
            ai_model_id: model.id,
            name: "Hello".to_string(),
            description: None,
            motion_data: Some(json!({ "frames": [] })),
        },
    )
    .await
    .unwrap();

    let app = learnhub_api::api::router::create_router(state);
    let token = helpers::token_for(admin.id, Role::Admin);
    let uri = format!("/ai-models/{}", model.id);

    let response = helpers::make_request(app.clone(), Method::DELETE, &uri, Some(&token), None).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = helpers::make_request(app, Method::GET, &uri, Some(&token), None).await;
    assert_eq!(response.status(), StatusCode::OK);
}
