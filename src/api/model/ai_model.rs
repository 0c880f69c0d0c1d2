use serde::Deserialize;
use serde_json::Value;
use utoipa::ToSchema;
use validator::Validate;

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateAiModelRequest {
    #[validate(length(min = 1, max = 100, message = "Name must be between 1 and 100 characters"))]
    #[schema(example = "hand-landmarker")]
    pub name: String,
    #[validate(length(min = 1, max = 50, message = "Version is required"))]
    #[schema(example = "1.0.0")]
    pub version: String,
    pub description: Option<String>,
    #[validate(url(message = "Model URL must be a valid URL"))]
    pub model_url: Option<String>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateAiModelRequest {
    #[validate(length(min = 1, max = 100, message = "Name must be between 1 and 100 characters"))]
    pub name: Option<String>,
    #[validate(length(min = 1, max = 50, message = "Version is required"))]
    pub version: Option<String>,
    pub description: Option<String>,
    #[validate(url(message = "Model URL must be a valid URL"))]
    pub model_url: Option<String>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateHandMotionRequest {
    pub lesson_id: i64,
    pub ai_model_id: i64,
    #[validate(length(min = 1, max = 100, message = "Name must be between 1 and 100 characters"))]
    pub name: String,
    pub description: Option<String>,
    #[schema(value_type = Option<Object>)]
    pub motion_data: Option<Value>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateHandMotionRequest {
    pub lesson_id: Option<i64>,
    pub ai_model_id: Option<i64>,
    #[validate(length(min = 1, max = 100, message = "Name must be between 1 and 100 characters"))]
    pub name: Option<String>,
    pub description: Option<String>,
    #[schema(value_type = Option<Object>)]
    pub motion_data: Option<Value>,
}
