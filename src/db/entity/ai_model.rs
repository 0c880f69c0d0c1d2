use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::Value;
use sqlx::FromRow;
use utoipa::ToSchema;

#[derive(Debug, FromRow, Serialize, ToSchema)]
pub struct AiModel {
    pub id: i64,
    pub name: String,
    pub version: String,
    pub description: Option<String>,
    pub model_url: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Reference gesture for a lesson, recognised by an AI model.
#[derive(Debug, FromRow, Serialize, ToSchema)]
pub struct HandMotion {
    pub id: i64,
    pub lesson_id: i64,
    pub ai_model_id: i64,
    pub name: String,
    pub description: Option<String>,
    #[schema(value_type = Option<Object>)]
    pub motion_data: Option<Value>,
    pub created_at: DateTime<Utc>,
}
