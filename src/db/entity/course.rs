use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::FromRow;
use utoipa::ToSchema;

#[derive(Debug, FromRow, Serialize, ToSchema)]
pub struct Course {
    pub id: i64,
    pub title: String,
    pub description: Option<String>,
    pub thumbnail_url: Option<String>,
    pub level: Option<String>,
    pub created_by: Option<i64>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, FromRow, Serialize, ToSchema)]
pub struct Lesson {
    pub id: i64,
    pub course_id: i64,
    pub title: String,
    pub description: Option<String>,
    pub video_url: Option<String>,
    pub duration_seconds: i32,
    pub lesson_order: i32,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, FromRow, Serialize, ToSchema)]
pub struct Resource {
    pub id: i64,
    pub lesson_id: i64,
    pub title: String,
    pub resource_type: String,
    pub url: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, FromRow, Serialize, ToSchema)]
pub struct Comment {
    pub id: i64,
    pub lesson_id: i64,
    pub user_id: i64,
    pub content: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Comment row joined with the author's display fields.
#[derive(Debug, FromRow, Serialize, ToSchema)]
pub struct CommentWithAuthor {
    pub id: i64,
    pub lesson_id: i64,
    pub user_id: i64,
    pub content: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub author_name: String,
    pub author_picture_url: Option<String>,
}
