use serde::Deserialize;
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateCourseRequest {
    #[validate(length(min = 1, max = 200, message = "Title must be between 1 and 200 characters"))]
    #[schema(example = "Vietnamese Sign Language 101")]
    pub title: String,
    pub description: Option<String>,
    #[validate(url(message = "Thumbnail must be a valid URL"))]
    pub thumbnail_url: Option<String>,
    #[schema(example = "beginner")]
    pub level: Option<String>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateCourseRequest {
    #[validate(length(min = 1, max = 200, message = "Title must be between 1 and 200 characters"))]
    pub title: Option<String>,
    pub description: Option<String>,
    #[validate(url(message = "Thumbnail must be a valid URL"))]
    pub thumbnail_url: Option<String>,
    pub level: Option<String>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateLessonRequest {
    #[schema(example = 1)]
    pub course_id: i64,
    #[validate(length(min = 1, max = 200, message = "Title must be between 1 and 200 characters"))]
    #[schema(example = "Greetings")]
    pub title: String,
    pub description: Option<String>,
    #[validate(url(message = "Video must be a valid URL"))]
    pub video_url: Option<String>,
    #[validate(range(min = 0, message = "Duration cannot be negative"))]
    pub duration_seconds: Option<i32>,
    #[validate(range(min = 0, message = "Order cannot be negative"))]
    pub lesson_order: Option<i32>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateLessonRequest {
    pub course_id: Option<i64>,
    #[validate(length(min = 1, max = 200, message = "Title must be between 1 and 200 characters"))]
    pub title: Option<String>,
    pub description: Option<String>,
    #[validate(url(message = "Video must be a valid URL"))]
    pub video_url: Option<String>,
    #[validate(range(min = 0, message = "Duration cannot be negative"))]
    pub duration_seconds: Option<i32>,
    #[validate(range(min = 0, message = "Order cannot be negative"))]
    pub lesson_order: Option<i32>,
}

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct LessonFilter {
    /// Only lessons of this course
    pub course_id: Option<i64>,
}

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct LessonScopedFilter {
    /// Only records attached to this lesson
    pub lesson_id: Option<i64>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateResourceRequest {
    pub lesson_id: i64,
    #[validate(length(min = 1, max = 200, message = "Title must be between 1 and 200 characters"))]
    pub title: String,
    #[validate(length(min = 1, max = 50, message = "Resource type is required"))]
    #[schema(example = "pdf")]
    pub resource_type: String,
    #[validate(url(message = "Resource must be a valid URL"))]
    pub url: String,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateResourceRequest {
    pub lesson_id: Option<i64>,
    #[validate(length(min = 1, max = 200, message = "Title must be between 1 and 200 characters"))]
    pub title: Option<String>,
    #[validate(length(min = 1, max = 50, message = "Resource type is required"))]
    pub resource_type: Option<String>,
    #[validate(url(message = "Resource must be a valid URL"))]
    pub url: Option<String>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateCommentRequest {
    pub lesson_id: i64,
    #[validate(length(min = 1, max = 2000, message = "Comment must be between 1 and 2000 characters"))]
    pub content: String,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateCommentRequest {
    #[validate(length(min = 1, max = 2000, message = "Comment must be between 1 and 2000 characters"))]
    pub content: String,
}
