use crate::db::entity::progress::{Leaderboard, LessonProgress};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct ProgressRequest {
    #[validate(range(min = 1, message = "lesson_id must be a positive id"))]
    #[schema(example = 12)]
    pub lesson_id: i64,
    #[validate(length(min = 1, message = "status is required"))]
    #[schema(example = "completed")]
    pub status: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ProgressResponse {
    pub message: String,
    pub progress: LessonProgress,
    /// Points granted by this submission.
    pub points_awarded: i32,
    /// Milestone bonus included in `points_awarded`.
    pub bonus: i32,
    pub leaderboard: Option<Leaderboard>,
}

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ProgressFilter {
    /// Only lessons of this course
    pub course_id: Option<i64>,
}
