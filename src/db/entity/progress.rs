use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, Type};
use utoipa::ToSchema;

#[derive(Debug, FromRow, Serialize, ToSchema)]
pub struct LessonProgress {
    pub id: i64,
    pub user_id: i64,
    pub lesson_id: i64,
    pub status: ProgressStatus,
    pub last_watched: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Type, Serialize, Deserialize, ToSchema)]
#[sqlx(type_name = "progress_status", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum ProgressStatus {
    NotStarted,
    InProgress,
    Completed,
}

impl ProgressStatus {
    /// Parses user input after trimming and lowercasing.
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_lowercase().as_str() {
            "not_started" => Some(ProgressStatus::NotStarted),
            "in_progress" => Some(ProgressStatus::InProgress),
            "completed" => Some(ProgressStatus::Completed),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, FromRow, Serialize, ToSchema)]
pub struct Leaderboard {
    pub id: i64,
    pub user_id: i64,
    pub total_points: i32,
    pub streak_days: i32,
    pub last_updated: DateTime<Utc>,
}

/// Leaderboard row joined with the user's display fields.
#[derive(Debug, FromRow, Serialize, ToSchema)]
pub struct LeaderboardEntry {
    pub user_id: i64,
    pub full_name: String,
    pub picture_url: Option<String>,
    pub total_points: i32,
    pub streak_days: i32,
    pub last_updated: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_normalized_status() {
        assert_eq!(
            ProgressStatus::parse("  Completed "),
            Some(ProgressStatus::Completed)
        );
        assert_eq!(
            ProgressStatus::parse("IN_PROGRESS"),
            Some(ProgressStatus::InProgress)
        );
        assert_eq!(
            ProgressStatus::parse("not_started"),
            Some(ProgressStatus::NotStarted)
        );
        assert_eq!(ProgressStatus::parse("done"), None);
    }
}
