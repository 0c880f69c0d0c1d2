//! Lesson progress, daily streaks and the points leaderboard.

use crate::api::model::progress::{ProgressRequest, ProgressResponse};
use crate::config::app_config::AppState;
use crate::db::entity::progress::{Leaderboard, LessonProgress, ProgressStatus};
use crate::db::repo::{leaderboard_repository, progress_repository};
use crate::db::unit_of_work::in_transaction;
use crate::error::error_model::AppError;
use crate::middleware::auth::AuthContext;
use crate::middleware::role::STAFF;
use crate::service::lesson_content_service::ensure_lesson;
use crate::service::validate_request;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use chrono::{Duration, Utc};
use std::sync::Arc;
use tracing::info;

/// Points for every newly completed lesson.
pub const BASE_POINTS: i32 = 10;
pub const LEADERBOARD_SIZE: i64 = 10;

/// Milestone bonus for reaching `streak_days`.
pub fn streak_bonus(streak_days: i32) -> i32 {
    match streak_days {
        7 => 10,
        14 => 15,
        _ => 0,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StreakUpdate {
    pub streak_days: i32,
    pub bonus: i32,
    pub points: i32,
}

impl StreakUpdate {
    /// Streak and points for a completion.
    ///
    /// * `previous_streak` - streak stored on the leaderboard, `None` for a first completion.
    /// * `had_yesterday` - whether the user was active the previous calendar day.
    pub fn compute(previous_streak: Option<i32>, had_yesterday: bool) -> Self {
        let streak_days = if had_yesterday {
            previous_streak.unwrap_or(0) + 1
        } else {
            1
        };
        let bonus = streak_bonus(streak_days);
        Self {
            streak_days,
            bonus,
            points: BASE_POINTS + bonus,
        }
    }
}

struct ProgressOutcome {
    progress: LessonProgress,
    award: Option<StreakUpdate>,
    leaderboard: Option<Leaderboard>,
}

/// Records lesson progress for the caller.
///
/// Progress, activity log and leaderboard are written in one transaction. Points
/// are only granted when the lesson moves into `completed`; re-submitting an
/// already completed lesson changes nothing but `last_watched`.
#[tracing::instrument(
    skip(state, auth, request),
    fields(
        service.name = "progress_service",
        service.operation = "submit_progress",
        progress.user_id = auth.user_id,
        progress.lesson_id = request.lesson_id
    )
)]
pub async fn submit_progress(
    state: Arc<AppState>,
    auth: AuthContext,
    request: ProgressRequest,
) -> Result<Response, AppError> {
    validate_request(&request, "ProgressRequest")?;
    let status = ProgressStatus::parse(&request.status).ok_or_else(|| {
        AppError::bad_request("status must be one of not_started, in_progress, completed")
    })?;
    ensure_lesson(&state.pg_pool, request.lesson_id).await?;

    let user_id = auth.user_id;
    let lesson_id = request.lesson_id;
    let today = Utc::now().date_naive();
    let yesterday = today - Duration::days(1);

    let outcome = in_transaction(&state.pg_pool, move |conn| {
        Box::pin(async move {
            let previous = progress_repository::lock_status(&mut *conn, user_id, lesson_id).await?;
            let progress =
                progress_repository::upsert_progress(&mut *conn, user_id, lesson_id, status).await?;

            if status != ProgressStatus::Completed || previous == Some(ProgressStatus::Completed) {
                return Ok(ProgressOutcome {
                    progress,
                    award: None,
                    leaderboard: None,
                });
            }

            progress_repository::record_activity(&mut *conn, user_id, today).await?;
            let had_yesterday =
                progress_repository::activity_exists(&mut *conn, user_id, yesterday).await?;
            let current = leaderboard_repository::lock_entry(&mut *conn, user_id).await?;

            let award =
                StreakUpdate::compute(current.map(|entry| entry.streak_days), had_yesterday);
            let leaderboard = leaderboard_repository::add_points(
                &mut *conn,
                user_id,
                award.points,
                award.streak_days,
            )
            .await?;

            Ok(ProgressOutcome {
                progress,
                award: Some(award),
                leaderboard: Some(leaderboard),
            })
        })
    })
    .await?;

    let (points_awarded, bonus) = outcome
        .award
        .map(|award| (award.points, award.bonus))
        .unwrap_or((0, 0));
    if let Some(award) = outcome.award {
        info!(
            "User {} completed lesson {}: +{} points, streak {}",
            user_id, lesson_id, award.points, award.streak_days
        );
    }

    Ok((
        StatusCode::OK,
        Json(ProgressResponse {
            message: "Progress updated".to_string(),
            progress: outcome.progress,
            points_awarded,
            bonus,
            leaderboard: outcome.leaderboard,
        }),
    )
        .into_response())
}

/// The caller's progress rows, optionally limited to one course.
pub async fn get_my_progress(
    state: Arc<AppState>,
    auth: AuthContext,
    course_id: Option<i64>,
) -> Result<Response, AppError> {
    let progress =
        progress_repository::get_user_progress(&state.pg_pool, auth.user_id, course_id).await?;
    Ok((StatusCode::OK, Json(progress)).into_response())
}

pub async fn get_leaderboard(state: Arc<AppState>) -> Result<Response, AppError> {
    let entries = leaderboard_repository::get_top(&state.pg_pool, LEADERBOARD_SIZE).await?;
    Ok((StatusCode::OK, Json(entries)).into_response())
}

/// Customers may only read their own entry.
pub async fn get_user_leaderboard(
    state: Arc<AppState>,
    auth: AuthContext,
    user_id: i64,
) -> Result<Response, AppError> {
    auth.require_self_or(user_id, STAFF)?;
    let entry = leaderboard_repository::get_entry(&state.pg_pool, user_id)
        .await?
        .ok_or_else(|| {
            AppError::not_found(format!("No leaderboard entry for user ID: {}", user_id))
        })?;
    Ok((StatusCode::OK, Json(entry)).into_response())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bonus_table_is_sparse() {
        assert_eq!(streak_bonus(7), 10);
        assert_eq!(streak_bonus(14), 15);
        for streak in [1, 2, 6, 8, 13, 15, 21, 28] {
            assert_eq!(streak_bonus(streak), 0, "streak {}", streak);
        }
    }

    #[test]
    fn first_completion_starts_a_streak() {
        let update = StreakUpdate::compute(None, false);
        assert_eq!(
            update,
            StreakUpdate {
                streak_days: 1,
                bonus: 0,
                points: 10
            }
        );
    }

    #[test]
    fn gap_resets_the_streak() {
        let update = StreakUpdate::compute(Some(5), false);
        assert_eq!(update.streak_days, 1);
        assert_eq!(update.points, 10);
    }

    #[test]
    fn seventh_consecutive_day_earns_bonus() {
        let update = StreakUpdate::compute(Some(6), true);
        assert_eq!(update.streak_days, 7);
        assert_eq!(update.bonus, 10);
        assert_eq!(update.points, 20);

        let update = StreakUpdate::compute(Some(13), true);
        assert_eq!(update.streak_days, 14);
        assert_eq!(update.points, 25);
    }

    #[test]
    fn active_yesterday_always_extends_streak() {
        let update = StreakUpdate::compute(Some(6), true);
        assert_eq!(update.streak_days, 7);
        assert_eq!(update.bonus, 10);

        let update = StreakUpdate::compute(None, true);
        assert_eq!(update.streak_days, 1);
        assert_eq!(update.points, BASE_POINTS);
    }

    #[test]
    fn seven_day_run_totals_eighty_points() {
        let mut streak = None;
        let mut total = 0;
        for day in 0..7 {
            let update = StreakUpdate::compute(streak, day > 0);
            streak = Some(update.streak_days);
            total += update.points;
        }
        assert_eq!(streak, Some(7));
        assert_eq!(total, 80);
    }
}
