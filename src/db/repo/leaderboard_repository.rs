use crate::db::entity::progress::{Leaderboard, LeaderboardEntry};
use sqlx::{Error, PgConnection, PgPool};

#[tracing::instrument(
    skip(conn),
    fields(db.system = "postgresql", db.operation = "SELECT", db.table = "leaderboard")
)]
pub async fn lock_entry(conn: &mut PgConnection, user_id: i64) -> Result<Option<Leaderboard>, Error> {
    sqlx::query_as::<_, Leaderboard>("SELECT * FROM leaderboard WHERE user_id = $1 FOR UPDATE")
        .bind(user_id)
        .fetch_optional(conn)
        .await
}

/// Adds `gained_points` to the user's total and stores the new streak.
///
/// Creates the row with `total_points = gained_points` when the user has none yet.
#[tracing::instrument(
    skip(conn),
    fields(db.system = "postgresql", db.operation = "UPSERT", db.table = "leaderboard")
)]
pub async fn add_points(
    conn: &mut PgConnection,
    user_id: i64,
    gained_points: i32,
    streak_days: i32,
) -> Result<Leaderboard, Error> {
    sqlx::query_as::<_, Leaderboard>(
        r#"
        INSERT INTO leaderboard (user_id, total_points, streak_days, last_updated)
        VALUES ($1, $2, $3, now())
        ON CONFLICT (user_id) DO UPDATE
        SET total_points = leaderboard.total_points + EXCLUDED.total_points,
            streak_days = EXCLUDED.streak_days,
            last_updated = now()
        RETURNING *
        "#,
    )
    .bind(user_id)
    .bind(gained_points)
    .bind(streak_days)
    .fetch_one(conn)
    .await
}

#[tracing::instrument(
    skip(pool),
    fields(db.system = "postgresql", db.operation = "SELECT", db.table = "leaderboard")
)]
pub async fn get_top(pool: &PgPool, limit: i64) -> Result<Vec<LeaderboardEntry>, Error> {
    sqlx::query_as::<_, LeaderboardEntry>(
        r#"
        SELECT lb.user_id, u.full_name, u.picture_url, lb.total_points, lb.streak_days, lb.last_updated
        FROM leaderboard lb
        JOIN users u ON u.id = lb.user_id
        ORDER BY lb.total_points DESC, lb.streak_days DESC, lb.last_updated DESC
        LIMIT $1
        "#,
    )
    .bind(limit)
    .fetch_all(pool)
    .await
}

#[tracing::instrument(
    skip(pool),
    fields(db.system = "postgresql", db.operation = "SELECT", db.table = "leaderboard")
)]
pub async fn get_entry(pool: &PgPool, user_id: i64) -> Result<Option<LeaderboardEntry>, Error> {
    sqlx::query_as::<_, LeaderboardEntry>(
        r#"
        SELECT lb.user_id, u.full_name, u.picture_url, lb.total_points, lb.streak_days, lb.last_updated
        FROM leaderboard lb
        JOIN users u ON u.id = lb.user_id
        WHERE lb.user_id = $1
        "#,
    )
    .bind(user_id)
    .fetch_optional(pool)
    .await
}
