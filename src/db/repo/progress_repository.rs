use crate::db::entity::progress::{LessonProgress, ProgressStatus};
use chrono::NaiveDate;
use sqlx::{Error, PgConnection, PgPool};

/// Current status of a (user, lesson) pair, row-locked for the rest of the transaction.
///
/// A `not_started` row is inserted first when none exists, so concurrent first
/// submissions serialize on the same row instead of both reading "no progress".
/// Returns `None` only when this call created the row.
#[tracing::instrument(
    skip(conn),
    fields(db.system = "postgresql", db.operation = "SELECT", db.table = "lesson_progress")
)]
pub async fn lock_status(
    conn: &mut PgConnection,
    user_id: i64,
    lesson_id: i64,
) -> Result<Option<ProgressStatus>, Error> {
    let created = sqlx::query(
        r#"
        INSERT INTO lesson_progress (user_id, lesson_id, status)
        VALUES ($1, $2, 'not_started')
        ON CONFLICT (user_id, lesson_id) DO NOTHING
        "#,
    )
    .bind(user_id)
    .bind(lesson_id)
    .execute(&mut *conn)
    .await?
    .rows_affected()
        == 1;

    let status = sqlx::query_scalar::<_, ProgressStatus>(
        "SELECT status FROM lesson_progress WHERE user_id = $1 AND lesson_id = $2 FOR UPDATE",
    )
    .bind(user_id)
    .bind(lesson_id)
    .fetch_one(&mut *conn)
    .await?;
    Ok((!created).then_some(status))
}

/// Inserts the progress row or overwrites its status and `last_watched`.
#[tracing::instrument(
    skip(conn),
    fields(db.system = "postgresql", db.operation = "UPSERT", db.table = "lesson_progress")
)]
pub async fn upsert_progress(
    conn: &mut PgConnection,
    user_id: i64,
    lesson_id: i64,
    status: ProgressStatus,
) -> Result<LessonProgress, Error> {
    sqlx::query_as::<_, LessonProgress>(
        r#"
        INSERT INTO lesson_progress (user_id, lesson_id, status, last_watched)
        VALUES ($1, $2, $3, now())
        ON CONFLICT (user_id, lesson_id)
        DO UPDATE SET status = EXCLUDED.status, last_watched = now()
        RETURNING *
        "#,
    )
    .bind(user_id)
    .bind(lesson_id)
    .bind(status)
    .fetch_one(conn)
    .await
}

/// Records activity for `day`. At most one row exists per user and day.
#[tracing::instrument(
    skip(conn),
    fields(db.system = "postgresql", db.operation = "INSERT", db.table = "user_activity_log")
)]
pub async fn record_activity(
    conn: &mut PgConnection,
    user_id: i64,
    day: NaiveDate,
) -> Result<(), Error> {
    sqlx::query(
        r#"
        INSERT INTO user_activity_log (user_id, activity_date)
        VALUES ($1, $2)
        ON CONFLICT (user_id, activity_date) DO NOTHING
        "#,
    )
    .bind(user_id)
    .bind(day)
    .execute(conn)
    .await?;
    Ok(())
}

pub async fn activity_exists(
    conn: &mut PgConnection,
    user_id: i64,
    day: NaiveDate,
) -> Result<bool, Error> {
    sqlx::query_scalar::<_, bool>(
        "SELECT EXISTS(SELECT 1 FROM user_activity_log WHERE user_id = $1 AND activity_date = $2)",
    )
    .bind(user_id)
    .bind(day)
    .fetch_one(conn)
    .await
}

#[tracing::instrument(
    skip(pool),
    fields(db.system = "postgresql", db.operation = "SELECT", db.table = "lesson_progress")
)]
pub async fn get_user_progress(
    pool: &PgPool,
    user_id: i64,
    course_id: Option<i64>,
) -> Result<Vec<LessonProgress>, Error> {
    sqlx::query_as::<_, LessonProgress>(
        r#"
        SELECT lp.*
        FROM lesson_progress lp
        JOIN lessons l ON l.id = lp.lesson_id
        WHERE lp.user_id = $1 AND ($2::BIGINT IS NULL OR l.course_id = $2)
        ORDER BY l.course_id, l.lesson_order, l.id
        "#,
    )
    .bind(user_id)
    .bind(course_id)
    .fetch_all(pool)
    .await
}
