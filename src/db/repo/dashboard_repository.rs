use crate::api::model::dashboard::MonthAggregate;
use sqlx::{Error, PgPool};

#[tracing::instrument(
    skip(pool),
    fields(db.system = "postgresql", db.operation = "SELECT", db.table = "users")
)]
pub async fn users_by_month(pool: &PgPool, year: i32) -> Result<Vec<MonthAggregate>, Error> {
    sqlx::query_as::<_, MonthAggregate>(
        r#"
        SELECT EXTRACT(MONTH FROM created_at)::INT AS month, COUNT(*) AS total, 0::BIGINT AS amount
        FROM users
        WHERE EXTRACT(YEAR FROM created_at)::INT = $1
        GROUP BY 1
        ORDER BY 1
        "#,
    )
    .bind(year)
    .fetch_all(pool)
    .await
}

/// Successful payments bucketed by the month they were paid.
#[tracing::instrument(
    skip(pool),
    fields(db.system = "postgresql", db.operation = "SELECT", db.table = "payments")
)]
pub async fn revenue_by_month(pool: &PgPool, year: i32) -> Result<Vec<MonthAggregate>, Error> {
    sqlx::query_as::<_, MonthAggregate>(
        r#"
        SELECT EXTRACT(MONTH FROM paid_at)::INT AS month,
               COUNT(*) AS total,
               COALESCE(SUM(final_amount), 0)::BIGINT AS amount
        FROM payments
        WHERE status = 'success' AND paid_at IS NOT NULL
          AND EXTRACT(YEAR FROM paid_at)::INT = $1
        GROUP BY 1
        ORDER BY 1
        "#,
    )
    .bind(year)
    .fetch_all(pool)
    .await
}

#[tracing::instrument(
    skip(pool),
    fields(db.system = "postgresql", db.operation = "SELECT", db.table = "user_subscriptions")
)]
pub async fn subscriptions_by_month(pool: &PgPool, year: i32) -> Result<Vec<MonthAggregate>, Error> {
    sqlx::query_as::<_, MonthAggregate>(
        r#"
        SELECT EXTRACT(MONTH FROM created_at)::INT AS month, COUNT(*) AS total, 0::BIGINT AS amount
        FROM user_subscriptions
        WHERE EXTRACT(YEAR FROM created_at)::INT = $1
        GROUP BY 1
        ORDER BY 1
        "#,
    )
    .bind(year)
    .fetch_all(pool)
    .await
}

/// Completed lessons, bucketed by the month of the last status change.
#[tracing::instrument(
    skip(pool),
    fields(db.system = "postgresql", db.operation = "SELECT", db.table = "lesson_progress")
)]
pub async fn lesson_completions_by_month(
    pool: &PgPool,
    year: i32,
) -> Result<Vec<MonthAggregate>, Error> {
    sqlx::query_as::<_, MonthAggregate>(
        r#"
        SELECT EXTRACT(MONTH FROM last_watched)::INT AS month, COUNT(*) AS total, 0::BIGINT AS amount
        FROM lesson_progress
        WHERE status = 'completed' AND EXTRACT(YEAR FROM last_watched)::INT = $1
        GROUP BY 1
        ORDER BY 1
        "#,
    )
    .bind(year)
    .fetch_all(pool)
    .await
}
