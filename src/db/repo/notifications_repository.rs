use crate::api::model::notification::CreateNotificationRequest;
use crate::db::entity::notification::Notification;
use sqlx::{Error, PgPool};

#[tracing::instrument(
    skip(pool),
    fields(db.system = "postgresql", db.operation = "SELECT", db.table = "notifications")
)]
pub async fn get_notifications(pool: &PgPool) -> Result<Vec<Notification>, Error> {
    sqlx::query_as::<_, Notification>("SELECT * FROM notifications ORDER BY created_at DESC")
        .fetch_all(pool)
        .await
}

#[tracing::instrument(
    skip(pool),
    fields(db.system = "postgresql", db.operation = "SELECT", db.table = "notifications")
)]
pub async fn get_user_notifications(
    pool: &PgPool,
    user_id: i64,
) -> Result<Vec<Notification>, Error> {
    sqlx::query_as::<_, Notification>(
        "SELECT * FROM notifications WHERE user_id = $1 ORDER BY created_at DESC",
    )
    .bind(user_id)
    .fetch_all(pool)
    .await
}

#[tracing::instrument(
    skip(pool, request),
    fields(db.system = "postgresql", db.operation = "INSERT", db.table = "notifications")
)]
pub async fn create_notification(
    pool: &PgPool,
    request: CreateNotificationRequest,
) -> Result<Notification, Error> {
    sqlx::query_as::<_, Notification>(
        r#"
        INSERT INTO notifications (user_id, title, message)
        VALUES ($1, $2, $3)
        RETURNING *
        "#,
    )
    .bind(request.user_id)
    .bind(request.title)
    .bind(request.message)
    .fetch_one(pool)
    .await
}

/// Marks a notification owned by `user_id` as read.
///
/// `read_at` keeps its first value when the notification is marked twice.
/// Returns `Ok(None)` when no notification with that id belongs to the user.
#[tracing::instrument(
    skip(pool),
    fields(db.system = "postgresql", db.operation = "UPDATE", db.table = "notifications")
)]
pub async fn mark_read(
    pool: &PgPool,
    id: i64,
    user_id: i64,
) -> Result<Option<Notification>, Error> {
    sqlx::query_as::<_, Notification>(
        r#"
        UPDATE notifications
        SET is_read = TRUE, read_at = COALESCE(read_at, now())
        WHERE id = $1 AND user_id = $2
        RETURNING *
        "#,
    )
    .bind(id)
    .bind(user_id)
    .fetch_optional(pool)
    .await
}

#[tracing::instrument(
    skip(pool),
    fields(db.system = "postgresql", db.operation = "DELETE", db.table = "notifications")
)]
pub async fn delete_notification(pool: &PgPool, id: i64) -> Result<bool, Error> {
    let result = sqlx::query("DELETE FROM notifications WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected() > 0)
}
