use crate::error::error_model::AppError;
use futures::future::BoxFuture;
use sqlx::{PgConnection, PgPool};
use tracing::error;

/// Runs `work` inside a single database transaction.
///
/// Commits when `work` returns `Ok`, rolls back when it returns `Err`. A
/// transaction dropped mid-flight (panic, cancelled request) is rolled back by
/// sqlx when the connection returns to the pool.
///
/// ```rust,ignore
/// let entry = in_transaction(&state.pg_pool, move |conn| {
///     Box::pin(async move {
///         progress_repository::record_activity(&mut *conn, user_id, today).await?;
///         let entry = leaderboard_repository::add_points(&mut *conn, user_id, 10, 1).await?;
///         Ok(entry)
///     })
/// })
/// .await?;
/// ```
pub async fn in_transaction<T, F>(pool: &PgPool, work: F) -> Result<T, AppError>
where
    T: Send,
    F: for<'c> FnOnce(&'c mut PgConnection) -> BoxFuture<'c, Result<T, AppError>>,
{
    let mut tx = pool.begin().await.map_err(|e| {
        error!("Failed to begin transaction: {:?}", e);
        AppError::internal()
    })?;

    match work(&mut *tx).await {
        Ok(value) => {
            tx.commit().await.map_err(|e| {
                error!("Failed to commit transaction: {:?}", e);
                AppError::internal()
            })?;
            Ok(value)
        }
        Err(e) => {
            if let Err(rollback_error) = tx.rollback().await {
                error!("Failed to roll back transaction: {:?}", rollback_error);
            }
            Err(e)
        }
    }
}
