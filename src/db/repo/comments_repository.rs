use crate::db::entity::course::{Comment, CommentWithAuthor};
use sqlx::{Error, PgPool};

/// Lists comments with author name and picture, oldest first.
#[tracing::instrument(
    skip(pool),
    fields(db.system = "postgresql", db.operation = "SELECT", db.table = "comments")
)]
pub async fn get_comments(
    pool: &PgPool,
    lesson_id: Option<i64>,
) -> Result<Vec<CommentWithAuthor>, Error> {
    sqlx::query_as::<_, CommentWithAuthor>(
        r#"
        SELECT c.id, c.lesson_id, c.user_id, c.content, c.created_at, c.updated_at,
               u.full_name AS author_name, u.picture_url AS author_picture_url
        FROM comments c
        JOIN users u ON u.id = c.user_id
        WHERE ($1::BIGINT IS NULL OR c.lesson_id = $1)
        ORDER BY c.created_at
        "#,
    )
    .bind(lesson_id)
    .fetch_all(pool)
    .await
}

pub async fn get_comment(pool: &PgPool, id: i64) -> Result<Option<Comment>, Error> {
    sqlx::query_as::<_, Comment>("SELECT * FROM comments WHERE id = $1")
        .bind(id)
        .fetch_optional(pool)
        .await
}

#[tracing::instrument(
    skip(pool, content),
    fields(db.system = "postgresql", db.operation = "INSERT", db.table = "comments")
)]
pub async fn create_comment(
    pool: &PgPool,
    lesson_id: i64,
    user_id: i64,
    content: &str,
) -> Result<Comment, Error> {
    sqlx::query_as::<_, Comment>(
        "INSERT INTO comments (lesson_id, user_id, content) VALUES ($1, $2, $3) RETURNING *",
    )
    .bind(lesson_id)
    .bind(user_id)
    .bind(content)
    .fetch_one(pool)
    .await
}

#[tracing::instrument(
    skip(pool, content),
    fields(db.system = "postgresql", db.operation = "UPDATE", db.table = "comments")
)]
pub async fn update_comment(pool: &PgPool, id: i64, content: &str) -> Result<Option<Comment>, Error> {
    sqlx::query_as::<_, Comment>(
        "UPDATE comments SET content = $1, updated_at = now() WHERE id = $2 RETURNING *",
    )
    .bind(content)
    .bind(id)
    .fetch_optional(pool)
    .await
}

pub async fn delete_comment(pool: &PgPool, id: i64) -> Result<bool, Error> {
    let result = sqlx::query("DELETE FROM comments WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected() > 0)
}
