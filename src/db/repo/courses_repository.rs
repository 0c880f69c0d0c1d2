use crate::api::model::course::{CreateCourseRequest, UpdateCourseRequest};
use crate::db::entity::course::Course;
use crate::db::update_builder::PartialUpdate;
use sqlx::{Error, PgPool};

#[tracing::instrument(
    skip(pool),
    fields(db.system = "postgresql", db.operation = "SELECT", db.table = "courses")
)]
pub async fn get_courses(pool: &PgPool) -> Result<Vec<Course>, Error> {
    sqlx::query_as::<_, Course>("SELECT * FROM courses ORDER BY created_at DESC")
        .fetch_all(pool)
        .await
}

#[tracing::instrument(
    skip(pool),
    fields(db.system = "postgresql", db.operation = "SELECT", db.table = "courses")
)]
pub async fn get_course(pool: &PgPool, id: i64) -> Result<Option<Course>, Error> {
    sqlx::query_as::<_, Course>("SELECT * FROM courses WHERE id = $1")
        .bind(id)
        .fetch_optional(pool)
        .await
}

pub async fn course_exists(pool: &PgPool, id: i64) -> Result<bool, Error> {
    sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM courses WHERE id = $1)")
        .bind(id)
        .fetch_one(pool)
        .await
}

#[tracing::instrument(
    skip(pool, request),
    fields(db.system = "postgresql", db.operation = "INSERT", db.table = "courses")
)]
pub async fn create_course(
    pool: &PgPool,
    request: CreateCourseRequest,
    created_by: i64,
) -> Result<Course, Error> {
    sqlx::query_as::<_, Course>(
        r#"
        INSERT INTO courses (title, description, thumbnail_url, level, created_by)
        VALUES ($1, $2, $3, $4, $5)
        RETURNING *
        "#,
    )
    .bind(request.title)
    .bind(request.description)
    .bind(request.thumbnail_url)
    .bind(request.level)
    .bind(created_by)
    .fetch_one(pool)
    .await
}

#[tracing::instrument(
    skip(pool, request),
    fields(db.system = "postgresql", db.operation = "UPDATE", db.table = "courses")
)]
pub async fn update_course(
    pool: &PgPool,
    id: i64,
    request: UpdateCourseRequest,
) -> Result<Option<Course>, Error> {
    let mut update = PartialUpdate::new("courses");
    update
        .set("title", request.title)
        .set("description", request.description)
        .set("thumbnail_url", request.thumbnail_url)
        .set("level", request.level);
    if update.is_empty() {
        return get_course(pool, id).await;
    }
    let mut query = update.finish(id);
    query.build_query_as::<Course>().fetch_optional(pool).await
}

/// Lessons still attached to the course; a non-zero count blocks deletion.
pub async fn count_lessons(pool: &PgPool, course_id: i64) -> Result<i64, Error> {
    sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM lessons WHERE course_id = $1")
        .bind(course_id)
        .fetch_one(pool)
        .await
}

#[tracing::instrument(
    skip(pool),
    fields(db.system = "postgresql", db.operation = "DELETE", db.table = "courses")
)]
pub async fn delete_course(pool: &PgPool, id: i64) -> Result<bool, Error> {
    let result = sqlx::query("DELETE FROM courses WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected() > 0)
}
