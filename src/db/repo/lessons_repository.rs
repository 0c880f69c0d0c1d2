use crate::api::model::course::{CreateLessonRequest, UpdateLessonRequest};
use crate::db::entity::course::Lesson;
use crate::db::update_builder::PartialUpdate;
use sqlx::{Error, PgPool};

/// Lists lessons ordered by `lesson_order`, optionally limited to one course.
#[tracing::instrument(
    skip(pool),
    fields(db.system = "postgresql", db.operation = "SELECT", db.table = "lessons")
)]
pub async fn get_lessons(pool: &PgPool, course_id: Option<i64>) -> Result<Vec<Lesson>, Error> {
    sqlx::query_as::<_, Lesson>(
        r#"
        SELECT * FROM lessons
        WHERE ($1::BIGINT IS NULL OR course_id = $1)
        ORDER BY course_id, lesson_order, id
        "#,
    )
    .bind(course_id)
    .fetch_all(pool)
    .await
}

#[tracing::instrument(
    skip(pool),
    fields(db.system = "postgresql", db.operation = "SELECT", db.table = "lessons")
)]
pub async fn get_lesson(pool: &PgPool, id: i64) -> Result<Option<Lesson>, Error> {
    sqlx::query_as::<_, Lesson>("SELECT * FROM lessons WHERE id = $1")
        .bind(id)
        .fetch_optional(pool)
        .await
}

pub async fn lesson_exists(pool: &PgPool, id: i64) -> Result<bool, Error> {
    sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM lessons WHERE id = $1)")
        .bind(id)
        .fetch_one(pool)
        .await
}

#[tracing::instrument(
    skip(pool, request),
    fields(db.system = "postgresql", db.operation = "INSERT", db.table = "lessons")
)]
pub async fn create_lesson(pool: &PgPool, request: CreateLessonRequest) -> Result<Lesson, Error> {
    sqlx::query_as::<_, Lesson>(
        r#"
        INSERT INTO lessons (course_id, title, description, video_url, duration_seconds, lesson_order)
        VALUES ($1, $2, $3, $4, $5, $6)
        RETURNING *
        "#,
    )
    .bind(request.course_id)
    .bind(request.title)
    .bind(request.description)
    .bind(request.video_url)
    .bind(request.duration_seconds.unwrap_or(0))
    .bind(request.lesson_order.unwrap_or(0))
    .fetch_one(pool)
    .await
}

#[tracing::instrument(
    skip(pool, request),
    fields(db.system = "postgresql", db.operation = "UPDATE", db.table = "lessons")
)]
pub async fn update_lesson(
    pool: &PgPool,
    id: i64,
    request: UpdateLessonRequest,
) -> Result<Option<Lesson>, Error> {
    let mut update = PartialUpdate::new("lessons");
    update
        .set("course_id", request.course_id)
        .set("title", request.title)
        .set("description", request.description)
        .set("video_url", request.video_url)
        .set("duration_seconds", request.duration_seconds)
        .set("lesson_order", request.lesson_order);
    if update.is_empty() {
        return get_lesson(pool, id).await;
    }
    let mut query = update.finish(id);
    query.build_query_as::<Lesson>().fetch_optional(pool).await
}

/// Deletes a lesson; resources, comments, hand motions and progress cascade.
#[tracing::instrument(
    skip(pool),
    fields(db.system = "postgresql", db.operation = "DELETE", db.table = "lessons")
)]
pub async fn delete_lesson(pool: &PgPool, id: i64) -> Result<bool, Error> {
    let result = sqlx::query("DELETE FROM lessons WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected() > 0)
}
