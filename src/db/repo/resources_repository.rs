use crate::api::model::course::{CreateResourceRequest, UpdateResourceRequest};
use crate::db::entity::course::Resource;
use crate::db::update_builder::PartialUpdate;
use sqlx::{Error, PgPool};

#[tracing::instrument(
    skip(pool),
    fields(db.system = "postgresql", db.operation = "SELECT", db.table = "resources")
)]
pub async fn get_resources(pool: &PgPool, lesson_id: Option<i64>) -> Result<Vec<Resource>, Error> {
    sqlx::query_as::<_, Resource>(
        "SELECT * FROM resources WHERE ($1::BIGINT IS NULL OR lesson_id = $1) ORDER BY id",
    )
    .bind(lesson_id)
    .fetch_all(pool)
    .await
}

pub async fn get_resource(pool: &PgPool, id: i64) -> Result<Option<Resource>, Error> {
    sqlx::query_as::<_, Resource>("SELECT * FROM resources WHERE id = $1")
        .bind(id)
        .fetch_optional(pool)
        .await
}

#[tracing::instrument(
    skip(pool, request),
    fields(db.system = "postgresql", db.operation = "INSERT", db.table = "resources")
)]
pub async fn create_resource(
    pool: &PgPool,
    request: CreateResourceRequest,
) -> Result<Resource, Error> {
    sqlx::query_as::<_, Resource>(
        r#"
        INSERT INTO resources (lesson_id, title, resource_type, url)
        VALUES ($1, $2, $3, $4)
        RETURNING *
        "#,
    )
    .bind(request.lesson_id)
    .bind(request.title)
    .bind(request.resource_type)
    .bind(request.url)
    .fetch_one(pool)
    .await
}

#[tracing::instrument(
    skip(pool, request),
    fields(db.system = "postgresql", db.operation = "UPDATE", db.table = "resources")
)]
pub async fn update_resource(
    pool: &PgPool,
    id: i64,
    request: UpdateResourceRequest,
) -> Result<Option<Resource>, Error> {
    let mut update = PartialUpdate::new("resources");
    update
        .set("lesson_id", request.lesson_id)
        .set("title", request.title)
        .set("resource_type", request.resource_type)
        .set("url", request.url);
    if update.is_empty() {
        return get_resource(pool, id).await;
    }
    let mut query = update.finish(id);
    query.build_query_as::<Resource>().fetch_optional(pool).await
}

pub async fn delete_resource(pool: &PgPool, id: i64) -> Result<bool, Error> {
    let result = sqlx::query("DELETE FROM resources WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected() > 0)
}
