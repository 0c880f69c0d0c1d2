use crate::api::model::ai_model::{CreateHandMotionRequest, UpdateHandMotionRequest};
use crate::db::entity::ai_model::HandMotion;
use crate::db::update_builder::PartialUpdate;
use sqlx::types::Json;
use sqlx::{Error, PgPool};

#[tracing::instrument(
    skip(pool),
    fields(db.system = "postgresql", db.operation = "SELECT", db.table = "hand_motions")
)]
pub async fn get_hand_motions(
    pool: &PgPool,
    lesson_id: Option<i64>,
) -> Result<Vec<HandMotion>, Error> {
    sqlx::query_as::<_, HandMotion>(
        "SELECT * FROM hand_motions WHERE ($1::BIGINT IS NULL OR lesson_id = $1) ORDER BY id",
    )
    .bind(lesson_id)
    .fetch_all(pool)
    .await
}

pub async fn get_hand_motion(pool: &PgPool, id: i64) -> Result<Option<HandMotion>, Error> {
    sqlx::query_as::<_, HandMotion>("SELECT * FROM hand_motions WHERE id = $1")
        .bind(id)
        .fetch_optional(pool)
        .await
}

#[tracing::instrument(
    skip(pool, request),
    fields(db.system = "postgresql", db.operation = "INSERT", db.table = "hand_motions")
)]
pub async fn create_hand_motion(
    pool: &PgPool,
    request: CreateHandMotionRequest,
) -> Result<HandMotion, Error> {
    sqlx::query_as::<_, HandMotion>(
        r#"
        INSERT INTO hand_motions (lesson_id, ai_model_id, name, description, motion_data)
        VALUES ($1, $2, $3, $4, $5)
        RETURNING *
        "#,
    )
    .bind(request.lesson_id)
    .bind(request.ai_model_id)
    .bind(request.name)
    .bind(request.description)
    .bind(request.motion_data.map(Json))
    .fetch_one(pool)
    .await
}

#[tracing::instrument(
    skip(pool, request),
    fields(db.system = "postgresql", db.operation = "UPDATE", db.table = "hand_motions")
)]
pub async fn update_hand_motion(
    pool: &PgPool,
    id: i64,
    request: UpdateHandMotionRequest,
) -> Result<Option<HandMotion>, Error> {
    let mut update = PartialUpdate::new("hand_motions");
    update
        .set("lesson_id", request.lesson_id)
        .set("ai_model_id", request.ai_model_id)
        .set("name", request.name)
        .set("description", request.description)
        .set("motion_data", request.motion_data.map(Json));
    if update.is_empty() {
        return get_hand_motion(pool, id).await;
    }
    let mut query = update.finish(id);
    query.build_query_as::<HandMotion>().fetch_optional(pool).await
}

pub async fn delete_hand_motion(pool: &PgPool, id: i64) -> Result<bool, Error> {
    let result = sqlx::query("DELETE FROM hand_motions WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected() > 0)
}
