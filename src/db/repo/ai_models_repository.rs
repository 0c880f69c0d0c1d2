use crate::api::model::ai_model::{CreateAiModelRequest, UpdateAiModelRequest};
use crate::db::entity::ai_model::AiModel;
use crate::db::update_builder::PartialUpdate;
use sqlx::{Error, PgPool};

#[tracing::instrument(
    skip(pool),
    fields(db.system = "postgresql", db.operation = "SELECT", db.table = "ai_models")
)]
pub async fn get_ai_models(pool: &PgPool) -> Result<Vec<AiModel>, Error> {
    sqlx::query_as::<_, AiModel>("SELECT * FROM ai_models ORDER BY name")
        .fetch_all(pool)
        .await
}

pub async fn get_ai_model(pool: &PgPool, id: i64) -> Result<Option<AiModel>, Error> {
    sqlx::query_as::<_, AiModel>("SELECT * FROM ai_models WHERE id = $1")
        .bind(id)
        .fetch_optional(pool)
        .await
}

pub async fn ai_model_exists(pool: &PgPool, id: i64) -> Result<bool, Error> {
    sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM ai_models WHERE id = $1)")
        .bind(id)
        .fetch_one(pool)
        .await
}

#[tracing::instrument(
    skip(pool, request),
    fields(db.system = "postgresql", db.operation = "INSERT", db.table = "ai_models")
)]
pub async fn create_ai_model(pool: &PgPool, request: CreateAiModelRequest) -> Result<AiModel, Error> {
    sqlx::query_as::<_, AiModel>(
        r#"
        INSERT INTO ai_models (name, version, description, model_url)
        VALUES ($1, $2, $3, $4)
        RETURNING *
        "#,
    )
    .bind(request.name)
    .bind(request.version)
    .bind(request.description)
    .bind(request.model_url)
    .fetch_one(pool)
    .await
}

#[tracing::instrument(
    skip(pool, request),
    fields(db.system = "postgresql", db.operation = "UPDATE", db.table = "ai_models")
)]
pub async fn update_ai_model(
    pool: &PgPool,
    id: i64,
    request: UpdateAiModelRequest,
) -> Result<Option<AiModel>, Error> {
    let mut update = PartialUpdate::new("ai_models");
    update
        .set("name", request.name)
        .set("version", request.version)
        .set("description", request.description)
        .set("model_url", request.model_url);
    if update.is_empty() {
        return get_ai_model(pool, id).await;
    }
    let mut query = update.finish(id);
    query.build_query_as::<AiModel>().fetch_optional(pool).await
}

/// Hand motions recognised by the model; a non-zero count blocks deletion.
pub async fn count_hand_motions(pool: &PgPool, ai_model_id: i64) -> Result<i64, Error> {
    sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM hand_motions WHERE ai_model_id = $1")
        .bind(ai_model_id)
        .fetch_one(pool)
        .await
}

pub async fn delete_ai_model(pool: &PgPool, id: i64) -> Result<bool, Error> {
    let result = sqlx::query("DELETE FROM ai_models WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected() > 0)
}
