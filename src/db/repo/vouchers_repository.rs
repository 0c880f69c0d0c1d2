use crate::api::model::voucher::{CreateVoucherRequest, UpdateVoucherRequest};
use crate::db::entity::voucher::Voucher;
use crate::db::update_builder::PartialUpdate;
use sqlx::{Error, PgConnection, PgPool};

#[tracing::instrument(
    skip(pool),
    fields(db.system = "postgresql", db.operation = "SELECT", db.table = "vouchers")
)]
pub async fn get_vouchers(pool: &PgPool) -> Result<Vec<Voucher>, Error> {
    sqlx::query_as::<_, Voucher>("SELECT * FROM vouchers ORDER BY created_at DESC")
        .fetch_all(pool)
        .await
}

#[tracing::instrument(
    skip(pool),
    fields(db.system = "postgresql", db.operation = "SELECT", db.table = "vouchers")
)]
pub async fn get_voucher(pool: &PgPool, id: i64) -> Result<Option<Voucher>, Error> {
    sqlx::query_as::<_, Voucher>("SELECT * FROM vouchers WHERE id = $1")
        .bind(id)
        .fetch_optional(pool)
        .await
}

#[tracing::instrument(
    skip(pool),
    fields(db.system = "postgresql", db.operation = "SELECT", db.table = "vouchers")
)]
pub async fn get_voucher_by_code(pool: &PgPool, code: &str) -> Result<Option<Voucher>, Error> {
    sqlx::query_as::<_, Voucher>("SELECT * FROM vouchers WHERE code = upper($1)")
        .bind(code)
        .fetch_optional(pool)
        .await
}

#[tracing::instrument(
    skip(pool, request, code),
    fields(db.system = "postgresql", db.operation = "INSERT", db.table = "vouchers")
)]
pub async fn create_voucher(
    pool: &PgPool,
    code: &str,
    request: CreateVoucherRequest,
) -> Result<Voucher, Error> {
    sqlx::query_as::<_, Voucher>(
        r#"
        INSERT INTO vouchers
            (code, description, discount_type, discount_value, max_usage, valid_from, valid_until, is_active)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
        RETURNING *
        "#,
    )
    .bind(code)
    .bind(request.description)
    .bind(request.discount_type)
    .bind(request.discount_value)
    .bind(request.max_usage)
    .bind(request.valid_from)
    .bind(request.valid_until)
    .bind(request.is_active.unwrap_or(true))
    .fetch_one(pool)
    .await
}

#[tracing::instrument(
    skip(pool, request),
    fields(db.system = "postgresql", db.operation = "UPDATE", db.table = "vouchers")
)]
pub async fn update_voucher(
    pool: &PgPool,
    id: i64,
    request: UpdateVoucherRequest,
) -> Result<Option<Voucher>, Error> {
    let mut update = PartialUpdate::new("vouchers");
    update
        .set("description", request.description)
        .set("discount_type", request.discount_type)
        .set("discount_value", request.discount_value)
        .set("max_usage", request.max_usage)
        .set("valid_from", request.valid_from)
        .set("valid_until", request.valid_until)
        .set("is_active", request.is_active);
    if update.is_empty() {
        return get_voucher(pool, id).await;
    }
    let mut query = update.finish(id);
    query.build_query_as::<Voucher>().fetch_optional(pool).await
}

/// Consumes one use of a voucher inside the payment reconciliation transaction.
///
/// The guard keeps `used_count` at or below `max_usage`; returns `false` when the
/// voucher is exhausted (or gone) and nothing was updated.
#[tracing::instrument(
    skip(conn),
    fields(db.system = "postgresql", db.operation = "UPDATE", db.table = "vouchers")
)]
pub async fn increment_used_count(conn: &mut PgConnection, id: i64) -> Result<bool, Error> {
    let result = sqlx::query(
        "UPDATE vouchers SET used_count = used_count + 1 WHERE id = $1 AND used_count < max_usage",
    )
    .bind(id)
    .execute(conn)
    .await?;
    Ok(result.rows_affected() > 0)
}

#[tracing::instrument(
    skip(pool),
    fields(db.system = "postgresql", db.operation = "DELETE", db.table = "vouchers")
)]
pub async fn delete_voucher(pool: &PgPool, id: i64) -> Result<bool, Error> {
    let result = sqlx::query("DELETE FROM vouchers WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected() > 0)
}
