use crate::db::entity::payment::{Payment, PaymentStatus};
use sqlx::{Error, PgConnection, PgPool};

/// Column values for a pending payment.
pub struct NewPayment<'a> {
    pub user_id: i64,
    pub plan_id: i64,
    pub voucher_id: Option<i64>,
    pub order_code: i64,
    pub original_amount: i64,
    pub discount_amount: i64,
    pub final_amount: i64,
    pub checkout_url: &'a str,
    pub description: &'a str,
}

#[tracing::instrument(
    skip(pool, new_payment),
    fields(db.system = "postgresql", db.operation = "INSERT", db.table = "payments")
)]
pub async fn create_payment(pool: &PgPool, new_payment: NewPayment<'_>) -> Result<Payment, Error> {
    sqlx::query_as::<_, Payment>(
        r#"
        INSERT INTO payments
            (user_id, plan_id, voucher_id, order_code, original_amount, discount_amount,
             final_amount, status, checkout_url, description)
        VALUES ($1, $2, $3, $4, $5, $6, $7, 'pending', $8, $9)
        RETURNING *
        "#,
    )
    .bind(new_payment.user_id)
    .bind(new_payment.plan_id)
    .bind(new_payment.voucher_id)
    .bind(new_payment.order_code)
    .bind(new_payment.original_amount)
    .bind(new_payment.discount_amount)
    .bind(new_payment.final_amount)
    .bind(new_payment.checkout_url)
    .bind(new_payment.description)
    .fetch_one(pool)
    .await
}

#[tracing::instrument(
    skip(pool),
    fields(db.system = "postgresql", db.operation = "SELECT", db.table = "payments")
)]
pub async fn get_payments(pool: &PgPool, limit: i64, page: i64) -> Result<Vec<Payment>, Error> {
    sqlx::query_as::<_, Payment>("SELECT * FROM payments ORDER BY created_at DESC LIMIT $1 OFFSET $2")
        .bind(limit)
        .bind((page - 1) * limit)
        .fetch_all(pool)
        .await
}

pub async fn count_payments(pool: &PgPool) -> Result<i64, Error> {
    sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM payments")
        .fetch_one(pool)
        .await
}

#[tracing::instrument(
    skip(pool),
    fields(db.system = "postgresql", db.operation = "SELECT", db.table = "payments")
)]
pub async fn get_user_payments(pool: &PgPool, user_id: i64) -> Result<Vec<Payment>, Error> {
    sqlx::query_as::<_, Payment>("SELECT * FROM payments WHERE user_id = $1 ORDER BY created_at DESC")
        .bind(user_id)
        .fetch_all(pool)
        .await
}

#[tracing::instrument(
    skip(pool),
    fields(db.system = "postgresql", db.operation = "SELECT", db.table = "payments")
)]
pub async fn get_payment(pool: &PgPool, id: i64) -> Result<Option<Payment>, Error> {
    sqlx::query_as::<_, Payment>("SELECT * FROM payments WHERE id = $1")
        .bind(id)
        .fetch_optional(pool)
        .await
}

/// Loads a payment by order code and locks the row until the transaction ends.
#[tracing::instrument(
    skip(conn),
    fields(db.system = "postgresql", db.operation = "SELECT", db.table = "payments")
)]
pub async fn lock_by_order_code(
    conn: &mut PgConnection,
    order_code: i64,
) -> Result<Option<Payment>, Error> {
    sqlx::query_as::<_, Payment>("SELECT * FROM payments WHERE order_code = $1 FOR UPDATE")
        .bind(order_code)
        .fetch_optional(conn)
        .await
}

/// Moves a payment out of `pending`. `paid_at` is stamped only for successful payments.
#[tracing::instrument(
    skip(conn),
    fields(db.system = "postgresql", db.operation = "UPDATE", db.table = "payments")
)]
pub async fn update_status(
    conn: &mut PgConnection,
    id: i64,
    status: PaymentStatus,
) -> Result<Payment, Error> {
    sqlx::query_as::<_, Payment>(
        r#"
        UPDATE payments
        SET status = $1,
            paid_at = CASE WHEN $1 = 'success'::payment_status THEN now() ELSE paid_at END,
            updated_at = now()
        WHERE id = $2
        RETURNING *
        "#,
    )
    .bind(status)
    .bind(id)
    .fetch_one(conn)
    .await
}
