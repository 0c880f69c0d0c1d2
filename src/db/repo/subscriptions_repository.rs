use crate::api::model::subscription::{CreatePlanRequest, UpdatePlanRequest, UpdateSubscriptionRequest};
use crate::db::entity::subscription::{SubscriptionPlan, UserSubscription};
use crate::db::update_builder::PartialUpdate;
use chrono::{DateTime, Utc};
use sqlx::{Error, PgConnection, PgPool};

#[tracing::instrument(
    skip(pool),
    fields(db.system = "postgresql", db.operation = "SELECT", db.table = "subscription_plans")
)]
pub async fn get_plans(pool: &PgPool) -> Result<Vec<SubscriptionPlan>, Error> {
    sqlx::query_as::<_, SubscriptionPlan>("SELECT * FROM subscription_plans ORDER BY price, id")
        .fetch_all(pool)
        .await
}

#[tracing::instrument(
    skip(pool),
    fields(db.system = "postgresql", db.operation = "SELECT", db.table = "subscription_plans")
)]
pub async fn get_plan(pool: &PgPool, id: i64) -> Result<Option<SubscriptionPlan>, Error> {
    sqlx::query_as::<_, SubscriptionPlan>("SELECT * FROM subscription_plans WHERE id = $1")
        .bind(id)
        .fetch_optional(pool)
        .await
}

pub async fn plan_duration_days(conn: &mut PgConnection, plan_id: i64) -> Result<Option<i32>, Error> {
    sqlx::query_scalar::<_, i32>("SELECT duration_days FROM subscription_plans WHERE id = $1")
        .bind(plan_id)
        .fetch_optional(conn)
        .await
}

#[tracing::instrument(
    skip(pool, request),
    fields(db.system = "postgresql", db.operation = "INSERT", db.table = "subscription_plans")
)]
pub async fn create_plan(
    pool: &PgPool,
    request: CreatePlanRequest,
) -> Result<SubscriptionPlan, Error> {
    sqlx::query_as::<_, SubscriptionPlan>(
        r#"
        INSERT INTO subscription_plans (name, description, price, duration_days, is_active)
        VALUES ($1, $2, $3, $4, $5)
        RETURNING *
        "#,
    )
    .bind(request.name)
    .bind(request.description)
    .bind(request.price)
    .bind(request.duration_days)
    .bind(request.is_active.unwrap_or(true))
    .fetch_one(pool)
    .await
}

#[tracing::instrument(
    skip(pool, request),
    fields(db.system = "postgresql", db.operation = "UPDATE", db.table = "subscription_plans")
)]
pub async fn update_plan(
    pool: &PgPool,
    id: i64,
    request: UpdatePlanRequest,
) -> Result<Option<SubscriptionPlan>, Error> {
    let mut update = PartialUpdate::new("subscription_plans");
    update
        .set("name", request.name)
        .set("description", request.description)
        .set("price", request.price)
        .set("duration_days", request.duration_days)
        .set("is_active", request.is_active);
    if update.is_empty() {
        return get_plan(pool, id).await;
    }
    let mut query = update.finish(id);
    query
        .build_query_as::<SubscriptionPlan>()
        .fetch_optional(pool)
        .await
}

/// Plans still referenced by subscriptions or payments fail with a foreign key violation.
#[tracing::instrument(
    skip(pool),
    fields(db.system = "postgresql", db.operation = "DELETE", db.table = "subscription_plans")
)]
pub async fn delete_plan(pool: &PgPool, id: i64) -> Result<bool, Error> {
    let result = sqlx::query("DELETE FROM subscription_plans WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected() > 0)
}

#[tracing::instrument(
    skip(pool),
    fields(db.system = "postgresql", db.operation = "SELECT", db.table = "user_subscriptions")
)]
pub async fn get_subscriptions(pool: &PgPool) -> Result<Vec<UserSubscription>, Error> {
    sqlx::query_as::<_, UserSubscription>("SELECT * FROM user_subscriptions ORDER BY created_at DESC")
        .fetch_all(pool)
        .await
}

#[tracing::instrument(
    skip(pool),
    fields(db.system = "postgresql", db.operation = "SELECT", db.table = "user_subscriptions")
)]
pub async fn get_user_subscriptions(
    pool: &PgPool,
    user_id: i64,
) -> Result<Vec<UserSubscription>, Error> {
    sqlx::query_as::<_, UserSubscription>(
        "SELECT * FROM user_subscriptions WHERE user_id = $1 ORDER BY created_at DESC",
    )
    .bind(user_id)
    .fetch_all(pool)
    .await
}

#[tracing::instrument(
    skip(pool),
    fields(db.system = "postgresql", db.operation = "SELECT", db.table = "user_subscriptions")
)]
pub async fn get_subscription(pool: &PgPool, id: i64) -> Result<Option<UserSubscription>, Error> {
    sqlx::query_as::<_, UserSubscription>("SELECT * FROM user_subscriptions WHERE id = $1")
        .bind(id)
        .fetch_optional(pool)
        .await
}

/// Inserts an active subscription running `duration_days` from `start_date`.
///
/// Takes a connection so payment reconciliation can call it inside its transaction.
#[tracing::instrument(
    skip(conn),
    fields(db.system = "postgresql", db.operation = "INSERT", db.table = "user_subscriptions")
)]
pub async fn create_subscription(
    conn: &mut PgConnection,
    user_id: i64,
    plan_id: i64,
    start_date: DateTime<Utc>,
    duration_days: i32,
) -> Result<UserSubscription, Error> {
    sqlx::query_as::<_, UserSubscription>(
        r#"
        INSERT INTO user_subscriptions (user_id, plan_id, start_date, end_date, status)
        VALUES ($1, $2, $3, $3 + make_interval(days => $4), 'active')
        RETURNING *
        "#,
    )
    .bind(user_id)
    .bind(plan_id)
    .bind(start_date)
    .bind(duration_days)
    .fetch_one(conn)
    .await
}

/// Whether a subscription for the same user and plan was created in the last five minutes.
///
/// Guards against the return redirect and the webhook both activating one payment.
#[tracing::instrument(
    skip(conn),
    fields(db.system = "postgresql", db.operation = "SELECT", db.table = "user_subscriptions")
)]
pub async fn recent_subscription_exists(
    conn: &mut PgConnection,
    user_id: i64,
    plan_id: i64,
) -> Result<bool, Error> {
    sqlx::query_scalar::<_, bool>(
        r#"
        SELECT EXISTS(
            SELECT 1 FROM user_subscriptions
            WHERE user_id = $1 AND plan_id = $2 AND created_at > now() - INTERVAL '5 minutes'
        )
        "#,
    )
    .bind(user_id)
    .bind(plan_id)
    .fetch_one(conn)
    .await
}

#[tracing::instrument(
    skip(pool, request),
    fields(db.system = "postgresql", db.operation = "UPDATE", db.table = "user_subscriptions")
)]
pub async fn update_subscription(
    pool: &PgPool,
    id: i64,
    request: UpdateSubscriptionRequest,
) -> Result<Option<UserSubscription>, Error> {
    let mut update = PartialUpdate::new("user_subscriptions");
    update
        .set("end_date", request.end_date)
        .set("status", request.status);
    if update.is_empty() {
        return get_subscription(pool, id).await;
    }
    let mut query = update.finish(id);
    query
        .build_query_as::<UserSubscription>()
        .fetch_optional(pool)
        .await
}

#[tracing::instrument(
    skip(pool),
    fields(db.system = "postgresql", db.operation = "DELETE", db.table = "user_subscriptions")
)]
pub async fn delete_subscription(pool: &PgPool, id: i64) -> Result<bool, Error> {
    let result = sqlx::query("DELETE FROM user_subscriptions WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected() > 0)
}
