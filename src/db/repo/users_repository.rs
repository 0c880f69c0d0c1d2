use crate::api::model::user::UpdateUserRequest;
use crate::db::entity::user::{Role, Users};
use crate::db::update_builder::PartialUpdate;
use chrono::NaiveDate;
use sqlx::{Error, PgPool};

/// Fields required to insert a user row.
pub struct NewUser<'a> {
    pub email: &'a str,
    pub password_hash: Option<&'a str>,
    pub full_name: &'a str,
    pub phone: Option<&'a str>,
    pub role: Role,
    pub date_of_birth: Option<NaiveDate>,
    pub picture_url: Option<&'a str>,
}

/// Creates a new user in the database.
///
/// # Arguments
///
/// * `pg_pool` - A reference to the PostgreSQL connection pool.
/// * `new_user` - Column values for the new row. `password_hash` is `None` for Google accounts.
///
/// # Returns
///
/// * `Result<Users, Error>` - Returns the created user record if successful, otherwise returns an `Error`.
///
/// # Errors
///
/// This function will return an `Error` if:
/// * The email or phone number is already registered (unique violation).
/// * There is an issue executing the SQL query.
#[tracing::instrument(
    skip(pg_pool, new_user),
    fields(
        db.system = "postgresql",
        db.operation = "INSERT",
        db.table = "users"
    )
)]
pub async fn create_user(pg_pool: &PgPool, new_user: NewUser<'_>) -> Result<Users, Error> {
    sqlx::query_as::<_, Users>(
        r#"
        INSERT INTO users (email, password_hash, full_name, phone, role, date_of_birth, picture_url)
        VALUES ($1, $2, $3, $4, $5, $6, $7)
        RETURNING *
        "#,
    )
    .bind(new_user.email)
    .bind(new_user.password_hash)
    .bind(new_user.full_name)
    .bind(new_user.phone)
    .bind(new_user.role)
    .bind(new_user.date_of_birth)
    .bind(new_user.picture_url)
    .fetch_one(pg_pool)
    .await
}

/// Retrieves a paginated list of users, newest first.
///
/// # Arguments
///
/// * `pool` - A reference to the PostgreSQL connection pool.
/// * `limit` - The maximum number of users to retrieve.
/// * `page` - The page number to retrieve (1-based).
#[tracing::instrument(
    skip(pool),
    fields(
        db.system = "postgresql",
        db.operation = "SELECT",
        db.table = "users"
    )
)]
pub async fn get_users(pool: &PgPool, limit: i64, page: i64) -> Result<Vec<Users>, Error> {
    sqlx::query_as::<_, Users>("SELECT * FROM users ORDER BY created_at DESC LIMIT $1 OFFSET $2")
        .bind(limit)
        .bind((page - 1) * limit)
        .fetch_all(pool)
        .await
}

/// Counts the total number of users in the database.
#[tracing::instrument(
    skip(pool),
    fields(
        db.system = "postgresql",
        db.operation = "SELECT",
        db.table = "users"
    )
)]
pub async fn count_users(pool: &PgPool) -> Result<i64, Error> {
    sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM users")
        .fetch_one(pool)
        .await
}

#[tracing::instrument(
    skip(pool),
    fields(
        db.system = "postgresql",
        db.operation = "SELECT",
        db.table = "users"
    )
)]
pub async fn get_user_by_id(pool: &PgPool, id: i64) -> Result<Option<Users>, Error> {
    sqlx::query_as::<_, Users>("SELECT * FROM users WHERE id = $1")
        .bind(id)
        .fetch_optional(pool)
        .await
}

#[tracing::instrument(
    skip(pool),
    fields(
        db.system = "postgresql",
        db.operation = "SELECT",
        db.table = "users"
    )
)]
pub async fn get_user_by_email(pool: &PgPool, email: &str) -> Result<Option<Users>, Error> {
    sqlx::query_as::<_, Users>("SELECT * FROM users WHERE lower(email) = lower($1)")
        .bind(email)
        .fetch_optional(pool)
        .await
}

pub async fn user_exists(pool: &PgPool, id: i64) -> Result<bool, Error> {
    sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM users WHERE id = $1)")
        .bind(id)
        .fetch_one(pool)
        .await
}

/// Updates the provided profile fields of a user.
///
/// Only fields present in `update_user_request` are written. Returns `Ok(None)` when
/// the user does not exist; an empty update returns the current row.
#[tracing::instrument(
    skip(pool, update_user_request),
    fields(
        db.system = "postgresql",
        db.operation = "UPDATE",
        db.table = "users"
    )
)]
pub async fn update_user(
    pool: &PgPool,
    id: i64,
    update_user_request: UpdateUserRequest,
) -> Result<Option<Users>, Error> {
    let mut update = PartialUpdate::new("users");
    update
        .set("full_name", update_user_request.full_name)
        .set("phone", update_user_request.phone)
        .set("date_of_birth", update_user_request.date_of_birth)
        .set("picture_url", update_user_request.picture_url)
        .set("role", update_user_request.role);
    if update.is_empty() {
        return get_user_by_id(pool, id).await;
    }
    let mut query = update.finish(id);
    query.build_query_as::<Users>().fetch_optional(pool).await
}

#[tracing::instrument(
    skip(pool, password_hash),
    fields(
        db.system = "postgresql",
        db.operation = "UPDATE",
        db.table = "users"
    )
)]
pub async fn update_password(pool: &PgPool, id: i64, password_hash: &str) -> Result<(), Error> {
    sqlx::query("UPDATE users SET password_hash = $1 WHERE id = $2")
        .bind(password_hash)
        .bind(id)
        .execute(pool)
        .await?;
    Ok(())
}

/// Number of payments that reference the user. Users with payments cannot be deleted.
pub async fn count_user_payments(pool: &PgPool, id: i64) -> Result<i64, Error> {
    sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM payments WHERE user_id = $1")
        .bind(id)
        .fetch_one(pool)
        .await
}

/// Deletes a user. Dependent progress, comments and notifications cascade.
///
/// Returns `true` when a row was deleted.
#[tracing::instrument(
    skip(pool),
    fields(
        db.system = "postgresql",
        db.operation = "DELETE",
        db.table = "users"
    )
)]
pub async fn delete_user(pool: &PgPool, id: i64) -> Result<bool, Error> {
    let result = sqlx::query("DELETE FROM users WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected() > 0)
}
