use crate::api::model::common::{total_pages, PaginationQuery};
use crate::api::model::user::{
    ChangePasswordRequest, CreateUserRequest, StoredUser, StoredUsers, UpdateUserRequest,
};
use crate::config::app_config::AppState;
use crate::db::entity::user::Role;
use crate::db::repo::users_repository::{self, NewUser};
use crate::error::error_model::AppError;
use crate::middleware::auth::AuthContext;
use crate::middleware::role::{ADMIN_ONLY, STAFF};
use crate::service::validate_request;
use crate::util::crypto_helper;
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use std::sync::Arc;
use tracing::{error, info};

/// Create a user on behalf of an admin.
///
/// The role defaults to `customer`. The password is hashed with Argon2id and the
/// server pepper before it is stored.
#[tracing::instrument(
    skip(state, auth, request),
    fields(
        service.name = "user_service",
        service.operation = "create_user",
        user.email = %request.email
    )
)]
pub async fn create_user(
    state: Arc<AppState>,
    auth: AuthContext,
    request: CreateUserRequest,
) -> Result<Response, AppError> {
    auth.require_role(ADMIN_ONLY)?;
    validate_request(&request, "CreateUserRequest")?;

    if users_repository::get_user_by_email(&state.pg_pool, &request.email)
        .await?
        .is_some()
    {
        return Err(AppError::bad_request("Email is already registered"));
    }

    let password_hash = crypto_helper::hash_password(&state.argon_pepper, &request.password)
        .map_err(|e| {
            error!("Error hashing password: {}", e);
            AppError::internal()
        })?;

    let user = users_repository::create_user(
        &state.pg_pool,
        NewUser {
            email: &request.email,
            password_hash: Some(&password_hash),
            full_name: &request.full_name,
            phone: request.phone.as_deref(),
            role: request.role.unwrap_or(Role::Customer),
            date_of_birth: request.date_of_birth,
            picture_url: request.picture_url.as_deref(),
        },
    )
    .await?;
    info!("User {} created by admin {}", user.id, auth.user_id);

    Ok((
        StatusCode::CREATED,
        [(header::LOCATION, format!("/users/{}", user.id))],
        Json(StoredUser::from(user)),
    )
        .into_response())
}

/// Get a list of users with pagination.
pub async fn get_users(
    state: Arc<AppState>,
    auth: AuthContext,
    pagination: PaginationQuery,
) -> Result<Response, AppError> {
    auth.require_role(STAFF)?;
    let (page, limit) = pagination.normalized();
    let users = users_repository::get_users(&state.pg_pool, limit, page).await?;
    let user_count = users_repository::count_users(&state.pg_pool).await?;
    let items_in_page = users.len() as i64;

    Ok((
        StatusCode::OK,
        Json(StoredUsers {
            users: users.into_iter().map(StoredUser::from).collect(),
            current_page: page,
            total_items: user_count,
            total_pages: total_pages(user_count, limit),
            items_per_page: limit,
            items_in_page,
        }),
    )
        .into_response())
}

/// Get a user by id. Customers may only read themselves.
pub async fn get_user(
    state: Arc<AppState>,
    auth: AuthContext,
    id: i64,
) -> Result<Response, AppError> {
    auth.require_self_or(id, STAFF)?;
    let user = users_repository::get_user_by_id(&state.pg_pool, id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("User not found for ID: {}", id)))?;
    Ok((StatusCode::OK, Json(StoredUser::from(user))).into_response())
}

/// Update a user's profile.
///
/// Users may update themselves; admins may update anyone. Only admins may change roles.
#[tracing::instrument(
    skip(state, auth, request),
    fields(service.name = "user_service", service.operation = "update_user")
)]
pub async fn update_user(
    state: Arc<AppState>,
    auth: AuthContext,
    id: i64,
    request: UpdateUserRequest,
) -> Result<Response, AppError> {
    auth.require_self_or(id, ADMIN_ONLY)?;
    validate_request(&request, "UpdateUserRequest")?;
    if request.role.is_some() {
        auth.require_role(ADMIN_ONLY)?;
    }

    let user = users_repository::update_user(&state.pg_pool, id, request)
        .await?
        .ok_or_else(|| AppError::not_found(format!("User not found for ID: {}", id)))?;
    Ok((StatusCode::OK, Json(StoredUser::from(user))).into_response())
}

/// Change the caller's own password after re-checking the current one.
#[tracing::instrument(
    skip(state, auth, request),
    fields(service.name = "user_service", service.operation = "change_password")
)]
pub async fn change_password(
    state: Arc<AppState>,
    auth: AuthContext,
    request: ChangePasswordRequest,
) -> Result<Response, AppError> {
    validate_request(&request, "ChangePasswordRequest")?;
    let user = users_repository::get_user_by_id(&state.pg_pool, auth.user_id)
        .await?
        .ok_or_else(|| AppError::not_found("User not found"))?;

    // Google-only accounts have no password to check against.
    let Some(current_hash) = user.password_hash.as_deref() else {
        return Err(AppError::bad_request(
            "This account signs in with Google and has no password",
        ));
    };
    if !crypto_helper::verify_password(&state.argon_pepper, &request.current_password, current_hash)
    {
        return Err(AppError::bad_request("Current password is incorrect"));
    }

    let new_hash = crypto_helper::hash_password(&state.argon_pepper, &request.new_password)
        .map_err(|e| {
            error!("Error hashing password: {}", e);
            AppError::internal()
        })?;
    users_repository::update_password(&state.pg_pool, user.id, &new_hash).await?;
    info!("Password changed for user {}", user.id);

    Ok((StatusCode::NO_CONTENT,).into_response())
}

/// Delete a user. Refused while payments still reference the account.
#[tracing::instrument(
    skip(state, auth),
    fields(service.name = "user_service", service.operation = "delete_user")
)]
pub async fn delete_user(
    state: Arc<AppState>,
    auth: AuthContext,
    id: i64,
) -> Result<Response, AppError> {
    auth.require_role(ADMIN_ONLY)?;
    if users_repository::count_user_payments(&state.pg_pool, id).await? > 0 {
        return Err(AppError::bad_request(
            "User has payment records and cannot be deleted",
        ));
    }
    if !users_repository::delete_user(&state.pg_pool, id).await? {
        return Err(AppError::not_found(format!("User not found for ID: {}", id)));
    }
    info!("User {} deleted by admin {}", id, auth.user_id);
    Ok((StatusCode::NO_CONTENT,).into_response())
}
