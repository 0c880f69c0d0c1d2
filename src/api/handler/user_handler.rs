use crate::api::model::common::PaginationQuery;
use crate::api::model::user::{
    ChangePasswordRequest, CreateUserRequest, StoredUser, StoredUsers, UpdateUserRequest,
};
use crate::config::app_config::AppState;
use crate::error::error_model::{ApiError, AppError};
use crate::middleware::auth::AuthContext;
use crate::service::user_service;
use axum::extract::{Path, Query, State};
use axum::response::Response;
use axum::routing::{get, post, put};
use axum::{Extension, Json, Router};
use std::sync::Arc;

pub fn user_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/", get(get_users_handler))
        .route("/create", post(create_user_handler))
        .route("/me", get(get_me_handler))
        .route("/me/password", put(change_password_handler))
        .route(
            "/{id}",
            get(get_user_handler)
                .put(update_user_handler)
                .delete(delete_user_handler),
        )
}

/// Create user
///
/// Admin only. The role defaults to customer.
#[utoipa::path(
    post,
    path = "/users/create",
    request_body = CreateUserRequest,
    tag = "Users",
    security(("bearer_auth" = [])),
    responses(
        (status = 201, description = "User created successfully", body = StoredUser),
        (status = 400, description = "Invalid request", body = ApiError),
        (status = 403, description = "Permission denied", body = ApiError),
        (status = 500, description = "Internal server error", body = ApiError),
    )
)]
pub async fn create_user_handler(
    State(state): State<Arc<AppState>>,
    Extension(auth): Extension<AuthContext>,
    Json(request): Json<CreateUserRequest>,
) -> Result<Response, AppError> {
    user_service::create_user(state, auth, request).await
}

/// Get a list of users
///
/// Get a list of users with pagination. Admin and employee only.
#[utoipa::path(
    get,
    path = "/users",
    tag = "Users",
    security(("bearer_auth" = [])),
    params(PaginationQuery),
    responses(
        (status = 200, description = "Users retrieved successfully", body = StoredUsers),
        (status = 403, description = "Permission denied", body = ApiError),
        (status = 500, description = "Internal server error", body = ApiError),
    )
)]
pub async fn get_users_handler(
    State(state): State<Arc<AppState>>,
    Extension(auth): Extension<AuthContext>,
    Query(query): Query<PaginationQuery>,
) -> Result<Response, AppError> {
    user_service::get_users(state, auth, query).await
}

/// Get own profile
#[utoipa::path(
    get,
    path = "/users/me",
    tag = "Users",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "User found", body = StoredUser),
        (status = 404, description = "User not found", body = ApiError),
    )
)]
pub async fn get_me_handler(
    State(state): State<Arc<AppState>>,
    Extension(auth): Extension<AuthContext>,
) -> Result<Response, AppError> {
    let id = auth.user_id;
    user_service::get_user(state, auth, id).await
}

/// Change own password
#[utoipa::path(
    put,
    path = "/users/me/password",
    request_body = ChangePasswordRequest,
    tag = "Users",
    security(("bearer_auth" = [])),
    responses(
        (status = 204, description = "Password changed"),
        (status = 400, description = "Invalid request or wrong current password", body = ApiError),
    )
)]
pub async fn change_password_handler(
    State(state): State<Arc<AppState>>,
    Extension(auth): Extension<AuthContext>,
    Json(request): Json<ChangePasswordRequest>,
) -> Result<Response, AppError> {
    user_service::change_password(state, auth, request).await
}

/// Get a user by id
///
/// Customers can only read their own record.
#[utoipa::path(
    get,
    path = "/users/{id}",
    tag = "Users",
    security(("bearer_auth" = [])),
    params(("id" = i64, Path, description = "User id")),
    responses(
        (status = 200, description = "User found", body = StoredUser),
        (status = 403, description = "Permission denied", body = ApiError),
        (status = 404, description = "User not found for the ID", body = ApiError),
    )
)]
pub async fn get_user_handler(
    State(state): State<Arc<AppState>>,
    Extension(auth): Extension<AuthContext>,
    Path(id): Path<i64>,
) -> Result<Response, AppError> {
    user_service::get_user(state, auth, id).await
}

/// Update user by id
///
/// Users may update their own profile; admins may update anyone and change roles.
#[utoipa::path(
    put,
    path = "/users/{id}",
    request_body = UpdateUserRequest,
    tag = "Users",
    security(("bearer_auth" = [])),
    params(("id" = i64, Path, description = "User id")),
    responses(
        (status = 200, description = "User updated successfully", body = StoredUser),
        (status = 400, description = "Invalid request", body = ApiError),
        (status = 403, description = "Permission denied", body = ApiError),
        (status = 404, description = "User not found for the ID", body = ApiError),
    )
)]
pub async fn update_user_handler(
    State(state): State<Arc<AppState>>,
    Extension(auth): Extension<AuthContext>,
    Path(id): Path<i64>,
    Json(request): Json<UpdateUserRequest>,
) -> Result<Response, AppError> {
    user_service::update_user(state, auth, id, request).await
}

/// Delete user by id
///
/// Admin only. Users with payment records cannot be deleted.
#[utoipa::path(
    delete,
    path = "/users/{id}",
    tag = "Users",
    security(("bearer_auth" = [])),
    params(("id" = i64, Path, description = "User id")),
    responses(
        (status = 204, description = "User deleted successfully"),
        (status = 400, description = "User has payments", body = ApiError),
        (status = 403, description = "Permission denied", body = ApiError),
        (status = 404, description = "User not found for the ID", body = ApiError),
    )
)]
pub async fn delete_user_handler(
    State(state): State<Arc<AppState>>,
    Extension(auth): Extension<AuthContext>,
    Path(id): Path<i64>,
) -> Result<Response, AppError> {
    user_service::delete_user(state, auth, id).await
}
