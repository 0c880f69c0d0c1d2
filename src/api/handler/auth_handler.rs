use crate::api::model::auth::{GoogleLoginRequest, LoginRequest, RegisterRequest, TokenResponse};
use crate::api::model::user::StoredUser;
use crate::config::app_config::AppState;
use crate::error::error_model::{ApiError, AppError};
use crate::middleware::auth::AuthContext;
use crate::service::auth_service;
use axum::extract::State;
use axum::response::Response;
use axum::routing::{get, post};
use axum::{Extension, Json, Router};
use std::sync::Arc;

/// Public authentication routes.
pub fn auth_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/register", post(register_handler))
        .route("/login", post(login_handler))
        .route("/google-login", post(google_login_handler))
}

/// Authentication routes that need a bearer token.
pub fn auth_protected_routes() -> Router<Arc<AppState>> {
    Router::new().route("/me", get(me_handler))
}

/// Register
///
/// Create a customer account and return an access token.
#[utoipa::path(
    post,
    path = "/auth/register",
    tag = "Authentication",
    request_body = RegisterRequest,
    responses(
        (status = 201, description = "User registered", body = TokenResponse),
        (status = 400, description = "Invalid request or email already registered", body = ApiError),
        (status = 500, description = "Internal server error", body = ApiError),
    )
)]
pub async fn register_handler(
    State(state): State<Arc<AppState>>,
    Json(request): Json<RegisterRequest>,
) -> Result<Response, AppError> {
    auth_service::register(state, request).await
}

/// Authenticate user
///
/// Authenticate user with email and password.
#[utoipa::path(
    post,
    path = "/auth/login",
    tag = "Authentication",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "User authenticated successfully", body = TokenResponse),
        (status = 400, description = "Invalid request", body = ApiError),
        (status = 401, description = "Invalid credentials", body = ApiError),
        (status = 500, description = "Internal server error", body = ApiError),
    )
)]
pub async fn login_handler(
    State(state): State<Arc<AppState>>,
    Json(request): Json<LoginRequest>,
) -> Result<Response, AppError> {
    auth_service::login(state, request).await
}

/// Google sign-in
///
/// Exchange a Google ID token for an access token. Unknown emails get a new customer account.
#[utoipa::path(
    post,
    path = "/auth/google-login",
    tag = "Authentication",
    request_body = GoogleLoginRequest,
    responses(
        (status = 200, description = "User authenticated successfully", body = TokenResponse),
        (status = 401, description = "Google token rejected", body = ApiError),
        (status = 500, description = "Internal server error", body = ApiError),
    )
)]
pub async fn google_login_handler(
    State(state): State<Arc<AppState>>,
    Json(request): Json<GoogleLoginRequest>,
) -> Result<Response, AppError> {
    auth_service::google_login(state, request).await
}

/// Current user
#[utoipa::path(
    get,
    path = "/auth/me",
    tag = "Authentication",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Authenticated user", body = StoredUser),
        (status = 401, description = "Missing or invalid token", body = ApiError),
    )
)]
pub async fn me_handler(
    State(state): State<Arc<AppState>>,
    Extension(auth): Extension<AuthContext>,
) -> Result<Response, AppError> {
    auth_service::me(state, auth).await
}
