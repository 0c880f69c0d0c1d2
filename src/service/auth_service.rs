use crate::api::model::auth::{
    GoogleLoginRequest, GoogleTokenInfo, LoginRequest, RegisterRequest, TokenResponse,
};
use crate::api::model::user::StoredUser;
use crate::config::app_config::AppState;
use crate::db::entity::user::{Role, Users};
use crate::db::repo::users_repository::{self, NewUser};
use crate::error::error_model::AppError;
use crate::middleware::auth::{issue_token, AuthContext};
use crate::service::validate_request;
use crate::util::crypto_helper;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use std::sync::Arc;
use tracing::{error, info, warn};

const GOOGLE_TOKENINFO_URL: &str = "https://oauth2.googleapis.com/tokeninfo";

fn token_response(state: &AppState, user: Users) -> Result<TokenResponse, AppError> {
    let access_token = issue_token(
        &state.jwt_secret,
        state.jwt_expiration,
        user.id,
        &user.full_name,
        user.role,
    )?;
    Ok(TokenResponse {
        access_token,
        token_type: "Bearer".to_string(),
        expires_in: state.jwt_expiration as i64,
        user: StoredUser::from(user),
    })
}

/// Self-service registration. New accounts always get the `customer` role.
#[tracing::instrument(
    skip(state, request),
    fields(
        service.name = "auth_service",
        service.operation = "register",
        user.email = %request.email
    )
)]
pub async fn register(
    state: Arc<AppState>,
    request: RegisterRequest,
) -> Result<Response, AppError> {
    validate_request(&request, "RegisterRequest")?;

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
            role: Role::Customer,
            date_of_birth: request.date_of_birth,
            picture_url: None,
        },
    )
    .await?;
    info!("Registered user {}", user.id);

    Ok((StatusCode::CREATED, Json(token_response(&state, user)?)).into_response())
}

/// Authenticates a user with email and password.
///
/// Unknown emails still run a password verification against a dummy hash so the
/// response time does not reveal whether the account exists.
///
/// # Errors
///
/// * 400 when the request body is invalid.
/// * 401 when the email is unknown, the account has no password, or the password is wrong.
#[tracing::instrument(
    skip(state, request),
    fields(service.name = "auth_service", service.operation = "login")
)]
pub async fn login(state: Arc<AppState>, request: LoginRequest) -> Result<Response, AppError> {
    validate_request(&request, "LoginRequest")?;

    let user = users_repository::get_user_by_email(&state.pg_pool, &request.email).await?;
    let verified = match user.as_ref().and_then(|u| u.password_hash.as_deref()) {
        Some(hash) => crypto_helper::verify_password(&state.argon_pepper, &request.password, hash),
        None => {
            crypto_helper::fake_password_verification(
                &state.argon_pepper,
                &state.dummy_hashed_password,
            );
            false
        }
    };

    match user {
        Some(user) if verified => {
            info!("User {} logged in", user.id);
            Ok((StatusCode::OK, Json(token_response(&state, user)?)).into_response())
        }
        _ => {
            warn!("Failed login attempt");
            Err(AppError::unauthorized(
                "Invalid credentials. Check email and password.",
            ))
        }
    }
}

/// Signs in with a Google ID token, creating a customer account on first use.
#[tracing::instrument(
    skip(state, request),
    fields(service.name = "auth_service", service.operation = "google_login")
)]
pub async fn google_login(
    state: Arc<AppState>,
    request: GoogleLoginRequest,
) -> Result<Response, AppError> {
    validate_request(&request, "GoogleLoginRequest")?;

    let response = state
        .http_client
        .get(GOOGLE_TOKENINFO_URL)
        .query(&[("id_token", request.id_token.as_str())])
        .send()
        .await
        .map_err(|e| {
            error!("Google tokeninfo request failed: {:?}", e);
            AppError::internal()
        })?;
    if !response.status().is_success() {
        warn!("Google rejected id token with status {}", response.status());
        return Err(AppError::unauthorized("Invalid Google token"));
    }
    let token_info: GoogleTokenInfo = response.json().await.map_err(|e| {
        error!("Unreadable Google tokeninfo response: {:?}", e);
        AppError::unauthorized("Invalid Google token")
    })?;

    if token_info.aud != state.google_client_id {
        warn!("Google token issued for another audience");
        return Err(AppError::unauthorized("Invalid Google token"));
    }
    if !token_info.email_verified.is_true() {
        return Err(AppError::unauthorized("Google email is not verified"));
    }

    let user = match users_repository::get_user_by_email(&state.pg_pool, &token_info.email).await? {
        Some(user) => user,
        None => {
            let full_name = token_info
                .name
                .clone()
                .unwrap_or_else(|| token_info.email.clone());
            let user = users_repository::create_user(
                &state.pg_pool,
                NewUser {
                    email: &token_info.email,
                    password_hash: None,
                    full_name: &full_name,
                    phone: None,
                    role: Role::Customer,
                    date_of_birth: None,
                    picture_url: token_info.picture.as_deref(),
                },
            )
            .await?;
            info!("Created user {} from Google sign-in", user.id);
            user
        }
    };

    Ok((StatusCode::OK, Json(token_response(&state, user)?)).into_response())
}

/// Profile of the authenticated caller.
pub async fn me(state: Arc<AppState>, auth: AuthContext) -> Result<Response, AppError> {
    let user = users_repository::get_user_by_id(&state.pg_pool, auth.user_id)
        .await?
        .ok_or_else(|| AppError::not_found("User no longer exists"))?;
    Ok((StatusCode::OK, Json(StoredUser::from(user))).into_response())
}
