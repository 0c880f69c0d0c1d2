use crate::config::app_config::AppState;
use crate::db::entity::user::Role;
use crate::error::error_model::AppError;
use axum::extract::{Request, State};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use axum_extra::headers::authorization::Bearer;
use axum_extra::headers::{Authorization, HeaderMapExt};
use chrono::Utc;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{error, warn};

/// Context inserted into request extensions after successful auth.
#[derive(Clone, Debug)]
pub struct AuthContext {
    pub user_id: i64,
    pub name: String,
    pub role: Role,
}

impl AuthContext {
    /// Role gate for a single operation.
    pub fn require_role(&self, allowed: &[Role]) -> Result<(), AppError> {
        if allowed.contains(&self.role) {
            Ok(())
        } else {
            warn!(
                user_id = self.user_id,
                role = self.role.as_str(),
                "Role not permitted for operation"
            );
            Err(AppError::forbidden(
                "You do not have permission to perform this action.",
            ))
        }
    }

    /// Passes when the caller owns the record or holds one of the `privileged` roles.
    pub fn require_self_or(&self, owner_id: i64, privileged: &[Role]) -> Result<(), AppError> {
        if self.user_id == owner_id || privileged.contains(&self.role) {
            Ok(())
        } else {
            Err(AppError::forbidden(
                "You do not have permission to access this resource.",
            ))
        }
    }

    pub fn is_staff(&self) -> bool {
        matches!(self.role, Role::Admin | Role::Employee)
    }
}

/// JWT claims.
///
/// * `sub` - The user id.
/// * `name` - The user's full name.
/// * `role` - The user's role at issue time.
/// * `iat` - The issued at time, in seconds since the epoch.
/// * `exp` - The expiration time, in seconds since the epoch.
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,
    pub name: String,
    pub role: Role,
    pub iat: i64,
    pub exp: i64,
}

/// Signs an HS256 access token for the user.
pub fn issue_token(
    secret: &SecretString,
    expiration_secs: u64,
    user_id: i64,
    name: &str,
    role: Role,
) -> Result<String, AppError> {
    let now = Utc::now().timestamp();
    let claims = Claims {
        sub: user_id.to_string(),
        name: name.to_string(),
        role,
        iat: now,
        exp: now + expiration_secs as i64,
    };
    encode(
        &Header::new(Algorithm::HS256),
        &claims,
        &EncodingKey::from_secret(secret.expose_secret().as_bytes()),
    )
    .map_err(|e| {
        error!("Failed to sign access token: {:?}", e);
        AppError::internal()
    })
}

/// Verifies signature and expiry and returns the caller identity.
pub fn decode_token(secret: &SecretString, token: &str) -> Result<AuthContext, AppError> {
    let mut validation = Validation::new(Algorithm::HS256);
    validation.leeway = 0;
    let token_data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.expose_secret().as_bytes()),
        &validation,
    )
    .map_err(|e| {
        warn!("JWT decode failed: {:?}", e);
        match e.kind() {
            jsonwebtoken::errors::ErrorKind::ExpiredSignature => {
                AppError::unauthorized("Token has expired")
            }
            _ => AppError::unauthorized("Invalid token"),
        }
    })?;

    let user_id = token_data
        .claims
        .sub
        .parse::<i64>()
        .map_err(|_| AppError::unauthorized("Invalid token subject"))?;

    Ok(AuthContext {
        user_id,
        name: token_data.claims.name,
        role: token_data.claims.role,
    })
}

/// Middleware function that enforces Bearer JWT authentication.
///
/// # Behavior
/// 1. Extracts the `Authorization: Bearer <token>` header from the request.
/// 2. Decodes and validates the JWT (HS256 signature and expiration).
/// 3. Inserts an `AuthContext` into the request extensions for downstream handlers.
///
/// Any failure short-circuits with 401.
pub async fn require_auth(
    State(state): State<Arc<AppState>>,
    mut req: Request,
    next: Next,
) -> Response {
    let bearer = match req.headers().typed_get::<Authorization<Bearer>>() {
        Some(Authorization(bearer)) if !bearer.token().is_empty() => bearer,
        _ => {
            return AppError::unauthorized("Missing or malformed Authorization header")
                .into_response()
        }
    };

    let auth_context = match decode_token(&state.jwt_secret, bearer.token()) {
        Ok(ctx) => ctx,
        Err(e) => return e.into_response(),
    };

    req.extensions_mut().insert(auth_context);
    next.run(req).await
}

#[cfg(test)]
mod tests {
    use super::*;

    fn secret() -> SecretString {
        "unit-test-secret".to_string().into()
    }

    #[test]
    fn token_round_trip_carries_identity() {
        let token = issue_token(&secret(), 3600, 42, "Jane Doe", Role::Employee).unwrap();
        let ctx = decode_token(&secret(), &token).unwrap();
        assert_eq!(ctx.user_id, 42);
        assert_eq!(ctx.name, "Jane Doe");
        assert_eq!(ctx.role, Role::Employee);
    }

    #[test]
    fn rejects_token_signed_with_other_secret() {
        let other: SecretString = "another-secret".to_string().into();
        let token = issue_token(&other, 3600, 1, "A", Role::Admin).unwrap();
        assert!(decode_token(&secret(), &token).is_err());
    }

    #[test]
    fn rejects_expired_token() {
        let now = Utc::now().timestamp();
        let claims = Claims {
            sub: "7".to_string(),
            name: "Old".to_string(),
            role: Role::Customer,
            iat: now - 7200,
            exp: now - 3600,
        };
        let token = encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &EncodingKey::from_secret(b"unit-test-secret"),
        )
        .unwrap();
        assert!(decode_token(&secret(), &token).is_err());
    }

    #[test]
    fn role_gate_checks_membership_and_ownership() {
        let customer = AuthContext {
            user_id: 5,
            name: "C".to_string(),
            role: Role::Customer,
        };
        assert!(customer.require_role(&[Role::Admin, Role::Employee]).is_err());
        assert!(customer.require_role(&[Role::Customer]).is_ok());
        assert!(customer.require_self_or(5, &[Role::Admin]).is_ok());
        assert!(customer.require_self_or(6, &[Role::Admin]).is_err());

        let admin = AuthContext {
            user_id: 1,
            name: "A".to_string(),
            role: Role::Admin,
        };
        assert!(admin.require_self_or(6, &[Role::Admin]).is_ok());
        assert!(admin.is_staff());
    }
}
