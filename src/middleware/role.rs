use crate::db::entity::user::Role;
use crate::error::error_model::AppError;
use crate::middleware::auth::AuthContext;
use axum::extract::{Request, State};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};

pub const ADMIN_ONLY: &[Role] = &[Role::Admin];
pub const STAFF: &[Role] = &[Role::Admin, Role::Employee];
pub const ALL_ROLES: &[Role] = &[Role::Admin, Role::Employee, Role::Customer];

/// Router-level role gate. Must run after `require_auth`.
///
/// ```rust,ignore
/// Router::new()
///     .route("/user-stats-by-month", get(handler))
///     .route_layer(axum::middleware::from_fn_with_state(STAFF, role_gate))
/// ```
pub async fn role_gate(
    State(allowed): State<&'static [Role]>,
    req: Request,
    next: Next,
) -> Response {
    let Some(auth) = req.extensions().get::<AuthContext>() else {
        return AppError::unauthorized("Authentication required").into_response();
    };
    if let Err(e) = auth.require_role(allowed) {
        return e.into_response();
    }
    next.run(req).await
}
