use crate::api::handler::ai_model_handler::ai_model_routes;
use crate::api::handler::auth_handler::{auth_protected_routes, auth_routes};
use crate::api::handler::comment_handler::comment_routes;
use crate::api::handler::course_handler::course_routes;
use crate::api::handler::dashboard_handler::dashboard_routes;
use crate::api::handler::hand_motion_handler::hand_motion_routes;
use crate::api::handler::lesson_handler::lesson_routes;
use crate::api::handler::notification_handler::notification_routes;
use crate::api::handler::payment_handler::{payment_routes, payos_callback_routes};
use crate::api::handler::progress_handler::progress_routes;
use crate::api::handler::resource_handler::resource_routes;
use crate::api::handler::subscription_handler::{plan_routes, subscription_routes};
use crate::api::handler::user_handler::user_routes;
use crate::api::handler::voucher_handler::voucher_routes;
use crate::api::handler::welcome_handler::welcome_routes;
use crate::api::openapi::ApiDoc;
use crate::config::app_config::AppState;
use crate::middleware::auth::require_auth;
use crate::middleware::role::{role_gate, STAFF};
use axum::http::{header, HeaderValue, Method};
use axum::middleware::from_fn_with_state;
use axum::Router;
use std::sync::Arc;
use std::time::Duration;
use tower_http::compression::CompressionLayer;
use tower_http::cors::CorsLayer;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;
use tracing::warn;
use utoipa::OpenApi;
use utoipa_scalar::{Scalar, Servable};

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Builds the full application router.
///
/// Routes are split in two groups: public ones (health, register, login, Google
/// login, PayOS callbacks, API docs) and everything else, which sits behind
/// `require_auth`. The dashboard is additionally gated to admin and employee.
pub fn create_router(state: Arc<AppState>) -> Router {
    let public = Router::new()
        .merge(welcome_routes())
        .nest("/auth", auth_routes())
        .merge(payos_callback_routes());

    let protected = Router::new()
        .nest("/auth", auth_protected_routes())
        .nest("/users", user_routes())
        .nest("/courses", course_routes())
        .nest("/lessons", lesson_routes())
        .nest("/resources", resource_routes())
        .nest("/comments", comment_routes())
        .nest("/ai-models", ai_model_routes())
        .nest("/hand-motions", hand_motion_routes())
        .nest("/notifications", notification_routes())
        .nest("/vouchers", voucher_routes())
        .nest("/subscription-plans", plan_routes())
        .nest("/subscriptions", subscription_routes())
        .nest("/payments", payment_routes())
        .merge(progress_routes())
        .nest(
            "/dashboard",
            dashboard_routes().route_layer(from_fn_with_state(STAFF, role_gate)),
        )
        .route_layer(from_fn_with_state(state.clone(), require_auth));

    Router::new()
        .merge(public)
        .merge(protected)
        .merge(Scalar::with_url("/docs", ApiDoc::openapi()))
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer(&state.frontend_url))
        .layer(TimeoutLayer::new(REQUEST_TIMEOUT))
        .layer(CompressionLayer::new())
        .with_state(state)
}

fn cors_layer(frontend_url: &str) -> CorsLayer {
    let cors = CorsLayer::new()
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE])
        .allow_credentials(true);
    match HeaderValue::from_str(frontend_url) {
        Ok(origin) => cors.allow_origin(origin),
        Err(e) => {
            warn!("Invalid FRONTEND_URL {:?} for CORS: {}", frontend_url, e);
            cors
        }
    }
}
