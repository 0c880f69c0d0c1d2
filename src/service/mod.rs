use crate::error::error_model::AppError;
use validator::Validate;

pub mod ai_model_service;
pub mod auth_service;
pub mod course_service;
pub mod dashboard_service;
pub mod lesson_content_service;
pub mod notification_service;
pub mod payment_service;
pub mod payos;
pub mod progress_service;
pub mod subscription_service;
pub mod user_service;
pub mod voucher_service;

/// Runs `validator` rules on a request body, mapping failures to a 400 with field details.
pub(crate) fn validate_request<T: Validate>(request: &T, object: &str) -> Result<(), AppError> {
    request
        .validate()
        .map_err(|e| AppError::validation(e, object))
}
