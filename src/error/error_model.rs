use derive_more::Display;
use serde::Serialize;
use tracing::error;
use utoipa::ToSchema;
use validator::ValidationErrors;

// Error carried by every handler and service.
pub struct AppError {
    pub error_type: ErrorType,
    pub error_message: String,
}

#[derive(Debug, Display, derive_more::Error, Clone)]
pub enum ErrorType {
    #[display("Not found")]
    NotFound,
    #[display("Bad request")]
    BadRequest,
    #[display("Internal server error")]
    InternalServerError,
    #[display("Authentication error")]
    UnauthorizedError,
    #[display("Permission denied")]
    ForbiddenError,
    #[display("Request validation error")]
    RequestValidationError {
        validation_error: ValidationErrors,
        object: String,
    },
}

impl AppError {
    // constructor.
    pub fn new(error_type: ErrorType, message: impl Into<String>) -> Self {
        Self {
            error_type,
            error_message: message.into(),
        }
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(ErrorType::BadRequest, message)
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(ErrorType::NotFound, message)
    }

    pub fn forbidden(message: impl Into<String>) -> Self {
        Self::new(ErrorType::ForbiddenError, message)
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::new(ErrorType::UnauthorizedError, message)
    }

    pub fn internal() -> Self {
        Self::new(
            ErrorType::InternalServerError,
            "Something went wrong. Please try again later.",
        )
    }

    /// Wraps `validator` errors for the named request object.
    pub fn validation(validation_error: ValidationErrors, object: &str) -> Self {
        Self::new(
            ErrorType::RequestValidationError {
                validation_error,
                object: object.to_string(),
            },
            "Validation error. Check the request body.",
        )
    }
}

impl std::fmt::Debug for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.error_type, self.error_message)
    }
}

/// Database errors become 400 for constraint violations and 500 otherwise.
///
/// The underlying driver message is only logged, never returned to the caller.
impl From<sqlx::Error> for AppError {
    fn from(e: sqlx::Error) -> Self {
        if let Some(db_error) = e.as_database_error() {
            if db_error.is_unique_violation() {
                return AppError::bad_request(format!(
                    "Duplicate value violates unique constraint {}",
                    db_error.constraint().unwrap_or("unknown")
                ));
            }
            if db_error.is_foreign_key_violation() {
                return AppError::bad_request(format!(
                    "Referenced record does not exist or is still in use ({})",
                    db_error.constraint().unwrap_or("unknown")
                ));
            }
        }
        error!("Database error: {:?}", e);
        AppError::internal()
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ApiError {
    #[schema(example = "404")]
    pub status: u16,
    #[schema(example = "2024-01-01T12:00:00.000Z")]
    pub time: String,
    #[schema(example = "Not found")]
    pub error: String,
    #[schema(example = "Course not found for ID: 42")]
    pub message: String,
    #[serde(rename = "subErrors")]
    pub sub_errors: Vec<ValidationError>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ValidationError {
    #[schema(example = "RegisterRequest")]
    pub object: String,
    #[schema(example = "email")]
    pub field: String,
    #[schema(example = "notAValidEmail")]
    pub rejected_value: String,
    #[schema(example = "Invalid email address")]
    pub message: String,
    #[schema(example = "email")]
    pub code: String,
}
