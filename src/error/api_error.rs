use crate::error::error_model::{ApiError, AppError, ErrorType, ValidationError};
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use chrono::Utc;
use tracing::{info, warn};

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, sub_errors) = match &self.error_type {
            ErrorType::NotFound => (StatusCode::NOT_FOUND, vec![]),
            ErrorType::BadRequest => (StatusCode::BAD_REQUEST, vec![]),
            ErrorType::InternalServerError => (StatusCode::INTERNAL_SERVER_ERROR, vec![]),
            ErrorType::UnauthorizedError => (StatusCode::UNAUTHORIZED, vec![]),
            ErrorType::ForbiddenError => (StatusCode::FORBIDDEN, vec![]),
            ErrorType::RequestValidationError {
                validation_error,
                object,
            } => {
                let mut validation_sub_errs = Vec::new();
                for (field, field_errors) in validation_error.field_errors() {
                    for field_error in field_errors {
                        info!("Validation error on field: {:?}", field_error);
                        validation_sub_errs.push(ValidationError {
                            object: object.to_string(),
                            field: field.to_string(),
                            rejected_value: field_error
                                .params
                                .get("value")
                                .map(|v| v.to_string())
                                .unwrap_or_default(),
                            message: field_error
                                .message
                                .as_ref()
                                .map(|m| m.to_string())
                                .unwrap_or_default(),
                            code: field_error.code.to_string(),
                        })
                    }
                }
                (StatusCode::BAD_REQUEST, validation_sub_errs)
            }
        };
        if status.is_client_error() {
            warn!(status = status.as_u16(), "{}", self.error_message);
        }

        let api_error = ApiError {
            status: status.into(),
            time: Utc::now().to_rfc3339(),
            error: self.error_type.to_string(),
            message: self.error_message,
            sub_errors,
        };

        Response::builder()
            .status(status)
            .header(header::CONTENT_TYPE, "application/json")
            .body(axum::body::Body::from(
                serde_json::to_string(&api_error).unwrap_or_default(),
            ))
            .unwrap_or_else(|_| Response::new(axum::body::Body::empty()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use validator::Validate;

    #[derive(Validate)]
    struct NameForm {
        #[validate(length(min = 3, message = "too short"))]
        name: String,
    }

    #[test]
    fn maps_error_types_to_status_codes() {
        let cases = [
            (AppError::not_found("x"), StatusCode::NOT_FOUND),
            (AppError::bad_request("x"), StatusCode::BAD_REQUEST),
            (AppError::unauthorized("x"), StatusCode::UNAUTHORIZED),
            (AppError::forbidden("x"), StatusCode::FORBIDDEN),
            (AppError::internal(), StatusCode::INTERNAL_SERVER_ERROR),
        ];
        for (error, expected) in cases {
            assert_eq!(error.into_response().status(), expected);
        }
    }

    #[test]
    fn validation_errors_are_bad_requests() {
        let form = NameForm {
            name: "ab".to_string(),
        };
        let errors = form.validate().unwrap_err();
        let response = AppError::validation(errors, "NameForm").into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}
