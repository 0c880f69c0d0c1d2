use crate::api::model::user::{StoredUser, PHONE_NUMBER_REGEX};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

#[derive(Debug, Serialize, Deserialize, Validate, ToSchema)]
pub struct RegisterRequest {
    #[validate(email(message = "Invalid email address"))]
    #[schema(example = "me@example.com")]
    pub email: String,
    #[validate(length(
        min = 6,
        max = 128,
        message = "Password must be between 6 and 128 characters"
    ))]
    #[schema(example = "SecretPassword123!")]
    pub password: String,
    #[validate(length(
        min = 1,
        max = 100,
        message = "Full name must be between 1 and 100 characters"
    ))]
    #[schema(example = "Nguyen Van A")]
    pub full_name: String,
    #[validate(regex(
        path = *PHONE_NUMBER_REGEX,
        message = "Phone number must contain 8 to 15 digits and optionally start with +"
    ))]
    #[schema(example = "+84901234567")]
    pub phone: Option<String>,
    pub date_of_birth: Option<NaiveDate>,
}

#[derive(Debug, Serialize, Deserialize, Validate, ToSchema)]
pub struct LoginRequest {
    #[validate(email(message = "Invalid email address"))]
    #[schema(example = "me@example.com")]
    pub email: String,
    #[validate(length(min = 1, message = "Password is required"))]
    #[schema(example = "SecretPassword123!")]
    pub password: String,
}

#[derive(Debug, Serialize, Deserialize, Validate, ToSchema)]
pub struct GoogleLoginRequest {
    #[validate(length(min = 1, message = "id_token cannot be empty"))]
    pub id_token: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct TokenResponse {
    #[schema(
        example = "eyJhbGciOiJIUzI1NiIsInR5cCI6IkpXVCJ9.eyJzdWIiOiIxIiwibmFtZSI6IkEiLCJyb2xlIjoiY3VzdG9tZXIifQ.sig"
    )]
    pub access_token: String,
    #[schema(example = "Bearer")]
    pub token_type: String,
    #[schema(example = 86400)]
    pub expires_in: i64,
    pub user: StoredUser,
}

/// Subset of the Google `tokeninfo` response that is checked.
#[derive(Debug, Deserialize)]
pub struct GoogleTokenInfo {
    pub aud: String,
    pub email: String,
    #[serde(default)]
    pub email_verified: GoogleBool,
    pub name: Option<String>,
    pub picture: Option<String>,
}

/// Google returns `email_verified` as either a JSON bool or the string "true".
#[derive(Debug, Default, Deserialize)]
#[serde(untagged)]
pub enum GoogleBool {
    Bool(bool),
    Text(String),
    #[default]
    Missing,
}

impl GoogleBool {
    pub fn is_true(&self) -> bool {
        match self {
            GoogleBool::Bool(b) => *b,
            GoogleBool::Text(s) => s.eq_ignore_ascii_case("true"),
            GoogleBool::Missing => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn google_email_verified_accepts_bool_or_string() {
        let info: GoogleTokenInfo = serde_json::from_str(
            r#"{"aud":"client","email":"a@b.c","email_verified":"true"}"#,
        )
        .unwrap();
        assert!(info.email_verified.is_true());
        let info: GoogleTokenInfo =
            serde_json::from_str(r#"{"aud":"client","email":"a@b.c","email_verified":false}"#)
                .unwrap();
        assert!(!info.email_verified.is_true());
        let info: GoogleTokenInfo =
            serde_json::from_str(r#"{"aud":"client","email":"a@b.c"}"#).unwrap();
        assert!(!info.email_verified.is_true());
    }

    #[test]
    fn register_request_validation() {
        let request = RegisterRequest {
            email: "not-an-email".to_string(),
            password: "123".to_string(),
            full_name: "".to_string(),
            phone: None,
            date_of_birth: None,
        };
        let errors = request.validate().unwrap_err();
        let fields = errors.field_errors();
        assert!(fields.contains_key("email"));
        assert!(fields.contains_key("password"));
        assert!(fields.contains_key("full_name"));
    }
}
