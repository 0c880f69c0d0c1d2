use crate::db::entity::user::{Role, Users};
use chrono::{DateTime, NaiveDate, Utc};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;
use utoipa::ToSchema;
use validator::Validate;

pub(crate) static PHONE_NUMBER_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\+?[0-9]{8,15}$").unwrap());

#[derive(Debug, Serialize, Deserialize, Validate, ToSchema)]
pub struct CreateUserRequest {
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
    pub role: Option<Role>,
    pub date_of_birth: Option<NaiveDate>,
    #[validate(url(message = "Picture must be a valid URL"))]
    pub picture_url: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, Validate, ToSchema)]
pub struct UpdateUserRequest {
    #[validate(length(
        min = 1,
        max = 100,
        message = "Full name must be between 1 and 100 characters"
    ))]
    #[schema(example = "Nguyen Van B")]
    pub full_name: Option<String>,
    #[validate(regex(
        path = *PHONE_NUMBER_REGEX,
        message = "Phone number must contain 8 to 15 digits and optionally start with +"
    ))]
    pub phone: Option<String>,
    pub date_of_birth: Option<NaiveDate>,
    #[validate(url(message = "Picture must be a valid URL"))]
    pub picture_url: Option<String>,
    /// Only admins may change roles.
    pub role: Option<Role>,
}

#[derive(Debug, Serialize, Deserialize, Validate, ToSchema)]
pub struct ChangePasswordRequest {
    #[validate(length(min = 1, message = "Current password is required"))]
    pub current_password: String,
    #[validate(length(
        min = 6,
        max = 128,
        message = "Password must be between 6 and 128 characters"
    ))]
    pub new_password: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct StoredUser {
    #[schema(example = 1)]
    pub id: i64,
    #[schema(example = "me@example.com")]
    pub email: String,
    #[schema(example = "Nguyen Van A")]
    pub full_name: String,
    pub phone: Option<String>,
    pub role: Role,
    pub date_of_birth: Option<NaiveDate>,
    pub picture_url: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct StoredUsers {
    pub users: Vec<StoredUser>,
    #[schema(example = 1)]
    pub current_page: i64,
    #[schema(example = 120)]
    pub total_items: i64,
    #[schema(example = 6)]
    pub total_pages: i64,
    #[schema(example = 20)]
    pub items_per_page: i64,
    #[schema(example = 20)]
    pub items_in_page: i64,
}

impl From<Users> for StoredUser {
    fn from(user: Users) -> Self {
        StoredUser {
            id: user.id,
            email: user.email,
            full_name: user.full_name,
            phone: user.phone,
            role: user.role,
            date_of_birth: user.date_of_birth,
            picture_url: user.picture_url,
            created_at: user.created_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn phone_numbers_are_validated() {
        let mut request = UpdateUserRequest {
            full_name: None,
            phone: Some("+84901234567".to_string()),
            date_of_birth: None,
            picture_url: None,
            role: None,
        };
        assert!(request.validate().is_ok());
        request.phone = Some("12-34".to_string());
        assert!(request.validate().is_err());
    }
}
