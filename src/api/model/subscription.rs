use crate::db::entity::subscription::SubscriptionStatus;
use chrono::{DateTime, Utc};
use serde::Deserialize;
use utoipa::ToSchema;
use validator::Validate;

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreatePlanRequest {
    #[validate(length(min = 1, max = 100, message = "Name must be between 1 and 100 characters"))]
    #[schema(example = "Premium monthly")]
    pub name: String,
    pub description: Option<String>,
    #[validate(range(min = 0, message = "Price cannot be negative"))]
    #[schema(example = 99000)]
    pub price: i64,
    #[validate(range(min = 1, message = "Duration must be at least one day"))]
    #[schema(example = 30)]
    pub duration_days: i32,
    pub is_active: Option<bool>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdatePlanRequest {
    #[validate(length(min = 1, max = 100, message = "Name must be between 1 and 100 characters"))]
    pub name: Option<String>,
    pub description: Option<String>,
    #[validate(range(min = 0, message = "Price cannot be negative"))]
    pub price: Option<i64>,
    #[validate(range(min = 1, message = "Duration must be at least one day"))]
    pub duration_days: Option<i32>,
    pub is_active: Option<bool>,
}

/// Manual activation by an admin; the end date follows the plan duration.
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateSubscriptionRequest {
    pub user_id: i64,
    pub plan_id: i64,
    pub start_date: Option<DateTime<Utc>>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateSubscriptionRequest {
    pub end_date: Option<DateTime<Utc>>,
    pub status: Option<SubscriptionStatus>,
}
