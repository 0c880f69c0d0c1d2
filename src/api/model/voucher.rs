use crate::db::entity::voucher::DiscountType;
use chrono::{DateTime, Utc};
use serde::Deserialize;
use utoipa::ToSchema;
use validator::{Validate, ValidationError};

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[validate(schema(function = "validate_voucher_window"))]
pub struct CreateVoucherRequest {
    pub description: Option<String>,
    pub discount_type: DiscountType,
    #[validate(range(min = 1, message = "Discount value must be positive"))]
    #[schema(example = 20)]
    pub discount_value: i64,
    #[validate(range(min = 1, message = "Max usage must be at least 1"))]
    #[schema(example = 100)]
    pub max_usage: i32,
    pub valid_from: DateTime<Utc>,
    pub valid_until: DateTime<Utc>,
    pub is_active: Option<bool>,
}

fn validate_voucher_window(request: &CreateVoucherRequest) -> Result<(), ValidationError> {
    if request.valid_until <= request.valid_from {
        return Err(ValidationError::new("window")
            .with_message("valid_until must be after valid_from".into()));
    }
    if request.discount_type == DiscountType::Percentage && request.discount_value > 100 {
        return Err(ValidationError::new("percentage")
            .with_message("Percentage discount cannot exceed 100".into()));
    }
    Ok(())
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateVoucherRequest {
    pub description: Option<String>,
    pub discount_type: Option<DiscountType>,
    #[validate(range(min = 1, message = "Discount value must be positive"))]
    pub discount_value: Option<i64>,
    #[validate(range(min = 1, message = "Max usage must be at least 1"))]
    pub max_usage: Option<i32>,
    pub valid_from: Option<DateTime<Utc>>,
    pub valid_until: Option<DateTime<Utc>>,
    pub is_active: Option<bool>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn rejects_inverted_window_and_large_percentage() {
        let now = Utc::now();
        let mut request = CreateVoucherRequest {
            description: None,
            discount_type: DiscountType::Percentage,
            discount_value: 20,
            max_usage: 10,
            valid_from: now,
            valid_until: now + Duration::days(7),
            is_active: None,
        };
        assert!(request.validate().is_ok());

        request.discount_value = 150;
        assert!(request.validate().is_err());

        request.discount_value = 20;
        request.valid_until = now - Duration::days(1);
        assert!(request.validate().is_err());
    }
}
