use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, Type};
use utoipa::ToSchema;

#[derive(Debug, FromRow, Serialize, ToSchema)]
pub struct Payment {
    pub id: i64,
    pub user_id: i64,
    pub plan_id: i64,
    pub voucher_id: Option<i64>,
    pub order_code: i64,
    pub original_amount: i64,
    pub discount_amount: i64,
    pub final_amount: i64,
    pub status: PaymentStatus,
    pub checkout_url: Option<String>,
    pub description: Option<String>,
    pub paid_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Type, Serialize, Deserialize, ToSchema)]
#[sqlx(type_name = "payment_status", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum PaymentStatus {
    Pending,
    Success,
    Cancelled,
    Failed,
}

impl PaymentStatus {
    /// Maps the gateway vocabulary (PAID / CANCELLED / anything else).
    pub fn from_gateway(status: &str) -> Self {
        match status.trim().to_ascii_uppercase().as_str() {
            "PAID" => PaymentStatus::Success,
            "CANCELLED" => PaymentStatus::Cancelled,
            _ => PaymentStatus::Failed,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentStatus::Pending => "pending",
            PaymentStatus::Success => "success",
            PaymentStatus::Cancelled => "cancelled",
            PaymentStatus::Failed => "failed",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn maps_gateway_status_vocabulary() {
        assert_eq!(PaymentStatus::from_gateway("PAID"), PaymentStatus::Success);
        assert_eq!(PaymentStatus::from_gateway("paid"), PaymentStatus::Success);
        assert_eq!(
            PaymentStatus::from_gateway("CANCELLED"),
            PaymentStatus::Cancelled
        );
        assert_eq!(PaymentStatus::from_gateway("PENDING"), PaymentStatus::Failed);
        assert_eq!(PaymentStatus::from_gateway(""), PaymentStatus::Failed);
    }
}
