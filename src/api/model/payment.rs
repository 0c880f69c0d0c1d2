use crate::db::entity::payment::{Payment, PaymentStatus};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreatePaymentRequest {
    #[validate(range(min = 1, message = "plan_id must be a positive id"))]
    #[schema(example = 1)]
    pub plan_id: i64,
    #[validate(range(min = 1, message = "voucher_id must be a positive id"))]
    pub voucher_id: Option<i64>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct CreatePaymentResponse {
    pub payment_id: i64,
    #[schema(example = 1718000000000123_i64)]
    pub order_code: i64,
    pub checkout_url: String,
    pub original_amount: i64,
    pub discount_amount: i64,
    pub final_amount: i64,
    pub status: PaymentStatus,
}

/// Query string PayOS appends to the return / cancel URL.
#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
#[serde(rename_all = "camelCase")]
pub struct PaymentReturnQuery {
    /// Order code of the payment attempt
    pub order_code: Option<String>,
    /// Gateway status (PAID, CANCELLED, ...)
    pub status: Option<String>,
    /// Set to "true" when the buyer cancelled
    pub cancel: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct WebhookAck {
    pub success: bool,
    pub message: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct PaymentPage {
    pub payments: Vec<Payment>,
    pub current_page: i64,
    pub total_items: i64,
    pub total_pages: i64,
    pub items_per_page: i64,
}
