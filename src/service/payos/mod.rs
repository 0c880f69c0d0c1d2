//! PayOS payment gateway bridge.
//!
//! Payment requests and webhook payloads are signed with HMAC-SHA256 using the
//! merchant checksum key. Amounts are integer VND.

use crate::config::app_config::AppConfig;
use hmac::{Hmac, Mac};
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use sha2::Sha256;
use tracing::{error, info};
use utoipa::ToSchema;

type HmacSha256 = Hmac<Sha256>;

/// PayOS rejects descriptions longer than this.
pub const MAX_DESCRIPTION_LEN: usize = 25;

pub struct PayOsClient {
    http: reqwest::Client,
    client_id: String,
    api_key: SecretString,
    checksum_key: SecretString,
    base_url: String,
    return_url: String,
    cancel_url: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct PaymentRequestBody<'a> {
    order_code: i64,
    amount: i64,
    description: &'a str,
    cancel_url: &'a str,
    return_url: &'a str,
    signature: String,
}

#[derive(Debug, Deserialize)]
struct GatewayEnvelope<T> {
    code: String,
    desc: String,
    data: Option<T>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentLink {
    pub checkout_url: String,
    pub payment_link_id: Option<String>,
}

/// Webhook body as posted by PayOS.
#[derive(Debug, Deserialize, ToSchema)]
pub struct WebhookPayload {
    pub code: Option<String>,
    pub desc: Option<String>,
    #[serde(default)]
    pub success: bool,
    #[schema(value_type = Object)]
    pub data: Map<String, Value>,
    pub signature: String,
}

#[derive(Debug, derive_more::Display)]
pub enum GatewayError {
    #[display("payment gateway request failed: {_0}")]
    Transport(String),
    #[display("payment gateway rejected request: {code} {desc}")]
    Rejected { code: String, desc: String },
}

impl PayOsClient {
    pub fn new(config: &AppConfig, http: reqwest::Client) -> Self {
        Self {
            http,
            client_id: config.payos_client_id.clone(),
            api_key: config.payos_api_key.clone().into(),
            checksum_key: config.payos_checksum_key.clone().into(),
            base_url: config.payos_base_url.trim_end_matches('/').to_string(),
            return_url: config.payos_return_url.clone(),
            cancel_url: config.payos_cancel_url.clone(),
        }
    }

    /// Creates a checkout link for `order_code` and returns it.
    #[tracing::instrument(skip(self), fields(service.name = "payos", order_code = order_code))]
    pub async fn create_payment_link(
        &self,
        order_code: i64,
        amount: i64,
        description: &str,
    ) -> Result<PaymentLink, GatewayError> {
        let description = truncate_description(description);
        let signature = sign(
            self.checksum_key.expose_secret(),
            &payment_request_signing_data(
                amount,
                &self.cancel_url,
                &description,
                order_code,
                &self.return_url,
            ),
        );
        let body = PaymentRequestBody {
            order_code,
            amount,
            description: &description,
            cancel_url: &self.cancel_url,
            return_url: &self.return_url,
            signature,
        };

        let response = self
            .http
            .post(format!("{}/v2/payment-requests", self.base_url))
            .header("x-client-id", &self.client_id)
            .header("x-api-key", self.api_key.expose_secret())
            .json(&body)
            .send()
            .await
            .map_err(|e| GatewayError::Transport(e.to_string()))?;

        let envelope: GatewayEnvelope<PaymentLink> = response
            .json()
            .await
            .map_err(|e| GatewayError::Transport(e.to_string()))?;

        match envelope.data {
            Some(link) if envelope.code == "00" => {
                info!("Created payment link for order {}", order_code);
                Ok(link)
            }
            _ => {
                error!(
                    "PayOS rejected order {}: {} {}",
                    order_code, envelope.code, envelope.desc
                );
                Err(GatewayError::Rejected {
                    code: envelope.code,
                    desc: envelope.desc,
                })
            }
        }
    }

    /// Checks the webhook signature against the payload `data` object.
    pub fn verify_webhook(&self, payload: &WebhookPayload) -> bool {
        verify_signature(
            self.checksum_key.expose_secret(),
            &webhook_signing_data(&payload.data),
            &payload.signature,
        )
    }
}

/// Signing string for a payment request; keys in alphabetical order.
pub fn payment_request_signing_data(
    amount: i64,
    cancel_url: &str,
    description: &str,
    order_code: i64,
    return_url: &str,
) -> String {
    format!(
        "amount={}&cancelUrl={}&description={}&orderCode={}&returnUrl={}",
        amount, cancel_url, description, order_code, return_url
    )
}

/// Signing string for a webhook `data` object: sorted `key=value` pairs joined by `&`.
pub fn webhook_signing_data(data: &Map<String, Value>) -> String {
    let mut keys: Vec<&String> = data.keys().collect();
    keys.sort();
    keys.into_iter()
        .map(|key| {
            let value = match &data[key.as_str()] {
                Value::Null => String::new(),
                Value::String(s) if s == "null" || s == "undefined" => String::new(),
                Value::String(s) => s.clone(),
                other => other.to_string(),
            };
            format!("{}={}", key, value)
        })
        .collect::<Vec<_>>()
        .join("&")
}

pub fn sign(key: &str, data: &str) -> String {
    let mut mac =
        <HmacSha256 as Mac>::new_from_slice(key.as_bytes()).expect("HMAC accepts any key length");
    mac.update(data.as_bytes());
    hex::encode(mac.finalize().into_bytes())
}

pub fn verify_signature(key: &str, data: &str, signature: &str) -> bool {
    let Ok(expected) = hex::decode(signature) else {
        return false;
    };
    let Ok(mut mac) = <HmacSha256 as Mac>::new_from_slice(key.as_bytes()) else {
        return false;
    };
    mac.update(data.as_bytes());
    mac.verify_slice(&expected).is_ok()
}

fn truncate_description(description: &str) -> String {
    description.chars().take(MAX_DESCRIPTION_LEN).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn payment_request_signing_data_is_alphabetical() {
        let data = payment_request_signing_data(
            50000,
            "https://x/cancel",
            "Plan 1",
            123,
            "https://x/return",
        );
        assert_eq!(
            data,
            "amount=50000&cancelUrl=https://x/cancel&description=Plan 1&orderCode=123&returnUrl=https://x/return"
        );
    }

    #[test]
    fn webhook_signing_data_sorts_keys_and_blanks_nulls() {
        let data = json!({
            "orderCode": 123,
            "amount": 3000,
            "description": "VQRIO123",
            "counterAccountName": null,
            "code": "00"
        });
        let map = data.as_object().unwrap().clone();
        assert_eq!(
            webhook_signing_data(&map),
            "amount=3000&code=00&counterAccountName=&description=VQRIO123&orderCode=123"
        );
    }

    #[test]
    fn signature_round_trip_and_tamper_detection() {
        let signature = sign("checksum", "amount=1&orderCode=2");
        assert_eq!(signature.len(), 64);
        assert!(verify_signature("checksum", "amount=1&orderCode=2", &signature));
        assert!(!verify_signature("checksum", "amount=9&orderCode=2", &signature));
        assert!(!verify_signature("other", "amount=1&orderCode=2", &signature));
        assert!(!verify_signature("checksum", "amount=1&orderCode=2", "not-hex"));
    }

    #[test]
    fn descriptions_are_truncated_for_the_gateway() {
        let long = "Subscription plan premium yearly";
        assert_eq!(truncate_description(long).chars().count(), MAX_DESCRIPTION_LEN);
        assert_eq!(truncate_description("short"), "short");
    }
}
