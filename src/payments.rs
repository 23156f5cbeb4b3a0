use hmac::{Hmac, Mac};
use serde::Deserialize;
use sha2::Sha256;
use uuid::Uuid;

use crate::error::ApiError;
use crate::models::contracts;

type HmacSha256 = Hmac<Sha256>;

/// Thin client for the hosted-checkout payment gateway. Only two calls are
/// consumed: creating a checkout session and verifying webhook signatures —
/// gateway internals stay external.
#[derive(Clone)]
pub struct PaymentClient {
    http: reqwest::Client,
    api_base: String,
    secret_key: String,
}

/// The slice of the gateway's session object we care about.
#[derive(Debug, Clone, Deserialize)]
pub struct CheckoutSession {
    pub id: String,
    /// Hosted payment page the client gets redirected to.
    pub url: String,
}

/// Webhook envelope: `{"type": "...", "data": {"object": {...}}}`.
#[derive(Debug, Deserialize)]
pub struct WebhookEvent {
    #[serde(rename = "type")]
    pub event_type: String,
    pub data: WebhookData,
}

#[derive(Debug, Deserialize)]
pub struct WebhookData {
    pub object: WebhookObject,
}

#[derive(Debug, Deserialize)]
pub struct WebhookObject {
    #[serde(default)]
    pub metadata: WebhookMetadata,
}

#[derive(Debug, Default, Deserialize)]
pub struct WebhookMetadata {
    pub contract_id: Option<Uuid>,
}

impl PaymentClient {
    pub fn new(api_base: String, secret_key: String) -> Self {
        Self {
            http: reqwest::Client::new(),
            api_base,
            secret_key,
        }
    }

    /// Create a hosted checkout session for a contract. The contract id
    /// travels in the session metadata and comes back on the webhook.
    pub async fn create_checkout_session(
        &self,
        contract: &contracts::Model,
        success_url: &str,
        cancel_url: &str,
    ) -> Result<CheckoutSession, ApiError> {
        let params = [
            ("mode", "payment".to_string()),
            ("success_url", success_url.to_string()),
            ("cancel_url", cancel_url.to_string()),
            ("line_items[0][quantity]", "1".to_string()),
            (
                "line_items[0][price_data][currency]",
                "usd".to_string(),
            ),
            (
                "line_items[0][price_data][unit_amount]",
                contract.price.to_string(),
            ),
            (
                "line_items[0][price_data][product_data][name]",
                contract.title.clone(),
            ),
            ("metadata[contract_id]", contract.id.to_string()),
        ];

        let response = self
            .http
            .post(format!("{}/v1/checkout/sessions", self.api_base))
            .bearer_auth(&self.secret_key)
            .form(&params)
            .send()
            .await
            .map_err(|e| ApiError::Upstream(format!("Payment gateway unreachable: {e}")))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            tracing::warn!("Checkout session creation failed ({status}): {body}");
            return Err(ApiError::Upstream(format!(
                "Payment gateway rejected the checkout session ({status})"
            )));
        }

        response
            .json::<CheckoutSession>()
            .await
            .map_err(|e| ApiError::Upstream(format!("Malformed gateway response: {e}")))
    }
}

/// Verify the gateway's webhook signature header.
///
/// Header format: `t=<unix-ts>,v1=<hmac-sha256-hex>`, where the MAC covers
/// `"<timestamp>.<payload>"` keyed with the webhook secret. Comparison is
/// constant-time.
pub fn verify_webhook_signature(
    payload: &[u8],
    signature_header: &str,
    webhook_secret: &str,
) -> Result<(), ApiError> {
    let invalid = || ApiError::Unauthorized("Invalid webhook signature".to_string());

    let parts: std::collections::HashMap<&str, &str> = signature_header
        .split(',')
        .filter_map(|part| {
            let mut kv = part.splitn(2, '=');
            Some((kv.next()?, kv.next()?))
        })
        .collect();

    let timestamp = parts.get("t").ok_or_else(invalid)?;
    let signature = parts.get("v1").ok_or_else(invalid)?;

    let payload = std::str::from_utf8(payload).map_err(|_| invalid())?;
    let signed_payload = format!("{timestamp}.{payload}");

    let mut mac = HmacSha256::new_from_slice(webhook_secret.as_bytes()).map_err(|_| invalid())?;
    mac.update(signed_payload.as_bytes());
    let expected = hex::encode(mac.finalize().into_bytes());

    if subtle::ConstantTimeEq::ct_eq(expected.as_bytes(), signature.as_bytes()).into() {
        Ok(())
    } else {
        Err(invalid())
    }
}

/// Sign a payload the way the gateway would — used by tests to build valid
/// webhook requests.
pub fn sign_webhook_payload(payload: &[u8], timestamp: i64, webhook_secret: &str) -> String {
    let signed_payload = format!(
        "{timestamp}.{}",
        std::str::from_utf8(payload).unwrap_or_default()
    );
    let mut mac = HmacSha256::new_from_slice(webhook_secret.as_bytes())
        .expect("HMAC accepts any key length");
    mac.update(signed_payload.as_bytes());
    format!("t={timestamp},v1={}", hex::encode(mac.finalize().into_bytes()))
}
