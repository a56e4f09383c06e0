use crate::error::ApiError;
use crate::models::models::AppState;
use hmac::{Hmac, Mac};
use serde_json::{json, Value};
use sha2::Sha256;
use std::time::Duration;
use tracing::error;

type HmacSha256 = Hmac<Sha256>;

/// Gateway requests get a hard deadline; a timed-out order creation is an
/// unknown outcome and nothing gets marked paid off the back of it.
const GATEWAY_TIMEOUT: Duration = Duration::from_secs(15);

/// Razorpay amounts are in the minor unit (paise). An amount big enough
/// to overflow the conversion is not a plausible course price, so it is
/// rejected as bad input rather than wrapped.
pub fn to_minor_units(amount: i64) -> Result<i64, ApiError> {
    amount
        .checked_mul(100)
        .ok_or_else(|| ApiError::BadRequest("Amount too large".to_string()))
}

/// Order receipts embed the course id and a millisecond timestamp so
/// retried purchases of the same course do not collide.
pub fn order_receipt(course_id: &str, now_millis: i64) -> String {
    format!("receipt_course_{}_{}", course_id, now_millis)
}

/// Hex HMAC-SHA256 over `order_id|payment_id`, the signature Razorpay
/// attaches to a successful checkout.
pub fn payment_signature(secret: &str, order_id: &str, payment_id: &str) -> String {
    let mut mac = HmacSha256::new_from_slice(secret.as_bytes())
        .expect("HMAC accepts keys of any length");
    mac.update(order_id.as_bytes());
    mac.update(b"|");
    mac.update(payment_id.as_bytes());
    hex::encode(mac.finalize().into_bytes())
}

/// Constant-time check of a client-supplied signature. A signature that is
/// not valid hex cannot match, so it is treated as a plain mismatch rather
/// than a server error.
pub fn verify_payment_signature(
    secret: &str,
    order_id: &str,
    payment_id: &str,
    supplied_signature: &str,
) -> bool {
    let supplied = match hex::decode(supplied_signature) {
        Ok(bytes) => bytes,
        Err(_) => return false,
    };

    let mut mac = HmacSha256::new_from_slice(secret.as_bytes())
        .expect("HMAC accepts keys of any length");
    mac.update(order_id.as_bytes());
    mac.update(b"|");
    mac.update(payment_id.as_bytes());
    mac.verify_slice(&supplied).is_ok()
}

/// Thin client for the Razorpay Orders API. The base URL lives in
/// `AppState` so tests can point it at a stub server.
pub struct RazorpayClient {
    http: reqwest::Client,
    key_id: String,
    key_secret: String,
    base_url: String,
}

impl RazorpayClient {
    pub fn new(state: &AppState) -> Result<Self, ApiError> {
        let http = reqwest::Client::builder()
            .timeout(GATEWAY_TIMEOUT)
            .build()
            .map_err(|e| {
                error!("Failed to build Razorpay HTTP client: {}", e);
                ApiError::Gateway(e.to_string())
            })?;

        Ok(RazorpayClient {
            http,
            key_id: state.razorpay_key_id.clone(),
            key_secret: state.razorpay_key_secret.clone(),
            base_url: state.razorpay_api_url.clone(),
        })
    }

    /// Opens a gateway order. `amount` is already in paise. The returned
    /// order object is passed through to the caller as-is.
    pub async fn create_order(
        &self,
        amount_paise: i64,
        currency: &str,
        receipt: &str,
        notes: Value,
    ) -> Result<Value, ApiError> {
        let response = self
            .http
            .post(format!("{}/v1/orders", self.base_url))
            .basic_auth(&self.key_id, Some(&self.key_secret))
            .json(&json!({
                "amount": amount_paise,
                "currency": currency,
                "receipt": receipt,
                "notes": notes,
            }))
            .send()
            .await
            .map_err(|e| {
                error!("Razorpay order request failed: {}", e);
                ApiError::Gateway(e.to_string())
            })?;

        let status = response.status();
        let body: Value = response.json().await.map_err(|e| {
            error!("Razorpay order response parsing failed: {}", e);
            ApiError::Gateway(e.to_string())
        })?;

        if !status.is_success() {
            let detail = body["error"]["description"]
                .as_str()
                .unwrap_or("Unknown Razorpay error")
                .to_string();
            error!("Razorpay order creation failed ({}): {}", status, detail);
            return Err(ApiError::Gateway(detail));
        }

        Ok(body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &str = "test_razorpay_key_secret";

    #[test]
    fn signature_matches_known_construction() {
        let sig = payment_signature(SECRET, "order_abc", "pay_123");
        assert!(verify_payment_signature(SECRET, "order_abc", "pay_123", &sig));
    }

    #[test]
    fn signature_rejects_wrong_secret() {
        let sig = payment_signature("some_other_secret", "order_abc", "pay_123");
        assert!(!verify_payment_signature(SECRET, "order_abc", "pay_123", &sig));
    }

    #[test]
    fn signature_rejects_swapped_ids() {
        let sig = payment_signature(SECRET, "pay_123", "order_abc");
        assert!(!verify_payment_signature(SECRET, "order_abc", "pay_123", &sig));
    }

    #[test]
    fn signature_rejects_flipped_character() {
        let mut sig = payment_signature(SECRET, "order_abc", "pay_123");
        let last = sig.pop().unwrap();
        sig.push(if last == '0' { '1' } else { '0' });
        assert!(!verify_payment_signature(SECRET, "order_abc", "pay_123", &sig));
    }

    #[test]
    fn signature_rejects_non_hex_garbage() {
        assert!(!verify_payment_signature(SECRET, "order_abc", "pay_123", "forged"));
        assert!(!verify_payment_signature(SECRET, "order_abc", "pay_123", ""));
    }

    #[test]
    fn minor_unit_conversion() {
        assert_eq!(to_minor_units(500).unwrap(), 50_000);
        assert_eq!(to_minor_units(1).unwrap(), 100);
        assert_eq!(to_minor_units(999).unwrap(), 99_900);
    }

    #[test]
    fn minor_unit_conversion_rejects_overflow() {
        assert!(to_minor_units(i64::MAX / 10).is_err());
        assert!(to_minor_units(i64::MAX).is_err());
    }

    #[test]
    fn receipt_embeds_course_and_timestamp() {
        let receipt = order_receipt("c42", 1_700_000_000_000);
        assert_eq!(receipt, "receipt_course_c42_1700000000000");
    }
}
