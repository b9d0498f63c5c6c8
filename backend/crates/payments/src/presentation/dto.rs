//! Wire types for the payments endpoints

use serde::{Deserialize, Serialize};

use crate::application::create_order::CreateOrderOutput;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateOrderRequest {
    pub application_id: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateOrderResponse {
    pub order_id: String,
    pub amount: i64,
    pub currency: String,
    pub key_id: String,
}

impl From<CreateOrderOutput> for CreateOrderResponse {
    fn from(out: CreateOrderOutput) -> Self {
        Self {
            order_id: out.provider_order_id,
            amount: out.amount_paise,
            currency: out.currency,
            key_id: out.key_id,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VerifyPaymentRequest {
    pub order_id: String,
    pub payment_id: String,
    pub signature: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentFailureRequest {
    pub order_id: String,
    pub payment_id: Option<String>,
    pub reason: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CancelOrderRequest {
    pub order_id: String,
}

#[derive(Debug, Serialize)]
pub struct PaymentStatusResponse {
    pub success: bool,
    pub status: &'static str,
}

impl PaymentStatusResponse {
    pub fn paid() -> Self {
        Self {
            success: true,
            status: "paid",
        }
    }

    pub fn failed() -> Self {
        Self {
            success: true,
            status: "failed",
        }
    }

    pub fn cancelled() -> Self {
        Self {
            success: true,
            status: "cancelled",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_order_request_camel_case() {
        let request: CreateOrderRequest = serde_json::from_str(
            r#"{"applicationId":"8f14e45f-ceea-4e7a-9d3c-51c4b8f1a001"}"#,
        )
        .unwrap();
        assert_eq!(request.application_id, "8f14e45f-ceea-4e7a-9d3c-51c4b8f1a001");
    }

    #[test]
    fn test_create_order_response_shape() {
        let response = CreateOrderResponse::from(CreateOrderOutput {
            provider_order_id: "order_9A33XWu170gUtm".to_string(),
            amount_paise: 150_000,
            currency: "INR".to_string(),
            key_id: "rzp_test_key".to_string(),
        });
        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["orderId"], "order_9A33XWu170gUtm");
        assert_eq!(json["amount"], 150_000);
        assert_eq!(json["keyId"], "rzp_test_key");
    }

    #[test]
    fn test_verify_request_fields() {
        let request: VerifyPaymentRequest = serde_json::from_str(
            r#"{"orderId":"order_1","paymentId":"pay_1","signature":"abc"}"#,
        )
        .unwrap();
        assert_eq!(request.order_id, "order_1");
        assert_eq!(request.payment_id, "pay_1");
    }

    #[test]
    fn test_failure_request_optional_fields() {
        let request: PaymentFailureRequest =
            serde_json::from_str(r#"{"orderId":"order_1"}"#).unwrap();
        assert!(request.payment_id.is_none());
        assert!(request.reason.is_none());
    }

    #[test]
    fn test_status_response_shape() {
        let json = serde_json::to_value(PaymentStatusResponse::paid()).unwrap();
        assert_eq!(json["success"], true);
        assert_eq!(json["status"], "paid");
    }
}
