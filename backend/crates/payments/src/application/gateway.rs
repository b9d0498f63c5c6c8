//! Payment gateway port
//!
//! Abstracts the Razorpay REST API so use cases stay testable. The
//! production implementation lives in `infra::razorpay`.

use thiserror::Error;

/// Gateway-side order, created before checkout opens.
#[derive(Debug, Clone)]
pub struct GatewayOrder {
    pub provider_order_id: String,
    pub amount_paise: i64,
    pub currency: String,
}

/// Gateway-side payment, fetched during verification.
#[derive(Debug, Clone)]
pub struct GatewayPayment {
    pub provider_payment_id: String,
    pub provider_order_id: String,
    /// Raw gateway status string ("captured", "failed", ...)
    pub status: String,
    pub amount_paise: i64,
    pub method: Option<String>,
}

impl GatewayPayment {
    pub fn is_captured(&self) -> bool {
        self.status == "captured"
    }
}

#[derive(Debug, Error)]
pub enum GatewayError {
    #[error("gateway request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("gateway rejected the request (status {status})")]
    Service { status: u16 },
}

#[trait_variant::make(PaymentGateway: Send)]
pub trait LocalPaymentGateway {
    /// Create an order the client can pay against.
    async fn create_order(
        &self,
        amount_paise: i64,
        currency: &str,
        receipt: &str,
    ) -> Result<GatewayOrder, GatewayError>;

    /// Fetch a payment for server-side verification.
    async fn fetch_payment(&self, provider_payment_id: &str)
        -> Result<GatewayPayment, GatewayError>;
}
