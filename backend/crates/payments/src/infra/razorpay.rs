//! Razorpay REST client
//!
//! Authenticates with HTTP basic auth (key id / key secret). Amounts on
//! the wire are integer paise, matching our storage.

use serde::{Deserialize, Serialize};

use crate::application::config::PaymentsConfig;
use crate::application::gateway::{GatewayError, GatewayOrder, GatewayPayment, PaymentGateway};

const DEFAULT_BASE_URL: &str = "https://api.razorpay.com/v1";

#[derive(Clone)]
pub struct RazorpayGateway {
    client: reqwest::Client,
    config: PaymentsConfig,
    base_url: String,
}

impl RazorpayGateway {
    pub fn new(config: PaymentsConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            config,
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }

    /// Point the client at a different endpoint (local mock servers).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }
}

#[derive(Serialize)]
struct CreateOrderBody<'a> {
    amount: i64,
    currency: &'a str,
    receipt: &'a str,
}

#[derive(Deserialize)]
struct OrderResponse {
    id: String,
    amount: i64,
    currency: String,
}

#[derive(Deserialize)]
struct PaymentResponse {
    id: String,
    order_id: String,
    status: String,
    amount: i64,
    method: Option<String>,
}

impl PaymentGateway for RazorpayGateway {
    async fn create_order(
        &self,
        amount_paise: i64,
        currency: &str,
        receipt: &str,
    ) -> Result<GatewayOrder, GatewayError> {
        let response = self
            .client
            .post(format!("{}/orders", self.base_url))
            .basic_auth(&self.config.key_id, Some(&self.config.key_secret))
            .json(&CreateOrderBody {
                amount: amount_paise,
                currency,
                receipt,
            })
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            tracing::warn!(status, "gateway order creation failed");
            return Err(GatewayError::Service { status });
        }

        let order: OrderResponse = response.json().await?;
        Ok(GatewayOrder {
            provider_order_id: order.id,
            amount_paise: order.amount,
            currency: order.currency,
        })
    }

    async fn fetch_payment(
        &self,
        provider_payment_id: &str,
    ) -> Result<GatewayPayment, GatewayError> {
        let response = self
            .client
            .get(format!(
                "{}/payments/{}",
                self.base_url, provider_payment_id
            ))
            .basic_auth(&self.config.key_id, Some(&self.config.key_secret))
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            tracing::warn!(status, "gateway payment fetch failed");
            return Err(GatewayError::Service { status });
        }

        let payment: PaymentResponse = response.json().await?;
        Ok(GatewayPayment {
            provider_payment_id: payment.id,
            provider_order_id: payment.order_id,
            status: payment.status,
            amount_paise: payment.amount,
            method: payment.method,
        })
    }
}
