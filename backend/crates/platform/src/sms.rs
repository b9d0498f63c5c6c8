//! SMS Gateway Client
//!
//! Transactional SMS delivery for OTP codes. The trait keeps domain
//! crates decoupled from the concrete gateway; the HTTP implementation
//! targets a JSON REST gateway, and [`NoopSmsSender`] serves development
//! and tests.

use serde::Serialize;
use thiserror::Error;

/// SMS gateway configuration
#[derive(Debug, Clone)]
pub struct SmsConfig {
    /// Gateway endpoint, e.g. `https://sms.example.com/v1/send`
    pub api_url: String,
    /// API key sent in the `X-Api-Key` header
    pub api_key: String,
    /// Registered alphanumeric sender id (3-11 chars)
    pub sender_id: String,
    /// Dialing prefix prepended to bare 10-digit numbers
    pub country_prefix: String,
}

impl SmsConfig {
    pub fn from_parts(api_url: String, api_key: String, sender_id: String) -> Self {
        Self {
            api_url,
            api_key,
            sender_id,
            country_prefix: "+91".to_string(),
        }
    }
}

/// SMS delivery errors
#[derive(Debug, Error)]
pub enum SmsError {
    #[error("SMS request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("SMS gateway rejected the message (status {status})")]
    Gateway { status: u16 },
}

/// Trait for SMS delivery backends
#[trait_variant::make(SmsSender: Send)]
pub trait LocalSmsSender {
    async fn send(&self, mobile: &str, message: &str) -> Result<(), SmsError>;
}

#[derive(Serialize)]
struct SendRequest<'a> {
    to: String,
    message: &'a str,
    sender_id: &'a str,
    // Transactional route bypasses DND lists; OTPs must use it
    route: &'static str,
}

/// HTTP JSON gateway implementation
#[derive(Clone)]
pub struct HttpSmsSender {
    client: reqwest::Client,
    config: SmsConfig,
}

impl HttpSmsSender {
    pub fn new(config: SmsConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            config,
        }
    }

    fn phone_number(&self, mobile: &str) -> String {
        if mobile.starts_with('+') {
            mobile.to_string()
        } else {
            format!("{}{}", self.config.country_prefix, mobile)
        }
    }
}

impl SmsSender for HttpSmsSender {
    async fn send(&self, mobile: &str, message: &str) -> Result<(), SmsError> {
        let body = SendRequest {
            to: self.phone_number(mobile),
            message,
            sender_id: &self.config.sender_id,
            route: "transactional",
        };

        let response = self
            .client
            .post(&self.config.api_url)
            .header("x-api-key", &self.config.api_key)
            .json(&body)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            tracing::warn!(status = status, "SMS gateway returned non-success");
            return Err(SmsError::Gateway { status });
        }

        Ok(())
    }
}

/// Sender that logs instead of delivering. Development and test use only.
#[derive(Clone, Default)]
pub struct NoopSmsSender;

impl SmsSender for NoopSmsSender {
    async fn send(&self, mobile: &str, message: &str) -> Result<(), SmsError> {
        tracing::info!(mobile = %mobile, message = %message, "SMS suppressed (noop sender)");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_phone_number_prefixing() {
        let sender = HttpSmsSender::new(SmsConfig::from_parts(
            "https://sms.example.com/v1/send".to_string(),
            "key".to_string(),
            "SKOLARA".to_string(),
        ));
        assert_eq!(sender.phone_number("9876543210"), "+919876543210");
        assert_eq!(sender.phone_number("+449876543210"), "+449876543210");
    }

    #[tokio::test]
    async fn test_noop_sender_always_succeeds() {
        let sender = NoopSmsSender;
        // Qualified: the generated trait pair makes `sender.send` ambiguous
        assert!(SmsSender::send(&sender, "9876543210", "Use OTP 123456")
            .await
            .is_ok());
    }
}
