//! Payments configuration

/// Gateway credentials and currency. `key_id` is public (the client
/// needs it to open the checkout); `key_secret` never leaves the
/// server and signs the verification HMAC.
#[derive(Debug, Clone)]
pub struct PaymentsConfig {
    pub key_id: String,
    pub key_secret: String,
    pub currency: String,
}

impl PaymentsConfig {
    pub fn new(key_id: String, key_secret: String) -> Self {
        Self {
            key_id,
            key_secret,
            currency: "INR".to_string(),
        }
    }

    /// Read `RAZORPAY_KEY_ID` / `RAZORPAY_KEY_SECRET` from the
    /// environment.
    pub fn from_env() -> Result<Self, std::env::VarError> {
        Ok(Self::new(
            std::env::var("RAZORPAY_KEY_ID")?,
            std::env::var("RAZORPAY_KEY_SECRET")?,
        ))
    }
}
