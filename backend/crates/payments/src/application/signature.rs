//! Callback signature verification
//!
//! The gateway signs `"{order_id}|{payment_id}"` with the key secret
//! (HMAC-SHA256, lowercase hex). Comparison is constant time.

use platform::crypto::{constant_time_eq, hmac_sha256, to_hex};

pub fn signature_valid(
    key_secret: &str,
    provider_order_id: &str,
    provider_payment_id: &str,
    signature: &str,
) -> bool {
    let payload = format!("{provider_order_id}|{provider_payment_id}");
    let expected = to_hex(&hmac_sha256(key_secret.as_bytes(), payload.as_bytes()));
    constant_time_eq(expected.as_bytes(), signature.to_lowercase().as_bytes())
}

#[cfg(test)]
mod tests {
    use super::*;

    // hmac_sha256("test_key_secret", "order_ABC123|pay_XYZ789")
    const GOOD: &str = "8f3f6d9875510a04884bbd681acc7af52bad387c42cd5a3b0ec78dcbef78b99a";

    #[test]
    fn test_valid_signature() {
        assert!(signature_valid(
            "test_key_secret",
            "order_ABC123",
            "pay_XYZ789",
            GOOD
        ));
    }

    #[test]
    fn test_uppercase_hex_accepted() {
        assert!(signature_valid(
            "test_key_secret",
            "order_ABC123",
            "pay_XYZ789",
            &GOOD.to_uppercase()
        ));
    }

    #[test]
    fn test_wrong_secret_rejected() {
        assert!(!signature_valid(
            "other_secret",
            "order_ABC123",
            "pay_XYZ789",
            GOOD
        ));
    }

    #[test]
    fn test_tampered_ids_rejected() {
        assert!(!signature_valid(
            "test_key_secret",
            "order_ABC124",
            "pay_XYZ789",
            GOOD
        ));
        assert!(!signature_valid(
            "test_key_secret",
            "order_ABC123",
            "pay_XYZ780",
            GOOD
        ));
    }

    #[test]
    fn test_garbage_signature_rejected() {
        assert!(!signature_valid(
            "test_key_secret",
            "order_ABC123",
            "pay_XYZ789",
            "deadbeef"
        ));
    }
}
