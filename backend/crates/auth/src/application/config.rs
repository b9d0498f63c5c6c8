//! Authentication configuration
//!
//! Timing and throttling knobs for the OTP flows. All values have
//! production defaults; environment variables override them.

use chrono::Duration;
use platform::rate_limit::RateLimitConfig;

/// Fixed code accepted for the configured test mobile. App store
/// reviewers log in with this pair; no SMS is ever sent for it.
pub const TEST_OTP: &str = "123456";

#[derive(Debug, Clone)]
pub struct AuthConfig {
    /// How long an issued code stays valid
    pub otp_ttl: Duration,
    /// Wrong codes tolerated per verification before it is burned
    pub max_verify_attempts: u32,
    /// How long after verification a login may complete
    pub login_window: Duration,
    /// How long after verification a signup may complete
    pub signup_window: Duration,
    /// Throttle on code sends, keyed per mobile
    pub send_limit: RateLimitConfig,
    /// Throttle on verification attempts, keyed per mobile and client IP
    pub verify_limit: RateLimitConfig,
    /// Mobile number that bypasses SMS delivery and accepts [`TEST_OTP`]
    pub test_mobile: Option<String>,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            otp_ttl: Duration::seconds(300),
            max_verify_attempts: 5,
            login_window: Duration::seconds(30),
            signup_window: Duration::minutes(8),
            send_limit: RateLimitConfig::new(1, 30),
            verify_limit: RateLimitConfig::new(10, 60),
            test_mobile: None,
        }
    }
}

impl AuthConfig {
    /// Read overrides from the environment, falling back to defaults.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            otp_ttl: env_secs("OTP_TTL_SECS").unwrap_or(defaults.otp_ttl),
            max_verify_attempts: env_u32("OTP_MAX_ATTEMPTS")
                .unwrap_or(defaults.max_verify_attempts),
            login_window: env_secs("OTP_LOGIN_WINDOW_SECS").unwrap_or(defaults.login_window),
            signup_window: env_secs("OTP_SIGNUP_WINDOW_SECS").unwrap_or(defaults.signup_window),
            send_limit: defaults.send_limit,
            verify_limit: defaults.verify_limit,
            test_mobile: std::env::var("TEST_MOBILE").ok().filter(|v| !v.is_empty()),
        }
    }

    pub fn is_test_mobile(&self, mobile: &str) -> bool {
        self.test_mobile.as_deref() == Some(mobile)
    }

    /// SMS body for an issued code.
    pub fn otp_message(&self, code: &str) -> String {
        format!(
            "Your Skolara verification code is {}. It is valid for {} minutes. Do not share it with anyone.",
            code,
            self.otp_ttl.num_minutes().max(1)
        )
    }
}

fn env_secs(key: &str) -> Option<Duration> {
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse::<i64>().ok())
        .map(Duration::seconds)
}

fn env_u32(key: &str) -> Option<u32> {
    std::env::var(key).ok().and_then(|v| v.parse().ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = AuthConfig::default();
        assert_eq!(config.otp_ttl, Duration::seconds(300));
        assert_eq!(config.max_verify_attempts, 5);
        assert_eq!(config.login_window, Duration::seconds(30));
        assert_eq!(config.signup_window, Duration::minutes(8));
        assert_eq!(config.send_limit.max_requests, 1);
        assert!(config.test_mobile.is_none());
    }

    #[test]
    fn test_otp_message_contains_code_and_ttl() {
        let config = AuthConfig::default();
        let message = config.otp_message("424242");
        assert!(message.contains("424242"));
        assert!(message.contains("5 minutes"));
    }

    #[test]
    fn test_is_test_mobile() {
        let config = AuthConfig {
            test_mobile: Some("0000000000".to_string()),
            ..AuthConfig::default()
        };
        assert!(config.is_test_mobile("0000000000"));
        assert!(!config.is_test_mobile("9876543210"));
    }
}
