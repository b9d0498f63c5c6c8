//! Client identification utilities
//!
//! Resolves the caller's IP address behind reverse proxies. Used for rate
//! limit keying and request logging.

use axum::http::HeaderMap;
use std::net::IpAddr;

/// Extract client IP address
///
/// Checks `X-Forwarded-For` first (reverse proxy setups), taking the
/// left-most entry, then falls back to the direct connection IP.
pub fn extract_client_ip(headers: &HeaderMap, connection_ip: Option<IpAddr>) -> Option<IpAddr> {
    if let Some(forwarded) = headers.get("x-forwarded-for") {
        if let Ok(value) = forwarded.to_str() {
            if let Some(first) = value.split(',').next() {
                if let Ok(ip) = first.trim().parse::<IpAddr>() {
                    return Some(ip);
                }
            }
        }
    }

    connection_ip
}

/// IP as a stable string key for rate limiting ("unknown" when absent)
pub fn ip_key(ip: Option<IpAddr>) -> String {
    ip.map(|ip| ip.to_string())
        .unwrap_or_else(|| "unknown".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn test_forwarded_for_wins() {
        let mut headers = HeaderMap::new();
        headers.insert(
            "x-forwarded-for",
            HeaderValue::from_static("203.0.113.7, 10.0.0.1"),
        );
        let direct: IpAddr = "192.168.1.1".parse().unwrap();
        let ip = extract_client_ip(&headers, Some(direct));
        assert_eq!(ip, Some("203.0.113.7".parse().unwrap()));
    }

    #[test]
    fn test_falls_back_to_connection_ip() {
        let headers = HeaderMap::new();
        let direct: IpAddr = "192.168.1.1".parse().unwrap();
        assert_eq!(extract_client_ip(&headers, Some(direct)), Some(direct));
    }

    #[test]
    fn test_garbage_header_ignored() {
        let mut headers = HeaderMap::new();
        headers.insert("x-forwarded-for", HeaderValue::from_static("not-an-ip"));
        assert_eq!(extract_client_ip(&headers, None), None);
        assert_eq!(ip_key(None), "unknown");
    }
}
