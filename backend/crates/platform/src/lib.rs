//! Platform Crate - Technical Infrastructure
//!
//! Shared technical foundations with no domain knowledge:
//! - Cryptographic utilities (SHA-256, HMAC, OTP generation, Base64/hex)
//! - Client IP extraction from proxy headers
//! - Rate limiting abstractions
//! - SMS gateway client
//! - Object storage client

pub mod client;
pub mod crypto;
pub mod rate_limit;
pub mod sms;
pub mod storage;
