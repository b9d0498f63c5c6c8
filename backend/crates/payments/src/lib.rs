//! Payments crate
//!
//! Application fee collection through a Razorpay-style gateway. The
//! server never touches card data: the client pays against a gateway
//! order, then posts the gateway's callback payload back here, where
//! the signature, capture status and amount are all re-verified before
//! the application is marked paid.

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;
pub mod presentation;

pub use error::{PaymentsError, PaymentsResult};
