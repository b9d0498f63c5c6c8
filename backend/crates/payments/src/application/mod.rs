pub mod cancel_order;
pub mod config;
pub mod create_order;
pub mod gateway;
pub mod record_failure;
pub mod signature;
pub mod verify_payment;

#[cfg(test)]
pub(crate) mod support;
