//! Shared Kernel - Domain-crossing minimal core
//!
//! The "smallest core" shared by every backend crate:
//! - Unified error type ([`error::app_error::AppError`]) with stable
//!   domain error codes and HTTP mapping
//! - Typed entity IDs ([`id`])
//! - The authenticated request principal ([`principal`], axum feature)
//!
//! **Design Principle**: only things that are hard to change and mean the
//! same thing in every domain crate belong here.

pub mod error {
    pub mod app_error;
    pub mod code;
    pub mod conversions;
    pub mod kind;
}
pub mod id;

#[cfg(feature = "axum")]
pub mod principal;
