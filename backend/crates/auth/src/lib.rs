//! Authentication crate
//!
//! Mobile-OTP authentication with JWT session tokens.
//!
//! A client asks for a one-time code by mobile number, proves possession
//! of the phone by echoing the code back, and then either logs in (known
//! number) or signs up (new number) within a short window after the
//! verification. Sessions are stateless access/refresh JWT pairs.
//!
//! Layers follow the workspace convention: `domain` holds entities and
//! repository traits, `application` the use cases and token service,
//! `infra` the Postgres implementation, `presentation` the HTTP surface.

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;
pub mod presentation;

pub use error::{AuthError, AuthResult};
