//! Users crate
//!
//! Profile reads and updates, in-app notifications with soft delete,
//! and the complaint/FAQ catalogue with support-request recording.
//! Everything except the complaint catalogue requires an authenticated
//! principal.
//!
//! Flat layout, same as `colleges`: models and repository trait at the
//! top level, Postgres implementation in `pg`, HTTP surface in
//! `handler`/`router`.

pub mod dto;
pub mod error;
pub mod handler;
pub mod model;
pub mod pg;
pub mod repository;
pub mod router;

pub use error::{UsersError, UsersResult};
