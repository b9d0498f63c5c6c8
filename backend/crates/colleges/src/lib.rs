//! Colleges crate
//!
//! College catalogue browsing, saved-college bookmarks and admission
//! applications. Reads are public; bookmarks and applications require
//! an authenticated principal.
//!
//! This crate is small enough to stay flat: models and repository trait
//! at the top level, Postgres implementation in `pg`, HTTP surface in
//! `handler`/`router`.

pub mod dto;
pub mod error;
pub mod handler;
pub mod model;
pub mod pg;
pub mod repository;
pub mod router;

pub use error::{CollegesError, CollegesResult};
