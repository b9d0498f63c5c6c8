//! Uploads crate
//!
//! Multipart PDF uploads to object storage. Documents are either
//! application-scoped (attached to an admission application by the
//! client) or account-scoped (HSC/SSLC certificates persisted on the
//! user row). Content is sniffed for the PDF magic bytes; declared
//! content type and extension alone are not trusted.

pub mod document;
pub mod error;
pub mod handler;
pub mod pg;
pub mod repository;
pub mod router;

pub use error::{UploadsError, UploadsResult};
