pub mod dto;
pub mod handler;
pub mod middleware;
pub mod router;
