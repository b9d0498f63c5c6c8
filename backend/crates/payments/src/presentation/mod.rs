pub mod dto;
pub mod handler;
pub mod router;

pub use handler::PaymentsState;
pub use router::payments_router;
