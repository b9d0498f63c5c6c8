pub mod order;
pub mod payment;

pub use order::{Order, OrderStatus};
pub use payment::{Payment, PaymentStatus};
