pub mod postgres;
pub mod razorpay;

pub use postgres::PgOrderRepository;
pub use razorpay::RazorpayGateway;
