pub mod otp_verification;
pub mod user;

pub use otp_verification::OtpVerification;
pub use user::User;
