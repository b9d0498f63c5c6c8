pub mod email;
pub mod mobile;
pub mod otp_code;

pub use email::Email;
pub use mobile::Mobile;
pub use otp_code::OtpCode;
