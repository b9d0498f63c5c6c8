pub mod config;
pub mod login;
pub mod refresh;
pub mod send_otp;
pub mod signup;
pub mod token;
pub mod verify_otp;

#[cfg(test)]
pub(crate) mod support;

use crate::domain::entity::User;
use token::TokenPair;

/// Outcome of a successful login or signup.
#[derive(Debug, Clone)]
pub struct AuthSuccess {
    pub user: User,
    pub tokens: TokenPair,
}
