//! HTTP handlers for the auth endpoints
//!
//! Handlers are thin: parse and validate the payload, call the use
//! case, shape the response. All policy lives in the application layer.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::extract::{ConnectInfo, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::IntoResponse;
use axum::Json;
use kernel::id::VerificationId;
use platform::client::{extract_client_ip, ip_key};
use platform::rate_limit::RateLimitStore;
use platform::sms::SmsSender;

use crate::application::config::AuthConfig;
use crate::application::login::LoginUseCase;
use crate::application::refresh::RefreshTokenUseCase;
use crate::application::send_otp::SendOtpUseCase;
use crate::application::signup::{SignupInput, SignupUseCase};
use crate::application::token::TokenService;
use crate::application::verify_otp::VerifyOtpUseCase;
use crate::domain::repository::{OtpRepository, UserRepository};
use crate::domain::value_object::{Email, Mobile, OtpCode};
use crate::error::{AuthError, AuthResult};
use crate::presentation::dto::{
    AuthResponse, LoginRequest, RefreshRequest, RefreshResponse, SendOtpRequest, SendOtpResponse,
    SignupRequest, VerifyOtpRequest, VerifyOtpResponse,
};

/// Shared state for the auth routes. One repository type backs both the
/// OTP and user stores since they live in the same database.
pub struct AuthState<R, S> {
    pub send_otp: Arc<SendOtpUseCase<R, S>>,
    pub verify_otp: Arc<VerifyOtpUseCase<R, R>>,
    pub login: Arc<LoginUseCase<R, R>>,
    pub signup: Arc<SignupUseCase<R, R>>,
    pub refresh: Arc<RefreshTokenUseCase<R>>,
}

impl<R, S> Clone for AuthState<R, S> {
    fn clone(&self) -> Self {
        Self {
            send_otp: Arc::clone(&self.send_otp),
            verify_otp: Arc::clone(&self.verify_otp),
            login: Arc::clone(&self.login),
            signup: Arc::clone(&self.signup),
            refresh: Arc::clone(&self.refresh),
        }
    }
}

impl<R, S> AuthState<R, S>
where
    R: OtpRepository + UserRepository + RateLimitStore<Error = AuthError>,
    S: SmsSender,
{
    pub fn new(
        repo: Arc<R>,
        sms: Arc<S>,
        tokens: Arc<TokenService>,
        config: Arc<AuthConfig>,
    ) -> Self {
        Self {
            send_otp: Arc::new(SendOtpUseCase::new(
                Arc::clone(&repo),
                sms,
                Arc::clone(&config),
            )),
            verify_otp: Arc::new(VerifyOtpUseCase::new(
                Arc::clone(&repo),
                Arc::clone(&repo),
                Arc::clone(&config),
            )),
            login: Arc::new(LoginUseCase::new(
                Arc::clone(&repo),
                Arc::clone(&repo),
                Arc::clone(&tokens),
                Arc::clone(&config),
            )),
            signup: Arc::new(SignupUseCase::new(
                Arc::clone(&repo),
                Arc::clone(&repo),
                Arc::clone(&tokens),
                config,
            )),
            refresh: Arc::new(RefreshTokenUseCase::new(repo, tokens)),
        }
    }
}

fn parse_verification_id(raw: &str) -> AuthResult<VerificationId> {
    VerificationId::parse(raw)
        .map_err(|_| AuthError::Validation("verificationId must be a UUID".to_string()))
}

pub async fn send_otp<R, S>(
    State(state): State<AuthState<R, S>>,
    Json(request): Json<SendOtpRequest>,
) -> Result<impl IntoResponse, AuthError>
where
    R: OtpRepository + UserRepository + RateLimitStore<Error = AuthError> + Send + Sync,
    S: SmsSender + Send + Sync,
{
    let mobile = Mobile::new(request.mobile)?;
    let output = state.send_otp.execute(mobile).await?;
    Ok(Json(SendOtpResponse {
        verification_id: output.verification_id,
        expires_at: output.expires_at,
        message: "OTP_SENT",
    }))
}

pub async fn verify_otp<R, S>(
    State(state): State<AuthState<R, S>>,
    ConnectInfo(addr): ConnectInfo<SocketAddr>,
    headers: HeaderMap,
    Json(request): Json<VerifyOtpRequest>,
) -> Result<impl IntoResponse, AuthError>
where
    R: OtpRepository + UserRepository + RateLimitStore<Error = AuthError> + Send + Sync,
    S: SmsSender + Send + Sync,
{
    let mobile = Mobile::new(request.mobile)?;
    let code = OtpCode::new(request.otp)?;
    let client_key = ip_key(extract_client_ip(&headers, Some(addr.ip())));

    let output = state.verify_otp.execute(mobile, code, &client_key).await?;
    Ok(Json(VerifyOtpResponse {
        verification_id: output.verification_id,
        verified: true,
        message: "OTP_VERIFIED",
        new_user: output.new_user,
    }))
}

pub async fn login<R, S>(
    State(state): State<AuthState<R, S>>,
    Json(request): Json<LoginRequest>,
) -> Result<impl IntoResponse, AuthError>
where
    R: OtpRepository + UserRepository + RateLimitStore<Error = AuthError> + Send + Sync,
    S: SmsSender + Send + Sync,
{
    let verification_id = parse_verification_id(&request.verification_id)?;
    let mobile = Mobile::new(request.mobile)?;

    let success = state.login.execute(verification_id, mobile).await?;
    Ok(Json(AuthResponse::from_success(success)))
}

pub async fn signup<R, S>(
    State(state): State<AuthState<R, S>>,
    Json(request): Json<SignupRequest>,
) -> Result<impl IntoResponse, AuthError>
where
    R: OtpRepository + UserRepository + RateLimitStore<Error = AuthError> + Send + Sync,
    S: SmsSender + Send + Sync,
{
    let input = SignupInput {
        verification_id: parse_verification_id(&request.verification_id)?,
        mobile: Mobile::new(request.mobile)?,
        email: Email::new(request.email)?,
        first_name: request.first_name,
        last_name: request.last_name,
        course_type_id: request.course_type_id,
    };

    let success = state.signup.execute(input).await?;
    Ok((
        StatusCode::CREATED,
        Json(AuthResponse::from_success(success)),
    ))
}

pub async fn refresh<R, S>(
    State(state): State<AuthState<R, S>>,
    Json(request): Json<RefreshRequest>,
) -> Result<impl IntoResponse, AuthError>
where
    R: OtpRepository + UserRepository + RateLimitStore<Error = AuthError> + Send + Sync,
    S: SmsSender + Send + Sync,
{
    let output = state.refresh.execute(&request.refresh_token).await?;
    Ok(Json(RefreshResponse {
        access_token: output.access_token,
    }))
}
