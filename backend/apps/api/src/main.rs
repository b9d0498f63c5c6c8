//! API Server Entry Point
//!
//! Wires the domain crates into one axum router. Uses `anyhow` for
//! startup errors; request-level errors go through each crate's error
//! type and `kernel::error::AppError`.

use std::env;
use std::net::SocketAddr;
use std::sync::Arc;

use auth::application::config::AuthConfig;
use auth::application::token::{TokenConfig, TokenService};
use auth::infra::PgAuthRepository;
use auth::presentation::handler::AuthState;
use auth::presentation::middleware::{require_auth, AuthLayer};
use auth::presentation::router::auth_router;
use axum::http::{header, Method};
use axum::{http, middleware, Router};
use chrono::Utc;
use colleges::pg::PgCollegeRepository;
use payments::application::config::PaymentsConfig;
use payments::infra::{PgOrderRepository, RazorpayGateway};
use payments::presentation::{payments_router, PaymentsState};
use platform::sms::{HttpSmsSender, NoopSmsSender, SmsConfig, SmsSender};
use platform::storage::{StorageConfig, SupabaseStorage};
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use tokio::net::TcpListener;
use tower_http::cors::{AllowHeaders, AllowMethods, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use uploads::handler::UploadsState;
use uploads::pg::PgDocumentRepository;
use uploads::router::uploads_router;
use users::pg::PgProfileRepository;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            "api=info,auth=info,colleges=info,payments=info,users=info,uploads=info,tower_http=info"
                .into()
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let database_url = env::var("DATABASE_URL").expect("DATABASE_URL must be set in environment");

    let pool = PgPoolOptions::new()
        .max_connections(5)
        .connect(&database_url)
        .await?;

    tracing::info!("Connected to database");

    sqlx::migrate!("../../../database/migrations")
        .run(&pool)
        .await?;

    tracing::info!("Migrations completed");

    // Startup cleanup: drop expired OTP rows and stale rate-limit
    // windows. Failures here should not prevent server startup.
    cleanup_auth_tables(&pool).await;

    let auth_config = AuthConfig::from_env();
    let token_config = TokenConfig::new(
        env::var("JWT_ACCESS_SECRET").expect("JWT_ACCESS_SECRET must be set in environment"),
        env::var("JWT_REFRESH_SECRET").expect("JWT_REFRESH_SECRET must be set in environment"),
    );
    let tokens = Arc::new(TokenService::new(token_config));

    let payments_config = PaymentsConfig::from_env()
        .expect("RAZORPAY_KEY_ID and RAZORPAY_KEY_SECRET must be set in environment");

    let storage = SupabaseStorage::new(StorageConfig {
        base_url: env::var("SUPABASE_URL").expect("SUPABASE_URL must be set in environment"),
        service_key: env::var("SUPABASE_SERVICE_KEY")
            .expect("SUPABASE_SERVICE_KEY must be set in environment"),
        bucket: env::var("STORAGE_BUCKET").unwrap_or_else(|_| "documents".to_string()),
    });

    // Without SMS credentials (local development) codes are only logged.
    let app = match env::var("SMS_API_URL") {
        Ok(api_url) => {
            let sms = HttpSmsSender::new(SmsConfig::from_parts(
                api_url,
                env::var("SMS_API_KEY").expect("SMS_API_KEY must be set when SMS_API_URL is"),
                env::var("SMS_SENDER_ID").unwrap_or_else(|_| "SKOLRA".to_string()),
            ));
            build_router(
                &pool,
                Arc::new(sms),
                tokens,
                auth_config,
                payments_config,
                storage,
            )
        }
        Err(_) => {
            tracing::warn!("SMS_API_URL not set, OTP delivery disabled");
            build_router(
                &pool,
                Arc::new(NoopSmsSender),
                tokens,
                auth_config,
                payments_config,
                storage,
            )
        }
    };

    let port: u16 = env::var("PORT")
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or(8080);
    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    tracing::info!("Listening on {}", addr);

    let listener = TcpListener::bind(addr).await?;
    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await?;

    Ok(())
}

async fn cleanup_auth_tables(pool: &PgPool) {
    use auth::domain::repository::OtpRepository;

    let repo = PgAuthRepository::new(pool.clone());
    match repo.delete_expired_before(Utc::now()).await {
        Ok(deleted) => {
            tracing::info!(otp_rows_deleted = deleted, "Expired OTP cleanup completed");
        }
        Err(e) => {
            tracing::warn!(error = %e, "Expired OTP cleanup failed, continuing anyway");
        }
    }
    match repo
        .purge_rate_windows_before(Utc::now().timestamp_millis())
        .await
    {
        Ok(deleted) => {
            tracing::info!(windows_deleted = deleted, "Rate-limit window cleanup completed");
        }
        Err(e) => {
            tracing::warn!(error = %e, "Rate-limit window cleanup failed, continuing anyway");
        }
    }
}

fn build_router<S>(
    pool: &PgPool,
    sms: Arc<S>,
    tokens: Arc<TokenService>,
    auth_config: AuthConfig,
    payments_config: PaymentsConfig,
    storage: SupabaseStorage,
) -> Router
where
    S: SmsSender + Send + Sync + 'static,
{
    let auth_repo = Arc::new(PgAuthRepository::new(pool.clone()));
    let auth_state = AuthState::new(auth_repo, sms, Arc::clone(&tokens), Arc::new(auth_config));
    let bearer = AuthLayer::new(tokens);

    let college_repo = Arc::new(PgCollegeRepository::new(pool.clone()));
    let colleges_routes = colleges::router::public_router(Arc::clone(&college_repo)).merge(
        colleges::router::protected_router(college_repo)
            .layer(middleware::from_fn_with_state(bearer.clone(), require_auth)),
    );

    let profile_repo = Arc::new(PgProfileRepository::new(pool.clone()));
    let user_routes = users::router::public_router(Arc::clone(&profile_repo)).merge(
        users::router::protected_router(profile_repo)
            .layer(middleware::from_fn_with_state(bearer.clone(), require_auth)),
    );

    let uploads_state = UploadsState::new(
        Arc::new(storage),
        Arc::new(PgDocumentRepository::new(pool.clone())),
    );
    let uploads_routes = uploads_router(uploads_state)
        .layer(middleware::from_fn_with_state(bearer.clone(), require_auth));

    let order_repo = Arc::new(PgOrderRepository::new(pool.clone()));
    let gateway = Arc::new(RazorpayGateway::new(payments_config.clone()));
    let payments_state = PaymentsState::new(order_repo, gateway, payments_config);
    let payments_routes = payments_router(payments_state)
        .layer(middleware::from_fn_with_state(bearer, require_auth));

    Router::new()
        .nest("/api/auth", auth_router(auth_state))
        .nest("/api/colleges", colleges_routes)
        .nest("/api/user", user_routes)
        .nest("/api/uploads", uploads_routes)
        .nest("/api/payments", payments_routes)
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer())
}

fn cors_layer() -> CorsLayer {
    let frontend_origins = env::var("FRONTEND_ORIGINS")
        .unwrap_or_else(|_| "http://localhost:3000,http://127.0.0.1:3000".to_string());

    let allowed_origins: Vec<http::HeaderValue> = frontend_origins
        .split(',')
        .filter_map(|origin| origin.trim().parse().ok())
        .collect();

    CorsLayer::new()
        .allow_origin(allowed_origins)
        .allow_methods(AllowMethods::list([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::OPTIONS,
        ]))
        .allow_headers(AllowHeaders::list([
            header::CONTENT_TYPE,
            header::AUTHORIZATION,
            header::ACCEPT,
        ]))
        .allow_credentials(true)
}
