//! API Server Entry Point
//!
//! Application entry point and server initialization.
//! Uses `anyhow` for startup errors; request errors are rendered by the
//! auth crate.

use std::env;
use std::net::SocketAddr;

use auth::{AppState, AuthConfig, MIGRATOR, SqliteAuthRepository, auth_router};
use axum::{
    Router, http,
    http::{Method, header},
};
use platform::redact::{DEFAULT_REDACTION, PII_FIELDS, RedactingMakeWriter, Redactor};
use sqlx::sqlite::SqlitePoolOptions;
use tokio::net::TcpListener;
use tower_http::cors::{AllowHeaders, AllowMethods, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// tracing's fmt layer separates fields with spaces
const LOG_FIELD_SEPARATOR: &str = " ";

fn pii_redactor() -> anyhow::Result<Redactor> {
    let fields: Vec<String> = match env::var("PII_FIELDS") {
        Ok(list) => list
            .split(',')
            .map(|f| f.trim().to_string())
            .filter(|f| !f.is_empty())
            .collect(),
        Err(_) => PII_FIELDS.iter().map(|f| f.to_string()).collect(),
    };
    let redaction = env::var("PII_REDACTION").unwrap_or_else(|_| DEFAULT_REDACTION.to_string());
    let separator =
        env::var("PII_SEPARATOR").unwrap_or_else(|_| LOG_FIELD_SEPARATOR.to_string());

    Ok(Redactor::new(&fields, &redaction, &separator)?)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    // Initialize tracing; every rendered line passes through the redactor
    let redactor = pii_redactor()?;
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "api=info,auth=info,tower_http=info".into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .with_ansi(false)
                .with_writer(RedactingMakeWriter::new(redactor, std::io::stderr)),
        )
        .init();

    let config = AuthConfig::from_env()?;

    // Database connection
    let database_url =
        env::var("DATABASE_URL").unwrap_or_else(|_| "sqlite://auth.db?mode=rwc".to_string());

    let pool = SqlitePoolOptions::new()
        .max_connections(5)
        .connect(&database_url)
        .await?;

    tracing::info!("Connected to database");

    MIGRATOR.run(&pool).await?;

    tracing::info!("Migrations completed");

    let state = AppState::new(SqliteAuthRepository::new(pool), config);

    // CORS configuration
    let frontend_origins = env::var("FRONTEND_ORIGINS")
        .unwrap_or_else(|_| "http://localhost:3000,http://127.0.0.1:3000".to_string());

    let allowed_origins: Vec<http::HeaderValue> = frontend_origins
        .split(',')
        .filter_map(|origin| origin.trim().parse().ok())
        .collect();

    let cors = CorsLayer::new()
        .allow_origin(allowed_origins)
        .allow_methods(AllowMethods::list([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ]))
        .allow_headers(AllowHeaders::list([
            header::CONTENT_TYPE,
            header::AUTHORIZATION,
            header::ACCEPT,
        ]))
        .allow_credentials(true);

    // Build router
    let app = Router::new()
        .merge(auth_router(state))
        .layer(TraceLayer::new_for_http())
        .layer(cors);

    // Start server
    let addr: SocketAddr = env::var("BIND_ADDR")
        .unwrap_or_else(|_| "0.0.0.0:5000".to_string())
        .parse()?;
    tracing::info!("Listening on {}", addr);

    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
