//! Appeald server entry point.

use std::net::SocketAddr;
use std::sync::Arc;

use appeald_api::{AppState, router as api_router};
use appeald_common::Config;
use appeald_core::{AppealNotifier, AppealService};
use appeald_db::repositories::AppealRepository;
use axum::{Router, http::StatusCode, routing::get};
use tokio::signal;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Waits for a shutdown signal (SIGINT or SIGTERM).
///
/// On Unix systems, this listens for both SIGINT (Ctrl+C) and SIGTERM.
/// On Windows, this only listens for Ctrl+C.
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            info!("Received SIGINT, initiating graceful shutdown...");
        },
        () = terminate => {
            info!("Received SIGTERM, initiating graceful shutdown...");
        },
    }
}

/// Liveness probe.
async fn health() -> StatusCode {
    StatusCode::NO_CONTENT
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Pick up a local .env in development
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "appeald=debug,tower_http=debug".into()),
        )
        .init();

    info!("Starting appeald server...");

    // Load configuration
    let config = Config::load()?;

    // Connect to database
    let db = appeald_db::init(&config).await?;
    info!("Connected to database");

    // Run migrations
    info!("Running database migrations...");
    appeald_db::migrate(&db).await?;
    info!("Migrations completed");

    // Wire repositories and services
    let appeal_repo = AppealRepository::new(Arc::new(db));
    let appeal_service = AppealService::new(appeal_repo.clone());
    let notifier = AppealNotifier::new(appeal_repo, &config.webhook);

    if config.webhook.url.is_some() {
        info!("New-appeal webhook notifications enabled");
    } else {
        info!("No webhook endpoint configured; notifications disabled");
    }

    let state = AppState {
        appeal_service,
        notifier,
    };

    let app = Router::new()
        .route("/health", get(health))
        .nest("/api", api_router())
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state);

    // Start server with graceful shutdown
    let addr = SocketAddr::new(config.server.host.parse()?, config.server.port);
    info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server shutdown complete");
    Ok(())
}
