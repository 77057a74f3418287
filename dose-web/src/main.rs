//! Insulin Dose Predictor - server entry point

use std::net::SocketAddr;

use dose_web::{create_router, AppState, Config};
use tokio::signal;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() {
    // Load configuration
    dotenvy::dotenv().ok();
    let config = Config::from_env();

    // Initialize logging
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| config.log_filter().into()))
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!(
        "{} v{} starting...",
        dose_core::constants::APP_NAME,
        dose_core::constants::APP_VERSION
    );
    if config.ephemeral_secret {
        tracing::warn!("SECRET_KEY not set, using a random key; sessions will not survive a restart");
    }
    tracing::info!("User store: {}", config.user_store_path.display());
    tracing::info!("Model bundle: {}", config.model_path.display());

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));

    // Build application state
    let state = AppState::new(config);

    // Build router
    let app = create_router(state);

    // Start server
    tracing::info!("Server listening on http://{}", addr);

    let listener = match tokio::net::TcpListener::bind(addr).await {
        Ok(listener) => listener,
        Err(e) => {
            tracing::error!("Failed to bind {}: {}", addr, e);
            std::process::exit(1);
        }
    };

    if let Err(e) = axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
    {
        tracing::error!("Server error: {}", e);
    }

    tracing::info!("Server shut down");
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
        tracing::info!("Received Ctrl+C, shutting down");
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
                tracing::info!("Received terminate signal, shutting down");
            }
            Err(e) => {
                tracing::error!("Failed to install signal handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
