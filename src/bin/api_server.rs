// src/bin/api_server.rs

use std::sync::Arc;
use toy_house_api::infra::logging;
use toy_house_api::transport;
use toy_house_api::{AppConfig, CatalogService, MongoToyStore, ToyStore};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    logging::init_tracing()?;

    let config = AppConfig::from_env()?;
    tracing::info!(?config, "configuration loaded");

    // --- Store Initialization ---
    let store = Arc::new(
        MongoToyStore::connect(&config.mongodb_uri, &config.database, &config.collection).await?,
    );
    // No retry: an unreachable deployment at startup is fatal.
    if let Err(e) = store.ping().await {
        tracing::error!(error = %e, "could not reach the MongoDB deployment");
        return Err(e.into());
    }
    tracing::info!("pinged deployment, connected to MongoDB");

    // --- API Server Initialization ---
    let app_state = transport::http::AppState::new(CatalogService::new(store.clone()));
    let app = transport::http::build_app(app_state);
    let listener = tokio::net::TcpListener::bind(config.bind_addr()).await?;
    tracing::info!(port = config.port, "Toy House server is running");
    tracing::info!("Swagger UI available at http://localhost:{}/swagger-ui", config.port);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("closing MongoDB client");
    store.shutdown().await;
    tracing::info!("graceful shutdown complete");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "failed to listen for SIGTERM");
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
    tracing::info!("shutdown signal received");
}
