//! Server setup and lifecycle for the chat service.

pub mod handlers;
pub mod routes;

use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::signal;

use crate::catalog::InMemoryCatalog;
use crate::chat::ChatOrchestrator;
use crate::completion::CompletionClient;
use crate::config::AppConfig;
use crate::{Error, Result};

/// Shared, read-only application state.
pub struct AppState {
    pub orchestrator: ChatOrchestrator,
}

/// Runs the HTTP server until SIGINT/SIGTERM.
pub async fn run(config: AppConfig) -> Result<()> {
    let catalog = InMemoryCatalog::from_json_file(&config.catalog_path)?;
    tracing::info!(
        cruises = catalog.len(),
        path = %config.catalog_path.display(),
        "catalog loaded"
    );

    let completions = CompletionClient::new(&config.provider)?;
    if !completions.has_secondary() {
        tracing::info!("no secondary credential configured, failover disabled");
    }

    let orchestrator = ChatOrchestrator::new(Arc::new(completions), Arc::new(catalog));
    let router = routes::create_router(Arc::new(AppState { orchestrator }));

    let addr: SocketAddr = format!("{}:{}", config.host, config.port)
        .parse()
        .map_err(|e| Error::Configuration(format!("invalid bind address: {e}")))?;
    let listener = TcpListener::bind(&addr).await?;
    tracing::info!(%addr, "voyage assistant listening");

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("voyage assistant stopped");
    Ok(())
}

/// Signal handler for graceful shutdown.
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            tracing::info!("Received Ctrl+C, initiating graceful shutdown");
        },
        () = terminate => {
            tracing::info!("Received terminate signal, initiating graceful shutdown");
        },
    }
}
