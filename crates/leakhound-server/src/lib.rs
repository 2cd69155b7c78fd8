//! Leakhound Server
//!
//! HTTP surface for the leak triage pipeline. A POST to `/scan` runs one
//! hunt-triage-persist cycle against the configured corpus database and
//! classification model.

#![warn(missing_docs)]

pub mod config;
pub mod handlers;

use config::ServerConfig;
use handlers::{create_router, AppState};
use leakhound_llm::OllamaProvider;
use leakhound_store::SqliteStore;
use leakhound_triage::{Classifier, Pipeline};
use tokio::net::TcpListener;
use tracing::info;

/// Server error
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    /// Server binding error
    #[error("Failed to bind server: {0}")]
    Bind(#[from] std::io::Error),

    /// Storage error
    #[error("Storage error: {0}")]
    Store(String),

    /// Server error
    #[error("Server error: {0}")]
    Server(String),
}

/// Start the scan HTTP server
///
/// Opens the corpus database, wires the pipeline, and serves until shutdown.
pub async fn start_server(config: ServerConfig) -> Result<(), ServerError> {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    info!("Starting Leakhound");
    info!("Bind address: {}", config.bind_addr());
    info!("Corpus database: {}", config.database.path);
    info!(
        "Model: {} at {}",
        config.model.name, config.model.endpoint
    );

    // Two connections to the same database: one hunts, one persists
    let source = SqliteStore::open(&config.database.path)
        .map_err(|e| ServerError::Store(e.to_string()))?
        .with_hunt_query(&config.database.hunt_query);
    let sink =
        SqliteStore::open(&config.database.path).map_err(|e| ServerError::Store(e.to_string()))?;

    let provider = OllamaProvider::new(&config.model.endpoint, &config.model.name)
        .with_max_retries(config.model.max_retries);
    let classifier = Classifier::new(provider, config.triage.classify_timeout());

    let pipeline = Pipeline::new(source, classifier, sink, config.triage.clone());
    let state = AppState::new(pipeline, config.model.name.clone());

    let app = create_router(state);

    // Bind and serve
    let listener = TcpListener::bind(&config.bind_addr()).await?;
    info!("Leakhound listening on {}", config.bind_addr());

    axum::serve(listener, app)
        .await
        .map_err(|e| ServerError::Server(e.to_string()))?;

    Ok(())
}
