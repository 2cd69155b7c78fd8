//! HTTP request handlers for the scan service.
//!
//! Implements the scan trigger and health check endpoints using axum.

use axum::{
    extract::State,
    http::StatusCode,
    response::Json,
    routing::{get, post},
    Router as AxumRouter,
};
use leakhound_domain::traits::{CandidateSource, FindingSink, LlmProvider};
use leakhound_llm::LlmError;
use leakhound_triage::Pipeline;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::error;

/// Shared application state
///
/// Generic over the pipeline's collaborators so tests can wire mock sources
/// and providers through the same routes as production.
pub struct AppState<Q, L, S>
where
    Q: CandidateSource,
    L: LlmProvider<Error = LlmError>,
    S: FindingSink,
{
    /// The triage pipeline a scan request drives
    pub pipeline: Arc<Pipeline<Q, L, S>>,

    /// Name of the classification model, reported by the health check
    pub model_name: String,
}

impl<Q, L, S> AppState<Q, L, S>
where
    Q: CandidateSource,
    L: LlmProvider<Error = LlmError>,
    S: FindingSink,
{
    /// Create application state around a pipeline
    pub fn new(pipeline: Pipeline<Q, L, S>, model_name: impl Into<String>) -> Self {
        Self {
            pipeline: Arc::new(pipeline),
            model_name: model_name.into(),
        }
    }
}

// Derived Clone would demand Clone on Q, L, S; only the Arcs are cloned
impl<Q, L, S> Clone for AppState<Q, L, S>
where
    Q: CandidateSource,
    L: LlmProvider<Error = LlmError>,
    S: FindingSink,
{
    fn clone(&self) -> Self {
        Self {
            pipeline: Arc::clone(&self.pipeline),
            model_name: self.model_name.clone(),
        }
    }
}

/// Health check response
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthCheckResponse {
    /// Overall health status
    pub status: String,
    /// Classification model in use
    pub model: String,
}

/// POST /scan - Run one hunt-triage-persist cycle
///
/// Returns the run summary as plain text with status 200, or the hunt
/// failure message with status 500.
async fn run_scan<Q, L, S>(State(state): State<AppState<Q, L, S>>) -> (StatusCode, String)
where
    Q: CandidateSource + Send + 'static,
    L: LlmProvider<Error = LlmError> + Send + Sync + 'static,
    S: FindingSink + Send + 'static,
    S::Error: std::fmt::Display,
{
    match state.pipeline.run().await {
        Ok(summary) => (StatusCode::OK, summary.message()),
        Err(e) => {
            error!("Scan failed: {}", e);
            (StatusCode::INTERNAL_SERVER_ERROR, e.to_string())
        }
    }
}

/// GET /health - Liveness check
async fn health_check<Q, L, S>(
    State(state): State<AppState<Q, L, S>>,
) -> Json<HealthCheckResponse>
where
    Q: CandidateSource + Send + 'static,
    L: LlmProvider<Error = LlmError> + Send + Sync + 'static,
    S: FindingSink + Send + 'static,
{
    Json(HealthCheckResponse {
        status: "healthy".to_string(),
        model: state.model_name.clone(),
    })
}

/// Create the axum router with all routes
pub fn create_router<Q, L, S>(state: AppState<Q, L, S>) -> AxumRouter
where
    Q: CandidateSource + Send + 'static,
    L: LlmProvider<Error = LlmError> + Send + Sync + 'static,
    S: FindingSink + Send + 'static,
    S::Error: std::fmt::Display,
{
    AxumRouter::new()
        .route("/scan", post(run_scan))
        .route("/health", get(health_check))
        .with_state(state)
}
