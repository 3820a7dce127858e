//! Fixture Server
//!
//! Serves a fixed dashboard response so the frontend can be developed and
//! demoed without the real backend.
//!
//! # Endpoints
//!
//! - `GET /api/dashboard-data` - the fixture (500 when it is a failure envelope)
//! - `GET /health` - liveness
//! - everything else - the static frontend directory, when configured

use axum::{extract::State, http::StatusCode, routing::get, Json, Router};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use thiserror::Error;
use tower_http::{cors::CorsLayer, services::ServeDir, trace::TraceLayer};

use crate::payload::{DashboardPayload, DashboardResponse};

/// Fixture server errors
#[derive(Error, Debug)]
pub enum ServerError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid fixture {path:?}: {source}")]
    Fixture {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("Server error: {0}")]
    Internal(String),
}

/// Load and validate a fixture file
pub fn load_fixture(path: &Path) -> Result<DashboardResponse, ServerError> {
    let body = std::fs::read_to_string(path)?;
    DashboardResponse::from_json(&body).map_err(|source| ServerError::Fixture {
        path: path.to_path_buf(),
        source,
    })
}

/// Response served when no fixture is given: a dashboard with no expenses
pub fn empty_fixture() -> DashboardResponse {
    DashboardResponse::ok(DashboardPayload::default())
}

struct FixtureState {
    response: DashboardResponse,
}

/// Build the fixture router
pub fn build_router(
    response: DashboardResponse,
    endpoint: &str,
    static_dir: Option<&Path>,
) -> Router {
    let endpoint = format!("/{}", endpoint.trim_start_matches('/'));
    let state = Arc::new(FixtureState { response });

    let router = Router::new()
        .route(&endpoint, get(dashboard_data))
        .route("/health", get(health))
        .with_state(state);

    let router = match static_dir {
        Some(dir) => router.fallback_service(ServeDir::new(dir)),
        None => router,
    };

    router
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}

/// Start the fixture server
pub async fn serve(router: Router, addr: &str) -> Result<(), ServerError> {
    let listener = tokio::net::TcpListener::bind(addr).await?;

    tracing::info!("Fixture server listening on {}", addr);

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| ServerError::Internal(e.to_string()))?;

    tracing::info!("Fixture server shut down gracefully");
    Ok(())
}

async fn dashboard_data(
    State(state): State<Arc<FixtureState>>,
) -> (StatusCode, Json<DashboardResponse>) {
    let status = if state.response.success {
        StatusCode::OK
    } else {
        StatusCode::INTERNAL_SERVER_ERROR
    };
    (status, Json(state.response.clone()))
}

async fn health() -> &'static str {
    "ok"
}

/// Wait for shutdown signal
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to listen for Ctrl+C: {}", e);
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
                tracing::error!("Failed to install SIGTERM handler: {}", e);
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

    tracing::info!("Shutdown signal received, starting graceful shutdown");
}
