//! quizforge-server — HTTP API over MCQ generation and test storage.

pub mod error;
pub mod routes;

use std::net::SocketAddr;
use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use quizforge_core::generator::McqGenerator;
use quizforge_core::store::TestStore;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub generator: Arc<McqGenerator>,
    pub store: Arc<dyn TestStore>,
    /// Allowed class IDs; empty accepts any.
    pub classes: Arc<[String]>,
    pub default_question_count: u32,
}

impl AppState {
    pub fn new(
        generator: McqGenerator,
        store: Arc<dyn TestStore>,
        classes: Vec<String>,
        default_question_count: u32,
    ) -> Self {
        Self {
            generator: Arc::new(generator),
            store,
            classes: classes.into(),
            default_question_count,
        }
    }
}

/// Build the router with all routes.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(routes::health_check))
        .route("/api/generate-mcqs", post(routes::generate_mcqs))
        .route("/api/tests", post(routes::create_test).get(routes::list_tests))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Serve the API on `addr` until Ctrl-C.
pub async fn serve(addr: SocketAddr, state: AppState) -> anyhow::Result<()> {
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("Starting server on {}", listener.local_addr()?);

    axum::serve(listener, router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!("failed to listen for shutdown signal: {e}");
        std::future::pending::<()>().await;
    }
    tracing::info!("shutting down");
}
