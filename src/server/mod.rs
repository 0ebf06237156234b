//! HTTP surface for the gateway.
//!
//! Routes:
//! - `POST /generateSql`, `POST /askGemini`, `POST /answerWithContext` (callable envelope)
//! - `GET /search_districts?q=` (plain JSON array)
//! - `GET /health`

pub mod callable;
pub mod handlers;

use crate::config::GatewayConfig;
use crate::districts::DistrictDirectory;
use crate::llm::{Advisor, CompletionOracle, GuardPolicy, LlmClient, SqlGenerator};
use crate::types::Result;
use axum::routing::{get, post};
use axum::Router;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

/// State shared by all handlers. Immutable after startup.
#[derive(Clone)]
pub struct AppState {
    pub generator: SqlGenerator,
    pub advisor: Advisor,
    pub districts: Arc<DistrictDirectory>,
    pub model: String,
}

impl AppState {
    /// Wire handlers to one long-lived oracle.
    pub fn new(
        oracle: Arc<dyn CompletionOracle>,
        guard: GuardPolicy,
        districts: DistrictDirectory,
    ) -> Self {
        Self {
            model: oracle.model().to_string(),
            generator: SqlGenerator::with_policy(oracle.clone(), guard),
            advisor: Advisor::new(oracle),
            districts: Arc::new(districts),
        }
    }

    /// Build the oracle client and load the district directory.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` for an unusable LLM config, or the loader's
    /// error if the districts file cannot be read
    pub fn from_config(config: &GatewayConfig) -> Result<Self> {
        let oracle: Arc<dyn CompletionOracle> = Arc::new(LlmClient::new(&config.llm)?);

        let districts = match &config.districts_path {
            Some(path) => DistrictDirectory::load(path)?,
            None => {
                warn!("No districts file configured; /search_districts will return []");
                DistrictDirectory::default()
            }
        };

        Ok(Self::new(oracle, config.guard, districts))
    }
}

/// Create the API router.
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/generateSql", post(handlers::generate_sql))
        .route("/askGemini", post(handlers::ask))
        .route("/answerWithContext", post(handlers::answer_with_context))
        .route("/search_districts", get(handlers::search_districts))
        .route("/health", get(handlers::health))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

/// Bind and serve until Ctrl-C.
///
/// # Errors
///
/// Returns I/O errors from binding or serving
pub async fn serve(bind: &str, state: AppState) -> std::io::Result<()> {
    let app = create_router(state);
    let listener = tokio::net::TcpListener::bind(bind).await?;

    info!(addr = %listener.local_addr()?, "AgriBase gateway listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
}

async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_ok() {
        info!("Shutdown signal received");
    }
}
