pub mod handlers;
mod types;

pub use types::{ErrorResponse, HealthResponse};

use crate::{Result, config::Config, estimation::DurationEstimator, llm::OpenAiClient};
use axum::{
    Router,
    routing::{get, post},
};
use handlers::AppState;
use std::{net::SocketAddr, sync::Arc, time::Duration};
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/api/estimate-duration", post(handlers::estimate_duration))
        .route("/health", get(handlers::health))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

pub async fn run(config: Config) -> Result<()> {
    info!(
        "Using {} model '{}' for duration estimates",
        config.llm.provider, config.llm.model
    );
    let llm_client = Arc::new(OpenAiClient::new(config.llm.clone()));

    let app_state = AppState {
        estimator: DurationEstimator::new(llm_client),
        timeout: Duration::from_secs(config.estimation.timeout_secs),
    };

    let app = router(app_state);

    let addr = SocketAddr::new(config.server.host.parse()?, config.server.port);

    info!("Starting server on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
