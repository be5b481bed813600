//! Local development server.
//!
//! Serves the same relay as the Lambda entry point over plain HTTP so the
//! contact form can be exercised end to end without deploying.
//!
//! `POST /api/v1/leads` takes the Lambda event body (`{ "data": {...} }`).

use axum::{
    routing::{get, post},
    Router,
};
use lead_relay::config::Config;
use lead_relay::handlers::{self, LeadRelay};
use lead_relay::obs::init_local_tracing;
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::{limit::RequestBodyLimitLayer, trace::TraceLayer};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_local_tracing();

    let config = Config::from_env()?;
    let port = config.port;
    let relay = Arc::new(LeadRelay::from_config(config).await?);

    let app = Router::new()
        .route("/health", get(handlers::health))
        .route("/api/v1/leads", post(handlers::process_lead))
        .with_state(relay)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                // Contact forms are tiny; 64KB is plenty
                .layer(RequestBodyLimitLayer::new(64 * 1024)),
        );

    let addr = format!("0.0.0.0:{}", port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Local lead relay listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
