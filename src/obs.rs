//! Observability and logging.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

const DEFAULT_FILTER: &str = "lead_relay=info";

fn env_filter(default: &str) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| default.into())
}

/// JSON lines for CloudWatch. Timestamps are dropped since CloudWatch adds
/// the ingestion time.
pub fn init_lambda_tracing() {
    tracing_subscriber::registry()
        .with(env_filter(DEFAULT_FILTER))
        .with(
            tracing_subscriber::fmt::layer()
                .json()
                .with_target(false)
                .without_time(),
        )
        .init();
}

/// Human-readable output for the local server.
pub fn init_local_tracing() {
    tracing_subscriber::registry()
        .with(env_filter("lead_relay=debug,local_server=debug,tower_http=debug"))
        .with(tracing_subscriber::fmt::layer())
        .init();
}
