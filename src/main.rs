use lambda_runtime::{run, service_fn, Error};
use lead_relay::config::Config;
use lead_relay::handlers::{function_handler, LeadRelay};
use lead_relay::obs::init_lambda_tracing;

/// Lambda entry point.
///
/// Configuration, the DynamoDB client and the HTTP clients are built once
/// per container at cold start and shared by every invocation.
#[tokio::main]
async fn main() -> Result<(), Error> {
    init_lambda_tracing();

    let config = Config::from_env()?;
    let relay = LeadRelay::from_config(config).await?;
    tracing::info!("Lead relay ready");

    run(service_fn(|event| function_handler(&relay, event))).await
}
