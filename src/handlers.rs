use crate::config::Config;
use crate::db_storage::{store_lead, DynamoLeadStore, LeadStore};
use crate::discord::DiscordClient;
use crate::errors::{AppError, ResultExt};
use crate::mailgun::MailgunClient;
use crate::models::{FailedStage, Lead, LeadEvent, LeadRecord, LeadResponse, Method};
use crate::payload::create_payload;
use axum::{
    extract::State,
    http::{HeaderName, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use lambda_runtime::LambdaEvent;
use serde_json::json;
use std::sync::Arc;

/// The relay: persistence writer, email notifier and chat notifier, wired
/// from one immutable configuration.
pub struct LeadRelay {
    /// Application configuration.
    pub config: Config,
    /// Lead table.
    pub store: Arc<dyn LeadStore>,
    /// Email notifier.
    pub mailer: MailgunClient,
    /// Chat notifier (best effort).
    pub chat: DiscordClient,
}

impl LeadRelay {
    pub fn new(
        config: Config,
        store: Arc<dyn LeadStore>,
        mailer: MailgunClient,
        chat: DiscordClient,
    ) -> Self {
        Self {
            config,
            store,
            mailer,
            chat,
        }
    }

    /// Wires the production DynamoDB store and HTTP clients.
    pub async fn from_config(config: Config) -> anyhow::Result<Self> {
        let store = DynamoLeadStore::from_config(&config).await;
        tracing::info!("✓ DynamoDB store initialized: {}", store.table());
        let mailer = MailgunClient::new(&config);
        let chat = DiscordClient::new(&config);
        Ok(Self::new(config, Arc::new(store), mailer, chat))
    }

    /// Runs one submission through storage, email and chat, in that order.
    ///
    /// Flow:
    /// 1. Write the lead record. On failure, alert chat and return 500.
    /// 2. Email the lead. On failure, alert chat and return 500. A record
    ///    written in step 1 is not rolled back.
    /// 3. Post the success notice and return 200 with CORS headers.
    ///
    /// Chat failures are logged and never affect the response.
    pub async fn handle(&self, lead: &Lead) -> LeadResponse {
        tracing::info!(
            name = %lead.name,
            phone = %lead.phone,
            email = %lead.email,
            message = %lead.message,
            "📨 Received lead submission"
        );

        match self.relay(lead).await {
            Ok(record) => {
                tracing::info!("✅ Lead {} relayed", record.id);
                let payload =
                    create_payload(true, lead, Method::Lambda, &self.config.company_name);
                self.chat.notify(&payload).await;
                LeadResponse::success(&self.config.company_url)
            }
            Err((stage, e)) => {
                let method = stage.method();
                tracing::error!(stage = %method, "❌ Lead relay failed: {}", e);
                let payload = create_payload(false, lead, method, &self.config.company_name);
                self.chat.notify(&payload).await;
                LeadResponse::failure(stage)
            }
        }
    }

    async fn relay(&self, lead: &Lead) -> Result<LeadRecord, (FailedStage, AppError)> {
        let record = store_lead(self.store.as_ref(), lead)
            .await
            .context("storing lead")
            .map_err(|e| (FailedStage::Storage, e))?;
        self.mailer
            .send_lead(lead)
            .await
            .context(format!("emailing lead {}", record.id))
            .map_err(|e| (FailedStage::Email, e))?;
        Ok(record)
    }
}

/// Lambda entry point for a direct invocation carrying `{ "data": ... }`.
pub async fn function_handler(
    relay: &LeadRelay,
    event: LambdaEvent<LeadEvent>,
) -> Result<LeadResponse, lambda_runtime::Error> {
    let (event, context) = event.into_parts();
    tracing::info!("Lambda invocation {}", context.request_id);
    Ok(relay.handle(&event.data).await)
}

impl IntoResponse for LeadResponse {
    /// Maps the proxy-shaped response onto a real HTTP response.
    fn into_response(self) -> Response {
        let status =
            StatusCode::from_u16(self.status_code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        let mut response = (status, self.body).into_response();

        for (name, value) in self.headers.unwrap_or_default() {
            match (
                HeaderName::from_bytes(name.as_bytes()),
                HeaderValue::from_str(&value),
            ) {
                (Ok(name), Ok(value)) => {
                    response.headers_mut().insert(name, value);
                }
                _ => tracing::warn!("Skipping invalid response header {}: {}", name, value),
            }
        }

        response
    }
}

/// Health check endpoint.
pub async fn health() -> (StatusCode, Json<serde_json::Value>) {
    (
        StatusCode::OK,
        Json(json!({
            "status": "healthy",
            "service": "lead-relay",
            "version": env!("CARGO_PKG_VERSION")
        })),
    )
}

/// POST /api/v1/leads
///
/// Local development twin of the Lambda entry point.
pub async fn process_lead(
    State(relay): State<Arc<LeadRelay>>,
    Json(event): Json<LeadEvent>,
) -> LeadResponse {
    relay.handle(&event.data).await
}
