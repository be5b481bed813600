use crate::config::Config;
use crate::errors::AppError;
use crate::models::NotificationPayload;
use reqwest::Client;

/// Client for posting messages to a Discord channel as a bot.
#[derive(Clone)]
pub struct DiscordClient {
    client: Client,
    base_url: String,
    channel_id: String,
    auth_token: String,
}

impl DiscordClient {
    /// No request timeout is set; the hosting platform's invocation timeout
    /// bounds the call.
    pub fn new(config: &Config) -> Self {
        Self {
            client: Client::new(),
            base_url: config.discord_base_url.clone(),
            channel_id: config.discord_channel_id.clone(),
            auth_token: config.discord_auth_token.clone(),
        }
    }

    /// Posts `payload` to the configured channel.
    pub async fn post_message(&self, payload: &NotificationPayload) -> Result<(), AppError> {
        let url = format!("{}/channels/{}/messages", self.base_url, self.channel_id);

        let response = self
            .client
            .post(&url)
            .header("Authorization", format!("Bot {}", self.auth_token))
            .json(payload)
            .send()
            .await
            .map_err(|e| AppError::ChatPostFailed(format!("Discord request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(AppError::ChatPostFailed(format!(
                "Discord returned {}: {}",
                status, error_text
            )));
        }

        Ok(())
    }

    /// Best-effort post: the outcome is logged and never propagated.
    pub async fn notify(&self, payload: &NotificationPayload) {
        match self.post_message(payload).await {
            Ok(()) => tracing::info!(
                "✓ Posted '{}' to Discord channel {}",
                payload.embed.description,
                self.channel_id
            ),
            Err(e) => tracing::warn!("⚠️  Discord notification dropped: {}", e),
        }
    }
}
