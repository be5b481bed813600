const DEFAULT_MAILGUN_BASE_URL: &str = "https://api.mailgun.net/v3";
const DEFAULT_DISCORD_API_BASE_URL: &str = "https://discord.com/api/v9";

/// Process-wide settings, read once at cold start and passed by reference
/// into every component.
///
/// Service settings are taken as-is: a missing or blank value is kept as an
/// empty string and only shows up when the call that uses it fails. The
/// recipient list is the one required value.
#[derive(Debug, Clone)]
pub struct Config {
    pub company_name: String,
    /// Allowed CORS origin on successful responses.
    pub company_url: String,
    pub discord_channel_id: String,
    pub discord_auth_token: String,
    pub discord_base_url: String,
    pub mailgun_domain: String,
    pub mailgun_api_key: String,
    pub mailgun_base_url: String,
    /// `to` recipients of the lead email.
    pub mailgun_recipients: Vec<String>,
    pub dynamodb_table: String,
    /// Endpoint override, e.g. `http://localhost:8000` for DynamoDB Local.
    pub dynamodb_endpoint_url: Option<String>,
    /// Only used by the local development server.
    pub port: u16,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the configuration from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let setting = |key: &str| lookup(key).unwrap_or_default();

        let base_url = |key: &str, default: &str| -> anyhow::Result<String> {
            let url = lookup(key)
                .filter(|s| !s.trim().is_empty())
                .unwrap_or_else(|| default.to_string());
            if !url.starts_with("http://") && !url.starts_with("https://") {
                anyhow::bail!("{} must start with http:// or https://", key);
            }
            Ok(url.trim_end_matches('/').to_string())
        };

        let config = Self {
            company_name: setting("COMPANY_NAME"),
            company_url: setting("COMPANY_URL"),
            discord_channel_id: setting("DISCORD_CHANNEL_ID"),
            discord_auth_token: setting("DISCORD_AUTH_TOKEN"),
            discord_base_url: base_url("DISCORD_API_BASE_URL", DEFAULT_DISCORD_API_BASE_URL)?,
            mailgun_domain: setting("MAILGUN_DOMAIN"),
            mailgun_api_key: setting("MAILGUN_API_KEY"),
            mailgun_base_url: base_url("MAILGUN_BASE_URL", DEFAULT_MAILGUN_BASE_URL)?,
            mailgun_recipients: lookup("MAILGUN_RECIPIENTS")
                .map(|list| {
                    list.split(',')
                        .map(str::trim)
                        .filter(|s| !s.is_empty())
                        .map(String::from)
                        .collect::<Vec<_>>()
                })
                .unwrap_or_default(),
            dynamodb_table: lookup("DYNAMODB_TABLE")
                .or_else(|| lookup("LEADS_TABLE"))
                .unwrap_or_default(),
            dynamodb_endpoint_url: lookup("DYNAMODB_ENDPOINT_URL").filter(|s| !s.trim().is_empty()),
            port: lookup("PORT")
                .unwrap_or_else(|| "3000".to_string())
                .parse()
                .map_err(|_| anyhow::anyhow!("PORT must be a valid number between 1-65535"))?,
        };

        if config.mailgun_recipients.is_empty() {
            anyhow::bail!("MAILGUN_RECIPIENTS must contain at least one address");
        }
        if config.mailgun_api_key.trim().is_empty() {
            tracing::warn!("MAILGUN_API_KEY is not set; lead emails will be rejected");
        }
        if config.dynamodb_table.trim().is_empty() {
            tracing::warn!("DYNAMODB_TABLE is not set; lead writes will fail");
        }

        // Secrets stay out of the logs
        tracing::info!("Configuration loaded successfully");
        tracing::debug!("Company: {} ({})", config.company_name, config.company_url);
        tracing::debug!("Mailgun: {} via {}", config.mailgun_domain, config.mailgun_base_url);
        tracing::debug!("Discord channel: {}", config.discord_channel_id);
        tracing::debug!("DynamoDB table: {}", config.dynamodb_table);
        if let Some(ref endpoint) = config.dynamodb_endpoint_url {
            tracing::info!("DynamoDB endpoint override: {}", endpoint);
        }

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn base_env() -> HashMap<&'static str, String> {
        HashMap::from([
            ("COMPANY_NAME", "Adep".to_string()),
            ("COMPANY_URL", "https://adepdev.com".to_string()),
            ("DISCORD_CHANNEL_ID", "1234".to_string()),
            ("DISCORD_AUTH_TOKEN", "token".to_string()),
            ("MAILGUN_DOMAIN", "mg.adepdev.com".to_string()),
            ("MAILGUN_API_KEY", "key-abc".to_string()),
            ("MAILGUN_RECIPIENTS", "a@adepdev.com, b@adepdev.com".to_string()),
            ("DYNAMODB_TABLE", "leads".to_string()),
        ])
    }

    fn load(env: &HashMap<&'static str, String>) -> anyhow::Result<Config> {
        Config::from_lookup(|key| env.get(key).cloned())
    }

    #[test]
    fn test_loads_with_defaults() {
        let config = load(&base_env()).unwrap();
        assert_eq!(config.company_name, "Adep");
        assert_eq!(config.mailgun_base_url, "https://api.mailgun.net/v3");
        assert_eq!(config.discord_base_url, "https://discord.com/api/v9");
        assert_eq!(config.mailgun_recipients, vec!["a@adepdev.com", "b@adepdev.com"]);
        assert_eq!(config.port, 3000);
        assert!(config.dynamodb_endpoint_url.is_none());
    }

    #[test]
    fn test_missing_setting_loads_as_empty() {
        let mut env = base_env();
        env.remove("MAILGUN_API_KEY");
        env.remove("DYNAMODB_TABLE");
        let config = load(&env).unwrap();
        assert_eq!(config.mailgun_api_key, "");
        assert_eq!(config.dynamodb_table, "");
    }

    #[test]
    fn test_blank_setting_kept_verbatim() {
        let mut env = base_env();
        env.insert("COMPANY_URL", "".to_string());
        assert_eq!(load(&env).unwrap().company_url, "");
    }

    #[test]
    fn test_missing_recipients_rejected() {
        let mut env = base_env();
        env.remove("MAILGUN_RECIPIENTS");
        let err = load(&env).unwrap_err();
        assert!(err.to_string().contains("MAILGUN_RECIPIENTS"));
    }

    #[test]
    fn test_table_alias() {
        let mut env = base_env();
        env.remove("DYNAMODB_TABLE");
        env.insert("LEADS_TABLE", "leads-alias".to_string());
        assert_eq!(load(&env).unwrap().dynamodb_table, "leads-alias");
    }

    #[test]
    fn test_base_url_override_trims_slash() {
        let mut env = base_env();
        env.insert("MAILGUN_BASE_URL", "http://127.0.0.1:9000/".to_string());
        assert_eq!(load(&env).unwrap().mailgun_base_url, "http://127.0.0.1:9000");
    }

    #[test]
    fn test_invalid_base_url() {
        let mut env = base_env();
        env.insert("DISCORD_API_BASE_URL", "discord.com".to_string());
        assert!(load(&env).is_err());
    }

    #[test]
    fn test_empty_recipient_list() {
        let mut env = base_env();
        env.insert("MAILGUN_RECIPIENTS", " , ".to_string());
        assert!(load(&env).is_err());
    }
}
