use crate::config::Config;
use crate::errors::AppError;
use crate::models::Lead;
use reqwest::Client;

/// Client for the Mailgun messages API.
#[derive(Clone)]
pub struct MailgunClient {
    client: Client,
    base_url: String,
    domain: String,
    api_key: String,
    sender_name: String,
    recipients: Vec<String>,
}

impl MailgunClient {
    /// No request timeout is set; the hosting platform's invocation timeout
    /// bounds the call.
    pub fn new(config: &Config) -> Self {
        Self {
            client: Client::new(),
            base_url: config.mailgun_base_url.clone(),
            domain: config.mailgun_domain.clone(),
            api_key: config.mailgun_api_key.clone(),
            sender_name: config.company_name.clone(),
            recipients: config.mailgun_recipients.clone(),
        }
    }

    /// `<company> Leads<leads@<domain>>`
    pub fn sender(&self) -> String {
        format!("{} Leads<leads@{}>", self.sender_name, self.domain)
    }

    /// Emails the lead to the configured recipients.
    pub async fn send_lead(&self, lead: &Lead) -> Result<(), AppError> {
        let url = format!("{}/{}/messages", self.base_url, self.domain);
        tracing::info!("Sending lead email for {} via Mailgun", lead.name);

        let sender = self.sender();
        let subject = lead_subject(lead);
        let text = lead_message(lead);

        let mut form: Vec<(&str, &str)> = vec![("from", sender.as_str())];
        form.extend(self.recipients.iter().map(|to| ("to", to.as_str())));
        form.push(("subject", subject.as_str()));
        form.push(("text", text.as_str()));

        let response = self
            .client
            .post(&url)
            .basic_auth("api", Some(&self.api_key))
            .form(&form)
            .send()
            .await
            .map_err(|e| AppError::EmailSendFailed(format!("Mailgun request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(AppError::EmailSendFailed(format!(
                "Mailgun returned {}: {}",
                status, error_text
            )));
        }

        tracing::info!("✓ Lead email accepted by Mailgun");
        Ok(())
    }
}

pub fn lead_subject(lead: &Lead) -> String {
    format!("New Customer Lead: {}", lead.name)
}

/// Plain-text email body embedding all four lead fields.
pub fn lead_message(lead: &Lead) -> String {
    format!(
        "Name: {}\nPhone: {}\nEmail: {}\nMessage:\n{}\n",
        lead.name, lead.phone, lead.email, lead.message
    )
}
