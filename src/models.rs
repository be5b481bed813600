use chrono::{Local, NaiveDateTime, Timelike};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use uuid::Uuid;

/// A contact-form submission. Every field is an opaque string; nothing is
/// validated and absent fields arrive as empty strings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct Lead {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub message: String,
}

/// Inbound invocation event: `{ "data": { name, phone, email, message } }`.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LeadEvent {
    pub data: Lead,
}

/// A lead as written to the key-value table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LeadRecord {
    pub id: Uuid,
    pub name: String,
    pub phone: String,
    pub email: String,
    pub message: String,
    #[serde(rename = "create-date")]
    pub create_date: String,
}

impl LeadRecord {
    /// Stamps a lead with a fresh random id and the current local time.
    pub fn from_lead(lead: &Lead) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: lead.name.clone(),
            phone: lead.phone.clone(),
            email: lead.email.clone(),
            message: lead.message.clone(),
            create_date: render_local_datetime(Local::now().naive_local()),
        }
    }
}

/// `2024-05-01 14:03:22.481516`, with the fraction left off entirely when
/// the microseconds are zero.
pub fn render_local_datetime(at: NaiveDateTime) -> String {
    let seconds = at.format("%Y-%m-%d %H:%M:%S").to_string();
    match (at.nanosecond() / 1_000) % 1_000_000 {
        0 => seconds,
        micros => format!("{}.{:06}", seconds, micros),
    }
}

/// Outbound response in the API Gateway proxy shape.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LeadResponse {
    pub status_code: u16,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub headers: Option<HashMap<String, String>>,
    pub body: String,
}

pub const STORAGE_FAILURE_BODY: &str = "There was a problem uploading your data to DynamoDB.";
pub const EMAIL_FAILURE_BODY: &str = "There was a problem sending your email via the Mailgun API.";
pub const SUCCESS_BODY: &str = "success";

impl LeadResponse {
    /// 200 with the CORS headers for `origin`.
    pub fn success(origin: &str) -> Self {
        let headers = HashMap::from([
            (
                "Access-Control-Allow-Headers".to_string(),
                "Content-Type".to_string(),
            ),
            ("Access-Control-Allow-Origin".to_string(), origin.to_string()),
            (
                "Access-Control-Allow-Methods".to_string(),
                "OPTIONS,POST".to_string(),
            ),
        ]);
        Self {
            status_code: 200,
            headers: Some(headers),
            body: SUCCESS_BODY.to_string(),
        }
    }

    /// 500 with the fixed body for the stage that failed.
    pub fn failure(stage: FailedStage) -> Self {
        Self {
            status_code: 500,
            headers: None,
            body: stage.body().to_string(),
        }
    }
}

/// A relay stage whose failure ends the request with a 500.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailedStage {
    Storage,
    Email,
}

impl FailedStage {
    /// Method reported in the chat alert.
    pub fn method(&self) -> Method {
        match self {
            FailedStage::Storage => Method::DynamoDb,
            FailedStage::Email => Method::Mailgun,
        }
    }

    pub fn body(&self) -> &'static str {
        match self {
            FailedStage::Storage => STORAGE_FAILURE_BODY,
            FailedStage::Email => EMAIL_FAILURE_BODY,
        }
    }
}

/// The relay stage a notification reports on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Method {
    DynamoDb,
    Mailgun,
    Lambda,
}

impl Method {
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::DynamoDb => "DynamoDB",
            Method::Mailgun => "Mailgun",
            Method::Lambda => "Lambda",
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Chat message body posted to the notification channel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NotificationPayload {
    pub content: String,
    pub embed: Embed,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Embed {
    #[serde(rename = "type")]
    pub kind: String,
    pub title: String,
    pub description: String,
    pub fields: Vec<EmbedField>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EmbedField {
    pub name: String,
    pub value: String,
    pub inline: bool,
}

impl NotificationPayload {
    /// Looks up a field value by its label.
    pub fn field(&self, name: &str) -> Option<&str> {
        self.embed
            .fields
            .iter()
            .find(|f| f.name == name)
            .map(|f| f.value.as_str())
    }
}
