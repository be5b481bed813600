use crate::models::{Embed, EmbedField, Lead, Method, NotificationPayload};

const ALERT_CONTENT: &str = "ALERT!!! ";

/// Builds the chat notification for a relay outcome.
///
/// The description depends only on `method`: storage and email always read
/// "`<method>` failed!" because the handler only reports those stages when
/// they fail, while `Lambda` reads "Lambda function success!".
///
/// The `Email` field carries `lead.phone`, not `lead.email`.
pub fn create_payload(
    is_success: bool,
    lead: &Lead,
    method: Method,
    company_name: &str,
) -> NotificationPayload {
    let status = if is_success { "Successful" } else { "Failed" };

    let description = match method {
        Method::DynamoDb | Method::Mailgun => format!("{} failed!", method),
        Method::Lambda => format!("{} function success!", method),
    };

    let fields = [
        ("Status", status),
        ("Method", method.as_str()),
        ("Name", lead.name.as_str()),
        ("Phone", lead.phone.as_str()),
        ("Email", lead.phone.as_str()),
        ("Message", lead.message.as_str()),
    ]
    .into_iter()
    .map(|(name, value)| EmbedField {
        name: name.to_string(),
        value: value.to_string(),
        inline: false,
    })
    .collect();

    NotificationPayload {
        content: ALERT_CONTENT.to_string(),
        embed: Embed {
            kind: "rich".to_string(),
            title: format!("{} Customer Lead", company_name),
            description,
            fields,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn jane() -> Lead {
        Lead {
            name: "Jane".to_string(),
            phone: "555-1234".to_string(),
            email: "jane@x.com".to_string(),
            message: "Hi".to_string(),
        }
    }

    #[test]
    fn test_field_order() {
        let payload = create_payload(true, &jane(), Method::Lambda, "Adep");
        let names: Vec<&str> = payload.embed.fields.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(
            names,
            vec!["Status", "Method", "Name", "Phone", "Email", "Message"]
        );
        assert!(payload.embed.fields.iter().all(|f| !f.inline));
    }

    #[test]
    fn test_success_payload() {
        let payload = create_payload(true, &jane(), Method::Lambda, "Adep");
        assert_eq!(payload.content, "ALERT!!! ");
        assert_eq!(payload.embed.kind, "rich");
        assert_eq!(payload.embed.title, "Adep Customer Lead");
        assert_eq!(payload.embed.description, "Lambda function success!");
        assert_eq!(payload.field("Status"), Some("Successful"));
        assert_eq!(payload.field("Method"), Some("Lambda"));
    }

    #[test]
    fn test_description_ignores_success_flag() {
        let payload = create_payload(true, &jane(), Method::Mailgun, "Adep");
        assert_eq!(payload.embed.description, "Mailgun failed!");
        assert_eq!(payload.field("Status"), Some("Successful"));
    }

    #[test]
    fn test_email_field_carries_phone() {
        let payload = create_payload(false, &jane(), Method::DynamoDb, "Adep");
        assert_eq!(payload.field("Email"), Some("555-1234"));
        assert_eq!(payload.field("Phone"), Some("555-1234"));
    }

    #[test]
    fn test_serialized_shape() {
        let payload = create_payload(false, &jane(), Method::DynamoDb, "Adep");
        let value = serde_json::to_value(&payload).unwrap();
        assert_eq!(value["embed"]["type"], "rich");
        assert_eq!(value["embed"]["description"], "DynamoDB failed!");
        assert_eq!(value["embed"]["fields"][0]["name"], "Status");
        assert_eq!(value["embed"]["fields"][0]["value"], "Failed");
        assert_eq!(value["embed"]["fields"][0]["inline"], false);
    }
}
