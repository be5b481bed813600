use crate::config::Config;
use crate::errors::AppError;
use crate::models::{Lead, LeadRecord};
use async_trait::async_trait;
use aws_sdk_dynamodb::error::DisplayErrorContext;
use aws_sdk_dynamodb::types::AttributeValue;
use std::collections::HashMap;

/// Durable sink for lead records.
#[async_trait]
pub trait LeadStore: Send + Sync {
    /// Writes one new record. There is no update or delete path.
    async fn put_lead(&self, record: &LeadRecord) -> Result<(), AppError>;
}

/// Stamps `lead` with a fresh id and timestamp and writes it to `store`.
pub async fn store_lead(store: &dyn LeadStore, lead: &Lead) -> Result<LeadRecord, AppError> {
    let record = LeadRecord::from_lead(lead);
    tracing::info!("Uploading lead {} to storage...", record.id);
    store.put_lead(&record).await?;
    tracing::info!("✓ Lead {} stored", record.id);
    Ok(record)
}

/// DynamoDB-backed lead table keyed by `id`.
pub struct DynamoLeadStore {
    client: aws_sdk_dynamodb::Client,
    table: String,
}

impl DynamoLeadStore {
    pub fn new(client: aws_sdk_dynamodb::Client, table: String) -> Self {
        Self { client, table }
    }

    /// Loads AWS credentials and region from the environment and honours
    /// the optional endpoint override.
    pub async fn from_config(config: &Config) -> Self {
        let mut loader = aws_config::defaults(aws_config::BehaviorVersion::latest());
        if let Some(ref endpoint) = config.dynamodb_endpoint_url {
            loader = loader.endpoint_url(endpoint);
        }
        let sdk_config = loader.load().await;
        let client = aws_sdk_dynamodb::Client::new(&sdk_config);
        Self::new(client, config.dynamodb_table.clone())
    }

    pub fn table(&self) -> &str {
        &self.table
    }
}

/// Item attributes for a record, all stored as strings.
pub fn record_item(record: &LeadRecord) -> HashMap<String, AttributeValue> {
    HashMap::from([
        ("id".to_string(), AttributeValue::S(record.id.to_string())),
        ("name".to_string(), AttributeValue::S(record.name.clone())),
        ("phone".to_string(), AttributeValue::S(record.phone.clone())),
        ("email".to_string(), AttributeValue::S(record.email.clone())),
        (
            "message".to_string(),
            AttributeValue::S(record.message.clone()),
        ),
        (
            "create-date".to_string(),
            AttributeValue::S(record.create_date.clone()),
        ),
    ])
}

#[async_trait]
impl LeadStore for DynamoLeadStore {
    async fn put_lead(&self, record: &LeadRecord) -> Result<(), AppError> {
        self.client
            .put_item()
            .table_name(&self.table)
            .set_item(Some(record_item(record)))
            .send()
            .await
            .map_err(|e| {
                AppError::StorageWriteFailed(format!(
                    "put_item on {} failed: {}",
                    self.table,
                    DisplayErrorContext(&e)
                ))
            })?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    #[derive(Default)]
    struct RecordingStore {
        records: Mutex<Vec<LeadRecord>>,
    }

    #[async_trait]
    impl LeadStore for RecordingStore {
        async fn put_lead(&self, record: &LeadRecord) -> Result<(), AppError> {
            self.records.lock().unwrap().push(record.clone());
            Ok(())
        }
    }

    struct BrokenStore;

    #[async_trait]
    impl LeadStore for BrokenStore {
        async fn put_lead(&self, _record: &LeadRecord) -> Result<(), AppError> {
            Err(AppError::StorageWriteFailed("AccessDenied".to_string()))
        }
    }

    fn lead() -> Lead {
        Lead {
            name: "Jane".to_string(),
            phone: "555-1234".to_string(),
            email: "jane@x.com".to_string(),
            message: "Hi".to_string(),
        }
    }

    #[test]
    fn test_record_item_attributes() {
        let record = LeadRecord::from_lead(&lead());
        let item = record_item(&record);
        assert_eq!(item.len(), 6);
        assert_eq!(
            item.get("id"),
            Some(&AttributeValue::S(record.id.to_string()))
        );
        assert_eq!(
            item.get("email"),
            Some(&AttributeValue::S("jane@x.com".to_string()))
        );
        assert!(item.contains_key("create-date"));
    }

    #[tokio::test]
    async fn test_store_lead_returns_written_record() {
        let store = RecordingStore::default();
        let record = store_lead(&store, &lead()).await.unwrap();
        let records = store.records.lock().unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0], record);
    }

    #[tokio::test]
    async fn test_store_lead_propagates_failure() {
        let result = store_lead(&BrokenStore, &lead()).await;
        assert!(matches!(result, Err(AppError::StorageWriteFailed(_))));
    }
}
