/// Subscription stats store - per-(user, inbox) delivery counters
///
/// The counter update is atomic: an increment guarded by `attribute_exists`,
/// with a conditional create when the row is missing. Concurrent invocations
/// for the same pair cannot lose an increment.
use crate::constants::{INBOX_KEY_PREFIX, PUBLISHER_KEY_PREFIX, USER_KEY_PREFIX};
use crate::error::IntakeError;
use crate::models::SubscriptionStats;
use async_trait::async_trait;
use aws_sdk_dynamodb::types::AttributeValue;
use std::collections::HashMap;
use tracing::{debug, info};

#[async_trait]
pub trait SubscriptionStore: Send + Sync {
    /// Counts one delivery for the (user, inbox) pair
    ///
    /// Creates the row with totalReceived = 1 on first sight; otherwise
    /// increments the counter and advances lastReceived/lastUpdated. The
    /// publisher index attribute is refreshed either way.
    async fn record_delivery(
        &self,
        user_id: &str,
        inbox: &str,
        timestamp: &str,
        publisher: &str,
    ) -> Result<(), IntakeError>;
}

/// DynamoDB-backed subscription stats store
pub struct DynamoDbSubscriptionStore {
    client: aws_sdk_dynamodb::Client,
    table_name: String,
}

impl DynamoDbSubscriptionStore {
    pub fn new(client: aws_sdk_dynamodb::Client, table_name: String) -> Self {
        Self { client, table_name }
    }

    /// Increments an existing row. Returns false when the row does not exist.
    async fn try_increment(
        &self,
        user_id: &str,
        inbox: &str,
        timestamp: &str,
        publisher: &str,
    ) -> Result<bool, IntakeError> {
        let result = self
            .client
            .update_item()
            .table_name(&self.table_name)
            .key(
                "partitionKey",
                AttributeValue::S(format!("{}{}", USER_KEY_PREFIX, user_id)),
            )
            .key(
                "sortKey",
                AttributeValue::S(format!("{}{}", INBOX_KEY_PREFIX, inbox)),
            )
            .condition_expression("attribute_exists(partitionKey)")
            .update_expression(
                "SET lastReceived = :ts, GSI2PK = :publisher, \
                 stats.lastUpdated = :ts, stats.totalReceived = stats.totalReceived + :one",
            )
            .expression_attribute_values(":ts", AttributeValue::S(timestamp.to_string()))
            .expression_attribute_values(
                ":publisher",
                AttributeValue::S(format!("{}{}", PUBLISHER_KEY_PREFIX, publisher)),
            )
            .expression_attribute_values(":one", AttributeValue::N("1".to_string()))
            .send()
            .await;

        match result {
            Ok(_) => Ok(true),
            Err(e)
                if e.as_service_error()
                    .is_some_and(|se| se.is_conditional_check_failed_exception()) =>
            {
                Ok(false)
            }
            Err(e) => Err(IntakeError::Storage(format!(
                "DynamoDB update_item failed: {}",
                e
            ))),
        }
    }

    /// Creates the initial row. Returns false when another invocation created
    /// it first.
    async fn try_create(
        &self,
        user_id: &str,
        inbox: &str,
        timestamp: &str,
        publisher: &str,
    ) -> Result<bool, IntakeError> {
        let stats = HashMap::from([
            ("totalReceived".to_string(), AttributeValue::N("1".to_string())),
            (
                "lastUpdated".to_string(),
                AttributeValue::S(timestamp.to_string()),
            ),
        ]);

        let result = self
            .client
            .put_item()
            .table_name(&self.table_name)
            .item(
                "partitionKey",
                AttributeValue::S(format!("{}{}", USER_KEY_PREFIX, user_id)),
            )
            .item(
                "sortKey",
                AttributeValue::S(format!("{}{}", INBOX_KEY_PREFIX, inbox)),
            )
            .item("lastReceived", AttributeValue::S(timestamp.to_string()))
            .item(
                "GSI2PK",
                AttributeValue::S(format!("{}{}", PUBLISHER_KEY_PREFIX, publisher)),
            )
            .item("stats", AttributeValue::M(stats))
            .item("createdAt", AttributeValue::S(timestamp.to_string()))
            .condition_expression("attribute_not_exists(partitionKey)")
            .send()
            .await;

        match result {
            Ok(_) => Ok(true),
            Err(e)
                if e.as_service_error()
                    .is_some_and(|se| se.is_conditional_check_failed_exception()) =>
            {
                debug!(user_id, inbox, "Lost subscription stats creation race");
                Ok(false)
            }
            Err(e) => Err(IntakeError::Storage(format!(
                "DynamoDB put_item failed: {}",
                e
            ))),
        }
    }
}

#[async_trait]
impl SubscriptionStore for DynamoDbSubscriptionStore {
    async fn record_delivery(
        &self,
        user_id: &str,
        inbox: &str,
        timestamp: &str,
        publisher: &str,
    ) -> Result<(), IntakeError> {
        if self.try_increment(user_id, inbox, timestamp, publisher).await? {
            return Ok(());
        }

        if self.try_create(user_id, inbox, timestamp, publisher).await? {
            info!(user_id, inbox, "Created subscription stats record");
            return Ok(());
        }

        // Lost the creation race; the row exists now, so the increment must
        // succeed
        if self.try_increment(user_id, inbox, timestamp, publisher).await? {
            return Ok(());
        }

        Err(IntakeError::Storage(format!(
            "Subscription stats row for user {} inbox {} vanished during update",
            user_id, inbox
        )))
    }
}

/// In-memory subscription stats store for testing
///
/// The whole create-or-increment happens under one lock, matching the
/// atomicity of the DynamoDB implementation.
#[derive(Default)]
pub struct InMemorySubscriptionStore {
    rows: tokio::sync::Mutex<HashMap<(String, String), SubscriptionStats>>,
}

impl InMemorySubscriptionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn get(&self, user_id: &str, inbox: &str) -> Option<SubscriptionStats> {
        self.rows
            .lock()
            .await
            .get(&(user_id.to_string(), inbox.to_string()))
            .cloned()
    }

    pub async fn len(&self) -> usize {
        self.rows.lock().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.rows.lock().await.is_empty()
    }
}

#[async_trait]
impl SubscriptionStore for InMemorySubscriptionStore {
    async fn record_delivery(
        &self,
        user_id: &str,
        inbox: &str,
        timestamp: &str,
        publisher: &str,
    ) -> Result<(), IntakeError> {
        let mut rows = self.rows.lock().await;
        let key = (user_id.to_string(), inbox.to_string());

        match rows.get_mut(&key) {
            Some(stats) => {
                stats.total_received += 1;
                stats.last_received = timestamp.to_string();
                stats.last_updated = timestamp.to_string();
                stats.publisher = publisher.to_string();
            }
            None => {
                rows.insert(
                    key,
                    SubscriptionStats {
                        user_id: user_id.to_string(),
                        inbox: inbox.to_string(),
                        last_received: timestamp.to_string(),
                        publisher: publisher.to_string(),
                        total_received: 1,
                        last_updated: timestamp.to_string(),
                        created_at: timestamp.to_string(),
                    },
                );
            }
        }

        Ok(())
    }
}
