/// User store - read-only lookups against the users table
use crate::constants::EMAIL_INDEX_NAME;
use crate::error::IntakeError;
use async_trait::async_trait;
use aws_sdk_dynamodb::types::AttributeValue;
use std::collections::HashMap;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserStore: Send + Sync {
    /// Returns the ids of all users whose email matches exactly
    ///
    /// The email index should hold at most one row per address; callers
    /// decide what to do when it does not.
    async fn find_by_email(&self, email: &str) -> Result<Vec<String>, IntakeError>;
}

/// DynamoDB-backed user store, querying the email-equality GSI
pub struct DynamoDbUserStore {
    client: aws_sdk_dynamodb::Client,
    table_name: String,
}

impl DynamoDbUserStore {
    pub fn new(client: aws_sdk_dynamodb::Client, table_name: String) -> Self {
        Self { client, table_name }
    }
}

#[async_trait]
impl UserStore for DynamoDbUserStore {
    async fn find_by_email(&self, email: &str) -> Result<Vec<String>, IntakeError> {
        let result = self
            .client
            .query()
            .table_name(&self.table_name)
            .index_name(EMAIL_INDEX_NAME)
            .key_condition_expression("email = :email")
            .expression_attribute_values(":email", AttributeValue::S(email.to_string()))
            .send()
            .await
            .map_err(|e| IntakeError::Lookup(format!("DynamoDB query failed: {}", e)))?;

        Ok(result
            .items()
            .iter()
            .filter_map(|item| item.get("id").and_then(|v| v.as_s().ok().cloned()))
            .collect())
    }
}

/// In-memory user store for testing
#[derive(Default)]
pub struct InMemoryUserStore {
    users: tokio::sync::Mutex<HashMap<String, Vec<String>>>,
}

impl InMemoryUserStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn register(&self, email: &str, user_id: &str) {
        self.users
            .lock()
            .await
            .entry(email.to_string())
            .or_default()
            .push(user_id.to_string());
    }
}

#[async_trait]
impl UserStore for InMemoryUserStore {
    async fn find_by_email(&self, email: &str) -> Result<Vec<String>, IntakeError> {
        Ok(self
            .users
            .lock()
            .await
            .get(email)
            .cloned()
            .unwrap_or_default())
    }
}
