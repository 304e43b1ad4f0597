/// Issue store - writes one row per delivered (inbox, issue) pair
use crate::constants::{INBOX_KEY_PREFIX, ISSUE_KEY_PREFIX, USER_KEY_PREFIX};
use crate::error::IntakeError;
use crate::models::Issue;
use async_trait::async_trait;
use aws_sdk_dynamodb::types::AttributeValue;
use tracing::info;

#[async_trait]
pub trait IssueStore: Send + Sync {
    /// Unconditional put: issue ids are freshly generated per notification
    /// record, so no existence check or upsert semantics are needed.
    async fn put(&self, issue: &Issue) -> Result<(), IntakeError>;
}

/// DynamoDB-backed issue store
pub struct DynamoDbIssueStore {
    client: aws_sdk_dynamodb::Client,
    table_name: String,
}

impl DynamoDbIssueStore {
    pub fn new(client: aws_sdk_dynamodb::Client, table_name: String) -> Self {
        Self { client, table_name }
    }
}

#[async_trait]
impl IssueStore for DynamoDbIssueStore {
    async fn put(&self, issue: &Issue) -> Result<(), IntakeError> {
        self.client
            .put_item()
            .table_name(&self.table_name)
            .item(
                "partitionKey",
                AttributeValue::S(format!("{}{}", INBOX_KEY_PREFIX, issue.inbox)),
            )
            .item(
                "sortKey",
                AttributeValue::S(format!("{}{}", ISSUE_KEY_PREFIX, issue.issue_id)),
            )
            .item(
                "GSI1PK",
                AttributeValue::S(format!("{}{}", USER_KEY_PREFIX, issue.user_id)),
            )
            .item("receivedAt", AttributeValue::S(issue.received_at.clone()))
            .item("issueId", AttributeValue::S(issue.issue_id.clone()))
            .item("sender", AttributeValue::S(issue.sender.clone()))
            .item("subject", AttributeValue::S(issue.subject.clone()))
            .item("s3Location", AttributeValue::S(issue.s3_location.clone()))
            .item("contentType", AttributeValue::S(issue.content_type.clone()))
            .item("status", AttributeValue::S(issue.status.clone()))
            .item("archived", AttributeValue::Bool(issue.archived))
            .item("starred", AttributeValue::Bool(issue.starred))
            .send()
            .await
            .map_err(|e| IntakeError::Storage(format!("DynamoDB put_item failed: {}", e)))?;

        info!(
            issue_id = %issue.issue_id,
            user_id = %issue.user_id,
            "Stored issue record"
        );

        Ok(())
    }
}

/// In-memory issue store for testing
#[derive(Default)]
pub struct InMemoryIssueStore {
    issues: tokio::sync::Mutex<Vec<Issue>>,
}

impl InMemoryIssueStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn issues(&self) -> Vec<Issue> {
        self.issues.lock().await.clone()
    }

    pub async fn for_inbox(&self, inbox: &str) -> Vec<Issue> {
        self.issues
            .lock()
            .await
            .iter()
            .filter(|issue| issue.inbox == inbox)
            .cloned()
            .collect()
    }
}

#[async_trait]
impl IssueStore for InMemoryIssueStore {
    async fn put(&self, issue: &Issue) -> Result<(), IntakeError> {
        self.issues.lock().await.push(issue.clone());
        Ok(())
    }
}
