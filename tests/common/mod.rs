//! Shared helpers for intake integration tests
#![allow(dead_code)]

use async_trait::async_trait;
use letterbox_intake::IntakeError;
use letterbox_intake::handlers::intake::IntakeContext;
use letterbox_intake::models::{Issue, SnsEvent};
use letterbox_intake::services::issues::{InMemoryIssueStore, IssueStore};
use letterbox_intake::services::subscriptions::InMemorySubscriptionStore;
use letterbox_intake::services::users::InMemoryUserStore;
use serde_json::{Value, json};
use std::sync::Arc;

/// In-memory stores wired into an `IntakeContext`, kept accessible for
/// assertions
pub struct TestStores {
    pub issues: Arc<InMemoryIssueStore>,
    pub subscriptions: Arc<InMemorySubscriptionStore>,
    pub users: Arc<InMemoryUserStore>,
}

pub fn test_context() -> (IntakeContext, TestStores) {
    let stores = TestStores {
        issues: Arc::new(InMemoryIssueStore::new()),
        subscriptions: Arc::new(InMemorySubscriptionStore::new()),
        users: Arc::new(InMemoryUserStore::new()),
    };

    let ctx = IntakeContext::new(
        Arc::clone(&stores.issues) as Arc<dyn IssueStore>,
        stores.subscriptions.clone(),
        stores.users.clone(),
    );

    (ctx, stores)
}

/// Builds a complete SES receipt notification payload
pub fn ses_message(sender: &str, subject: &str, recipients: &[&str]) -> Value {
    json!({
        "mail": {
            "commonHeaders": {
                "from": [sender],
                "subject": subject
            },
            "source": sender,
            "destination": recipients
        },
        "receipt": {
            "action": {
                "type": "S3",
                "bucketName": "letterbox-raw-mail",
                "objectKey": "inbound/abc123"
            }
        }
    })
}

/// Wraps notification payloads the way SNS delivers them: one record per
/// message, each message JSON-stringified
pub fn sns_event(messages: &[Value]) -> SnsEvent {
    let records: Vec<Value> = messages
        .iter()
        .map(|message| json!({ "Sns": { "Message": message.to_string() } }))
        .collect();

    serde_json::from_value(json!({ "Records": records })).unwrap()
}

/// Issue store that fails every write, for error-containment tests
pub struct FailingIssueStore;

#[async_trait]
impl IssueStore for FailingIssueStore {
    async fn put(&self, _issue: &Issue) -> Result<(), IntakeError> {
        Err(IntakeError::Storage(
            "DynamoDB put_item failed: simulated outage".to_string(),
        ))
    }
}
