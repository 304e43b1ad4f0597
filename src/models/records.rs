/// Persisted row models and the handler response schema
use crate::constants::{COMPLETION_MESSAGE, ISSUE_CONTENT_TYPE, ISSUE_STATUS_RECEIVED};
use crate::models::EmailDetails;
use serde::{Deserialize, Serialize};

/// One delivered email addressed to one resolved recipient inbox
///
/// Written once at intake time and never mutated by this handler; archive,
/// star, and lifecycle transitions belong to the reader API.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Issue {
    pub inbox: String,
    pub issue_id: String,
    pub user_id: String,
    pub received_at: String,
    pub sender: String,
    pub subject: String,
    pub s3_location: String,
    pub content_type: String,
    pub status: String,
    pub archived: bool,
    pub starred: bool,
}

impl Issue {
    pub fn new(
        details: &EmailDetails,
        user_id: &str,
        inbox: &str,
        issue_id: &str,
        received_at: &str,
    ) -> Self {
        Self {
            inbox: inbox.to_string(),
            issue_id: issue_id.to_string(),
            user_id: user_id.to_string(),
            received_at: received_at.to_string(),
            sender: details.sender.clone(),
            subject: details.subject.clone(),
            s3_location: details.content_location.clone(),
            content_type: ISSUE_CONTENT_TYPE.to_string(),
            status: ISSUE_STATUS_RECEIVED.to_string(),
            archived: false,
            starred: false,
        }
    }
}

/// Cumulative delivery statistics for one (user, inbox) pair
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubscriptionStats {
    pub user_id: String,
    pub inbox: String,
    pub last_received: String,
    pub publisher: String,
    pub total_received: u64,
    pub last_updated: String,
    pub created_at: String,
}

/// Per-recipient (or per-record) processing outcome
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ProcessedItem {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub inbox: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub issue_id: Option<String>,
    pub status: ItemStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ItemStatus {
    Success,
    /// Dead-letter: recipient has no matching user account
    Skipped,
    Error,
}

impl ProcessedItem {
    pub fn success(inbox: &str, issue_id: &str) -> Self {
        Self {
            inbox: Some(inbox.to_string()),
            issue_id: Some(issue_id.to_string()),
            status: ItemStatus::Success,
            error: None,
        }
    }

    pub fn skipped(inbox: &str) -> Self {
        Self {
            inbox: Some(inbox.to_string()),
            issue_id: None,
            status: ItemStatus::Skipped,
            error: None,
        }
    }

    pub fn recipient_error(inbox: &str, issue_id: &str, error: &str) -> Self {
        Self {
            inbox: Some(inbox.to_string()),
            issue_id: Some(issue_id.to_string()),
            status: ItemStatus::Error,
            error: Some(error.to_string()),
        }
    }

    /// Record-level failure: no recipient context is available yet
    pub fn record_error(error: &str) -> Self {
        Self {
            inbox: None,
            issue_id: None,
            status: ItemStatus::Error,
            error: Some(error.to_string()),
        }
    }
}

/// JSON-encoded into the `body` field of the 200 response envelope
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompletionBody {
    pub message: String,
    pub processed_items: Vec<ProcessedItem>,
}

impl CompletionBody {
    pub fn new(processed_items: Vec<ProcessedItem>) -> Self {
        Self {
            message: COMPLETION_MESSAGE.to_string(),
            processed_items,
        }
    }
}
