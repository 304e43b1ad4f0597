/// Intake orchestration - per-record, then per-recipient processing
///
/// Errors are contained at the smallest scope: a recipient failure records an
/// error outcome and moves to the next recipient, a record failure records an
/// error outcome and moves to the next record. Nothing here aborts the batch.
use crate::constants::RECEIVED_AT_FORMAT;
use crate::email::extractor::{extract_email_details, unwrap_message};
use crate::error::IntakeError;
use crate::models::{EmailDetails, Issue, ProcessedItem, SnsEvent, SnsEventRecord};
use crate::resolver::RecipientResolver;
use crate::services::config::IntakeConfig;
use crate::services::issues::{DynamoDbIssueStore, IssueStore};
use crate::services::subscriptions::{DynamoDbSubscriptionStore, SubscriptionStore};
use crate::services::users::{DynamoDbUserStore, UserStore};
use crate::utils::logging::{redact_email, redact_subject};
use chrono::Utc;
use std::sync::Arc;
use tracing::{error, info};
use uuid::Uuid;

/// Intake handler context
pub struct IntakeContext {
    pub issues: Arc<dyn IssueStore>,
    pub subscriptions: Arc<dyn SubscriptionStore>,
    pub resolver: RecipientResolver,
}

impl IntakeContext {
    pub fn new(
        issues: Arc<dyn IssueStore>,
        subscriptions: Arc<dyn SubscriptionStore>,
        users: Arc<dyn UserStore>,
    ) -> Self {
        Self {
            issues,
            subscriptions,
            resolver: RecipientResolver::new(users),
        }
    }

    pub async fn from_env() -> Result<Self, IntakeError> {
        let config = IntakeConfig::from_env()?;
        let aws_config = aws_config::load_from_env().await;
        let client = aws_sdk_dynamodb::Client::new(&aws_config);

        Ok(Self::new(
            Arc::new(DynamoDbIssueStore::new(
                client.clone(),
                config.issues_table,
            )),
            Arc::new(DynamoDbSubscriptionStore::new(
                client.clone(),
                config.subscriptions_table,
            )),
            Arc::new(DynamoDbUserStore::new(client, config.users_table)),
        ))
    }
}

/// Processes every record of the event, returning one outcome per processed
/// item
pub async fn process_event(ctx: &IntakeContext, event: SnsEvent) -> Vec<ProcessedItem> {
    info!("Processing {} SNS record(s)", event.records.len());

    let mut processed = Vec::new();
    for record in &event.records {
        if let Err(e) = process_record(ctx, record, &mut processed).await {
            let error_type = if e.is_retriable() {
                "retriable"
            } else {
                "permanent"
            };
            error!(
                error = %e,
                error_type = error_type,
                "Failed to process SNS record"
            );
            processed.push(ProcessedItem::record_error(&e.to_string()));
        }
    }

    processed
}

#[tracing::instrument(name = "intake.process_record", skip_all)]
async fn process_record(
    ctx: &IntakeContext,
    record: &SnsEventRecord,
    processed: &mut Vec<ProcessedItem>,
) -> Result<(), IntakeError> {
    let notification = unwrap_message(record)?;
    let details = extract_email_details(&notification)?;

    // One issue id and one timestamp per notification record, shared by every
    // recipient; rows stay unique because the partition key is the inbox
    let issue_id = Uuid::new_v4().to_string();
    let received_at = Utc::now().format(RECEIVED_AT_FORMAT).to_string();

    info!(
        sender = %redact_email(&details.sender),
        subject = %redact_subject(&details.subject),
        recipients = details.recipients.len(),
        issue_id = %issue_id,
        "Extracted email details"
    );

    for inbox in &details.recipients {
        match process_recipient(ctx, &details, inbox, &issue_id, &received_at).await {
            Ok(item) => processed.push(item),
            Err(e) => {
                error!(
                    recipient = %redact_email(inbox),
                    issue_id = %issue_id,
                    error = %e,
                    "Error processing email for recipient"
                );
                processed.push(ProcessedItem::recipient_error(
                    inbox,
                    &issue_id,
                    &e.to_string(),
                ));
            }
        }
    }

    Ok(())
}

async fn process_recipient(
    ctx: &IntakeContext,
    details: &EmailDetails,
    inbox: &str,
    issue_id: &str,
    received_at: &str,
) -> Result<ProcessedItem, IntakeError> {
    let Some(user_id) = ctx.resolver.resolve(inbox).await? else {
        info!(
            recipient = %redact_email(inbox),
            "Skipping email processing for unregistered recipient"
        );
        return Ok(ProcessedItem::skipped(inbox));
    };

    info!(
        user_id = %user_id,
        recipient = %redact_email(inbox),
        "Processing email for recipient"
    );

    let issue = Issue::new(details, &user_id, inbox, issue_id, received_at);
    ctx.issues.put(&issue).await?;

    ctx.subscriptions
        .record_delivery(&user_id, inbox, received_at, &details.sender)
        .await?;

    Ok(ProcessedItem::success(inbox, issue_id))
}
