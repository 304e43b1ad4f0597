/// Lambda event handlers
pub mod intake;

use crate::error::IntakeError;
use crate::handlers::intake::IntakeContext;
use crate::models::{CompletionBody, ProcessedItem, SnsEvent};
use lambda_runtime::{Error, LambdaEvent as RuntimeEvent};
use serde_json::Value;
use tracing::{error, info};

/// Main Lambda handler
///
/// Always returns a 200-style envelope enumerating per-item outcomes, even
/// when every item failed; the SNS subscription must not see a handler error,
/// or it would redeliver the whole batch.
pub async fn handler(event: RuntimeEvent<Value>) -> Result<Value, Error> {
    info!("Received Lambda event");

    let sns_event: SnsEvent = serde_json::from_value(event.payload).map_err(|e| {
        error!("Failed to parse Lambda event: {}", e);
        IntakeError::Payload(format!("Invalid event shape: {}", e))
    })?;

    let ctx = IntakeContext::from_env().await?;
    let items = intake::process_event(&ctx, sns_event).await;

    Ok(completion_response(items)?)
}

/// Builds the 200 response envelope; `body` is a JSON-encoded string
pub fn completion_response(items: Vec<ProcessedItem>) -> Result<Value, serde_json::Error> {
    let body = serde_json::to_string(&CompletionBody::new(items))?;
    Ok(serde_json::json!({
        "statusCode": 200,
        "body": body
    }))
}
