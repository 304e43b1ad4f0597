/// SNS/SES wire types
///
/// SES delivers receipt notifications to SNS, which invokes the Lambda with a
/// batch of wrapped records. `Sns.Message` is normally a JSON string, but a
/// pre-parsed object is tolerated as well (local shims inject objects).
use serde::Deserialize;
use serde_json::Value;

/// Invocation event: zero or more SNS-wrapped notification records
#[derive(Debug, Clone, Deserialize)]
pub struct SnsEvent {
    #[serde(rename = "Records", default)]
    pub records: Vec<SnsEventRecord>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SnsEventRecord {
    #[serde(rename = "Sns", default)]
    pub sns: Option<SnsEnvelope>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SnsEnvelope {
    #[serde(rename = "Message", default)]
    pub message: Option<Value>,
}

/// SES receipt notification, once unwrapped from the SNS envelope
///
/// Every section is optional on the wire; required fields are enforced during
/// extraction, not deserialization, so one missing-field error can name all
/// absent fields at once.
#[derive(Debug, Clone, Deserialize)]
pub struct SesNotification {
    pub mail: Option<MailSection>,
    pub receipt: Option<ReceiptSection>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MailSection {
    #[serde(rename = "commonHeaders")]
    pub common_headers: Option<CommonHeaders>,
    pub source: Option<String>,
    pub subject: Option<String>,
    #[serde(default)]
    pub destination: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CommonHeaders {
    #[serde(default)]
    pub from: Vec<String>,
    pub subject: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ReceiptSection {
    pub action: Option<ReceiptAction>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ReceiptAction {
    #[serde(rename = "bucketName")]
    pub bucket_name: Option<String>,
    #[serde(rename = "objectKey")]
    pub object_key: Option<String>,
}
