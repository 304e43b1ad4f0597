/// Normalized email details produced by the extractor
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmailDetails {
    pub sender: String,
    pub subject: String,
    pub s3_bucket: String,
    pub s3_key: String,
    pub recipients: Vec<String>,
    /// URI-style pointer to the raw message, `s3://{bucket}/{key}`
    pub content_location: String,
}
