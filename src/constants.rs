/// Application constants
///
/// Key prefixes match the single-table layout shared with the rest of the
/// Letterbox backend; changing them breaks every reader of these tables.
// ============================================================================
// Key Prefixes
// ============================================================================
/// Partition key prefix for issue rows (keyed by inbox address)
pub const INBOX_KEY_PREFIX: &str = "INBOX#";

/// Sort key prefix for issue rows
pub const ISSUE_KEY_PREFIX: &str = "ISSUE#";

/// Key prefix for user references (issue GSI1PK, stats partition key)
pub const USER_KEY_PREFIX: &str = "USER#";

/// GSI2 partition key prefix for the denormalized publisher index
pub const PUBLISHER_KEY_PREFIX: &str = "PUBLISHER#";

// ============================================================================
// Issue Attributes
// ============================================================================

/// Content type stored on every issue (raw mail is RFC 822 in S3)
pub const ISSUE_CONTENT_TYPE: &str = "email/rfc822";

/// Lifecycle status assigned at creation
pub const ISSUE_STATUS_RECEIVED: &str = "received";

// ============================================================================
// Formats & Names
// ============================================================================

/// UTC timestamp format with millisecond precision
pub const RECEIVED_AT_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.3fZ";

/// Email-equality GSI on the users table
pub const EMAIL_INDEX_NAME: &str = "EmailIndex";

/// Message returned in every handler response body
pub const COMPLETION_MESSAGE: &str = "Email processing complete";

// ============================================================================
// Environment Variables
// ============================================================================

/// Issues table name
pub const ENV_ISSUES_TABLE: &str = "ISSUES_TABLE";

/// Subscriptions table name
pub const ENV_SUBSCRIPTIONS_TABLE: &str = "SUBSCRIPTIONS_TABLE";

/// Users table name
pub const ENV_USERS_TABLE: &str = "USERS_TABLE";
