/// Error types for the intake handler
use thiserror::Error;

#[derive(Error, Debug)]
pub enum IntakeError {
    #[error("No SNS message found in record")]
    MissingPayload,

    #[error("Missing required fields: {}", .0.join(", "))]
    MissingFields(Vec<String>),

    #[error("Malformed notification payload: {0}")]
    Payload(String),

    #[error("User lookup error: {0}")]
    Lookup(String),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl IntakeError {
    /// Determines if an error is retriable
    ///
    /// Only used for log classification; SNS redelivery owns actual retries.
    pub fn is_retriable(&self) -> bool {
        match self {
            Self::MissingPayload => false,
            Self::MissingFields(_) => false,
            Self::Payload(_) => false,
            Self::Lookup(_) => true,
            Self::Storage(_) => true,
            Self::Config(_) => false,
        }
    }
}

// Implement conversions for common error types
impl From<serde_json::Error> for IntakeError {
    fn from(err: serde_json::Error) -> Self {
        Self::Payload(err.to_string())
    }
}

impl From<std::env::VarError> for IntakeError {
    fn from(err: std::env::VarError) -> Self {
        Self::Config(err.to_string())
    }
}
