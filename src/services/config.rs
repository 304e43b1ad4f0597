/// Configuration service - loads table names from environment variables
///
/// Region and credentials come from the standard AWS environment via
/// `aws_config::load_from_env`; only the table names are owned here.
use crate::constants::{ENV_ISSUES_TABLE, ENV_SUBSCRIPTIONS_TABLE, ENV_USERS_TABLE};
use crate::error::IntakeError;

#[derive(Debug, Clone)]
pub struct IntakeConfig {
    pub issues_table: String,
    pub subscriptions_table: String,
    pub users_table: String,
}

impl IntakeConfig {
    pub fn from_env() -> Result<Self, IntakeError> {
        Ok(Self {
            issues_table: require(ENV_ISSUES_TABLE)?,
            subscriptions_table: require(ENV_SUBSCRIPTIONS_TABLE)?,
            users_table: require(ENV_USERS_TABLE)?,
        })
    }
}

fn require(name: &str) -> Result<String, IntakeError> {
    let value = std::env::var(name)
        .map_err(|_| IntakeError::Config(format!("Missing {} env var", name)))?;

    if value.trim().is_empty() {
        return Err(IntakeError::Config(format!("{} env var is empty", name)));
    }

    Ok(value)
}
