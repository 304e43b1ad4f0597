/// Recipient resolution - maps delivery addresses to user accounts
use crate::error::IntakeError;
use crate::services::users::UserStore;
use crate::utils::logging::redact_email;
use std::sync::Arc;
use tracing::{debug, warn};

/// Strips a `+tag` alias from the local part before lookup
///
/// `user+promo@example.com` becomes `user@example.com`. Addresses without an
/// `@` pass through unchanged; they cannot match a registered account and end
/// up as dead-letter.
pub fn canonical_address(address: &str) -> String {
    match address.split_once('@') {
        Some((local, domain)) => {
            let base = local.split('+').next().unwrap_or(local);
            format!("{}@{}", base, domain)
        }
        None => address.to_string(),
    }
}

pub struct RecipientResolver {
    users: Arc<dyn UserStore>,
}

impl RecipientResolver {
    pub fn new(users: Arc<dyn UserStore>) -> Self {
        Self { users }
    }

    /// Resolves one recipient address to a user id
    ///
    /// `Ok(None)` is the dead-letter case: nobody registered the canonical
    /// address. Store failures propagate and are fatal for this recipient
    /// only.
    pub async fn resolve(&self, address: &str) -> Result<Option<String>, IntakeError> {
        let canonical = canonical_address(address);
        debug!(
            email = %redact_email(&canonical),
            alias = %redact_email(address),
            "Looking up user by email"
        );

        let matches = self.users.find_by_email(&canonical).await?;

        match matches.split_first() {
            None => {
                warn!(
                    email = %redact_email(&canonical),
                    alias = %redact_email(address),
                    "Unregistered email address - marking as deadletter"
                );
                Ok(None)
            }
            Some((first, rest)) => {
                if !rest.is_empty() {
                    // Emails should be unique; make the broken assumption
                    // visible instead of silently picking a row
                    warn!(
                        email = %redact_email(&canonical),
                        matches = matches.len(),
                        "Email index returned multiple users, taking first match"
                    );
                }
                debug!(user_id = %first, "Found existing user");
                Ok(Some(first.clone()))
            }
        }
    }
}
