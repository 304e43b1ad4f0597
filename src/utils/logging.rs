/// Logging utilities for PII redaction
///
/// Recipient addresses and subject lines are personal data; log statements
/// go through these helpers instead of embedding raw values.
use regex::Regex;
use std::sync::LazyLock;

// Email redaction regex
static EMAIL_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Z|a-z]{2,}\b").unwrap());

/// Redacts email addresses from text, preserving domain for debugging
///
/// # Examples
/// ```
/// use letterbox_intake::utils::logging::redact_email;
///
/// assert_eq!(redact_email("user@example.com"), "***@example.com");
/// ```
pub fn redact_email(text: &str) -> String {
    EMAIL_PATTERN
        .replace_all(text, |caps: &regex::Captures| {
            let email = &caps[0];
            if let Some(at_pos) = email.find('@') {
                format!("***{}", &email[at_pos..])
            } else {
                "***@***".to_string()
            }
        })
        .to_string()
}

/// Redacts subject line for logging (truncates and masks)
///
/// Shows the first few characters for debugging but hides content
pub fn redact_subject(subject: &str) -> String {
    const MAX_VISIBLE_CHARS: usize = 3;
    const MIN_LENGTH_TO_REDACT: usize = 6;

    // Count and truncate on characters, not bytes; subjects are arbitrary
    // UTF-8 and a byte slice can land inside a multibyte character
    let char_count = subject.chars().count();
    if char_count < MIN_LENGTH_TO_REDACT {
        subject.to_string()
    } else {
        let prefix: String = subject.chars().take(MAX_VISIBLE_CHARS).collect();
        format!("{}...[{} chars]", prefix, char_count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_redact_email() {
        assert_eq!(redact_email("user@example.com"), "***@example.com");
        assert_eq!(
            redact_email("From: alice@foo.com To: bob@bar.com"),
            "From: ***@foo.com To: ***@bar.com"
        );
        assert_eq!(redact_email("no addresses here"), "no addresses here");
    }

    #[test]
    fn test_redact_subject() {
        assert_eq!(redact_subject("Short"), "Short");
        assert_eq!(redact_subject("This is a long subject"), "Thi...[22 chars]");
        assert_eq!(redact_subject(""), "");
    }

    #[test]
    fn test_redact_subject_multibyte() {
        assert_eq!(redact_subject("🎉 Party issue"), "🎉 P...[13 chars]");
        assert_eq!(redact_subject("ab€cdef"), "ab€...[7 chars]");
        // Short non-ASCII subjects stay untouched even when their byte
        // length crosses the redaction threshold
        assert_eq!(redact_subject("héllo"), "héllo");
    }
}
