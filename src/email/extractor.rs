/// Notification unwrapping and email detail extraction
///
/// Both functions are pure: same payload in, same details out. All I/O stays
/// in the stores and the orchestrating handler.
use crate::error::IntakeError;
use crate::models::{EmailDetails, MailSection, SesNotification, SnsEventRecord};
use serde_json::Value;

/// Locates and parses the SES notification embedded in one SNS record
///
/// `Sns.Message` carries the notification as a JSON string; pre-parsed
/// objects are accepted too. An absent or empty message is a record-level
/// failure.
pub fn unwrap_message(record: &SnsEventRecord) -> Result<SesNotification, IntakeError> {
    let message = record
        .sns
        .as_ref()
        .and_then(|envelope| envelope.message.as_ref())
        .ok_or(IntakeError::MissingPayload)?;

    match message {
        Value::Null => Err(IntakeError::MissingPayload),
        Value::String(raw) if raw.trim().is_empty() => Err(IntakeError::MissingPayload),
        Value::String(raw) => Ok(serde_json::from_str(raw)?),
        other => Ok(serde_json::from_value(other.clone())?),
    }
}

/// Produces normalized email details from an unwrapped SES notification
///
/// Sender and subject prefer the `commonHeaders` section and fall back
/// per-field to the top-level `source`/`subject`. Bucket and key come from
/// `receipt.action`. Any required field still unset after fallback is
/// reported in a single `MissingFields` error.
pub fn extract_email_details(notification: &SesNotification) -> Result<EmailDetails, IntakeError> {
    let mail = notification.mail.as_ref();

    let (header_sender, header_subject) = mail
        .map(sender_subject_from_headers)
        .unwrap_or((None, None));
    let (direct_sender, direct_subject) = mail
        .map(sender_subject_from_top_level)
        .unwrap_or((None, None));

    let sender = header_sender.or(direct_sender);
    let subject = header_subject.or(direct_subject);

    let action = notification
        .receipt
        .as_ref()
        .and_then(|receipt| receipt.action.as_ref());
    let s3_bucket = action.and_then(|a| non_empty(a.bucket_name.as_deref()));
    let s3_key = action.and_then(|a| non_empty(a.object_key.as_deref()));

    let missing: Vec<String> = [
        ("sender", &sender),
        ("subject", &subject),
        ("s3_bucket", &s3_bucket),
        ("s3_key", &s3_key),
    ]
    .iter()
    .filter(|(_, value)| value.is_none())
    .map(|(name, _)| name.to_string())
    .collect();

    if !missing.is_empty() {
        return Err(IntakeError::MissingFields(missing));
    }

    // All four are Some once the missing-field check passes
    let (sender, subject) = (sender.unwrap_or_default(), subject.unwrap_or_default());
    let (s3_bucket, s3_key) = (s3_bucket.unwrap_or_default(), s3_key.unwrap_or_default());
    let content_location = format!("s3://{}/{}", s3_bucket, s3_key);

    Ok(EmailDetails {
        sender,
        subject,
        recipients: mail.map(|m| m.destination.clone()).unwrap_or_default(),
        s3_bucket,
        s3_key,
        content_location,
    })
}

/// Common-headers shape: `mail.commonHeaders.{from[0], subject}`
fn sender_subject_from_headers(mail: &MailSection) -> (Option<String>, Option<String>) {
    let Some(headers) = mail.common_headers.as_ref() else {
        return (None, None);
    };

    let sender = headers.from.first().and_then(|s| non_empty(Some(s)));
    let subject = non_empty(headers.subject.as_deref());
    (sender, subject)
}

/// SES-direct shape: `mail.{source, subject}`
fn sender_subject_from_top_level(mail: &MailSection) -> (Option<String>, Option<String>) {
    (
        non_empty(mail.source.as_deref()),
        non_empty(mail.subject.as_deref()),
    )
}

fn non_empty(value: Option<&str>) -> Option<String> {
    value
        .filter(|s| !s.trim().is_empty())
        .map(|s| s.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{SnsEnvelope, SnsEventRecord};
    use serde_json::json;

    fn notification(value: Value) -> SesNotification {
        serde_json::from_value(value).unwrap()
    }

    fn full_payload() -> Value {
        json!({
            "mail": {
                "commonHeaders": {
                    "from": ["Weekly Digest <digest@news.example.com>"],
                    "subject": "Issue #42"
                },
                "source": "bounce@news.example.com",
                "subject": "raw subject",
                "destination": ["reader@letterbox.io", "other@letterbox.io"]
            },
            "receipt": {
                "action": {
                    "type": "S3",
                    "bucketName": "letterbox-raw-mail",
                    "objectKey": "inbound/abc123"
                }
            }
        })
    }

    #[test]
    fn test_unwrap_string_message() {
        let record = SnsEventRecord {
            sns: Some(SnsEnvelope {
                message: Some(Value::String(full_payload().to_string())),
            }),
        };

        let notification = unwrap_message(&record).unwrap();
        assert_eq!(
            notification.mail.unwrap().destination,
            vec!["reader@letterbox.io", "other@letterbox.io"]
        );
    }

    #[test]
    fn test_unwrap_object_message() {
        let record = SnsEventRecord {
            sns: Some(SnsEnvelope {
                message: Some(full_payload()),
            }),
        };

        assert!(unwrap_message(&record).is_ok());
    }

    #[test]
    fn test_unwrap_missing_message() {
        let record = SnsEventRecord { sns: None };
        assert!(matches!(
            unwrap_message(&record),
            Err(IntakeError::MissingPayload)
        ));

        let record = SnsEventRecord {
            sns: Some(SnsEnvelope { message: None }),
        };
        assert!(matches!(
            unwrap_message(&record),
            Err(IntakeError::MissingPayload)
        ));

        let record = SnsEventRecord {
            sns: Some(SnsEnvelope {
                message: Some(Value::String("  ".to_string())),
            }),
        };
        assert!(matches!(
            unwrap_message(&record),
            Err(IntakeError::MissingPayload)
        ));
    }

    #[test]
    fn test_unwrap_malformed_string() {
        let record = SnsEventRecord {
            sns: Some(SnsEnvelope {
                message: Some(Value::String("not json".to_string())),
            }),
        };

        assert!(matches!(
            unwrap_message(&record),
            Err(IntakeError::Payload(_))
        ));
    }

    #[test]
    fn test_extract_prefers_common_headers() {
        let details = extract_email_details(&notification(full_payload())).unwrap();

        assert_eq!(details.sender, "Weekly Digest <digest@news.example.com>");
        assert_eq!(details.subject, "Issue #42");
        assert_eq!(details.s3_bucket, "letterbox-raw-mail");
        assert_eq!(details.s3_key, "inbound/abc123");
        assert_eq!(
            details.content_location,
            "s3://letterbox-raw-mail/inbound/abc123"
        );
        assert_eq!(details.recipients.len(), 2);
    }

    #[test]
    fn test_extract_falls_back_to_top_level() {
        let mut payload = full_payload();
        payload["mail"]["commonHeaders"] = json!({ "from": [], "subject": "" });

        let details = extract_email_details(&notification(payload)).unwrap();
        assert_eq!(details.sender, "bounce@news.example.com");
        assert_eq!(details.subject, "raw subject");
    }

    #[test]
    fn test_extract_fallback_is_per_field() {
        // Header subject present, header sender absent: only sender falls back
        let mut payload = full_payload();
        payload["mail"]["commonHeaders"] = json!({ "subject": "Issue #42" });

        let details = extract_email_details(&notification(payload)).unwrap();
        assert_eq!(details.sender, "bounce@news.example.com");
        assert_eq!(details.subject, "Issue #42");
    }

    #[test]
    fn test_extract_missing_bucket() {
        let mut payload = full_payload();
        payload["receipt"]["action"]
            .as_object_mut()
            .unwrap()
            .remove("bucketName");

        let err = extract_email_details(&notification(payload)).unwrap_err();
        match err {
            IntakeError::MissingFields(fields) => {
                assert_eq!(fields, vec!["s3_bucket".to_string()]);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_extract_reports_all_missing_fields() {
        let err = extract_email_details(&notification(json!({}))).unwrap_err();
        match err {
            IntakeError::MissingFields(fields) => {
                assert_eq!(fields, vec!["sender", "subject", "s3_bucket", "s3_key"]);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_extract_no_recipients_is_not_an_error() {
        let mut payload = full_payload();
        payload["mail"]
            .as_object_mut()
            .unwrap()
            .remove("destination");

        let details = extract_email_details(&notification(payload)).unwrap();
        assert!(details.recipients.is_empty());
    }

    #[test]
    fn test_extract_is_deterministic() {
        let payload = notification(full_payload());
        assert_eq!(
            extract_email_details(&payload).unwrap(),
            extract_email_details(&payload).unwrap()
        );
    }
}
