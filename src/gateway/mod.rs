//! Submission gateway: best-effort delivery of completed leads.
//!
//! The wizard hands a finished payload to a [`SubmissionGateway`] and moves
//! on. Whatever happens during delivery stays inside the gateway.

pub mod webhook;

pub use webhook::WebhookGateway;

use async_trait::async_trait;
use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize, Serializer};

use crate::wizard::model::FormData;

/// The JSON body sent downstream: every form field plus submission
/// metadata.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmissionPayload {
    #[serde(flatten)]
    pub form: FormData,
    #[serde(serialize_with = "iso_millis")]
    pub submitted_at: DateTime<Utc>,
    pub source: String,
}

impl SubmissionPayload {
    /// Stamp `form` with the current time and the configured source tag.
    /// Email and phone go out trimmed, as they were validated.
    pub fn new(mut form: FormData, source: &str) -> Self {
        trim_in_place(&mut form.email);
        trim_in_place(&mut form.phone);
        Self {
            form,
            submitted_at: Utc::now(),
            source: source.to_string(),
        }
    }
}

fn trim_in_place(value: &mut String) {
    *value = value.trim().to_string();
}

/// Browser-style ISO-8601: UTC, millisecond precision, `Z` suffix.
fn iso_millis<S: Serializer>(at: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&at.to_rfc3339_opts(SecondsFormat::Millis, true))
}

/// Delivers finished submissions somewhere.
///
/// Implementations must not panic or block for long; failures are logged,
/// never returned. Retry policy, if any, belongs here too.
#[async_trait]
pub trait SubmissionGateway: Send + Sync {
    async fn deliver(&self, payload: SubmissionPayload);
}

/// Gateway that only logs. Used when no webhook is configured.
pub struct LogGateway;

#[async_trait]
impl SubmissionGateway for LogGateway {
    async fn deliver(&self, payload: SubmissionPayload) {
        tracing::info!(
            company = %payload.form.company_name,
            source = %payload.source,
            submitted_at = %payload.submitted_at,
            "No webhook configured; lead discarded after logging"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::wizard::choices::JobTitle;

    #[test]
    fn payload_flattens_form_fields() {
        let form = FormData {
            company_name: "Acme".to_string(),
            job_title: Some(JobTitle::FounderOwner),
            tech_stack: vec!["Zapier / Make".to_string()],
            consent_transactional: true,
            ..Default::default()
        };
        let payload = SubmissionPayload::new(form, "Creative CRM Pro");
        let json = serde_json::to_value(&payload).unwrap();

        assert_eq!(json["companyName"], "Acme");
        assert_eq!(json["jobTitle"], "Founder / Owner");
        assert_eq!(json["techStack"][0], "Zapier / Make");
        assert_eq!(json["consentTransactional"], true);
        assert_eq!(json["revenue"], "");
        assert_eq!(json["source"], "Creative CRM Pro");
        // 15 form fields + submittedAt + source
        assert_eq!(json.as_object().unwrap().len(), 17);
    }

    #[test]
    fn payload_sends_contact_details_trimmed() {
        let form = FormData {
            company_name: " Acme ".to_string(),
            email: " jo@acme.io ".to_string(),
            phone: "\t+61 400 123 456 ".to_string(),
            ..Default::default()
        };
        let payload = SubmissionPayload::new(form, "test");
        assert_eq!(payload.form.email, "jo@acme.io");
        assert_eq!(payload.form.phone, "+61 400 123 456");
        assert_eq!(payload.form.company_name, " Acme ");
    }

    #[test]
    fn submitted_at_is_iso_8601_with_millis() {
        let mut payload = SubmissionPayload::new(FormData::default(), "test");
        payload.submitted_at = DateTime::parse_from_rfc3339("2025-12-01T09:30:15.250+00:00")
            .unwrap()
            .with_timezone(&Utc);
        let json = serde_json::to_value(&payload).unwrap();
        assert_eq!(json["submittedAt"], "2025-12-01T09:30:15.250Z");
    }

    #[test]
    fn payload_deserializes_what_it_serializes() {
        let payload = SubmissionPayload::new(
            FormData {
                user_name: "Jo Lee".to_string(),
                ..Default::default()
            },
            "test",
        );
        let json = serde_json::to_string(&payload).unwrap();
        let parsed: SubmissionPayload = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.form.user_name, "Jo Lee");
        assert_eq!(parsed.source, "test");
    }
}
