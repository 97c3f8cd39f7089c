//! Webhook gateway: one JSON POST per submission, no retries.

use std::time::Duration;

use async_trait::async_trait;
use secrecy::{ExposeSecret, SecretString};

use super::{SubmissionGateway, SubmissionPayload};
use crate::config::WebhookConfig;
use crate::error::GatewayError;

/// Longest slice of an error response body kept for logging.
const MAX_LOGGED_BODY: usize = 200;

/// Posts payloads to a fixed webhook URL.
pub struct WebhookGateway {
    url: SecretString,
    timeout: Duration,
    client: reqwest::Client,
}

impl WebhookGateway {
    pub fn new(config: &WebhookConfig) -> Result<Self, GatewayError> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| GatewayError::Client(e.to_string()))?;

        Ok(Self {
            url: config.url.clone(),
            timeout: config.timeout,
            client,
        })
    }

    /// Send one payload. Errors never include the URL.
    pub async fn post(&self, payload: &SubmissionPayload) -> Result<(), GatewayError> {
        let resp = self
            .client
            .post(self.url.expose_secret())
            .json(payload)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    GatewayError::Timeout {
                        timeout: self.timeout,
                    }
                } else {
                    GatewayError::RequestFailed(e.without_url().to_string())
                }
            })?;

        let status = resp.status();
        if status.is_success() {
            return Ok(());
        }

        let body = resp.text().await.unwrap_or_default();
        Err(GatewayError::Rejected {
            status: status.as_u16(),
            body: body.chars().take(MAX_LOGGED_BODY).collect(),
        })
    }
}

#[async_trait]
impl SubmissionGateway for WebhookGateway {
    async fn deliver(&self, payload: SubmissionPayload) {
        match self.post(&payload).await {
            Ok(()) => tracing::info!(
                source = %payload.source,
                submitted_at = %payload.submitted_at,
                "Lead delivered to webhook"
            ),
            Err(e) => tracing::warn!(
                error = %e,
                source = %payload.source,
                "Lead delivery failed; wizard completes regardless"
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::wizard::model::FormData;

    #[tokio::test]
    async fn unreachable_host_is_a_request_error_without_url() {
        let mut config = WebhookConfig::new("http://127.0.0.1:9/hook/secret-token");
        config.timeout = Duration::from_secs(2);
        let gateway = WebhookGateway::new(&config).unwrap();

        let payload = SubmissionPayload::new(FormData::default(), "test");
        let err = gateway.post(&payload).await.unwrap_err();

        assert!(
            matches!(err, GatewayError::RequestFailed(_) | GatewayError::Timeout { .. }),
            "unexpected error: {err:?}"
        );
        assert!(!err.to_string().contains("secret-token"));
    }

    #[tokio::test]
    async fn deliver_swallows_failures() {
        let gateway = WebhookGateway::new(&WebhookConfig::new("http://127.0.0.1:9/hook")).unwrap();
        // Completes without panicking or returning anything.
        gateway
            .deliver(SubmissionPayload::new(FormData::default(), "test"))
            .await;
    }
}
