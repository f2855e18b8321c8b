//! Chat delivery to an HTTP webhook.

use std::time::Duration;

use chrono::{SecondsFormat, Utc};
use flashread_core::chat::{OutboundMessage, reply_text};
use log::{debug, info};
use serde::Serialize;
use serde_json::Value;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(60);

#[derive(Debug, thiserror::Error)]
pub enum WebhookError {
    #[error("invalid webhook url: {0}")]
    InvalidUrl(String),
    #[error("request failed: {0}")]
    RequestFailed(String),
    #[error("HTTP error! status: {0}")]
    Status(u16),
    #[error("malformed reply: {0}")]
    MalformedReply(String),
}

#[derive(Debug, Serialize)]
struct WebhookPayload<'a> {
    message: &'a str,
    model: &'a str,
    timestamp: String,
}

#[derive(Clone)]
pub struct WebhookTransport {
    client: reqwest::Client,
    url: reqwest::Url,
}

impl WebhookTransport {
    pub fn new(url: &str) -> Result<Self, WebhookError> {
        let url = reqwest::Url::parse(url.trim())
            .map_err(|error| WebhookError::InvalidUrl(format!("{url}: {error}")))?;
        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|error| WebhookError::RequestFailed(error.to_string()))?;

        Ok(Self { client, url })
    }

    /// POSTs one message and returns the reply text.
    pub async fn send(&self, outbound: &OutboundMessage) -> Result<String, WebhookError> {
        let payload = WebhookPayload {
            message: &outbound.message,
            model: &outbound.model,
            timestamp: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
        };
        debug!("webhook: posting model={} to {}", outbound.model, self.url);

        let response = self
            .client
            .post(self.url.clone())
            .json(&payload)
            .send()
            .await
            .map_err(|error| WebhookError::RequestFailed(error.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(WebhookError::Status(status.as_u16()));
        }

        let body: Value = response
            .json()
            .await
            .map_err(|error| WebhookError::MalformedReply(error.to_string()))?;
        info!("webhook: reply received status={}", status.as_u16());
        Ok(extract_reply(&body))
    }
}

/// Reply text of a webhook answer: `response`, then `message`, then the
/// fixed empty-reply text.
pub fn extract_reply(body: &Value) -> String {
    reply_text(
        body.get("response").and_then(Value::as_str),
        body.get("message").and_then(Value::as_str),
    )
    .to_string()
}
