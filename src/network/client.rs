use std::future::Future;
use std::time::Duration;

use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::transport::build_http_client;

#[derive(Debug, Error)]
pub enum TransportError {
    #[error("webhook answered with status {0}")]
    Status(StatusCode),

    #[error("webhook request failed: {0}")]
    Network(#[source] reqwest::Error),

    #[error("webhook reply could not be decoded: {0}")]
    Decode(#[source] reqwest::Error),
}

/// Anything that can turn a user message into a raw agent reply.
///
/// One call is one attempt; retries are the caller's decision.
pub trait ReplyFetcher: Send + Sync + 'static {
    fn fetch_reply(
        &self,
        identity: &str,
        text: &str,
    ) -> impl Future<Output = Result<String, TransportError>> + Send;
}

#[derive(Debug, Serialize)]
struct WebhookRequest<'a> {
    user_id: &'a str,
    message: &'a str,
}

#[derive(Debug, Deserialize)]
struct WebhookResponse {
    #[serde(default)]
    reply: Option<String>,
}

/// Posts messages to the support webhook.
pub struct WebhookClient {
    http: Client,
    endpoint: String,
}

impl WebhookClient {
    pub fn new(endpoint: impl Into<String>, timeout: Option<Duration>) -> reqwest::Result<Self> {
        Ok(Self::with_client(build_http_client(timeout)?, endpoint))
    }

    pub fn with_client(http: Client, endpoint: impl Into<String>) -> Self {
        Self {
            http,
            endpoint: endpoint.into(),
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

impl ReplyFetcher for WebhookClient {
    async fn fetch_reply(&self, identity: &str, text: &str) -> Result<String, TransportError> {
        log::debug!("POST {} for {identity}", self.endpoint);

        let response = self
            .http
            .post(&self.endpoint)
            .json(&WebhookRequest {
                user_id: identity,
                message: text,
            })
            .send()
            .await
            .map_err(TransportError::Network)?;

        let status = response.status();
        if !status.is_success() {
            return Err(TransportError::Status(status));
        }

        let body: WebhookResponse = response.json().await.map_err(TransportError::Decode)?;
        Ok(body.reply.unwrap_or_default())
    }
}
