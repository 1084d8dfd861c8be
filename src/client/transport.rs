use async_trait::async_trait;
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::daemon::MESSAGE_ROUTE;
use crate::error::{NovaBotError, Result};

#[async_trait]
pub trait MessageTransport: Send + Sync {
    /// Posts `text` and returns the bot's reply.
    async fn post_message(&self, text: &str) -> Result<String>;
}

#[derive(Serialize)]
struct MessageRequest<'a> {
    text: &'a str,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct MessageResponse {
    bot_message: String,
}

pub struct HttpTransport {
    client: reqwest::Client,
    endpoint: String,
}

impl HttpTransport {
    pub fn new(server_url: &str, timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| NovaBotError::Http(format!("Failed to build HTTP client: {e}")))?;
        Ok(Self {
            client,
            endpoint: format!("{}{MESSAGE_ROUTE}", server_url.trim_end_matches('/')),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl MessageTransport for HttpTransport {
    async fn post_message(&self, text: &str) -> Result<String> {
        let response = self
            .client
            .post(&self.endpoint)
            .json(&MessageRequest { text })
            .send()
            .await
            .map_err(|e| NovaBotError::Http(format!("message transport failed: {e}")))?;
        let status = response.status();
        if status != StatusCode::OK {
            let body = response.text().await.unwrap_or_default();
            return Err(NovaBotError::Http(format!(
                "message request failed ({status}): {body}"
            )));
        }
        let payload: MessageResponse = response
            .json()
            .await
            .map_err(|e| NovaBotError::Serialization(format!("message decode failed: {e}")))?;
        Ok(payload.bot_message)
    }
}
