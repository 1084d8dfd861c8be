use async_trait::async_trait;
use serde::Serialize;
use serde_json::Value;
use std::time::Duration;

use crate::config::{
    GeminiConfig, DEFAULT_GEMINI_BASE_URL, DEFAULT_GEMINI_MODEL, DEFAULT_TIMEOUT_SECONDS,
};
use crate::error::{NovaBotError, Result};
use crate::interfaces::providers::{Generation, TextGenerator};

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest<'a> {
    contents: Vec<Content<'a>>,
    generation_config: GenerationConfig,
}

#[derive(Serialize)]
struct Content<'a> {
    role: &'static str,
    parts: Vec<Part<'a>>,
}

#[derive(Serialize)]
struct Part<'a> {
    text: &'a str,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    thinking_config: ThinkingConfig,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ThinkingConfig {
    thinking_budget: u32,
}

#[derive(Clone)]
pub struct GeminiProvider {
    model: String,
    client: reqwest::Client,
    api_key: String,
    base_url: String,
}

impl GeminiProvider {
    pub fn new(
        api_key: String,
        model: Option<String>,
        base_url: Option<String>,
        timeout: Duration,
    ) -> Result<Self> {
        let model = model.unwrap_or_else(|| DEFAULT_GEMINI_MODEL.to_string());
        let base_url = base_url.unwrap_or_else(|| DEFAULT_GEMINI_BASE_URL.to_string());
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| NovaBotError::Http(format!("Failed to build HTTP client: {e}")))?;
        Ok(Self {
            model,
            client,
            api_key,
            base_url,
        })
    }

    pub fn from_config(config: &GeminiConfig) -> Result<Self> {
        let api_key = config
            .api_key
            .as_deref()
            .map(str::trim)
            .unwrap_or_default()
            .to_string();
        if api_key.is_empty() {
            tracing::warn!("No Gemini API key configured; generation calls will fail");
        }
        let timeout =
            Duration::from_secs(config.timeout_seconds.unwrap_or(DEFAULT_TIMEOUT_SECONDS).max(1));
        Self::new(
            api_key,
            config.model.clone().filter(|m| !m.trim().is_empty()),
            config.base_url.clone().filter(|u| !u.trim().is_empty()),
            timeout,
        )
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/models/{}:generateContent",
            self.base_url.trim_end_matches('/'),
            self.model
        )
    }

    async fn generate_content(&self, text: &str) -> Result<Value> {
        let request = GenerateContentRequest {
            contents: vec![Content {
                role: "user",
                parts: vec![Part { text }],
            }],
            generation_config: GenerationConfig {
                thinking_config: ThinkingConfig { thinking_budget: 0 },
            },
        };

        let response = self
            .client
            .post(self.endpoint())
            .header("x-goog-api-key", &self.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| NovaBotError::Http(format!("generateContent transport failed: {e}")))?;
        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| NovaBotError::Http(format!("generateContent read failed: {e}")))?;

        if !status.is_success() {
            return Err(NovaBotError::Http(format!(
                "generateContent failed ({status}): {body}"
            )));
        }

        serde_json::from_str(&body).map_err(|e| {
            NovaBotError::Serialization(format!("generateContent decode failed: {e}"))
        })
    }
}

/// First part of the first candidate, if it carries non-empty text.
pub fn extract_text_from_value(response: &Value) -> Option<String> {
    response
        .get("candidates")
        .and_then(|v| v.get(0))
        .and_then(|candidate| candidate.get("content"))
        .and_then(|content| content.get("parts"))
        .and_then(|parts| parts.get(0))
        .and_then(|part| part.get("text"))
        .and_then(|text| text.as_str())
        .filter(|text| !text.is_empty())
        .map(|text| text.to_string())
}

#[async_trait]
impl TextGenerator for GeminiProvider {
    fn model(&self) -> &str {
        &self.model
    }

    async fn generate(&self, text: &str) -> Result<Generation> {
        let response = self.generate_content(text).await?;
        Ok(match extract_text_from_value(&response) {
            Some(reply) => Generation::Candidate(reply),
            None => Generation::NoCandidate,
        })
    }
}
