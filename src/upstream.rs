//! Upstream chat-completion client.
//!
//! Sends a filled prompt to a hosted model behind an OpenAI-compatible
//! `/chat/completions` endpoint and returns the generated text. The client is
//! constructed from explicit configuration, and the response shape is
//! normalized here so nothing duck-typed reaches the rest of the pipeline.
//!
//! There is deliberately no retry: a failure surfaces directly to the user and
//! aborts the current submission, and no record is persisted. The one piece of
//! hardening beyond that is an explicit request timeout.

use anyhow::{bail, Result};
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;
use std::time::Duration;
use tracing::{debug, warn};

use crate::config::UpstreamConfig;
use crate::error::AppError;
use crate::prompt::FilledPrompt;

#[derive(Debug)]
pub struct AnalysisClient {
    http: reqwest::Client,
    base_url: String,
    model: String,
    api_key: String,
    temperature: f64,
    supports_image_input: bool,
    referer: Option<String>,
    app_title: Option<String>,
}

impl AnalysisClient {
    /// Create a client from configuration.
    ///
    /// Reads the API key once from the environment variable named in the
    /// config and fails fast if it is absent.
    pub fn new(config: &UpstreamConfig) -> Result<Self> {
        let api_key = match std::env::var(&config.api_key_env) {
            Ok(key) if !key.trim().is_empty() => key,
            _ => bail!("{} environment variable not set", config.api_key_env),
        };

        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            model: config.model.clone(),
            api_key,
            temperature: config.temperature,
            supports_image_input: config.supports_image_input,
            referer: config.referer.clone(),
            app_title: config.app_title.clone(),
        })
    }

    /// Whether the endpoint accepts image attachments. Callers branch on this
    /// to decide between a real multimodal request and the placeholder path.
    pub fn supports_image_input(&self) -> bool {
        self.supports_image_input
    }

    /// Send a filled prompt and return the generated text.
    pub async fn analyze(&self, prompt: &FilledPrompt) -> Result<String, AppError> {
        let content = match (&prompt.image, self.supports_image_input) {
            (Some(image), true) => serde_json::json!([
                { "type": "text", "text": prompt.text },
                { "type": "image_url", "image_url": {
                    "url": format!("data:{};base64,{}", image.mime, BASE64.encode(&image.bytes)),
                } },
            ]),
            _ => serde_json::json!(prompt.text),
        };

        let body = serde_json::json!({
            "model": self.model,
            "temperature": self.temperature,
            "messages": [ { "role": "user", "content": content } ],
        });

        let mut request = self
            .http
            .post(format!("{}/chat/completions", self.base_url))
            .header("Authorization", format!("Bearer {}", self.api_key))
            .json(&body);
        if let Some(ref referer) = self.referer {
            request = request.header("HTTP-Referer", referer);
        }
        if let Some(ref title) = self.app_title {
            request = request.header("X-Title", title);
        }

        debug!(model = %self.model, "sending analysis request");

        let response = request.send().await.map_err(|e| {
            if e.is_timeout() {
                AppError::Upstream("model request timed out".to_string())
            } else {
                AppError::Upstream(format!("model unreachable: {}", e))
            }
        })?;

        let status = response.status();
        if !status.is_success() {
            let body_text = response.text().await.unwrap_or_default();
            warn!(%status, "model API rejected the request");
            return Err(AppError::Upstream(format!(
                "model API error {}: {}",
                status, body_text
            )));
        }

        let json: serde_json::Value = response
            .json()
            .await
            .map_err(|e| AppError::Upstream(format!("invalid model response: {}", e)))?;

        parse_completion(&json)
    }
}

/// Normalize the completion response at the client boundary: the only shape
/// accepted is `choices[0].message.content` as a string.
fn parse_completion(json: &serde_json::Value) -> Result<String, AppError> {
    json.get("choices")
        .and_then(|c| c.as_array())
        .and_then(|c| c.first())
        .and_then(|c| c.get("message"))
        .and_then(|m| m.get("content"))
        .and_then(|t| t.as_str())
        .map(|t| t.to_string())
        .ok_or_else(|| {
            AppError::Upstream("model response missing choices[0].message.content".to_string())
        })
}
