use super::types::*;
use crate::{Error, Result, config::LlmConfig};
use async_trait::async_trait;
use tracing::{debug, warn};

/// Generates text from one multimodal user message.
#[async_trait]
pub trait LlmClient: Send + Sync {
    async fn generate_text(&self, request: GenerateRequest) -> Result<String>;
}

pub struct GeminiClient {
    http: reqwest::Client,
    base_url: String,
}

impl GeminiClient {
    pub fn new(config: &LlmConfig) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: config.base_url.trim_end_matches('/').to_string(),
        }
    }

    fn endpoint(&self, model: ModelId) -> String {
        format!(
            "{}/v1beta/models/{}:generateContent",
            self.base_url,
            model.as_str()
        )
    }
}

fn provider_error(status: reqwest::StatusCode, body: &str) -> Error {
    match serde_json::from_str::<ErrorEnvelope>(body) {
        Ok(envelope) => {
            let code = envelope
                .error
                .status
                .or_else(|| envelope.error.code.map(|c| c.to_string()));
            Error::provider(envelope.error.message, code)
        }
        Err(_) => Error::provider(
            format!("Provider returned HTTP {}", status),
            Some(status.as_u16().to_string()),
        ),
    }
}

#[async_trait]
impl LlmClient for GeminiClient {
    async fn generate_text(&self, request: GenerateRequest) -> Result<String> {
        debug!(
            "Calling {} with {} content parts, thinking budget {}",
            request.model,
            request.parts.len(),
            request.params.thinking_budget
        );

        let body = request.to_gemini_request();
        let response = self
            .http
            .post(self.endpoint(request.model))
            .header("x-goog-api-key", &request.credential)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        let text = response.text().await?;

        if !status.is_success() {
            warn!("Provider responded with HTTP {}", status);
            return Err(provider_error(status, &text));
        }

        let parsed: GenerateContentResponse = serde_json::from_str(&text)?;

        match parsed.text() {
            Some(report) => {
                debug!("Received {} bytes of generated text", report.len());
                Ok(report)
            }
            None => {
                let reason = parsed
                    .prompt_feedback
                    .and_then(|f| f.block_reason)
                    .or_else(|| parsed.candidates.first().and_then(|c| c.finish_reason.clone()));
                Err(Error::provider("Failed to generate report", reason))
            }
        }
    }
}
