//! Turns one interpretation request into exactly one provider call.

use crate::{
    Error, Result,
    llm::{
        ContentPart, DEFAULT_IMAGE_MIME_TYPE, GenerateRequest, GenerationParams, LlmClient,
        ModelId,
    },
};
use std::{fmt, sync::Arc};
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, warn};

/// Upper bound for the provider's reasoning budget.
pub const MAX_THINKING_BUDGET: u32 = 8192;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageUpload {
    pub data: Vec<u8>,
    /// Declared media type, if the upload carried one.
    pub media_type: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct InterpretationRequest {
    pub image: Option<ImageUpload>,
    pub prompt: String,
    pub model: ModelId,
    /// Raw budget as submitted; normalized before use.
    pub thinking_budget: Option<f64>,
    pub seed: Option<i64>,
    pub credential: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CredentialSource {
    Caller,
    Config,
}

impl fmt::Display for CredentialSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Caller => "caller",
            Self::Config => "config",
        })
    }
}

/// Clamps a raw budget into `[0, MAX_THINKING_BUDGET]`. Missing or non-finite
/// values become 0.
pub fn normalize_thinking_budget(raw: Option<f64>) -> u32 {
    match raw {
        Some(v) if v.is_finite() => v.clamp(0.0, MAX_THINKING_BUDGET as f64) as u32,
        _ => 0,
    }
}

/// Builds the user message: text first (if non-empty), then the image (if any).
pub fn assemble_parts(prompt: &str, image: Option<ImageUpload>) -> Vec<ContentPart> {
    let mut parts = Vec::with_capacity(2);

    if !prompt.is_empty() {
        parts.push(ContentPart::Text {
            text: prompt.to_string(),
        });
    }

    if let Some(image) = image {
        let mime_type = image
            .media_type
            .filter(|t| !t.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_IMAGE_MIME_TYPE.to_string());
        parts.push(ContentPart::Image {
            data: image.data,
            mime_type,
        });
    }

    parts
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.trim().is_empty())
}

pub struct Relay {
    client: Arc<dyn LlmClient>,
    fallback_credential: Option<String>,
}

impl Relay {
    pub fn new(client: Arc<dyn LlmClient>, fallback_credential: Option<String>) -> Self {
        Self {
            client,
            fallback_credential,
        }
    }

    /// Caller-supplied credential wins; the configured fallback is used otherwise.
    pub fn resolve_credential(&self, supplied: Option<&str>) -> Result<(String, CredentialSource)> {
        if let Some(key) = non_empty(supplied) {
            return Ok((key.to_string(), CredentialSource::Caller));
        }
        if let Some(key) = non_empty(self.fallback_credential.as_deref()) {
            return Ok((key.to_string(), CredentialSource::Config));
        }
        Err(Error::MissingCredential)
    }

    fn prepare(&self, request: InterpretationRequest) -> Result<GenerateRequest> {
        let (credential, source) = match self.resolve_credential(request.credential.as_deref()) {
            Ok(resolved) => resolved,
            Err(e) => {
                warn!("Rejecting request: no credential from caller or config");
                return Err(e);
            }
        };

        let thinking_budget = normalize_thinking_budget(request.thinking_budget);
        let parts = assemble_parts(&request.prompt, request.image);

        debug!(
            "Prepared request: credential from {}, {} parts, thinking budget {}",
            source,
            parts.len(),
            thinking_budget
        );

        Ok(GenerateRequest {
            model: request.model,
            credential,
            parts,
            params: GenerationParams {
                thinking_budget,
                include_thoughts: false,
                seed: request.seed,
            },
        })
    }

    pub async fn interpret(&self, request: InterpretationRequest) -> Result<String> {
        let generate = self.prepare(request)?;
        let model = generate.model;

        info!("Requesting interpretation from {}", model);

        match self.client.generate_text(generate).await {
            Ok(report) => {
                info!("Interpretation from {} succeeded", model);
                Ok(report)
            }
            Err(e) => {
                error!("Interpretation from {} failed: {}", model, e);
                Err(e)
            }
        }
    }

    /// Like [`Relay::interpret`], but stops waiting as soon as `token` fires.
    /// The in-flight call is dropped, so a late response is never processed.
    pub async fn interpret_with_cancellation(
        &self,
        request: InterpretationRequest,
        token: CancellationToken,
    ) -> Result<String> {
        tokio::select! {
            biased;
            _ = token.cancelled() => {
                info!("Interpretation cancelled by caller");
                Err(Error::Cancelled)
            }
            result = self.interpret(request) => result,
        }
    }
}
