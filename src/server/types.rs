use crate::relay::{ImageUpload, InterpretationRequest};
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize)]
pub struct InterpretResponse {
    pub report: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct PromptResponse {
    pub prompt: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
}

/// Raw multipart fields of an interpretation submission.
#[derive(Debug, Default)]
pub struct InterpretForm {
    pub image: Option<ImageUpload>,
    pub prompt: String,
    pub model: Option<String>,
    pub thinking_budget: Option<String>,
    pub seed: Option<String>,
    pub api_key: Option<String>,
}

impl InterpretForm {
    pub fn into_request(self, default_model: crate::llm::ModelId) -> crate::Result<InterpretationRequest> {
        let model = match self.model.as_deref().map(str::trim) {
            Some(m) if !m.is_empty() => m.parse()?,
            _ => default_model,
        };

        Ok(InterpretationRequest {
            image: self.image,
            prompt: self.prompt,
            model,
            thinking_budget: self
                .thinking_budget
                .and_then(|b| b.trim().parse::<f64>().ok()),
            seed: self.seed.and_then(|s| s.trim().parse::<i64>().ok()),
            credential: self.api_key,
        })
    }
}
