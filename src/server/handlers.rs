use super::types::{HealthResponse, InterpretForm, InterpretResponse, PromptResponse};
use crate::{
    Error, Result,
    config::UploadConfig,
    llm::ModelId,
    prompt::{ReportOptions, build_prompt},
    relay::{ImageUpload, Relay},
};
use axum::{
    extract::{Multipart, State, multipart::Field},
    response::Json,
};
use std::sync::Arc;
use tracing::{debug, info};
use uuid::Uuid;

#[derive(Clone)]
pub struct AppState {
    pub relay: Arc<Relay>,
    pub upload: Arc<UploadConfig>,
    pub default_model: ModelId,
}

async fn read_image(field: Field<'_>, upload: &UploadConfig) -> Result<Option<ImageUpload>> {
    let media_type = field
        .content_type()
        .map(str::to_string)
        .filter(|t| !t.trim().is_empty());

    // An empty file input is sent with a generic type; treat it as no image.
    let data = field.bytes().await?;
    if data.is_empty() {
        return Ok(None);
    }

    if let Some(ref declared) = media_type {
        if !upload.allowed_types.iter().any(|t| t.eq_ignore_ascii_case(declared)) {
            return Err(Error::UnsupportedMediaType(format!(
                "{}. Allowed: {}",
                declared,
                upload.allowed_types.join(", ")
            )));
        }
    }

    if data.len() > upload.max_size_bytes() {
        let size_mb = data.len() as f64 / (1024.0 * 1024.0);
        return Err(Error::PayloadTooLarge(format!(
            "{:.1} MB. Max {} MB",
            size_mb, upload.max_size_mb
        )));
    }

    Ok(Some(ImageUpload {
        data: data.to_vec(),
        media_type,
    }))
}

async fn read_form(mut multipart: Multipart, upload: &UploadConfig) -> Result<InterpretForm> {
    let mut form = InterpretForm::default();

    while let Some(field) = multipart.next_field().await? {
        let name = field.name().unwrap_or_default().to_string();
        match name.as_str() {
            "image" => form.image = read_image(field, upload).await?,
            "prompt" => form.prompt = field.text().await?,
            "model" => form.model = Some(field.text().await?),
            "thinkingBudget" => form.thinking_budget = Some(field.text().await?),
            "seed" => form.seed = Some(field.text().await?),
            "apiKey" => form.api_key = Some(field.text().await?),
            other => debug!("Ignoring unknown form field: {}", other),
        }
    }

    Ok(form)
}

pub async fn interpret(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Json<InterpretResponse>> {
    let request_id = Uuid::new_v4();

    let form = read_form(multipart, &state.upload).await?;
    let request = form.into_request(state.default_model)?;

    info!(
        "Received interpretation request {}: model {}, image {}, prompt {} chars",
        request_id,
        request.model,
        if request.image.is_some() { "present" } else { "absent" },
        request.prompt.chars().count()
    );

    let report = state.relay.interpret(request).await?;

    info!("Completed interpretation request {}", request_id);
    Ok(Json(InterpretResponse { report }))
}

pub async fn prompt(Json(options): Json<ReportOptions>) -> Json<PromptResponse> {
    Json(PromptResponse {
        prompt: build_prompt(&options),
    })
}

pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
    })
}
