use super::MockLlmClient;
use axum::{
    Router,
    body::{Body, to_bytes},
    http::{Request, Response},
};
use cxr_relay::{
    config::{Config, LlmConfig, LogsConfig, ServerConfig, UploadConfig},
    llm::ModelId,
    prompt::{Priority, ReportOptions, Sex, Views},
    server,
};
use std::sync::Arc;

pub const BOUNDARY: &str = "cxr-test-boundary";

/// Create a test configuration with sensible defaults
pub fn create_test_config(api_key: Option<&str>) -> Config {
    Config {
        server: ServerConfig {
            host: "127.0.0.1".to_string(),
            port: 8080,
            cors: true,
            logs: LogsConfig {
                level: "debug".to_string(),
            },
        },
        llm: LlmConfig {
            base_url: "http://localhost:0".to_string(),
            api_key: api_key.map(String::from),
            default_model: ModelId::Gemini25Flash,
        },
        upload: UploadConfig {
            max_size_mb: 1,
            ..UploadConfig::default()
        },
    }
}

pub fn create_test_app(config: &Config, mock: &MockLlmClient) -> Router {
    let state = server::app_state(config, Arc::new(mock.clone()));
    server::router(state, config.server.cors)
}

pub fn scenario_options() -> ReportOptions {
    ReportOptions {
        age: "65".to_string(),
        sex: Sex::Male,
        history: "cough 3 days".to_string(),
        priority: Priority::Routine,
        views: Views::Pa,
        include_differential: true,
        include_severity: true,
        include_recommendations: true,
    }
}

/// One part of a multipart body
pub enum FormPart<'a> {
    Text(&'a str, &'a str),
    File {
        name: &'a str,
        filename: &'a str,
        content_type: Option<&'a str>,
        data: &'a [u8],
    },
}

pub fn multipart_body(parts: &[FormPart<'_>]) -> Vec<u8> {
    let mut body = Vec::new();
    for part in parts {
        body.extend_from_slice(format!("--{}\r\n", BOUNDARY).as_bytes());
        match part {
            FormPart::Text(name, value) => {
                body.extend_from_slice(
                    format!("Content-Disposition: form-data; name=\"{}\"\r\n\r\n", name)
                        .as_bytes(),
                );
                body.extend_from_slice(value.as_bytes());
            }
            FormPart::File {
                name,
                filename,
                content_type,
                data,
            } => {
                body.extend_from_slice(
                    format!(
                        "Content-Disposition: form-data; name=\"{}\"; filename=\"{}\"\r\n",
                        name, filename
                    )
                    .as_bytes(),
                );
                if let Some(content_type) = content_type {
                    body.extend_from_slice(
                        format!("Content-Type: {}\r\n", content_type).as_bytes(),
                    );
                }
                body.extend_from_slice(b"\r\n");
                body.extend_from_slice(data);
            }
        }
        body.extend_from_slice(b"\r\n");
    }
    body.extend_from_slice(format!("--{}--\r\n", BOUNDARY).as_bytes());
    body
}

pub fn interpret_request(parts: &[FormPart<'_>]) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/api/interpret")
        .header(
            "content-type",
            format!("multipart/form-data; boundary={}", BOUNDARY),
        )
        .body(Body::from(multipart_body(parts)))
        .unwrap()
}

pub async fn body_string(response: Response<Body>) -> String {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}
