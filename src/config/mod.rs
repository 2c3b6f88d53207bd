mod types;

pub use types::*;

use crate::{Error, Result};
use std::env;
use tracing::debug;

/// Environment variable carrying the process-wide fallback credential.
pub const API_KEY_ENV: &str = "GOOGLE_GENERATIVE_AI_API_KEY";

pub async fn load() -> Result<Config> {
    let config_path = env::var("CONFIG_PATH").unwrap_or_else(|_| "config.yaml".to_string());
    let mut config = load_from_path(&config_path).await?;

    if let Ok(api_key) = env::var(API_KEY_ENV) {
        debug!("Fallback API key supplied via {}", API_KEY_ENV);
        config.llm.api_key = Some(api_key);
    }

    Ok(config)
}

/// Reads a YAML config file, falling back to defaults when it does not exist.
pub async fn load_from_path(config_path: &str) -> Result<Config> {
    debug!("Loading configuration from: {}", config_path);

    if !tokio::fs::try_exists(config_path).await? {
        debug!("No configuration file at {}, using defaults", config_path);
        return Ok(Config::default());
    }

    let config_str = tokio::fs::read_to_string(config_path).await?;
    let mut config: Config = serde_yaml::from_str(&config_str)?;

    // An empty key in the file means "not configured".
    if config.llm.api_key.as_deref().is_some_and(|k| k.trim().is_empty()) {
        config.llm.api_key = None;
    }

    validate(&config)?;

    Ok(config)
}

fn validate(config: &Config) -> Result<()> {
    if config.upload.max_size_mb == 0 {
        return Err(Error::config("upload.max_size_mb must be greater than 0"));
    }
    if config.upload.allowed_types.is_empty() {
        return Err(Error::config("upload.allowed_types must not be empty"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm::ModelId;
    use pretty_assertions::assert_eq;

    #[tokio::test]
    async fn test_missing_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent.yaml");

        let config = load_from_path(&path.to_string_lossy()).await.unwrap();

        assert_eq!(config.server.port, 8080);
        assert_eq!(config.server.logs.level, "info");
        assert_eq!(config.llm.default_model, ModelId::Gemini25Flash);
        assert!(config.llm.api_key.is_none());
        assert_eq!(config.upload.max_size_mb, 20);
    }

    #[tokio::test]
    async fn test_partial_file_fills_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.yaml");
        tokio::fs::write(
            &path,
            "server:\n  port: 9090\nllm:\n  api_key: \"abc\"\n  default_model: gemini-2.5-pro\n",
        )
        .await
        .unwrap();

        let config = load_from_path(&path.to_string_lossy()).await.unwrap();

        assert_eq!(config.server.port, 9090);
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.llm.api_key.as_deref(), Some("abc"));
        assert_eq!(config.llm.default_model, ModelId::Gemini25Pro);
        assert_eq!(
            config.upload.allowed_types,
            vec![
                "image/jpeg",
                "image/png",
                "image/webp",
                "image/heic",
                "image/heif",
                "image/jpg"
            ]
        );
    }

    #[tokio::test]
    async fn test_blank_api_key_is_treated_as_absent() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.yaml");
        tokio::fs::write(&path, "llm:\n  api_key: \"\"\n").await.unwrap();

        let config = load_from_path(&path.to_string_lossy()).await.unwrap();

        assert!(config.llm.api_key.is_none());
    }

    #[tokio::test]
    async fn test_invalid_yaml_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.yaml");
        tokio::fs::write(&path, "server:\n  port: \"not-a-number\"\n")
            .await
            .unwrap();

        assert!(load_from_path(&path.to_string_lossy()).await.is_err());
    }

    #[tokio::test]
    async fn test_empty_allowed_types_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.yaml");
        tokio::fs::write(&path, "upload:\n  allowed_types: []\n")
            .await
            .unwrap();

        let err = load_from_path(&path.to_string_lossy()).await.unwrap_err();
        assert!(err.to_string().contains("allowed_types"));
    }

    #[test]
    fn test_upload_limit_in_bytes() {
        let upload = UploadConfig::default();
        assert_eq!(upload.max_size_bytes(), 20 * 1024 * 1024);
    }
}
