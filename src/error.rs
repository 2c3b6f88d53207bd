use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Missing Gemini API key. Please provide your API key in the settings.")]
    MissingCredential,

    #[error("{message}")]
    Provider {
        message: String,
        code: Option<String>,
    },

    #[error("Unsupported input: {0}")]
    UnsupportedInput(String),

    #[error("Unsupported file type: {0}")]
    UnsupportedMediaType(String),

    #[error("Payload too large: {0}")]
    PayloadTooLarge(String),

    #[error("Request cancelled")]
    Cancelled,

    #[error("Multipart error: {0}")]
    Multipart(#[from] axum::extract::multipart::MultipartError),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Address parse error: {0}")]
    AddrParse(#[from] std::net::AddrParseError),
}

impl Error {
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    pub fn provider(message: impl Into<String>, code: Option<String>) -> Self {
        Self::Provider {
            message: message.into(),
            code,
        }
    }

    pub fn unsupported(msg: impl Into<String>) -> Self {
        Self::UnsupportedInput(msg.into())
    }

    /// HTTP status reported to the caller for this failure.
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::MissingCredential | Self::UnsupportedInput(_) => StatusCode::BAD_REQUEST,
            Self::Multipart(e) => e.status(),
            Self::UnsupportedMediaType(_) => StatusCode::UNSUPPORTED_MEDIA_TYPE,
            Self::PayloadTooLarge(_) => StatusCode::PAYLOAD_TOO_LARGE,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Plain-text body for a failed request: the message, plus the provider's
    /// error code in parentheses when one was exposed.
    pub fn client_message(&self) -> String {
        match self {
            Self::Provider { message, code } => {
                let message = if message.trim().is_empty() {
                    "Failed to generate report"
                } else {
                    message.as_str()
                };
                match code {
                    Some(code) => format!("{message} (Code: {code})"),
                    None => message.to_string(),
                }
            }
            Self::Network(e) => e.to_string(),
            other => other.to_string(),
        }
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        (self.status_code(), self.client_message()).into_response()
    }
}
