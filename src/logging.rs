use crate::{Error, Result, config::LogsConfig};
use tracing_subscriber::{EnvFilter, filter::LevelFilter};

/// Builds the log filter. `RUST_LOG` directives (e.g. `cxr_relay=debug,tower_http=info`)
/// take precedence; otherwise the configured value must be a single level.
pub fn env_filter(logs: &LogsConfig, rust_log: Option<&str>) -> Result<EnvFilter> {
    if let Some(directives) = rust_log.filter(|d| !d.trim().is_empty()) {
        return EnvFilter::try_new(directives)
            .map_err(|e| Error::config(format!("Invalid RUST_LOG '{}': {}", directives, e)));
    }

    let level = logs.level.parse::<LevelFilter>().map_err(|_| {
        Error::config(format!(
            "Invalid log level: '{}'. Valid levels: error, warn, info, debug, trace",
            logs.level
        ))
    })?;

    Ok(EnvFilter::new(level.to_string()))
}

/// Installs the JSON subscriber used by the server binary.
pub fn init(logs: &LogsConfig) -> Result<()> {
    let rust_log = std::env::var("RUST_LOG").ok();
    let filter = env_filter(logs, rust_log.as_deref())?;

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .json()
        .init();

    Ok(())
}
