use anyhow::{Context, Result};
use cxr_relay::{config, logging, server};
use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
    // Logging is configured from the file, so it cannot report load failures.
    let config = config::load().await.context("Failed to load configuration")?;

    logging::init(&config.server.logs)?;

    info!(
        "Starting cxr-relay: default model {}, upload limit {} MB",
        config.llm.default_model, config.upload.max_size_mb
    );

    server::run(config).await?;

    Ok(())
}
