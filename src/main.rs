// Main entry point - Dependency injection and console setup
mod application;
mod domain;
mod infrastructure;
mod presentation;

use std::sync::Arc;
use tracing_subscriber::EnvFilter;

use crate::application::workspace::Workspace;
use crate::infrastructure::config::load_config;
use crate::infrastructure::http_client::HttpAssistantApi;
use crate::presentation::console::Console;
use crate::presentation::render::Renderer;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Logs go to stderr so they never interleave with console output
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let config = load_config()?;

    // Infrastructure layer
    let api = Arc::new(HttpAssistantApi::new(
        &config.api.base_url,
        config.api.timeout(),
    )?);
    tracing::info!("Using assistant service at {}", api.base_url());

    // Application layer
    let workspace = Workspace::connect(api).await;

    // Presentation layer
    let renderer = Renderer::new(config.display.offset()?);
    let mut console = Console::new(workspace, renderer, config.console, tokio::io::stdout());
    console
        .run(tokio::io::BufReader::new(tokio::io::stdin()))
        .await?;

    Ok(())
}
