mod cli;
mod commands;

use anyhow::{Context, Result};
use clap::Parser;
use scrub_config::Config;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = cli::Cli::parse();

    let config = match &cli.config {
        Some(path) => Config::load_from(path)
            .with_context(|| format!("Failed to load config from {}", path.display()))?,
        None => Config::load()?,
    };

    // Initialize tracing; stdout carries the redacted message
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&config.log.filter)),
        )
        .init();

    match cli.command {
        cli::Commands::Request { input, field } => {
            commands::redact::request(&input, field, &config).await
        }
        cli::Commands::Response { input, field } => {
            commands::redact::response(&input, field, &config).await
        }
        cli::Commands::Multipart { input } => commands::redact::multipart(&input, &config).await,
        cli::Commands::Inspect { input, response } => {
            commands::inspect::handle(&input, response, &config).await
        }
    }
}
