//! Speida CLI entry point.

use anyhow::Result;
use clap::Parser;
use speida::cli::{commands, Cli, Commands};
use speida::config::Settings;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let log_level = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::registry()
        .with(EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| format!("speida={}", log_level)),
        ))
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .init();

    // Load configuration
    let settings = match &cli.config {
        Some(path) => Settings::load_from(Some(&std::path::PathBuf::from(path)))?,
        None => Settings::load()?,
    };

    // Execute command
    match &cli.command {
        Commands::Website {
            url,
            question,
            structured,
        } => {
            commands::run_website(url, question, *structured, settings).await?;
        }

        Commands::Video {
            input,
            question,
            structured,
        } => {
            commands::run_video(input, question, *structured, settings).await?;
        }

        Commands::Linkedin { link, structured } => {
            commands::run_linkedin(link, *structured, settings).await?;
        }

        Commands::Structure { input } => {
            commands::run_structure(input, settings).await?;
        }

        Commands::Doctor => {
            commands::run_doctor(&settings)?;
        }

        Commands::Serve { host, port } => {
            commands::run_serve(host, *port, settings).await?;
        }

        Commands::Mcp => {
            commands::run_mcp(settings).await?;
        }

        Commands::Config { action } => {
            commands::run_config(action, settings)?;
        }
    }

    Ok(())
}
