//! Pre-flight checks before expensive operations.
//!
//! Validates that required tools and configuration are available
//! before starting operations that would otherwise fail midway.

use crate::config::Settings;
use crate::error::{Result, SpeidaError};
use std::process::Command;

/// Requirements for different operations.
#[derive(Debug, Clone, Copy)]
pub enum Operation {
    /// Website analysis requires the scrape and LLM keys.
    Website,
    /// Video questions require yt-dlp and the LLM key.
    Video,
    /// LinkedIn fetches require the profile data key.
    Linkedin,
    /// Structuring requires the LLM key.
    Structure,
}

/// Run pre-flight checks for the given operation.
///
/// Returns Ok(()) if all checks pass, or an error describing what's missing.
pub fn check(operation: Operation, settings: &Settings) -> Result<()> {
    match operation {
        Operation::Website => {
            check_key(&settings.scrape.api_key, "FIRECRAWL_API_KEY")?;
            check_key(&settings.llm.api_key, "OPENAI_API_KEY")?;
        }
        Operation::Video => {
            check_tool("yt-dlp")?;
            check_key(&settings.llm.api_key, "OPENAI_API_KEY")?;
        }
        Operation::Linkedin => {
            check_key(&settings.linkedin.api_key, "SCRAPINGDOG_API_KEY")?;
        }
        Operation::Structure => {
            check_key(&settings.llm.api_key, "OPENAI_API_KEY")?;
        }
    }
    Ok(())
}

/// Check that an API key is configured.
fn check_key(key: &Option<String>, env_name: &str) -> Result<()> {
    match key {
        Some(k) if !k.is_empty() => Ok(()),
        _ => Err(SpeidaError::Config(format!(
            "{} not set. Set it in the environment or in the config file.",
            env_name
        ))),
    }
}

/// Check if an external tool is available.
pub fn check_tool(name: &str) -> Result<()> {
    match Command::new(name).arg("--version").output() {
        Ok(output) if output.status.success() => Ok(()),
        Ok(_) => Err(SpeidaError::ToolNotFound(format!(
            "{} is installed but not working correctly",
            name
        ))),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            Err(SpeidaError::ToolNotFound(name.to_string()))
        }
        Err(e) => Err(SpeidaError::ToolNotFound(format!("{}: {}", name, e))),
    }
}
