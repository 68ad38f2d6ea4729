//! Configuration settings for Speida.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Root configuration structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
#[derive(Default)]
pub struct Settings {
    pub general: GeneralSettings,
    pub llm: LlmSettings,
    pub scrape: ScrapeSettings,
    pub youtube: YoutubeSettings,
    pub linkedin: LinkedInSettings,
    pub prompts: PromptSettings,
}

/// General application settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralSettings {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,
}

impl Default for GeneralSettings {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
        }
    }
}

/// Language model settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LlmSettings {
    /// Chat model for analysis and structuring.
    pub model: String,
    /// Sampling temperature.
    pub temperature: f32,
    /// Override the API base URL (for OpenAI-compatible endpoints).
    pub api_base: Option<String>,
    /// API key. Falls back to OPENAI_API_KEY at load time.
    pub api_key: Option<String>,
    /// Request timeout in seconds.
    pub timeout_seconds: u64,
}

impl Default for LlmSettings {
    fn default() -> Self {
        Self {
            model: "gpt-4o-mini".to_string(),
            temperature: 0.3,
            api_base: None,
            api_key: None,
            timeout_seconds: 300,
        }
    }
}

/// Web scraping provider settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ScrapeSettings {
    /// Firecrawl API base URL.
    pub base_url: String,
    /// Firecrawl API key. Falls back to FIRECRAWL_API_KEY at load time.
    pub api_key: Option<String>,
    /// Request timeout in seconds.
    pub timeout_seconds: u64,
}

impl Default for ScrapeSettings {
    fn default() -> Self {
        Self {
            base_url: "https://api.firecrawl.dev/v1".to_string(),
            api_key: None,
            timeout_seconds: 120,
        }
    }
}

/// YouTube retrieval settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct YoutubeSettings {
    /// Preferred caption language code.
    pub caption_language: String,
}

impl Default for YoutubeSettings {
    fn default() -> Self {
        Self {
            caption_language: "en".to_string(),
        }
    }
}

/// LinkedIn profile data provider settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LinkedInSettings {
    /// ScrapingDog LinkedIn API endpoint.
    pub base_url: String,
    /// ScrapingDog API key. Falls back to SCRAPINGDOG_API_KEY at load time.
    pub api_key: Option<String>,
    /// Request timeout in seconds.
    pub timeout_seconds: u64,
}

impl Default for LinkedInSettings {
    fn default() -> Self {
        Self {
            base_url: "https://api.scrapingdog.com/linkedin".to_string(),
            api_key: None,
            timeout_seconds: 60,
        }
    }
}

/// Prompt customization settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
#[derive(Default)]
pub struct PromptSettings {
    /// Directory for custom prompts (overrides defaults).
    pub custom_dir: Option<String>,
    /// Custom variables available in all prompts as {{variable_name}}.
    pub variables: std::collections::HashMap<String, String>,
}

impl Settings {
    /// Load settings from the default configuration file.
    pub fn load() -> crate::error::Result<Self> {
        Self::load_from(None)
    }

    /// Load settings from a specific path, or default location if None.
    ///
    /// API keys absent from the file are filled from the environment here,
    /// at composition time; nothing deeper in the pipeline reads env vars.
    pub fn load_from(path: Option<&PathBuf>) -> crate::error::Result<Self> {
        let config_path = match path {
            Some(p) => p.clone(),
            None => Self::default_config_path(),
        };

        let mut settings = if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            toml::from_str::<Settings>(&content)?
        } else {
            Settings::default()
        };

        settings.apply_env_fallbacks();
        Ok(settings)
    }

    /// Fill unset API keys from the environment.
    fn apply_env_fallbacks(&mut self) {
        if self.llm.api_key.is_none() {
            self.llm.api_key = non_empty_env("OPENAI_API_KEY");
        }
        if self.scrape.api_key.is_none() {
            self.scrape.api_key = non_empty_env("FIRECRAWL_API_KEY");
        }
        if self.linkedin.api_key.is_none() {
            self.linkedin.api_key = non_empty_env("SCRAPINGDOG_API_KEY");
        }
    }

    /// Save settings to the default configuration file.
    pub fn save(&self) -> crate::error::Result<()> {
        self.save_to(&Self::default_config_path())
    }

    /// Save settings to a specific path.
    pub fn save_to(&self, path: &PathBuf) -> crate::error::Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)
            .map_err(|e| crate::error::SpeidaError::Config(e.to_string()))?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Get the default configuration file path.
    pub fn default_config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("speida")
            .join("config.toml")
    }

    /// Expand shell variables in paths (e.g., ~).
    pub fn expand_path(path: &str) -> PathBuf {
        PathBuf::from(shellexpand::tilde(path).to_string())
    }
}

fn non_empty_env(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let settings = Settings::default();
        assert_eq!(settings.llm.model, "gpt-4o-mini");
        assert_eq!(settings.youtube.caption_language, "en");
        assert!(settings.linkedin.base_url.contains("scrapingdog"));
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let settings: Settings = toml::from_str(
            r#"
            [llm]
            model = "meta/llama3-70b-instruct"
            "#,
        )
        .unwrap();
        assert_eq!(settings.llm.model, "meta/llama3-70b-instruct");
        assert_eq!(settings.llm.temperature, 0.3);
        assert_eq!(settings.scrape.base_url, "https://api.firecrawl.dev/v1");
    }
}
