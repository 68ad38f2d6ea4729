//! Firecrawl scraping client.

use super::{PageOptions, ScrapeProvider};
use crate::config::ScrapeSettings;
use crate::error::{Result, SpeidaError};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::debug;

/// Scrape provider backed by the Firecrawl HTTP API.
pub struct FirecrawlScraper {
    client: reqwest::Client,
    base_url: String,
    api_key: Option<String>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ScrapeRequest<'a> {
    url: &'a str,
    formats: &'a [String],
    only_main_content: bool,
}

#[derive(Deserialize)]
struct ScrapeResponse {
    #[serde(default)]
    success: bool,
    data: Option<ScrapeData>,
    error: Option<String>,
}

#[derive(Deserialize)]
struct ScrapeData {
    markdown: Option<String>,
}

impl FirecrawlScraper {
    pub fn new(settings: &ScrapeSettings) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(settings.timeout_seconds))
            .build()?;

        Ok(Self {
            client,
            base_url: settings.base_url.trim_end_matches('/').to_string(),
            api_key: settings.api_key.clone(),
        })
    }
}

#[async_trait]
impl ScrapeProvider for FirecrawlScraper {
    async fn fetch_page(&self, url: &str, options: &PageOptions) -> Result<String> {
        let api_key = self.api_key.as_deref().ok_or_else(|| {
            SpeidaError::Config(
                "Firecrawl API key not configured. Set FIRECRAWL_API_KEY or scrape.api_key."
                    .to_string(),
            )
        })?;

        debug!("Scraping {}", url);

        let response = self
            .client
            .post(format!("{}/scrape", self.base_url))
            .bearer_auth(api_key)
            .json(&ScrapeRequest {
                url,
                formats: &options.formats,
                only_main_content: options.main_content_only,
            })
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(SpeidaError::Scrape(format!(
                "Firecrawl returned {}: {}",
                status, body
            )));
        }

        let parsed: ScrapeResponse = response.json().await?;
        if !parsed.success {
            return Err(SpeidaError::Scrape(
                parsed
                    .error
                    .unwrap_or_else(|| "Firecrawl reported failure without detail".to_string()),
            ));
        }

        parsed
            .data
            .and_then(|d| d.markdown)
            .ok_or_else(|| SpeidaError::Scrape("no markdown content in response".to_string()))
    }
}
