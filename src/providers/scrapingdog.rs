//! ScrapingDog LinkedIn data client.
//!
//! The ScrapingDog call is the one blocking-style request in the system, so
//! it is handed off to the blocking worker pool instead of running on the
//! async executor.

use super::{ProfileDataProvider, ProfileParams, ProfileResponse};
use crate::config::LinkedInSettings;
use crate::error::{Result, SpeidaError};
use async_trait::async_trait;
use std::time::Duration;
use tracing::debug;

/// Profile data provider backed by the ScrapingDog LinkedIn API.
pub struct ScrapingDogClient {
    base_url: String,
    api_key: Option<String>,
    timeout: Duration,
}

impl ScrapingDogClient {
    pub fn new(settings: &LinkedInSettings) -> Self {
        Self {
            base_url: settings.base_url.clone(),
            api_key: settings.api_key.clone(),
            timeout: Duration::from_secs(settings.timeout_seconds),
        }
    }
}

#[async_trait]
impl ProfileDataProvider for ScrapingDogClient {
    async fn get(&self, params: &ProfileParams) -> Result<ProfileResponse> {
        let api_key = self.api_key.clone().ok_or_else(|| {
            SpeidaError::Config(
                "ScrapingDog API key not configured. Set SCRAPINGDOG_API_KEY or linkedin.api_key."
                    .to_string(),
            )
        })?;

        debug!("Fetching LinkedIn {} '{}'", params.kind, params.link_id);

        let base_url = self.base_url.clone();
        let timeout = self.timeout;
        let query = [
            ("api_key".to_string(), api_key),
            ("type".to_string(), params.kind.to_string()),
            ("linkId".to_string(), params.link_id.clone()),
            ("private".to_string(), params.private.to_string()),
        ];

        let response = tokio::task::spawn_blocking(move || -> Result<ProfileResponse> {
            let client = reqwest::blocking::Client::builder()
                .timeout(timeout)
                .build()?;

            let resp = client.get(&base_url).query(&query).send()?;
            let status = resp.status().as_u16();
            let body = resp.text()?;

            Ok(ProfileResponse { status, body })
        })
        .await
        .map_err(|e| SpeidaError::Profile(format!("worker task failed: {}", e)))??;

        Ok(response)
    }
}
