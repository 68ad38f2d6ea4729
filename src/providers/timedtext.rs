//! YouTube timedtext transcript client.
//!
//! Primary transcript strategy: YouTube publishes caption tracks through the
//! timedtext endpoint in the `json3` format, which needs no API key.

use super::{CaptionFragment, TranscriptProvider};
use crate::error::Result;
use crate::resolve::VideoId;
use async_trait::async_trait;
use serde::Deserialize;
use std::time::Duration;
use tracing::debug;

const TIMEDTEXT_URL: &str = "https://video.google.com/timedtext";
const REQUEST_TIMEOUT_SECS: u64 = 30;

/// Transcript provider backed by the timedtext endpoint.
pub struct TimedTextClient {
    client: reqwest::Client,
    language: String,
}

#[derive(Deserialize)]
struct TimedTextBody {
    #[serde(default)]
    events: Vec<TimedTextEvent>,
}

#[derive(Deserialize)]
struct TimedTextEvent {
    #[serde(default)]
    segs: Vec<TimedTextSeg>,
}

#[derive(Deserialize)]
struct TimedTextSeg {
    #[serde(default)]
    utf8: String,
}

impl TimedTextClient {
    pub fn new(language: &str) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()?;

        Ok(Self {
            client,
            language: language.to_string(),
        })
    }
}

#[async_trait]
impl TranscriptProvider for TimedTextClient {
    async fn fetch_by_video_id(&self, id: &VideoId) -> Result<Vec<CaptionFragment>> {
        debug!("Fetching timedtext transcript for {}", id);

        let response = self
            .client
            .get(TIMEDTEXT_URL)
            .query(&[
                ("lang", self.language.as_str()),
                ("v", id.as_str()),
                ("fmt", "json3"),
            ])
            .send()
            .await?
            .error_for_status()?;

        let body = response.text().await?;

        // The endpoint answers 200 with an empty body when the video has no
        // published track for the requested language.
        if body.trim().is_empty() {
            return Ok(Vec::new());
        }

        let parsed: TimedTextBody = serde_json::from_str(&body)?;

        let fragments = parsed
            .events
            .into_iter()
            .map(|event| {
                event
                    .segs
                    .into_iter()
                    .map(|seg| seg.utf8)
                    .collect::<String>()
            })
            .map(|text| text.trim().to_string())
            .filter(|text| !text.is_empty())
            .map(|text| CaptionFragment { text })
            .collect();

        Ok(fragments)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_json3_events() {
        let body = r#"{"events":[{"segs":[{"utf8":"hello "},{"utf8":"world"}]},{"segs":[{"utf8":"\n"}]},{"segs":[{"utf8":"second line"}]}]}"#;
        let parsed: TimedTextBody = serde_json::from_str(body).unwrap();
        let texts: Vec<String> = parsed
            .events
            .into_iter()
            .map(|e| e.segs.into_iter().map(|s| s.utf8).collect::<String>())
            .map(|t| t.trim().to_string())
            .filter(|t| !t.is_empty())
            .collect();
        assert_eq!(texts, vec!["hello world", "second line"]);
    }
}
