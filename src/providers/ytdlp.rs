//! yt-dlp subprocess client.
//!
//! Serves two capabilities: caption track lookup (the fallback transcript
//! strategy) and resolving search queries to a first video hit. Both shell
//! out to yt-dlp's `--dump-json` mode.

use super::{CaptionIndex, CaptionSearchProvider, CaptionTrack, VideoHit, VideoSearchProvider};
use crate::error::{Result, SpeidaError};
use crate::resolve::VideoId;
use async_trait::async_trait;
use tracing::debug;

/// Caption and search provider backed by the yt-dlp binary.
pub struct YtDlpClient;

impl YtDlpClient {
    pub fn new() -> Self {
        Self
    }

    async fn dump_json(&self, extra_args: &[&str], target: &str) -> Result<String> {
        let mut args = vec!["--dump-json", "--no-download", "--no-warnings"];
        args.extend_from_slice(extra_args);
        args.push(target);

        let output = tokio::process::Command::new("yt-dlp")
            .args(&args)
            .output()
            .await
            .map_err(|e| {
                if e.kind() == std::io::ErrorKind::NotFound {
                    SpeidaError::ToolNotFound("yt-dlp".to_string())
                } else {
                    SpeidaError::ToolFailed(format!("Failed to run yt-dlp: {}", e))
                }
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(SpeidaError::ToolFailed(format!(
                "yt-dlp exited with {}: {}",
                output.status,
                stderr.trim()
            )));
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}

impl Default for YtDlpClient {
    fn default() -> Self {
        Self::new()
    }
}

/// Build a caption index from a yt-dlp subtitle map.
fn parse_caption_map(value: &serde_json::Value) -> CaptionIndex {
    let mut index = CaptionIndex::new();

    if let Some(map) = value.as_object() {
        for (lang, tracks) in map {
            let parsed: Vec<CaptionTrack> = tracks
                .as_array()
                .map(|arr| {
                    arr.iter()
                        .filter_map(|track| {
                            track["url"].as_str().map(|url| CaptionTrack {
                                url: url.to_string(),
                                ext: track["ext"].as_str().map(|s| s.to_string()),
                            })
                        })
                        .collect()
                })
                .unwrap_or_default();

            if !parsed.is_empty() {
                index.insert(lang.clone(), parsed);
            }
        }
    }

    index
}

#[async_trait]
impl CaptionSearchProvider for YtDlpClient {
    async fn fetch_by_video_id(&self, id: &VideoId) -> Result<CaptionIndex> {
        debug!("Looking up caption tracks for {} via yt-dlp", id);

        let stdout = self.dump_json(&[], &id.watch_url()).await?;
        let json: serde_json::Value = serde_json::from_str(stdout.trim()).map_err(|e| {
            SpeidaError::Captions(format!("Failed to parse yt-dlp output: {}", e))
        })?;

        // Manual subtitles first, automatic captions as a second chance.
        let mut index = parse_caption_map(&json["subtitles"]);
        if index.is_empty() {
            index = parse_caption_map(&json["automatic_captions"]);
        }

        Ok(index)
    }
}

#[async_trait]
impl VideoSearchProvider for YtDlpClient {
    async fn search_first(&self, query: &str) -> Result<Option<VideoHit>> {
        debug!("Searching videos for '{}' via yt-dlp", query);

        let target = format!("ytsearch1:{}", query);
        let stdout = self
            .dump_json(&["--flat-playlist", "--playlist-end", "1"], &target)
            .await?;

        let first_line = match stdout.lines().find(|line| !line.trim().is_empty()) {
            Some(line) => line,
            None => return Ok(None),
        };

        let json: serde_json::Value = serde_json::from_str(first_line).map_err(|e| {
            SpeidaError::VideoSearch(format!("Failed to parse yt-dlp output: {}", e))
        })?;

        let id = match json["id"].as_str() {
            Some(id) => id.to_string(),
            None => return Ok(None),
        };

        let title = json["title"].as_str().unwrap_or("Unknown Title").to_string();
        let url = json["url"]
            .as_str()
            .map(|s| s.to_string())
            .unwrap_or_else(|| format!("https://www.youtube.com/watch?v={}", id));

        Ok(Some(VideoHit { id, title, url }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_caption_map() {
        let value = json!({
            "en": [{"url": "https://example.com/en.vtt", "ext": "vtt"}],
            "de": [],
        });
        let index = parse_caption_map(&value);
        assert_eq!(index.len(), 1);
        assert_eq!(index["en"][0].url, "https://example.com/en.vtt");
        assert_eq!(index["en"][0].ext.as_deref(), Some("vtt"));
    }

    #[test]
    fn test_parse_caption_map_not_an_object() {
        assert!(parse_caption_map(&json!(null)).is_empty());
        assert!(parse_caption_map(&json!("nope")).is_empty());
    }
}
