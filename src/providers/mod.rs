//! External capability abstractions.
//!
//! Each provider the pipeline consumes is a narrow trait with one or two
//! methods, so backends can be swapped and tests can use deterministic
//! doubles. The real clients live in the submodules.

mod firecrawl;
mod scrapingdog;
mod timedtext;
mod ytdlp;

pub use firecrawl::FirecrawlScraper;
pub use scrapingdog::ScrapingDogClient;
pub use timedtext::TimedTextClient;
pub use ytdlp::YtDlpClient;

use crate::error::Result;
use crate::resolve::{LinkedInKind, LinkedInTarget, VideoId};
use async_trait::async_trait;
use std::collections::HashMap;

/// Options for a page scrape.
#[derive(Debug, Clone)]
pub struct PageOptions {
    /// Output formats to request (e.g. "markdown").
    pub formats: Vec<String>,
    /// Strip navigation, footers, and other chrome.
    pub main_content_only: bool,
}

impl Default for PageOptions {
    fn default() -> Self {
        Self {
            formats: vec!["markdown".to_string()],
            main_content_only: true,
        }
    }
}

/// Fetches rendered page content for a URL.
#[async_trait]
pub trait ScrapeProvider: Send + Sync {
    async fn fetch_page(&self, url: &str, options: &PageOptions) -> Result<String>;
}

/// One fragment of a video's published transcript.
#[derive(Debug, Clone)]
pub struct CaptionFragment {
    pub text: String,
}

/// Fetches a video's transcript as ordered caption fragments.
#[async_trait]
pub trait TranscriptProvider: Send + Sync {
    async fn fetch_by_video_id(&self, id: &VideoId) -> Result<Vec<CaptionFragment>>;
}

/// A reference to a downloadable caption track.
#[derive(Debug, Clone)]
pub struct CaptionTrack {
    pub url: String,
    pub ext: Option<String>,
}

/// Caption tracks keyed by language code.
pub type CaptionIndex = HashMap<String, Vec<CaptionTrack>>;

/// Looks up caption/subtitle references for a video from an alternate source.
#[async_trait]
pub trait CaptionSearchProvider: Send + Sync {
    async fn fetch_by_video_id(&self, id: &VideoId) -> Result<CaptionIndex>;
}

/// First matching result of a video search.
#[derive(Debug, Clone)]
pub struct VideoHit {
    pub id: String,
    pub title: String,
    pub url: String,
}

/// Resolves a free-text query to a video.
#[async_trait]
pub trait VideoSearchProvider: Send + Sync {
    async fn search_first(&self, query: &str) -> Result<Option<VideoHit>>;
}

/// Parameters for a profile data fetch.
#[derive(Debug, Clone)]
pub struct ProfileParams {
    pub kind: LinkedInKind,
    pub link_id: String,
    pub private: bool,
}

impl From<&LinkedInTarget> for ProfileParams {
    fn from(target: &LinkedInTarget) -> Self {
        Self {
            kind: target.kind,
            link_id: target.link_id.clone(),
            private: target.kind.is_private(),
        }
    }
}

/// Raw response from the profile data provider.
#[derive(Debug, Clone)]
pub struct ProfileResponse {
    pub status: u16,
    pub body: String,
}

/// Fetches profile/company data for a LinkedIn target.
///
/// Implementations return the response for any HTTP status; classifying
/// non-success statuses is the retriever's job.
#[async_trait]
pub trait ProfileDataProvider: Send + Sync {
    async fn get(&self, params: &ProfileParams) -> Result<ProfileResponse>;
}
