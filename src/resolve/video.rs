//! Video id resolution.

use super::{ResolveError, ResourceLocator};
use crate::providers::VideoSearchProvider;
use regex::Regex;

/// Canonical 11-character YouTube video identifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VideoId(String);

impl VideoId {
    /// Wrap an already-validated id. Callers go through [`VideoResolver`]
    /// for untrusted input.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Canonical watch URL for this video.
    pub fn watch_url(&self) -> String {
        format!("https://www.youtube.com/watch?v={}", self.0)
    }
}

impl std::fmt::Display for VideoId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Resolves caller input into a [`VideoId`].
pub struct VideoResolver {
    video_id_regex: Regex,
}

impl VideoResolver {
    pub fn new() -> Self {
        // Matches the 11-character id in the common YouTube URL formats
        let video_id_regex = Regex::new(
            r"(?x)
            (?:https?://)?
            (?:www\.)?
            (?:youtube\.com/watch\?v=|youtu\.be/|youtube\.com/embed/|youtube\.com/v/)
            ([a-zA-Z0-9_-]{11})
        ",
        )
        .expect("Invalid regex");

        Self { video_id_regex }
    }

    /// Extract a video id from a YouTube URL.
    pub fn extract(&self, url: &str) -> Option<VideoId> {
        self.video_id_regex
            .captures(url.trim())
            .and_then(|caps| caps.get(1))
            .map(|m| VideoId(m.as_str().to_string()))
    }

    /// Resolve a locator into a video id.
    ///
    /// URLs are pattern-matched directly; search queries are delegated to
    /// the search provider, taking the first hit. The resolved id is stable
    /// for the rest of the invocation.
    pub async fn resolve(
        &self,
        locator: &ResourceLocator,
        search: &dyn VideoSearchProvider,
    ) -> Result<VideoId, ResolveError> {
        match locator {
            ResourceLocator::Url(url) => self
                .extract(url)
                .ok_or_else(|| ResolveError::MalformedUrl(url.clone())),
            ResourceLocator::SearchQuery(query) => {
                match search
                    .search_first(query)
                    .await
                    .map_err(|e| ResolveError::SearchFailed(e.to_string()))?
                {
                    Some(hit) => Ok(VideoId(hit.id)),
                    None => Err(ResolveError::NoResults(query.clone())),
                }
            }
        }
    }
}

impl Default for VideoResolver {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::providers::{VideoHit, VideoSearchProvider};
    use async_trait::async_trait;

    struct FixedSearch(Option<VideoHit>);

    #[async_trait]
    impl VideoSearchProvider for FixedSearch {
        async fn search_first(&self, _query: &str) -> crate::Result<Option<VideoHit>> {
            Ok(self.0.clone())
        }
    }

    #[test]
    fn test_extract_url_formats() {
        let resolver = VideoResolver::new();

        assert_eq!(
            resolver.extract("https://www.youtube.com/watch?v=dQw4w9WgXcQ"),
            Some(VideoId::new("dQw4w9WgXcQ"))
        );
        assert_eq!(
            resolver.extract("https://youtu.be/dQw4w9WgXcQ"),
            Some(VideoId::new("dQw4w9WgXcQ"))
        );
        assert_eq!(
            resolver.extract("https://youtube.com/embed/dQw4w9WgXcQ"),
            Some(VideoId::new("dQw4w9WgXcQ"))
        );
        assert_eq!(resolver.extract("https://example.com/watch"), None);
        assert_eq!(resolver.extract(""), None);
    }

    #[tokio::test]
    async fn test_resolve_url_does_not_search() {
        let resolver = VideoResolver::new();
        let locator = ResourceLocator::Url("https://youtu.be/dQw4w9WgXcQ".to_string());
        let id = resolver.resolve(&locator, &FixedSearch(None)).await.unwrap();
        assert_eq!(id.as_str(), "dQw4w9WgXcQ");
    }

    #[tokio::test]
    async fn test_resolve_malformed_url() {
        let resolver = VideoResolver::new();
        let locator = ResourceLocator::Url("https://example.com/video".to_string());
        let err = resolver
            .resolve(&locator, &FixedSearch(None))
            .await
            .unwrap_err();
        assert!(matches!(err, ResolveError::MalformedUrl(_)));
    }

    #[tokio::test]
    async fn test_resolve_query_takes_first_hit() {
        let resolver = VideoResolver::new();
        let locator = ResourceLocator::SearchQuery("rick astley".to_string());
        let hit = VideoHit {
            id: "dQw4w9WgXcQ".to_string(),
            title: "Never Gonna Give You Up".to_string(),
            url: "https://youtu.be/dQw4w9WgXcQ".to_string(),
        };
        let id = resolver
            .resolve(&locator, &FixedSearch(Some(hit)))
            .await
            .unwrap();
        assert_eq!(id.as_str(), "dQw4w9WgXcQ");
    }

    #[tokio::test]
    async fn test_resolve_query_no_results() {
        let resolver = VideoResolver::new();
        let locator = ResourceLocator::SearchQuery("zzzzz".to_string());
        let err = resolver
            .resolve(&locator, &FixedSearch(None))
            .await
            .unwrap_err();
        assert!(matches!(err, ResolveError::NoResults(_)));
    }
}
