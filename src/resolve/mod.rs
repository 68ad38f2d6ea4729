//! Resource identifier resolution.
//!
//! Turns free-form caller input (URLs or natural-language queries) into
//! canonical resource ids for a content domain.

mod linkedin;
mod video;

pub use linkedin::{LinkedInKind, LinkedInTarget};
pub use video::{VideoId, VideoResolver};

use thiserror::Error;

/// How the caller specified a resource.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResourceLocator {
    /// A URL pointing directly at the resource.
    Url(String),
    /// A natural-language search query.
    SearchQuery(String),
}

impl ResourceLocator {
    /// Classify raw caller input. Anything that starts with `http` is a URL.
    pub fn classify(input: &str) -> Self {
        let trimmed = input.trim();
        if trimmed.starts_with("http") {
            ResourceLocator::Url(trimmed.to_string())
        } else {
            ResourceLocator::SearchQuery(trimmed.to_string())
        }
    }
}

/// Errors from resolving caller input into a canonical id.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ResolveError {
    #[error("could not extract an id from URL: {0}")]
    MalformedUrl(String),

    #[error("search returned no results for: {0}")]
    NoResults(String),

    #[error("unsupported link type '{0}' (expected 'company' or 'in')")]
    UnsupportedType(String),

    #[error("search failed: {0}")]
    SearchFailed(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify() {
        assert_eq!(
            ResourceLocator::classify("https://youtu.be/dQw4w9WgXcQ"),
            ResourceLocator::Url("https://youtu.be/dQw4w9WgXcQ".to_string())
        );
        assert_eq!(
            ResourceLocator::classify("rust async tutorial"),
            ResourceLocator::SearchQuery("rust async tutorial".to_string())
        );
        assert_eq!(
            ResourceLocator::classify("  http://example.com  "),
            ResourceLocator::Url("http://example.com".to_string())
        );
    }
}
