//! Content retrieval.
//!
//! Retrieval never returns success with empty content and never lets a
//! provider error escape as an exception: each strategy's outcome becomes an
//! explicit value, and multi-strategy domains aggregate every attempt's
//! reason for diagnosability.

mod transcript;

pub use transcript::{TranscriptRetriever, FALLBACK_STRATEGY, PRIMARY_STRATEGY};

use crate::providers::{PageOptions, ProfileDataProvider, ProfileParams, ScrapeProvider};
use tracing::debug;

/// Successfully retrieved content. The text is always non-empty once trimmed.
#[derive(Debug, Clone)]
pub struct Retrieved {
    text: String,
}

impl Retrieved {
    /// Wrap retrieved text, rejecting content that is empty after trimming.
    pub fn from_text(text: impl Into<String>) -> Option<Self> {
        let text = text.into();
        let trimmed = text.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(Self {
                text: trimmed.to_string(),
            })
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn into_text(self) -> String {
        self.text
    }
}

/// One failed retrieval strategy.
#[derive(Debug, Clone)]
pub struct StrategyFailure {
    pub strategy: &'static str,
    pub reason: String,
}

/// All strategies for a retrieval failed. Attempts are kept in the order
/// they were tried.
#[derive(Debug, Clone)]
pub struct RetrievalFailure {
    pub attempts: Vec<StrategyFailure>,
}

impl std::fmt::Display for RetrievalFailure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for (i, attempt) in self.attempts.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "{} failed: {}", attempt.strategy, attempt.reason)?;
        }
        Ok(())
    }
}

/// Fetch rendered page content for the website domain.
///
/// Single strategy: main-content-only markdown from the scrape provider.
/// Any provider error or an empty page is an immediate failure.
pub async fn fetch_website(
    scraper: &dyn ScrapeProvider,
    url: &str,
) -> Result<Retrieved, RetrievalFailure> {
    let fail = |reason: String| RetrievalFailure {
        attempts: vec![StrategyFailure {
            strategy: "scrape",
            reason,
        }],
    };

    debug!("Retrieving website content for {}", url);

    let text = scraper
        .fetch_page(url, &PageOptions::default())
        .await
        .map_err(|e| fail(e.to_string()))?;

    Retrieved::from_text(text).ok_or_else(|| fail("page content was empty".to_string()))
}

/// Failure of the profile fetch.
#[derive(Debug, Clone)]
pub enum ProfileFailure {
    /// The provider answered with a non-success HTTP status.
    HttpStatus { code: u16, body: String },
    /// The request itself failed, or the payload was unusable.
    Transport(String),
}

impl std::fmt::Display for ProfileFailure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ProfileFailure::HttpStatus { code, body } => write!(f, "Error {}: {}", code, body),
            ProfileFailure::Transport(reason) => write!(f, "{}", reason),
        }
    }
}

/// Fetch profile/company data for the LinkedIn domain.
///
/// Single strategy, one GET: 200 with a non-blank body is success carrying
/// the raw payload; any other status is a failure carrying status and body.
pub async fn fetch_profile(
    provider: &dyn ProfileDataProvider,
    params: &ProfileParams,
) -> Result<Retrieved, ProfileFailure> {
    let response = provider
        .get(params)
        .await
        .map_err(|e| ProfileFailure::Transport(e.to_string()))?;

    if response.status != 200 {
        return Err(ProfileFailure::HttpStatus {
            code: response.status,
            body: response.body,
        });
    }

    Retrieved::from_text(response.body)
        .ok_or_else(|| ProfileFailure::Transport("profile response was empty".to_string()))
}
