//! Dual-strategy transcript retrieval.
//!
//! Transcript availability is unreliable and provider-specific, so the video
//! domain tries two independent sources in fixed order: the structured
//! transcript API first, then a caption track lookup. A failure is only
//! surfaced once both have been attempted, and it carries both reasons.

use super::{Retrieved, RetrievalFailure, StrategyFailure};
use crate::providers::{CaptionSearchProvider, TranscriptProvider};
use crate::resolve::VideoId;
use tracing::debug;

pub const PRIMARY_STRATEGY: &str = "transcript-api";
pub const FALLBACK_STRATEGY: &str = "caption-lookup";

/// Retrieves a video transcript with fallback.
pub struct TranscriptRetriever<'a> {
    transcripts: &'a dyn TranscriptProvider,
    captions: &'a dyn CaptionSearchProvider,
    language: String,
}

impl<'a> TranscriptRetriever<'a> {
    pub fn new(
        transcripts: &'a dyn TranscriptProvider,
        captions: &'a dyn CaptionSearchProvider,
        language: &str,
    ) -> Self {
        Self {
            transcripts,
            captions,
            language: language.to_string(),
        }
    }

    /// Retrieve the transcript for a video.
    ///
    /// Sequence: try the transcript API; on any error or empty result,
    /// record the reason and try the caption lookup; if that also yields
    /// nothing usable, aggregate both reasons in order.
    pub async fn retrieve(&self, id: &VideoId) -> Result<Retrieved, RetrievalFailure> {
        let mut attempts = Vec::new();

        match self.transcripts.fetch_by_video_id(id).await {
            Ok(fragments) => {
                let text = fragments
                    .iter()
                    .map(|f| f.text.as_str())
                    .collect::<Vec<_>>()
                    .join("\n");

                if let Some(retrieved) = Retrieved::from_text(text) {
                    return Ok(retrieved);
                }

                attempts.push(StrategyFailure {
                    strategy: PRIMARY_STRATEGY,
                    reason: "no transcript fragments returned".to_string(),
                });
            }
            Err(e) => attempts.push(StrategyFailure {
                strategy: PRIMARY_STRATEGY,
                reason: e.to_string(),
            }),
        }

        debug!(
            "Primary transcript strategy failed for {}, trying caption lookup",
            id
        );

        match self.captions.fetch_by_video_id(id).await {
            Ok(index) => match index.get(&self.language).and_then(|tracks| tracks.first()) {
                Some(track) => {
                    let text = format!("[Transcript via captions]\nURL: {}", track.url);
                    if let Some(retrieved) = Retrieved::from_text(text) {
                        return Ok(retrieved);
                    }
                    attempts.push(StrategyFailure {
                        strategy: FALLBACK_STRATEGY,
                        reason: "caption track reference was empty".to_string(),
                    });
                }
                None => attempts.push(StrategyFailure {
                    strategy: FALLBACK_STRATEGY,
                    reason: format!("no '{}' caption track found", self.language),
                }),
            },
            Err(e) => attempts.push(StrategyFailure {
                strategy: FALLBACK_STRATEGY,
                reason: e.to_string(),
            }),
        }

        Err(RetrievalFailure { attempts })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SpeidaError;
    use crate::providers::{CaptionFragment, CaptionIndex, CaptionTrack};
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicBool, Ordering};

    struct StubTranscripts {
        result: crate::Result<Vec<CaptionFragment>>,
    }

    #[async_trait]
    impl TranscriptProvider for StubTranscripts {
        async fn fetch_by_video_id(&self, _id: &VideoId) -> crate::Result<Vec<CaptionFragment>> {
            match &self.result {
                Ok(fragments) => Ok(fragments.clone()),
                Err(e) => Err(SpeidaError::Transcript(e.to_string())),
            }
        }
    }

    struct StubCaptions {
        index: CaptionIndex,
        fail: Option<String>,
        called: AtomicBool,
    }

    impl StubCaptions {
        fn with_track(lang: &str, url: &str) -> Self {
            let mut index = CaptionIndex::new();
            index.insert(
                lang.to_string(),
                vec![CaptionTrack {
                    url: url.to_string(),
                    ext: Some("vtt".to_string()),
                }],
            );
            Self {
                index,
                fail: None,
                called: AtomicBool::new(false),
            }
        }

        fn empty() -> Self {
            Self {
                index: CaptionIndex::new(),
                fail: None,
                called: AtomicBool::new(false),
            }
        }

        fn failing(reason: &str) -> Self {
            Self {
                index: CaptionIndex::new(),
                fail: Some(reason.to_string()),
                called: AtomicBool::new(false),
            }
        }
    }

    #[async_trait]
    impl CaptionSearchProvider for StubCaptions {
        async fn fetch_by_video_id(&self, _id: &VideoId) -> crate::Result<CaptionIndex> {
            self.called.store(true, Ordering::SeqCst);
            match &self.fail {
                Some(reason) => Err(SpeidaError::Captions(reason.clone())),
                None => Ok(self.index.clone()),
            }
        }
    }

    fn fragments(texts: &[&str]) -> Vec<CaptionFragment> {
        texts
            .iter()
            .map(|t| CaptionFragment {
                text: t.to_string(),
            })
            .collect()
    }

    fn video() -> VideoId {
        VideoId::new("dQw4w9WgXcQ")
    }

    #[tokio::test]
    async fn test_primary_success_skips_fallback() {
        let transcripts = StubTranscripts {
            result: Ok(fragments(&["hello", "world"])),
        };
        let captions = StubCaptions::with_track("en", "https://example.com/en.vtt");
        let retriever = TranscriptRetriever::new(&transcripts, &captions, "en");

        let retrieved = retriever.retrieve(&video()).await.unwrap();
        assert_eq!(retrieved.text(), "hello\nworld");
        assert!(!captions.called.load(Ordering::SeqCst));
    }

    #[tokio::test]
    async fn test_primary_error_falls_back() {
        let transcripts = StubTranscripts {
            result: Err(SpeidaError::Transcript("blocked".to_string())),
        };
        let captions = StubCaptions::with_track("en", "https://example.com/en.vtt");
        let retriever = TranscriptRetriever::new(&transcripts, &captions, "en");

        let retrieved = retriever.retrieve(&video()).await.unwrap();
        assert!(retrieved.text().starts_with("[Transcript via captions]"));
        assert!(retrieved.text().contains("https://example.com/en.vtt"));
        assert!(captions.called.load(Ordering::SeqCst));
    }

    #[tokio::test]
    async fn test_primary_empty_falls_back() {
        let transcripts = StubTranscripts {
            result: Ok(Vec::new()),
        };
        let captions = StubCaptions::with_track("en", "https://example.com/en.vtt");
        let retriever = TranscriptRetriever::new(&transcripts, &captions, "en");

        assert!(retriever.retrieve(&video()).await.is_ok());
        assert!(captions.called.load(Ordering::SeqCst));
    }

    #[tokio::test]
    async fn test_both_fail_aggregates_reasons_in_order() {
        let transcripts = StubTranscripts {
            result: Err(SpeidaError::Transcript("rate limited".to_string())),
        };
        let captions = StubCaptions::failing("video unavailable");
        let retriever = TranscriptRetriever::new(&transcripts, &captions, "en");

        let failure = retriever.retrieve(&video()).await.unwrap_err();
        assert_eq!(failure.attempts.len(), 2);
        assert_eq!(failure.attempts[0].strategy, PRIMARY_STRATEGY);
        assert_eq!(failure.attempts[1].strategy, FALLBACK_STRATEGY);

        let message = failure.to_string();
        assert!(message.contains("rate limited"));
        assert!(message.contains("video unavailable"));
        assert!(message.find("rate limited").unwrap() < message.find("video unavailable").unwrap());
    }

    #[tokio::test]
    async fn test_missing_language_track_is_fallback_failure() {
        let transcripts = StubTranscripts {
            result: Ok(Vec::new()),
        };
        let captions = StubCaptions::with_track("de", "https://example.com/de.vtt");
        let retriever = TranscriptRetriever::new(&transcripts, &captions, "en");

        let failure = retriever.retrieve(&video()).await.unwrap_err();
        assert!(failure.to_string().contains("no 'en' caption track"));
    }

    #[tokio::test]
    async fn test_whitespace_fragments_count_as_empty() {
        let transcripts = StubTranscripts {
            result: Ok(fragments(&["  ", "\n"])),
        };
        let captions = StubCaptions::empty();
        let retriever = TranscriptRetriever::new(&transcripts, &captions, "en");

        let failure = retriever.retrieve(&video()).await.unwrap_err();
        assert_eq!(failure.attempts.len(), 2);
    }
}
