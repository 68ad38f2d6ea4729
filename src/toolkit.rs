//! Tool dispatch surface.
//!
//! One operation per content domain, each composing resolve -> retrieve ->
//! analyze. Every operation returns a plain string for every input: the
//! analysis text on success, or a marked error string. No error or panic
//! crosses this boundary, so transports above it need no fault handling.

use crate::analyze::Analyzer;
use crate::config::{Prompts, Settings};
use crate::error::Result;
use crate::llm::{LanguageModel, OpenAiChat};
use crate::providers::{
    CaptionSearchProvider, FirecrawlScraper, ProfileDataProvider, ProfileParams, ScrapeProvider,
    ScrapingDogClient, TimedTextClient, TranscriptProvider, VideoSearchProvider, YtDlpClient,
};
use crate::resolve::{LinkedInTarget, ResourceLocator, VideoResolver};
use crate::retrieve::{self, ProfileFailure, TranscriptRetriever};
use std::sync::Arc;
use tracing::{info, instrument};

/// Marker prefixing every tool-level error string.
pub const ERROR_MARKER: &str = "[!]";

/// The four caller-facing tools.
///
/// Stateless across calls: every invocation re-runs the full pipeline and
/// owns its session, retrieval results, and resolved ids alone.
pub struct Toolkit {
    scraper: Arc<dyn ScrapeProvider>,
    transcripts: Arc<dyn TranscriptProvider>,
    captions: Arc<dyn CaptionSearchProvider>,
    video_search: Arc<dyn VideoSearchProvider>,
    profiles: Arc<dyn ProfileDataProvider>,
    analyzer: Analyzer,
    resolver: VideoResolver,
    caption_language: String,
}

impl Toolkit {
    /// Build a toolkit with the real provider clients.
    pub fn new(settings: Settings) -> Result<Self> {
        let prompts = Prompts::load(
            settings.prompts.custom_dir.as_deref(),
            Some(&settings.prompts.variables),
        )?;

        let ytdlp = Arc::new(YtDlpClient::new());
        let llm: Arc<dyn LanguageModel> = Arc::new(OpenAiChat::new(&settings.llm)?);

        Ok(Self {
            scraper: Arc::new(FirecrawlScraper::new(&settings.scrape)?),
            transcripts: Arc::new(TimedTextClient::new(&settings.youtube.caption_language)?),
            captions: ytdlp.clone(),
            video_search: ytdlp,
            profiles: Arc::new(ScrapingDogClient::new(&settings.linkedin)),
            analyzer: Analyzer::new(llm, prompts),
            resolver: VideoResolver::new(),
            caption_language: settings.youtube.caption_language.clone(),
        })
    }

    /// Build a toolkit from explicit providers (substituted backends, test
    /// doubles).
    #[allow(clippy::too_many_arguments)]
    pub fn with_providers(
        scraper: Arc<dyn ScrapeProvider>,
        transcripts: Arc<dyn TranscriptProvider>,
        captions: Arc<dyn CaptionSearchProvider>,
        video_search: Arc<dyn VideoSearchProvider>,
        profiles: Arc<dyn ProfileDataProvider>,
        llm: Arc<dyn LanguageModel>,
        settings: &Settings,
    ) -> Self {
        Self {
            scraper,
            transcripts,
            captions,
            video_search,
            profiles,
            analyzer: Analyzer::new(llm, Prompts::default()),
            resolver: VideoResolver::new(),
            caption_language: settings.youtube.caption_language.clone(),
        }
    }

    fn fail(reason: impl std::fmt::Display) -> String {
        format!("{} {}", ERROR_MARKER, reason)
    }

    /// Scrape a website and answer a question about its content.
    #[instrument(skip(self, question))]
    pub async fn analyze_website(&self, url: &str, question: &str) -> String {
        let content = match retrieve::fetch_website(self.scraper.as_ref(), url).await {
            Ok(retrieved) => retrieved.into_text(),
            Err(failure) => return Self::fail(failure),
        };

        info!("Retrieved {} chars of page content", content.len());

        match self.analyzer.single_shot(&content, question).await {
            Ok(answer) => answer,
            Err(e) => Self::fail(e),
        }
    }

    /// Answer a question about a video's transcript. The input may be a
    /// video URL or a search query.
    #[instrument(skip(self, question))]
    pub async fn ask_video_question(&self, url_or_query: &str, question: &str) -> String {
        let locator = ResourceLocator::classify(url_or_query);

        let video_id = match self
            .resolver
            .resolve(&locator, self.video_search.as_ref())
            .await
        {
            Ok(id) => id,
            Err(e) => return Self::fail(e),
        };

        info!("Resolved video id {}", video_id);

        let retriever = TranscriptRetriever::new(
            self.transcripts.as_ref(),
            self.captions.as_ref(),
            &self.caption_language,
        );

        let transcript = match retriever.retrieve(&video_id).await {
            Ok(retrieved) => retrieved.into_text(),
            Err(failure) => {
                return Self::fail(format!(
                    "Failed to retrieve transcript via both methods:\n{}",
                    failure
                ))
            }
        };

        match self.analyzer.context_then_ask(&transcript, question).await {
            Ok(answer) => answer,
            Err(e) => Self::fail(e),
        }
    }

    /// Fetch a LinkedIn profile or company page and return the raw payload.
    #[instrument(skip(self))]
    pub async fn analyze_linkedin(&self, link: &str) -> String {
        let target = match LinkedInTarget::parse(link) {
            Ok(target) => target,
            Err(e) => return Self::fail(e),
        };

        info!("Fetching LinkedIn {} '{}'", target.kind, target.link_id);

        let params = ProfileParams::from(&target);
        match retrieve::fetch_profile(self.profiles.as_ref(), &params).await {
            Ok(retrieved) => retrieved.into_text(),
            // HTTP failures keep their own "Error <code>: <body>" shape.
            Err(failure @ ProfileFailure::HttpStatus { .. }) => failure.to_string(),
            Err(failure) => Self::fail(failure),
        }
    }

    /// Re-format arbitrary tool output into structured markdown.
    #[instrument(skip(self, input_data))]
    pub async fn structure_text(&self, input_data: &str) -> String {
        match self.analyzer.structure(input_data).await {
            Ok(structured) => structured,
            Err(e) => Self::fail(e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SpeidaError;
    use crate::llm::Turn;
    use crate::providers::{
        CaptionFragment, CaptionIndex, PageOptions, ProfileResponse, VideoHit,
    };
    use crate::resolve::VideoId;
    use async_trait::async_trait;
    use std::sync::Mutex;

    struct StubScrape(Option<String>);

    #[async_trait]
    impl ScrapeProvider for StubScrape {
        async fn fetch_page(&self, _url: &str, _options: &PageOptions) -> crate::Result<String> {
            match &self.0 {
                Some(text) => Ok(text.clone()),
                None => Err(SpeidaError::Scrape("connection refused".to_string())),
            }
        }
    }

    struct StubTranscripts(Vec<&'static str>);

    #[async_trait]
    impl TranscriptProvider for StubTranscripts {
        async fn fetch_by_video_id(&self, _id: &VideoId) -> crate::Result<Vec<CaptionFragment>> {
            Ok(self
                .0
                .iter()
                .map(|t| CaptionFragment {
                    text: t.to_string(),
                })
                .collect())
        }
    }

    struct NoCaptions;

    #[async_trait]
    impl CaptionSearchProvider for NoCaptions {
        async fn fetch_by_video_id(&self, _id: &VideoId) -> crate::Result<CaptionIndex> {
            Ok(CaptionIndex::new())
        }
    }

    struct NoSearch;

    #[async_trait]
    impl VideoSearchProvider for NoSearch {
        async fn search_first(&self, _query: &str) -> crate::Result<Option<VideoHit>> {
            Ok(None)
        }
    }

    struct StubProfile(u16, &'static str);

    #[async_trait]
    impl ProfileDataProvider for StubProfile {
        async fn get(&self, _params: &ProfileParams) -> crate::Result<ProfileResponse> {
            Ok(ProfileResponse {
                status: self.0,
                body: self.1.to_string(),
            })
        }
    }

    /// Replays canned responses in order.
    struct SeqModel(Mutex<Vec<String>>);

    impl SeqModel {
        fn new(responses: &[&str]) -> Self {
            Self(Mutex::new(
                responses.iter().rev().map(|s| s.to_string()).collect(),
            ))
        }
    }

    #[async_trait]
    impl LanguageModel for SeqModel {
        async fn complete(&self, _turns: &[Turn]) -> crate::Result<String> {
            Ok(self
                .0
                .lock()
                .unwrap()
                .pop()
                .unwrap_or_else(|| "ok".to_string()))
        }
    }

    fn toolkit(
        scrape: StubScrape,
        transcripts: StubTranscripts,
        profile: StubProfile,
        model: SeqModel,
    ) -> Toolkit {
        Toolkit::with_providers(
            Arc::new(scrape),
            Arc::new(transcripts),
            Arc::new(NoCaptions),
            Arc::new(NoSearch),
            Arc::new(profile),
            Arc::new(model),
            &Settings::default(),
        )
    }

    fn default_toolkit(model: SeqModel) -> Toolkit {
        toolkit(
            StubScrape(Some("page".to_string())),
            StubTranscripts(vec!["hello world"]),
            StubProfile(200, "{}"),
            model,
        )
    }

    #[tokio::test]
    async fn test_ask_video_question_end_to_end() {
        let tk = toolkit(
            StubScrape(None),
            StubTranscripts(vec!["hello world"]),
            StubProfile(200, "{}"),
            SeqModel::new(&["noted", "It's about greetings."]),
        );

        let answer = tk
            .ask_video_question("https://youtu.be/dQw4w9WgXcQ", "What is this about?")
            .await;
        assert_eq!(answer, "It's about greetings.");
    }

    #[tokio::test]
    async fn test_ask_video_question_malformed_url() {
        let tk = default_toolkit(SeqModel::new(&[]));
        let answer = tk
            .ask_video_question("https://example.com/clip", "anything?")
            .await;
        assert!(answer.starts_with(ERROR_MARKER));
    }

    #[tokio::test]
    async fn test_ask_video_question_both_strategies_fail() {
        let tk = toolkit(
            StubScrape(None),
            StubTranscripts(vec![]),
            StubProfile(200, "{}"),
            SeqModel::new(&[]),
        );

        let answer = tk
            .ask_video_question("https://youtu.be/dQw4w9WgXcQ", "anything?")
            .await;
        assert!(answer.starts_with(ERROR_MARKER));
        assert!(answer.contains("both methods"));
        assert!(answer.contains("no transcript fragments"));
        assert!(answer.contains("no 'en' caption track"));
    }

    #[tokio::test]
    async fn test_analyze_website_success() {
        let tk = toolkit(
            StubScrape(Some("We sell anvils.".to_string())),
            StubTranscripts(vec![]),
            StubProfile(200, "{}"),
            SeqModel::new(&["Anvils."]),
        );

        let answer = tk.analyze_website("https://acme.test", "What is sold?").await;
        assert_eq!(answer, "Anvils.");
    }

    #[tokio::test]
    async fn test_analyze_website_scrape_failure_is_error_string() {
        let tk = toolkit(
            StubScrape(None),
            StubTranscripts(vec![]),
            StubProfile(200, "{}"),
            SeqModel::new(&[]),
        );

        let answer = tk.analyze_website("https://acme.test", "What is sold?").await;
        assert!(answer.starts_with(ERROR_MARKER));
        assert!(answer.contains("connection refused"));
    }

    #[tokio::test]
    async fn test_analyze_linkedin_http_error_shape() {
        let tk = toolkit(
            StubScrape(None),
            StubTranscripts(vec![]),
            StubProfile(404, "not found"),
            SeqModel::new(&[]),
        );

        let answer = tk
            .analyze_linkedin("https://linkedin.com/company/acme")
            .await;
        assert_eq!(answer, "Error 404: not found");
    }

    #[tokio::test]
    async fn test_analyze_linkedin_success_returns_payload() {
        let tk = toolkit(
            StubScrape(None),
            StubTranscripts(vec![]),
            StubProfile(200, r#"{"name":"Acme"}"#),
            SeqModel::new(&[]),
        );

        let answer = tk
            .analyze_linkedin("https://linkedin.com/company/acme")
            .await;
        assert_eq!(answer, r#"{"name":"Acme"}"#);
    }

    #[tokio::test]
    async fn test_analyze_linkedin_unsupported_type_is_error_string() {
        let tk = default_toolkit(SeqModel::new(&[]));
        let answer = tk.analyze_linkedin("https://linkedin.com/school/foo").await;
        assert!(answer.starts_with(ERROR_MARKER));
        assert!(answer.contains("school"));
    }

    #[tokio::test]
    async fn test_structure_text_passes_through_response() {
        let tk = default_toolkit(SeqModel::new(&["# Sections"]));
        let structured = tk.structure_text("raw tool output").await;
        assert_eq!(structured, "# Sections");
    }
}
