//! Conversational analysis and markdown structuring.

use crate::config::Prompts;
use crate::error::Result;
use crate::llm::{LanguageModel, Turn};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::debug;

/// An ephemeral conversation transcript.
///
/// Created after a successful retrieval, owned by exactly one invocation,
/// and dropped when it returns. Never persisted or shared.
#[derive(Debug, Default)]
pub struct ConversationSession {
    turns: Vec<Turn>,
}

impl ConversationSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, turn: Turn) {
        self.turns.push(turn);
    }

    pub fn turns(&self) -> &[Turn] {
        &self.turns
    }
}

/// Answers questions about retrieved content and structures raw text.
pub struct Analyzer {
    llm: Arc<dyn LanguageModel>,
    prompts: Prompts,
}

impl Analyzer {
    pub fn new(llm: Arc<dyn LanguageModel>, prompts: Prompts) -> Self {
        Self { llm, prompts }
    }

    /// Single-shot analysis: one rendered prompt embedding content and
    /// question, one model call, raw response returned unmodified.
    pub async fn single_shot(&self, content: &str, question: &str) -> Result<String> {
        let mut vars = HashMap::new();
        vars.insert("context".to_string(), content.to_string());
        vars.insert("question".to_string(), question.to_string());

        let prompt = self
            .prompts
            .render_with_custom(&self.prompts.analyst.website, &vars);

        self.llm.complete(&[Turn::user(prompt)]).await
    }

    /// Two-turn analysis: prime the model with the full content first, then
    /// ask the question in a second turn.
    ///
    /// Long content (full transcripts) goes in as a priming turn rather than
    /// a template slot, which sidesteps prompt-size and templating fragility.
    pub async fn context_then_ask(&self, content: &str, question: &str) -> Result<String> {
        let mut session = ConversationSession::new();

        let mut vars = HashMap::new();
        vars.insert("transcript".to_string(), content.to_string());
        let priming = self
            .prompts
            .render_with_custom(&self.prompts.transcript.priming, &vars);

        session.push(Turn::user(priming));
        let acknowledgement = self.llm.complete(session.turns()).await?;
        session.push(Turn::assistant(acknowledgement));

        debug!("Priming turn complete, asking question");

        session.push(Turn::user(question));
        self.llm.complete(session.turns()).await
    }

    /// Re-format arbitrary text into sectioned markdown. Single-shot, no
    /// conversational memory.
    pub async fn structure(&self, input: &str) -> Result<String> {
        let mut vars = HashMap::new();
        vars.insert("input_data".to_string(), input.to_string());

        let prompt = self
            .prompts
            .render_with_custom(&self.prompts.structuring.template, &vars);

        self.llm.complete(&[Turn::user(prompt)]).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm::Role;
    use std::sync::Mutex;

    /// Records every call's turns and replays canned responses in order.
    struct RecordingModel {
        calls: Mutex<Vec<Vec<Turn>>>,
        responses: Mutex<Vec<String>>,
    }

    impl RecordingModel {
        fn new(responses: &[&str]) -> Self {
            Self {
                calls: Mutex::new(Vec::new()),
                responses: Mutex::new(responses.iter().rev().map(|s| s.to_string()).collect()),
            }
        }

        fn recorded(&self) -> Vec<Vec<Turn>> {
            self.calls.lock().unwrap().clone()
        }
    }

    #[async_trait::async_trait]
    impl LanguageModel for RecordingModel {
        async fn complete(&self, turns: &[Turn]) -> Result<String> {
            self.calls.lock().unwrap().push(turns.to_vec());
            Ok(self
                .responses
                .lock()
                .unwrap()
                .pop()
                .unwrap_or_else(|| "ok".to_string()))
        }
    }

    fn analyzer(model: Arc<RecordingModel>) -> Analyzer {
        Analyzer::new(model, Prompts::default())
    }

    #[tokio::test]
    async fn test_single_shot_embeds_content_and_question() {
        let model = Arc::new(RecordingModel::new(&["answer"]));
        let result = analyzer(model.clone())
            .single_shot("page text", "what is sold?")
            .await
            .unwrap();
        assert_eq!(result, "answer");

        let calls = model.recorded();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].len(), 1);
        assert_eq!(calls[0][0].role, Role::User);
        assert!(calls[0][0].text.contains("page text"));
        assert!(calls[0][0].text.contains("what is sold?"));
    }

    #[tokio::test]
    async fn test_single_shot_is_deterministic_in_call_args() {
        let first = Arc::new(RecordingModel::new(&["a"]));
        let second = Arc::new(RecordingModel::new(&["b"]));

        analyzer(first.clone())
            .single_shot("content", "question")
            .await
            .unwrap();
        analyzer(second.clone())
            .single_shot("content", "question")
            .await
            .unwrap();

        assert_eq!(first.recorded()[0][0].text, second.recorded()[0][0].text);
    }

    #[tokio::test]
    async fn test_context_then_ask_two_turn_shape() {
        let model = Arc::new(RecordingModel::new(&["noted", "It's about greetings."]));
        let answer = analyzer(model.clone())
            .context_then_ask("hello world", "What is this about?")
            .await
            .unwrap();
        assert_eq!(answer, "It's about greetings.");

        let calls = model.recorded();
        assert_eq!(calls.len(), 2);

        // First call: one priming turn carrying the content.
        assert_eq!(calls[0].len(), 1);
        assert!(calls[0][0].text.contains("hello world"));

        // Second call: priming turn, model acknowledgement, then the question.
        assert_eq!(calls[1].len(), 3);
        assert_eq!(calls[1][1].role, Role::Assistant);
        assert_eq!(calls[1][1].text, "noted");
        assert_eq!(calls[1][2].text, "What is this about?");
    }

    #[tokio::test]
    async fn test_structure_single_call() {
        let model = Arc::new(RecordingModel::new(&["# Summary"]));
        let result = analyzer(model.clone()).structure("raw output").await.unwrap();
        assert_eq!(result, "# Summary");

        let calls = model.recorded();
        assert_eq!(calls.len(), 1);
        assert!(calls[0][0].text.contains("raw output"));
        assert!(calls[0][0].text.contains("markdown"));
    }
}
