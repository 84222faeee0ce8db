//! Entry point for sentiment analysis: chunk, fan out, aggregate.

use std::sync::Arc;

use tokio::time::Instant;
use tracing::{debug, info};

use crate::llm::{LlmClient, LlmConfig, LlmError};
use crate::models::{extract_user_text, AnalysisResult, ChatMessage};

use super::aggregator::aggregate;
use super::chunker::chunk_text;
use super::classifier::{LlmSentimentClassifier, SentimentClassifier};
use super::config::SentimentConfig;
use super::fanout::FanOut;
use super::session::AnalysisSession;
use super::types::SentimentError;

/// Sentiment analyzer for free text and chat transcripts.
pub struct SentimentAnalyzer {
    fan_out: FanOut,
    config: SentimentConfig,
}

impl SentimentAnalyzer {
    pub fn new(classifier: Arc<dyn SentimentClassifier>, config: SentimentConfig) -> Self {
        Self {
            fan_out: FanOut::new(classifier, config.max_concurrency),
            config,
        }
    }

    /// Build an analyzer backed by the configured model service.
    pub fn from_llm_config(llm: LlmConfig, config: SentimentConfig) -> Result<Self, LlmError> {
        let client = LlmClient::new(llm)?;
        let classifier = LlmSentimentClassifier::new(client, config.chunk_timeout());
        Ok(Self::new(Arc::new(classifier), config))
    }

    pub fn config(&self) -> &SentimentConfig {
        &self.config
    }

    /// Analyze `text` and return its segments in input order.
    ///
    /// Blank input is rejected before anything is dispatched. Chunk failures
    /// degrade to fallback segments, and so do chunks still unfinished when
    /// the request timeout passes. A `request_timeout_secs` of 0 disables
    /// that timeout.
    pub async fn analyze_text(&self, text: &str) -> Result<AnalysisResult, SentimentError> {
        if text.trim().is_empty() {
            return Err(SentimentError::EmptyInput);
        }
        Ok(self.run(text).await)
    }

    /// Analyze the user-authored text of a chat transcript.
    pub async fn analyze_messages(
        &self,
        messages: &[ChatMessage],
    ) -> Result<AnalysisResult, SentimentError> {
        let text = extract_user_text(messages);
        debug!(
            "Extracted {} chars of user text from {} messages",
            text.chars().count(),
            messages.len()
        );
        self.analyze_text(&text).await
    }

    /// Run an analysis in the background with progress and cancellation.
    pub fn start(self: &Arc<Self>, text: impl Into<String>) -> AnalysisSession {
        AnalysisSession::spawn(Arc::clone(self), text.into())
    }

    async fn run(&self, text: &str) -> AnalysisResult {
        let started = Instant::now();
        let deadline = (self.config.request_timeout_secs > 0)
            .then(|| started + self.config.request_timeout());
        let chunks = chunk_text(text, self.config.max_chunk_chars);
        info!(
            "Analyzing {} chars in {} chunks",
            text.chars().count(),
            chunks.len()
        );

        let per_chunk = self.fan_out.analyze(chunks, deadline).await;
        let result = aggregate(per_chunk);

        info!(
            "Analysis finished in {:.2}s: {} segments, {} failed chunks",
            started.elapsed().as_secs_f64(),
            result.segments.len(),
            result.failed_chunks.len()
        );
        result
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;
    use crate::models::AnalysisStatus;
    use crate::services::sentiment::test_support::{test_config, MockClassifier};

    fn analyzer(classifier: &Arc<MockClassifier>, config: SentimentConfig) -> SentimentAnalyzer {
        SentimentAnalyzer::new(classifier.clone(), config)
    }

    #[tokio::test]
    async fn test_empty_input_makes_no_calls() {
        let classifier = Arc::new(MockClassifier::new());
        let analyzer = analyzer(&classifier, test_config());

        for input in ["", "   \n\n\t  "] {
            let err = analyzer.analyze_text(input).await.unwrap_err();
            assert!(matches!(err, SentimentError::EmptyInput));
        }
        assert_eq!(classifier.calls(), 0);
    }

    #[tokio::test]
    async fn test_short_input_is_single_call() {
        let classifier = Arc::new(MockClassifier::new());
        let analyzer = analyzer(&classifier, test_config());

        let result = analyzer.analyze_text("I love this!").await.unwrap();
        assert_eq!(classifier.calls(), 1);
        assert_eq!(result.chunk_count, 1);
        assert_eq!(result.segments[0].text, "I love this!");
        assert_eq!(result.status(), AnalysisStatus::Complete);
    }

    #[tokio::test]
    async fn test_paragraph_order_survives_reverse_completion() {
        let classifier = Arc::new(MockClassifier::new().with_reverse_latency(3));
        let mut config = test_config();
        config.max_chunk_chars = 30;
        let analyzer = analyzer(&classifier, config);

        let text = format!("{}\n\n{}\n\n{}", "a".repeat(25), "b".repeat(25), "c".repeat(25));
        let result = analyzer.analyze_text(&text).await.unwrap();

        assert_eq!(classifier.calls(), 3);
        assert_eq!(classifier.peak_in_flight(), 3);
        let firsts: Vec<char> = result
            .segments
            .iter()
            .filter_map(|s| s.text.chars().next())
            .collect();
        assert_eq!(firsts, vec!['a', 'b', 'c']);
    }

    #[tokio::test]
    async fn test_failed_chunk_degrades() {
        let classifier = Arc::new(MockClassifier::new().failing_on(1));
        let mut config = test_config();
        config.max_chunk_chars = 30;
        let analyzer = analyzer(&classifier, config);

        let text = format!("{}\n\n{}\n\n{}", "a".repeat(25), "b".repeat(25), "c".repeat(25));
        let result = analyzer.analyze_text(&text).await.unwrap();

        assert_eq!(result.segments.len(), 3);
        assert!(result.segments[1].incomplete);
        assert_eq!(result.segments[1].sentiments, vec!["neutral"]);
        assert_eq!(
            result.status(),
            AnalysisStatus::Degraded {
                failed_chunks: vec![1]
            }
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_request_timeout_keeps_finished_chunks() {
        // 24 chunks, 8 at a time, 25s each: two waves land inside 60s.
        let classifier = Arc::new(MockClassifier::new().with_delay(Duration::from_secs(25)));
        let mut config = test_config();
        config.max_chunk_chars = 10;
        let analyzer = analyzer(&classifier, config);

        let text = (0..24)
            .map(|i| format!("para {i:02}"))
            .collect::<Vec<_>>()
            .join("\n\n");
        let result = analyzer.analyze_text(&text).await.unwrap();

        assert_eq!(result.chunk_count, 24);
        assert_eq!(result.segments.len(), 24);
        assert_eq!(result.failed_chunks, (16..24).collect::<Vec<_>>());
        assert!(!result.segments[15].incomplete);
        assert!(result.segments[16].incomplete);
        assert_eq!(result.segments[23].text, "para 23");
    }

    #[tokio::test(start_paused = true)]
    async fn test_zero_request_timeout_waits_for_all() {
        let classifier = Arc::new(MockClassifier::new().with_delay(Duration::from_secs(120)));
        let mut config = test_config();
        config.request_timeout_secs = 0;
        let analyzer = analyzer(&classifier, config);

        let result = analyzer.analyze_text("slow").await.unwrap();
        assert_eq!(result.status(), AnalysisStatus::Complete);
    }

    #[tokio::test]
    async fn test_messages_use_only_user_text() {
        let classifier = Arc::new(MockClassifier::new());
        let analyzer = analyzer(&classifier, test_config());

        let messages = vec![
            ChatMessage::assistant("How can I help?"),
            ChatMessage::user("I'm so happy today"),
        ];
        let result = analyzer.analyze_messages(&messages).await.unwrap();
        assert_eq!(result.segments[0].text, "I'm so happy today");

        let accented = analyzer
            .analyze_messages(&[ChatMessage::user("Très content ☺")])
            .await
            .unwrap();
        assert_eq!(accented.segments[0].text, "Très content ☺");

        let err = analyzer
            .analyze_messages(&[ChatMessage::assistant("only me")])
            .await
            .unwrap_err();
        assert!(matches!(err, SentimentError::EmptyInput));
    }
}
