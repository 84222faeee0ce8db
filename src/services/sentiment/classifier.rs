//! Per-chunk sentiment classification.
//!
//! `classify` is fail-closed: timeouts and service errors are logged and
//! turned into a fallback segment instead of being returned.

use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;
use tracing::{debug, warn};

use crate::llm::{
    FunctionSpec, LlmClient, LlmError, PromptMessage, SENTIMENT_FUNCTION_NAME,
    SENTIMENT_SYSTEM_PROMPT, SENTIMENT_USER_PROMPT,
};
use crate::models::{Chunk, Segment};
use crate::taxonomy;

use super::types::ChunkClassification;

/// A backend that labels one chunk of text.
#[async_trait]
pub trait SentimentClassifier: Send + Sync {
    /// Classify a chunk. Must not fail; degrade to a fallback instead.
    async fn classify(&self, chunk: &Chunk) -> ChunkClassification;
}

/// Arguments the model passes to `analyze_sentiment`.
#[derive(Debug, Deserialize)]
pub struct SentimentArguments {
    #[serde(default)]
    pub segments: Vec<RawSegment>,
}

#[derive(Debug, Deserialize)]
pub struct RawSegment {
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub sentiment: Vec<String>,
}

/// Validate model output into segments.
///
/// Segments with blank text are dropped. Labels outside the taxonomy are
/// discarded, falling back to `neutral` when none remain.
pub fn segments_from_arguments(args: SentimentArguments) -> Result<Vec<Segment>, LlmError> {
    let segments: Vec<Segment> = args
        .segments
        .into_iter()
        .filter(|raw| !raw.text.trim().is_empty())
        .map(|raw| {
            let labels = taxonomy::validate_labels(&raw.sentiment);
            Segment::new(raw.text, labels)
        })
        .collect();

    if segments.is_empty() {
        return Err(LlmError::Parse("No segments in model response".to_string()));
    }
    Ok(segments)
}

/// JSON-schema tool definition constraining labels to the taxonomy.
pub fn sentiment_function() -> FunctionSpec {
    FunctionSpec {
        name: SENTIMENT_FUNCTION_NAME.to_string(),
        description: "Analyze the sentiment of segments in the provided text".to_string(),
        parameters: serde_json::json!({
            "type": "object",
            "properties": {
                "segments": {
                    "type": "array",
                    "items": {
                        "type": "object",
                        "properties": {
                            "text": {
                                "type": "string",
                                "description": "A segment of text from the original input"
                            },
                            "sentiment": {
                                "type": "array",
                                "items": {
                                    "type": "string",
                                    "enum": taxonomy::SENTIMENTS
                                },
                                "description": "The sentiments detected in this text segment (must be from the provided list)"
                            }
                        },
                        "required": ["text", "sentiment"]
                    }
                }
            },
            "required": ["segments"]
        }),
    }
}

/// Classifier backed by an OpenAI-compatible function-calling model.
pub struct LlmSentimentClassifier {
    client: LlmClient,
    timeout: Duration,
    function: FunctionSpec,
    system_prompt: String,
}

impl LlmSentimentClassifier {
    pub fn new(client: LlmClient, timeout: Duration) -> Self {
        Self {
            client,
            timeout,
            function: sentiment_function(),
            system_prompt: SENTIMENT_SYSTEM_PROMPT.replace("{sentiments}", &taxonomy::joined()),
        }
    }

    pub fn client(&self) -> &LlmClient {
        &self.client
    }

    async fn request(&self, chunk: &Chunk) -> Result<Vec<Segment>, LlmError> {
        let messages = [
            PromptMessage::system(self.system_prompt.clone()),
            PromptMessage::user(SENTIMENT_USER_PROMPT.replace("{content}", &chunk.text)),
        ];
        let args: SentimentArguments = self.client.call_function(&messages, &self.function).await?;
        segments_from_arguments(args)
    }
}

#[async_trait]
impl SentimentClassifier for LlmSentimentClassifier {
    async fn classify(&self, chunk: &Chunk) -> ChunkClassification {
        let outcome = match tokio::time::timeout(self.timeout, self.request(chunk)).await {
            Ok(result) => result,
            Err(_) => Err(LlmError::Timeout(self.timeout)),
        };

        match outcome {
            Ok(segments) => {
                debug!(
                    "Chunk {} classified into {} segments",
                    chunk.index,
                    segments.len()
                );
                ChunkClassification::Classified(segments)
            }
            Err(e) => {
                warn!(
                    "Sentiment analysis failed for chunk {} ({} chars): {}",
                    chunk.index,
                    chunk.char_len(),
                    e
                );
                ChunkClassification::Fallback {
                    segment: Segment::fallback(&chunk.text),
                    reason: e.to_string(),
                }
            }
        }
    }
}
