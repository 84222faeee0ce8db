//! Sentiment segments and the aggregated analysis result.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::taxonomy::FALLBACK_LABEL;

/// Maximum characters of chunk text kept in a fallback segment.
pub const FALLBACK_PREVIEW_CHARS: usize = 100;

/// A classifier-identified piece of text with its validated labels.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Segment {
    /// Excerpt of the original input.
    pub text: String,
    /// Non-empty, duplicate-free subset of the taxonomy.
    #[serde(rename = "sentiment")]
    pub sentiments: Vec<String>,
    /// Set on synthetic segments standing in for a chunk that failed analysis.
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub incomplete: bool,
}

impl Segment {
    /// Create a segment from already-validated labels.
    pub fn new(text: impl Into<String>, sentiments: Vec<String>) -> Self {
        Self {
            text: text.into(),
            sentiments,
            incomplete: false,
        }
    }

    /// Fallback segment for a chunk whose analysis did not complete.
    ///
    /// Keeps a short prefix of the chunk so the caller can still locate it.
    pub fn fallback(chunk_text: &str) -> Self {
        Self {
            text: preview(chunk_text, FALLBACK_PREVIEW_CHARS),
            sentiments: vec![FALLBACK_LABEL.to_string()],
            incomplete: true,
        }
    }

    pub fn has_sentiment(&self, label: &str) -> bool {
        self.sentiments.iter().any(|s| s == label)
    }
}

/// Truncate to `max_chars` characters (UTF-8 safe), appending "..." if cut.
pub fn preview(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((end, _)) => format!("{}...", &text[..end]),
        None => text.to_string(),
    }
}

/// Whether every chunk of an analysis was classified.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AnalysisStatus {
    Complete,
    /// Some chunks fell back; their indices in ascending order.
    Degraded { failed_chunks: Vec<usize> },
}

/// Ordered segments for a whole input, in chunk order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub segments: Vec<Segment>,
    /// Number of chunks the input was split into.
    pub chunk_count: usize,
    /// Chunk indices that were replaced by a fallback segment.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub failed_chunks: Vec<usize>,
    pub analyzed_at: DateTime<Utc>,
}

impl AnalysisResult {
    pub fn status(&self) -> AnalysisStatus {
        if self.failed_chunks.is_empty() {
            AnalysisStatus::Complete
        } else {
            AnalysisStatus::Degraded {
                failed_chunks: self.failed_chunks.clone(),
            }
        }
    }

    pub fn is_degraded(&self) -> bool {
        !self.failed_chunks.is_empty()
    }

    /// Count of segments per label, in taxonomy order, omitting zeroes.
    pub fn label_counts(&self) -> Vec<(&'static str, usize)> {
        crate::taxonomy::SENTIMENTS
            .iter()
            .map(|label| {
                let n = self
                    .segments
                    .iter()
                    .filter(|s| s.has_sentiment(label))
                    .count();
                (*label, n)
            })
            .filter(|(_, n)| *n > 0)
            .collect()
    }
}
