//! Types shared across the sentiment pipeline.

use thiserror::Error;

use crate::models::{AnalysisResult, Segment};

/// What the classifier produced for one chunk.
#[derive(Debug, Clone, PartialEq)]
pub enum ChunkClassification {
    /// Model output, validated against the taxonomy.
    Classified(Vec<Segment>),
    /// Analysis did not complete; `segment` stands in for the whole chunk.
    Fallback { segment: Segment, reason: String },
}

impl ChunkClassification {
    pub fn is_fallback(&self) -> bool {
        matches!(self, Self::Fallback { .. })
    }

    pub fn into_segments(self) -> Vec<Segment> {
        match self {
            Self::Classified(segments) => segments,
            Self::Fallback { segment, .. } => vec![segment],
        }
    }
}

/// Terminal outcome of an analysis session.
#[derive(Debug, Clone)]
pub enum AnalysisOutcome {
    Completed(AnalysisResult),
    /// The caller cancelled; no result was produced.
    Cancelled,
}

impl AnalysisOutcome {
    pub fn into_result(self) -> Option<AnalysisResult> {
        match self {
            Self::Completed(result) => Some(result),
            Self::Cancelled => None,
        }
    }
}

/// Errors surfaced to callers of the analyzer.
///
/// Per-chunk failures and the request deadline never appear here; they
/// become fallback segments.
#[derive(Debug, Error)]
pub enum SentimentError {
    #[error("Nothing to analyze: input is empty")]
    EmptyInput,

    #[error("Analysis task failed: {0}")]
    Join(String),
}
