//! Chunked sentiment analysis.
//!
//! Input text is split at paragraph boundaries, each chunk is classified
//! concurrently against the fixed taxonomy, and the per-chunk segments are
//! reassembled in input order. [`SentimentAnalyzer::start`] runs the same
//! pipeline in the background with heuristic progress and cancellation.

mod aggregator;
mod analyzer;
mod chunker;
mod classifier;
mod config;
mod fanout;
mod progress;
mod session;
#[cfg(test)]
mod test_support;
mod types;

pub use aggregator::aggregate;
pub use analyzer::SentimentAnalyzer;
pub use chunker::{chunk_text, split_into_chunks};
pub use classifier::{
    segments_from_arguments, sentiment_function, LlmSentimentClassifier, RawSegment,
    SentimentArguments, SentimentClassifier,
};
pub use config::SentimentConfig;
pub use fanout::FanOut;
pub use progress::{status_message, AnalysisProgress, ProgressEstimator, ProgressState};
pub use session::AnalysisSession;
pub use types::{AnalysisOutcome, ChunkClassification, SentimentError};
