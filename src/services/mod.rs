//! Service layer for sentiment analysis.
//!
//! Domain logic lives here, separate from the CLI.

pub mod sentiment;

pub use sentiment::{AnalysisOutcome, AnalysisSession, SentimentAnalyzer, SentimentConfig, SentimentError};
