//! sentiscope - chunked sentiment analysis against a fixed emotion taxonomy.
//!
//! Long text is split at paragraph boundaries, each chunk is classified
//! concurrently by an OpenAI-compatible model, and the labelled segments are
//! reassembled in input order. See [`services::sentiment::SentimentAnalyzer`].

pub mod config;
pub mod llm;
pub mod models;
pub mod services;
pub mod taxonomy;

pub use config::{Config, ConfigError};
pub use llm::{LlmClient, LlmConfig, LlmError};
pub use models::{AnalysisResult, AnalysisStatus, ChatMessage, Segment};
pub use services::sentiment::{
    AnalysisOutcome, AnalysisProgress, AnalysisSession, ProgressState, SentimentAnalyzer,
    SentimentConfig, SentimentError,
};
