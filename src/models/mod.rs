//! Data models for sentiment analysis.

mod chunk;
mod message;
mod segment;

pub use chunk::Chunk;
pub use message::{extract_user_text, ChatMessage, ContentPart, MessageContent};
pub use segment::{preview, AnalysisResult, AnalysisStatus, Segment, FALLBACK_PREVIEW_CHARS};
