//! Tuning knobs for the sentiment pipeline (`[sentiment]` section).

use std::time::Duration;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SentimentConfig {
    /// Maximum characters per chunk sent to the model
    #[serde(default = "default_max_chunk_chars")]
    pub max_chunk_chars: usize,
    /// Per-chunk classification budget, in seconds
    #[serde(default = "default_chunk_timeout_secs")]
    pub chunk_timeout_secs: u64,
    /// Budget for a whole analysis request, in seconds
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
    /// Outstanding classifier calls allowed at once (0 = unbounded)
    #[serde(default = "default_max_concurrency")]
    pub max_concurrency: usize,
    /// Interval between progress updates, in milliseconds
    #[serde(default = "default_progress_tick_ms")]
    pub progress_tick_ms: u64,
    /// How long "Analysis complete" stays visible, in milliseconds
    #[serde(default = "default_completion_hold_ms")]
    pub completion_hold_ms: u64,
}

fn default_max_chunk_chars() -> usize {
    4000
}

fn default_chunk_timeout_secs() -> u64 {
    25
}

fn default_request_timeout_secs() -> u64 {
    60
}

fn default_max_concurrency() -> usize {
    8
}

fn default_progress_tick_ms() -> u64 {
    250
}

fn default_completion_hold_ms() -> u64 {
    500
}

impl Default for SentimentConfig {
    fn default() -> Self {
        Self::base_default().with_env_overrides()
    }
}

impl SentimentConfig {
    /// Base default without env overrides.
    pub fn base_default() -> Self {
        Self {
            max_chunk_chars: default_max_chunk_chars(),
            chunk_timeout_secs: default_chunk_timeout_secs(),
            request_timeout_secs: default_request_timeout_secs(),
            max_concurrency: default_max_concurrency(),
            progress_tick_ms: default_progress_tick_ms(),
            completion_hold_ms: default_completion_hold_ms(),
        }
    }

    pub fn is_default(&self) -> bool {
        *self == Self::base_default()
    }

    /// Apply environment variable overrides.
    ///
    /// Supported env vars:
    /// - `SENTIMENT_MAX_CHUNK_CHARS`
    /// - `SENTIMENT_CHUNK_TIMEOUT_SECS`
    /// - `SENTIMENT_REQUEST_TIMEOUT_SECS`
    /// - `SENTIMENT_MAX_CONCURRENCY`
    ///
    /// Unparseable values are ignored.
    pub fn with_env_overrides(mut self) -> Self {
        if let Some(n) = env_parse("SENTIMENT_MAX_CHUNK_CHARS") {
            self.max_chunk_chars = n;
        }
        if let Some(n) = env_parse("SENTIMENT_CHUNK_TIMEOUT_SECS") {
            self.chunk_timeout_secs = n;
        }
        if let Some(n) = env_parse("SENTIMENT_REQUEST_TIMEOUT_SECS") {
            self.request_timeout_secs = n;
        }
        if let Some(n) = env_parse("SENTIMENT_MAX_CONCURRENCY") {
            self.max_concurrency = n;
        }
        self
    }

    pub fn chunk_timeout(&self) -> Duration {
        Duration::from_secs(self.chunk_timeout_secs)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    pub fn progress_tick(&self) -> Duration {
        // interval() panics on zero
        Duration::from_millis(self.progress_tick_ms.max(1))
    }

    pub fn completion_hold(&self) -> Duration {
        Duration::from_millis(self.completion_hold_ms)
    }
}

fn env_parse<T: std::str::FromStr>(key: &str) -> Option<T> {
    std::env::var(key).ok().and_then(|v| v.trim().parse().ok())
}
