//! Classifier doubles for pipeline tests.

use std::collections::HashSet;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;

use crate::models::{Chunk, Segment};

use super::classifier::SentimentClassifier;
use super::config::SentimentConfig;
use super::types::ChunkClassification;

/// Config with short timings and no env influence.
pub fn test_config() -> SentimentConfig {
    let mut config = SentimentConfig::base_default();
    config.progress_tick_ms = 10;
    config.completion_hold_ms = 200;
    config
}

/// Echoes each chunk back as one `joy` segment.
pub struct MockClassifier {
    calls: AtomicUsize,
    in_flight: AtomicUsize,
    peak: AtomicUsize,
    delay: Duration,
    reverse_latency: Option<usize>,
    failing: HashSet<usize>,
}

impl MockClassifier {
    pub fn new() -> Self {
        Self {
            calls: AtomicUsize::new(0),
            in_flight: AtomicUsize::new(0),
            peak: AtomicUsize::new(0),
            delay: Duration::ZERO,
            reverse_latency: None,
            failing: HashSet::new(),
        }
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    /// Chunk `i` of `n` sleeps `(n - i) * 20ms`, so later chunks finish first.
    pub fn with_reverse_latency(mut self, n: usize) -> Self {
        self.reverse_latency = Some(n);
        self
    }

    pub fn failing_on(mut self, index: usize) -> Self {
        self.failing.insert(index);
        self
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn peak_in_flight(&self) -> usize {
        self.peak.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl SentimentClassifier for MockClassifier {
    async fn classify(&self, chunk: &Chunk) -> ChunkClassification {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.peak.fetch_max(now, Ordering::SeqCst);

        let delay = match self.reverse_latency {
            Some(n) => Duration::from_millis(n.saturating_sub(chunk.index) as u64 * 20),
            None => self.delay,
        };
        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }
        self.in_flight.fetch_sub(1, Ordering::SeqCst);

        if self.failing.contains(&chunk.index) {
            return ChunkClassification::Fallback {
                segment: Segment::fallback(&chunk.text),
                reason: "mock failure".to_string(),
            };
        }
        ChunkClassification::Classified(vec![Segment::new(
            chunk.text.clone(),
            vec!["joy".to_string()],
        )])
    }
}
