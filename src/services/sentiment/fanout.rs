//! Concurrent dispatch of chunk classifications.
//!
//! Every chunk is dispatched up front and joined; an optional semaphore caps
//! how many calls are outstanding at once. Results come back in chunk order
//! regardless of completion order. Chunks still unfinished at the request
//! deadline degrade to fallback segments.

use std::sync::Arc;

use futures::future::join_all;
use tokio::sync::Semaphore;
use tokio::time::Instant;
use tracing::{debug, warn};

use crate::models::{Chunk, Segment};

use super::classifier::SentimentClassifier;
use super::types::ChunkClassification;

pub struct FanOut {
    classifier: Arc<dyn SentimentClassifier>,
    /// None means unbounded.
    permits: Option<Arc<Semaphore>>,
}

impl FanOut {
    /// `max_concurrency` of 0 dispatches every chunk at once.
    pub fn new(classifier: Arc<dyn SentimentClassifier>, max_concurrency: usize) -> Self {
        let permits = (max_concurrency > 0).then(|| Arc::new(Semaphore::new(max_concurrency)));
        Self {
            classifier,
            permits,
        }
    }

    /// Classify all chunks and return `(index, classification)` in index order.
    ///
    /// Waits for every call to settle; a failing chunk never aborts its
    /// siblings. Past `deadline`, queued and in-flight chunks fall back
    /// while finished ones keep their segments.
    pub async fn analyze(
        &self,
        chunks: Vec<Chunk>,
        deadline: Option<Instant>,
    ) -> Vec<(usize, ChunkClassification)> {
        debug!("Dispatching {} chunks", chunks.len());

        let calls = chunks.iter().map(|chunk| async move {
            let call = async {
                let _permit = match &self.permits {
                    Some(permits) => permits.acquire().await.ok(),
                    None => None,
                };
                self.classifier.classify(chunk).await
            };

            let classification = match deadline {
                Some(deadline) => match tokio::time::timeout_at(deadline, call).await {
                    Ok(classification) => classification,
                    Err(_) => {
                        warn!("Chunk {} unfinished at request deadline", chunk.index);
                        ChunkClassification::Fallback {
                            segment: Segment::fallback(&chunk.text),
                            reason: "request deadline exceeded".to_string(),
                        }
                    }
                },
                None => call.await,
            };
            (chunk.index, classification)
        });

        let mut results = join_all(calls).await;
        results.sort_by_key(|(index, _)| *index);
        results
    }
}
