//! Background analysis with progress reporting and cancellation.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior};
use tracing::{debug, info, warn};

use super::analyzer::SentimentAnalyzer;
use super::progress::{AnalysisProgress, ProgressEstimator, ProgressState};
use super::types::{AnalysisOutcome, SentimentError};

/// Handle to an analysis running on the tokio runtime.
///
/// Dropping the session without calling [`wait`](Self::wait) cancels it.
pub struct AnalysisSession {
    cancel_tx: watch::Sender<bool>,
    progress_rx: watch::Receiver<ProgressState>,
    handle: JoinHandle<Result<AnalysisOutcome, SentimentError>>,
}

impl AnalysisSession {
    pub(crate) fn spawn(analyzer: Arc<SentimentAnalyzer>, text: String) -> Self {
        let estimator = ProgressEstimator::for_text(&text);
        let (cancel_tx, cancel_rx) = watch::channel(false);
        let (progress_tx, progress_rx) =
            watch::channel(ProgressState::Estimating(estimator.at(Duration::ZERO)));

        debug!(
            "Starting analysis session, estimated {}s",
            estimator.estimated_total_seconds()
        );
        let handle = tokio::spawn(drive(analyzer, text, estimator, cancel_rx, progress_tx));

        Self {
            cancel_tx,
            progress_rx,
            handle,
        }
    }

    /// Request cancellation.
    ///
    /// Returns true if the analysis was still outstanding. An analysis that
    /// settles in the same instant may still complete.
    pub fn cancel(&self) -> bool {
        if !matches!(*self.progress_rx.borrow(), ProgressState::Estimating(_)) {
            return false;
        }
        if *self.cancel_tx.borrow() {
            return false;
        }
        self.cancel_tx.send(true).is_ok()
    }

    /// Subscribe to progress updates.
    pub fn progress(&self) -> watch::Receiver<ProgressState> {
        self.progress_rx.clone()
    }

    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }

    /// Wait for the analysis to settle.
    pub async fn wait(self) -> Result<AnalysisOutcome, SentimentError> {
        let Self {
            cancel_tx, handle, ..
        } = self;
        let outcome = handle
            .await
            .map_err(|e| SentimentError::Join(e.to_string()))?;
        drop(cancel_tx);
        outcome
    }
}

async fn drive(
    analyzer: Arc<SentimentAnalyzer>,
    text: String,
    estimator: ProgressEstimator,
    mut cancel_rx: watch::Receiver<bool>,
    progress_tx: watch::Sender<ProgressState>,
) -> Result<AnalysisOutcome, SentimentError> {
    let config = analyzer.config().clone();
    let started = Instant::now();
    let mut ticker = tokio::time::interval(config.progress_tick());
    ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

    // The analysis future is dropped at the end of this block, which aborts
    // any requests still in flight.
    let settled = {
        let analysis = analyzer.analyze_text(&text);
        tokio::pin!(analysis);

        loop {
            tokio::select! {
                biased;
                changed = cancel_rx.changed() => {
                    // A dropped session counts as a cancel.
                    if changed.is_err() || *cancel_rx.borrow() {
                        break None;
                    }
                }
                result = &mut analysis => break Some(result),
                _ = ticker.tick() => {
                    progress_tx.send_replace(ProgressState::Estimating(
                        estimator.at(started.elapsed()),
                    ));
                }
            }
        }
    };

    match settled {
        None => {
            info!("Analysis cancelled after {:?}", started.elapsed());
            progress_tx.send_replace(ProgressState::Cancelled);
            progress_tx.send_replace(ProgressState::Idle);
            Ok(AnalysisOutcome::Cancelled)
        }
        Some(Ok(result)) => {
            progress_tx.send_replace(ProgressState::Completed(AnalysisProgress::complete()));
            reset_after(progress_tx, config.completion_hold());
            Ok(AnalysisOutcome::Completed(result))
        }
        Some(Err(e)) => {
            warn!("Analysis failed: {}", e);
            progress_tx.send_replace(ProgressState::Errored);
            reset_after(progress_tx, config.completion_hold());
            Err(e)
        }
    }
}

/// Return progress to `Idle` once `hold` has passed.
fn reset_after(progress_tx: watch::Sender<ProgressState>, hold: Duration) {
    tokio::spawn(async move {
        tokio::time::sleep(hold).await;
        progress_tx.send_replace(ProgressState::Idle);
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::sentiment::test_support::{test_config, MockClassifier};

    fn analyzer(classifier: &Arc<MockClassifier>) -> Arc<SentimentAnalyzer> {
        Arc::new(SentimentAnalyzer::new(classifier.clone(), test_config()))
    }

    #[tokio::test(start_paused = true)]
    async fn test_completion_holds_then_idles() {
        let classifier = Arc::new(MockClassifier::new().with_delay(Duration::from_secs(1)));
        let session = analyzer(&classifier).start("I am glad");
        let progress = session.progress();

        let outcome = session.wait().await.unwrap();
        assert!(outcome.into_result().is_some());

        match &*progress.borrow() {
            ProgressState::Completed(p) => {
                assert_eq!(p.percentage, 100);
                assert_eq!(p.status_message, "Analysis complete");
            }
            other => panic!("expected Completed, got {:?}", other),
        }

        tokio::time::sleep(Duration::from_millis(400)).await;
        assert!(progress.borrow().is_idle());
    }

    #[tokio::test(start_paused = true)]
    async fn test_progress_advances_while_in_flight() {
        let classifier = Arc::new(MockClassifier::new().with_delay(Duration::from_secs(10)));
        let session = analyzer(&classifier).start("x".repeat(400));
        let progress = session.progress();

        tokio::time::sleep(Duration::from_millis(1600)).await;
        let snapshot = progress.borrow().progress().cloned().unwrap();
        // 3s estimate, 1.6s elapsed
        assert!(snapshot.percentage >= 50 && snapshot.percentage <= 95);
        assert!(snapshot.estimated_seconds_remaining <= 2);

        assert!(session.cancel());
        session.wait().await.unwrap();
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancel_clears_state() {
        let classifier = Arc::new(MockClassifier::new().with_delay(Duration::from_secs(30)));
        let session = analyzer(&classifier).start("Please take your time");
        let progress = session.progress();

        tokio::time::sleep(Duration::from_millis(100)).await;
        assert_eq!(classifier.calls(), 1);
        assert!(session.cancel());
        assert!(!session.cancel());

        let outcome = session.wait().await.unwrap();
        assert!(matches!(outcome, AnalysisOutcome::Cancelled));
        assert!(progress.borrow().is_idle());
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancel_after_completion_is_noop() {
        let classifier = Arc::new(MockClassifier::new());
        let session = analyzer(&classifier).start("done quickly");

        tokio::time::sleep(Duration::from_millis(50)).await;
        assert!(session.is_finished());
        assert!(!session.cancel());
        assert!(matches!(
            session.wait().await.unwrap(),
            AnalysisOutcome::Completed(_)
        ));
    }

    #[tokio::test(start_paused = true)]
    async fn test_empty_input_errors() {
        let classifier = Arc::new(MockClassifier::new());
        let session = analyzer(&classifier).start("  ");
        let progress = session.progress();

        let err = session.wait().await.unwrap_err();
        assert!(matches!(err, SentimentError::EmptyInput));
        assert_eq!(*progress.borrow(), ProgressState::Errored);
        assert_eq!(classifier.calls(), 0);
    }
}
