//! Heuristic progress for an in-flight analysis.
//!
//! The estimate is derived from input length alone; it says nothing about
//! what the model is actually doing.

use std::time::Duration;

use serde::Serialize;

/// Characters assumed to be processed per second.
const CHARS_PER_SECOND: u64 = 200;
/// Shortest estimate ever reported.
const MIN_ESTIMATE_SECS: u64 = 3;
/// Ceiling while the request is still outstanding.
const MAX_IN_FLIGHT_PERCENT: u8 = 95;

pub const COMPLETE_MESSAGE: &str = "Analysis complete";

/// One progress snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AnalysisProgress {
    pub percentage: u8,
    pub estimated_seconds_remaining: u64,
    pub status_message: String,
}

impl AnalysisProgress {
    pub fn complete() -> Self {
        Self {
            percentage: 100,
            estimated_seconds_remaining: 0,
            status_message: COMPLETE_MESSAGE.to_string(),
        }
    }
}

/// Observable state of an analysis session.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ProgressState {
    #[default]
    Idle,
    Estimating(AnalysisProgress),
    /// Shown briefly before returning to `Idle`.
    Completed(AnalysisProgress),
    Cancelled,
    Errored,
}

impl ProgressState {
    pub fn is_idle(&self) -> bool {
        matches!(self, Self::Idle)
    }

    /// The snapshot to display, if any.
    pub fn progress(&self) -> Option<&AnalysisProgress> {
        match self {
            Self::Estimating(p) | Self::Completed(p) => Some(p),
            _ => None,
        }
    }
}

/// Status line for a given percentage.
pub fn status_message(percentage: u8) -> &'static str {
    match percentage {
        90.. => "Finalizing analysis...",
        70.. => "Assembling results...",
        50.. => "Classifying sentiments...",
        30.. => "Detecting emotional tone...",
        10.. => "Splitting text into segments...",
        _ => "Preparing text for analysis...",
    }
}

/// Maps elapsed time to a progress snapshot for one input.
#[derive(Debug, Clone, Copy)]
pub struct ProgressEstimator {
    total_secs: u64,
}

impl ProgressEstimator {
    pub fn new(char_count: usize) -> Self {
        let chars = char_count as u64;
        let total_secs = chars.div_ceil(CHARS_PER_SECOND).max(MIN_ESTIMATE_SECS);
        Self { total_secs }
    }

    /// Estimate for the full, unchunked input.
    pub fn for_text(text: &str) -> Self {
        Self::new(text.chars().count())
    }

    pub fn estimated_total_seconds(&self) -> u64 {
        self.total_secs
    }

    pub fn at(&self, elapsed: Duration) -> AnalysisProgress {
        let total = self.total_secs as f64;
        let elapsed = elapsed.as_secs_f64();

        let raw = (100.0 * elapsed / total).round();
        let percentage = raw.min(MAX_IN_FLIGHT_PERCENT as f64) as u8;
        let remaining = (total - elapsed).ceil().max(0.0) as u64;

        AnalysisProgress {
            percentage,
            estimated_seconds_remaining: remaining,
            status_message: status_message(percentage).to_string(),
        }
    }
}
