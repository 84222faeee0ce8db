//! Terminal rendering of analysis progress.

use indicatif::{ProgressBar, ProgressStyle};

use sentiscope::services::sentiment::ProgressState;

/// Progress bar driven by an analysis session's [`ProgressState`].
pub struct AnalysisProgressBar {
    bar: ProgressBar,
}

impl AnalysisProgressBar {
    pub fn new() -> Self {
        let bar = ProgressBar::new(100);
        bar.set_style(
            ProgressStyle::default_bar()
                .template("{spinner:.green} [{bar:30.cyan/blue}] {pos:>3}% {wide_msg}")
                .unwrap_or_else(|_| ProgressStyle::default_bar())
                .progress_chars("█▓░"),
        );
        bar.enable_steady_tick(std::time::Duration::from_millis(100));
        Self { bar }
    }

    pub fn render(&self, state: &ProgressState) {
        if let Some(progress) = state.progress() {
            self.bar.set_position(u64::from(progress.percentage));
            self.bar.set_message(render_message(
                &progress.status_message,
                progress.estimated_seconds_remaining,
                progress.percentage,
            ));
        }
    }

    /// Print a line above the bar without tearing it.
    pub fn println(&self, message: impl AsRef<str>) {
        self.bar.println(message.as_ref());
    }

    pub fn finish(self) {
        self.bar.finish_and_clear();
    }
}

fn render_message(status: &str, remaining_secs: u64, percentage: u8) -> String {
    if percentage >= 100 || remaining_secs == 0 {
        status.to_string()
    } else {
        format!("{} (~{}s left)", status, remaining_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_message() {
        assert_eq!(
            render_message("Classifying sentiments...", 4, 55),
            "Classifying sentiments... (~4s left)"
        );
        assert_eq!(render_message("Analysis complete", 0, 100), "Analysis complete");
        assert_eq!(render_message("Finalizing analysis...", 0, 95), "Finalizing analysis...");
    }
}
