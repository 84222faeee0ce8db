//! Sentiment analysis command.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::Context;
use clap::Args;
use console::style;

use sentiscope::config::Config;
use sentiscope::models::AnalysisResult;
use sentiscope::services::sentiment::{
    AnalysisOutcome, AnalysisSession, ProgressState, SentimentAnalyzer,
};

use crate::cli::helpers::{one_line, read_input, read_messages};
use crate::cli::icons::{dim_arrow, success, warn};
use crate::cli::progress::AnalysisProgressBar;

#[derive(Args, Debug)]
pub struct AnalyzeArgs {
    /// Input file (reads stdin if no other input is given)
    #[arg(conflicts_with_all = ["text", "messages"])]
    pub file: Option<PathBuf>,

    /// Analyze this text directly
    #[arg(long, conflicts_with = "messages")]
    pub text: Option<String>,

    /// JSON chat transcript; only user messages are analyzed
    #[arg(long)]
    pub messages: Option<PathBuf>,

    /// Print the result as JSON
    #[arg(long)]
    pub json: bool,

    /// Also write the JSON result to this file
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Maximum characters per chunk
    #[arg(long)]
    pub max_chunk_chars: Option<usize>,

    /// Maximum concurrent model calls (0 = unbounded)
    #[arg(long)]
    pub concurrency: Option<usize>,

    /// Disable the progress bar
    #[arg(long)]
    pub no_progress: bool,
}

pub async fn cmd_analyze(config: &Config, args: AnalyzeArgs) -> anyhow::Result<()> {
    let mut sentiment = config.sentiment.clone();
    if let Some(n) = args.max_chunk_chars {
        sentiment.max_chunk_chars = n;
    }
    if let Some(n) = args.concurrency {
        sentiment.max_concurrency = n;
    }

    let text = match args.messages.as_deref() {
        Some(path) => read_messages(path).await?,
        None => read_input(args.file.as_deref(), args.text.clone()).await?,
    };
    let char_count = text.chars().count();

    let analyzer = Arc::new(
        SentimentAnalyzer::from_llm_config(config.llm.clone(), sentiment)
            .context("Failed to create model client")?,
    );
    let session = analyzer.start(text);

    let bar = (!args.no_progress && !args.json).then(AnalysisProgressBar::new);
    watch_session(&session, bar.as_ref()).await;
    if let Some(bar) = bar {
        bar.finish();
    }

    let result = match session.wait().await? {
        AnalysisOutcome::Completed(result) => result,
        AnalysisOutcome::Cancelled => {
            eprintln!("{} Analysis cancelled", warn());
            return Ok(());
        }
    };

    if let Some(ref path) = args.output {
        write_result(path, &result).await?;
    }

    if args.json {
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        print_result(&result, char_count);
        if let Some(ref path) = args.output {
            eprintln!("{} Result written to {}", dim_arrow(), path.display());
        }
    }
    Ok(())
}

/// Render progress until the session leaves `Estimating`; Ctrl-C cancels.
async fn watch_session(session: &AnalysisSession, bar: Option<&AnalysisProgressBar>) {
    let mut progress = session.progress();
    loop {
        tokio::select! {
            _ = tokio::signal::ctrl_c() => {
                if session.cancel() {
                    if let Some(bar) = bar {
                        bar.println(format!("{} Cancelling...", warn()));
                    }
                }
            }
            changed = progress.changed() => {
                if changed.is_err() {
                    return;
                }
                let state = progress.borrow_and_update().clone();
                if let Some(bar) = bar {
                    bar.render(&state);
                }
                if !matches!(state, ProgressState::Estimating(_)) {
                    return;
                }
            }
        }
    }
}

async fn write_result(path: &Path, result: &AnalysisResult) -> anyhow::Result<()> {
    let json = serde_json::to_string_pretty(result)?;
    tokio::fs::write(path, json)
        .await
        .with_context(|| format!("Failed to write {}", path.display()))
}

fn print_result(result: &AnalysisResult, char_count: usize) {
    println!(
        "{} Analyzed {} chars in {} chunk{}",
        success(),
        char_count,
        result.chunk_count,
        if result.chunk_count == 1 { "" } else { "s" }
    );

    println!("\n{}", style("Segments").bold());
    println!("{}", "-".repeat(60));
    for (i, segment) in result.segments.iter().enumerate() {
        let labels = segment.sentiments.join(", ");
        let labels = if segment.incomplete {
            style(labels).dim()
        } else {
            style(labels).cyan()
        };
        println!("{:>3}. [{}] {}", i + 1, labels, one_line(&segment.text, 70));
    }

    let counts = result.label_counts();
    if !counts.is_empty() {
        println!("\n{}", style("Labels").bold());
        println!("{}", "-".repeat(60));
        for (label, count) in counts {
            println!("  {:<16} {}", label, count);
        }
    }

    if result.is_degraded() {
        let failed: Vec<String> = result.failed_chunks.iter().map(|i| i.to_string()).collect();
        println!(
            "\n{} {} of {} chunks could not be analyzed (chunk {}); shown as neutral",
            warn(),
            result.failed_chunks.len(),
            result.chunk_count,
            failed.join(", ")
        );
    }
}
