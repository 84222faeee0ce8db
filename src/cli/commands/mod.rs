//! CLI commands implementation.
//!
//! This module contains the CLI parser and dispatches to command-specific modules.

mod analyze;
mod check;
mod chunk;
mod config_cmd;
mod taxonomy;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use sentiscope::config::Config;

pub use analyze::AnalyzeArgs;

#[derive(Parser)]
#[command(name = "sentiscope")]
#[command(about = "Chunked sentiment analysis against a fixed emotion taxonomy")]
#[command(version)]
pub struct Cli {
    /// Config file path (overrides auto-discovery)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

/// Check if verbose mode is enabled (for early logging setup).
pub fn is_verbose() -> bool {
    std::env::args().any(|arg| arg == "-v" || arg == "--verbose")
}

#[derive(Subcommand)]
enum Commands {
    /// Analyze the sentiment of text from a file, --text, a chat transcript, or stdin
    Analyze(AnalyzeArgs),

    /// Show how input would be split into chunks (no model calls)
    Chunk {
        /// Input file (reads stdin if omitted)
        file: Option<PathBuf>,
        /// Maximum characters per chunk
        #[arg(long)]
        max_chunk_chars: Option<usize>,
    },

    /// List the sentiment labels
    Taxonomy,

    /// Check model service availability and list models
    Check,

    /// Print the effective configuration
    Config,
}

pub async fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = Config::load_with_override(cli.config.as_deref()).await?;

    match cli.command {
        Commands::Analyze(args) => analyze::cmd_analyze(&config, args).await,
        Commands::Chunk {
            file,
            max_chunk_chars,
        } => chunk::cmd_chunk(&config, file.as_deref(), max_chunk_chars).await,
        Commands::Taxonomy => taxonomy::cmd_taxonomy(),
        Commands::Check => check::cmd_check(&config).await,
        Commands::Config => config_cmd::cmd_config_show(&config),
    }
}
