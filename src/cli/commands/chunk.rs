//! Chunk plan preview.

use std::path::Path;

use console::style;

use sentiscope::config::Config;
use sentiscope::services::sentiment::chunk_text;

use crate::cli::helpers::{one_line, read_input};

pub async fn cmd_chunk(
    config: &Config,
    file: Option<&Path>,
    max_chunk_chars: Option<usize>,
) -> anyhow::Result<()> {
    let max = max_chunk_chars.unwrap_or(config.sentiment.max_chunk_chars);
    let text = read_input(file, None).await?;
    let chunks = chunk_text(&text, max);

    println!(
        "\n{} ({} chars, max {} per chunk)",
        style(format!("{} chunks", chunks.len())).bold(),
        text.chars().count(),
        max
    );
    println!("{}", "-".repeat(60));
    for chunk in &chunks {
        let len = chunk.char_len();
        let len = if len > max {
            style(format!("{:>6}", len)).yellow()
        } else {
            style(format!("{:>6}", len))
        };
        println!("{:>4} {} {}", chunk.index, len, style(one_line(&chunk.text, 50)).dim());
    }
    Ok(())
}
