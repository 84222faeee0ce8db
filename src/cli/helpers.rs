//! Shared helper functions for CLI commands.

use std::path::Path;

use anyhow::Context;
use tokio::io::AsyncReadExt;

use sentiscope::models::{extract_user_text, ChatMessage};

/// Read analysis input from `--text`, a file, or stdin, in that order.
pub async fn read_input(file: Option<&Path>, text: Option<String>) -> anyhow::Result<String> {
    if let Some(text) = text {
        return Ok(text);
    }
    if let Some(path) = file {
        return tokio::fs::read_to_string(path)
            .await
            .with_context(|| format!("Failed to read {}", path.display()));
    }

    let mut buf = String::new();
    tokio::io::stdin()
        .read_to_string(&mut buf)
        .await
        .context("Failed to read stdin")?;
    Ok(buf)
}

/// Load a chat transcript (JSON array of messages) and extract user text.
pub async fn read_messages(path: &Path) -> anyhow::Result<String> {
    let raw = tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("Failed to read {}", path.display()))?;
    let messages: Vec<ChatMessage> = serde_json::from_str(&raw)
        .with_context(|| format!("{} is not a JSON array of chat messages", path.display()))?;
    Ok(extract_user_text(&messages))
}

/// Single-line preview: newlines collapsed, cut to `max_chars`.
pub fn one_line(text: &str, max_chars: usize) -> String {
    let flat: String = text.split_whitespace().collect::<Vec<_>>().join(" ");
    sentiscope::models::preview(&flat, max_chars)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_one_line() {
        assert_eq!(one_line("a\n\nb   c", 10), "a b c");
        assert_eq!(one_line("abcdefghij", 4), "abcd...");
    }

    #[tokio::test]
    async fn test_text_flag_wins() {
        let input = read_input(Some(Path::new("/nonexistent")), Some("hi".into()))
            .await
            .unwrap();
        assert_eq!(input, "hi");
    }

    #[tokio::test]
    async fn test_read_messages() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"[{{"role":"assistant","content":"Hello"}},{{"role":"user","content":[{{"type":"text","text":"I feel great"}}]}}]"#
        )
        .unwrap();
        assert_eq!(read_messages(file.path()).await.unwrap(), "I feel great");
    }
}
