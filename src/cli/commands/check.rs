//! Model service availability check.

use console::style;

use sentiscope::config::Config;
use sentiscope::llm::LlmClient;

use crate::cli::icons::{error, success, warn};

pub async fn cmd_check(config: &Config) -> anyhow::Result<()> {
    let llm = &config.llm;
    let client = LlmClient::new(llm.clone())?;

    println!("\n{}", style("LLM Configuration").bold());
    println!("{}", "-".repeat(40));
    println!("{:<20} {}", "Enabled:", if llm.enabled { "Yes" } else { "No" });
    println!("{:<20} {:?}", "Provider:", llm.provider);
    println!("{:<20} {}", "Endpoint:", llm.endpoint);
    println!(
        "{:<20} {}",
        "API Key:",
        if llm.api_key.as_deref().is_some_and(|k| !k.is_empty()) {
            "Set"
        } else {
            "Not set"
        }
    );
    println!("{:<20} {}", "Model:", llm.model);
    println!("{:<20} {}", "Max Tokens:", llm.max_tokens);
    println!("{:<20} {:.2}", "Temperature:", llm.temperature);

    if !client.is_available().await {
        println!(
            "\n{} Service not reachable at {}",
            warn(),
            llm.api_url("models")
        );
        return Ok(());
    }
    println!("\n{} Service reachable", success());

    println!("\n{}", style("Available Models").bold());
    println!("{}", "-".repeat(40));
    match client.list_models().await {
        Ok(models) if models.is_empty() => println!("  No models available"),
        Ok(models) => {
            for model in models {
                let marker = if model == llm.model {
                    style("*").green().to_string()
                } else {
                    " ".to_string()
                };
                println!("{} {}", marker, model);
            }
        }
        Err(e) => println!("{} Failed to list models: {}", error(), e),
    }
    Ok(())
}
