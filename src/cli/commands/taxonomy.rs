//! Taxonomy listing.

use console::style;

use sentiscope::taxonomy::{FALLBACK_LABEL, SENTIMENTS};

pub fn cmd_taxonomy() -> anyhow::Result<()> {
    println!("\n{}", style("Sentiment Labels").bold());
    println!("{}", "-".repeat(40));
    for (i, label) in SENTIMENTS.iter().enumerate() {
        if *label == FALLBACK_LABEL {
            println!("{:>3}. {} {}", i + 1, label, style("(fallback)").dim());
        } else {
            println!("{:>3}. {}", i + 1, label);
        }
    }
    Ok(())
}
