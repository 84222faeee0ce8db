//! Configuration display command.

use sentiscope::config::Config;

use crate::cli::icons::dim_arrow;

/// Print the effective configuration as TOML.
pub fn cmd_config_show(config: &Config) -> anyhow::Result<()> {
    match config.source_path {
        Some(ref path) => eprintln!("{} Loaded from {}", dim_arrow(), path.display()),
        None => eprintln!("{} No config file found; showing defaults", dim_arrow()),
    }
    print!("{}", config.to_redacted_toml()?);
    Ok(())
}
