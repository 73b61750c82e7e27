//! The `delf check-config` command.

use std::path::PathBuf;

use anyhow::Result;

use delf_providers::config::load_config_from;

pub fn execute(config_path: Option<PathBuf>) -> Result<()> {
    let config = load_config_from(config_path.as_deref())?;

    println!("provider:     {}", config.provider);
    println!("model:        {}", config.model());
    println!(
        "base_url:     {}",
        config.base_url.as_deref().unwrap_or("(default)")
    );
    println!("timeout_secs: {}", config.timeout_secs);
    println!("temperature:  {}", config.temperature);
    println!("api_key:      ***");
    Ok(())
}
