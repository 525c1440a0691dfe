use std::path::Path;

use anyhow::{Context, Result};

use slidekit_core::AppConfig;

pub fn path(config_path: &Path) -> Result<()> {
    println!("{}", config_path.display());
    Ok(())
}

pub fn show(config: &AppConfig) -> Result<()> {
    print!("{}", config.to_toml_string()?);
    Ok(())
}

pub fn init(config_path: &Path) -> Result<()> {
    if config_path.exists() {
        println!("Config already exists at {}", config_path.display());
        return Ok(());
    }

    AppConfig::default()
        .save_to(config_path)
        .with_context(|| format!("Failed to write {}", config_path.display()))?;

    println!("Wrote default config to {}", config_path.display());
    Ok(())
}
