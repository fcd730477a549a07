//! Project scaffolding

use anyhow::{bail, Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

use crate::config::{StepConfig, CONFIG_FILE};

/// Write a default stepline.toml into `path`, creating the directory.
pub fn init_project(path: &Path, force: bool) -> Result<PathBuf> {
    fs::create_dir_all(path)
        .with_context(|| format!("Failed to create {}", path.display()))?;

    let config_path = path.join(CONFIG_FILE);
    if config_path.exists() && !force {
        bail!(
            "{} already exists. Pass --force to overwrite it.",
            config_path.display()
        );
    }

    let content = format!(
        "# Stepline configuration\n\n{}",
        StepConfig::default().to_toml()?
    );
    fs::write(&config_path, content)
        .with_context(|| format!("Failed to write {}", config_path.display()))?;

    tracing::info!("Created {}", config_path.display());
    Ok(config_path)
}
