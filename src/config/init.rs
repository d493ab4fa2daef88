use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use thiserror::Error;

use super::{get_config_path, CategoryConfig, Config};
use crate::taxonomy::{builtin_taxonomy, BUILTIN_TITLE};

const HEADER: &str = "\
# esg-score configuration
#
# Edit the questionnaire below to assess a different product line.
# Each category lists yes/no questions under its environmental, social and
# governance pillars. Question text must be unique across the file.
";

/// Why `init` could not write a starter config
#[derive(Debug, Error)]
pub enum InitError {
    /// The target exists and `--force` was not given
    #[error("Config already exists at {}. Use --force to overwrite.", .0.display())]
    AlreadyExists(PathBuf),
    #[error(transparent)]
    Io(#[from] anyhow::Error),
}

/// Starter config holding the built-in questionnaire
pub fn starter_config() -> Config {
    Config {
        title: Some(BUILTIN_TITLE.to_string()),
        questionnaire: Some(CategoryConfig::from_taxonomy(&builtin_taxonomy())),
    }
}

/// Render the starter config as commented YAML
pub fn render_starter_config() -> Result<String> {
    let yaml = serde_saphyr::to_string(&starter_config())
        .map_err(|e| anyhow::anyhow!("Failed to serialize config: {}", e))?;
    Ok(format!("{}\n{}", HEADER, yaml))
}

/// Write the starter config to `path` (default: ~/.config/esg-score/config.yaml).
///
/// Refuses to replace an existing file unless `force` is set.
/// Returns the path that was written.
pub fn write_starter_config(path: Option<PathBuf>, force: bool) -> Result<PathBuf, InitError> {
    let config_path = match path {
        Some(path) => path,
        None => get_config_path()?,
    };

    if config_path.exists() && !force {
        return Err(InitError::AlreadyExists(config_path));
    }

    write_file(&config_path, &render_starter_config()?)?;
    tracing::debug!("Wrote starter config to {}", config_path.display());

    Ok(config_path)
}

fn write_file(path: &Path, contents: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory {}", parent.display()))?;
        }
    }

    std::fs::write(path, contents)
        .with_context(|| format!("Failed to write config to {}", path.display()))
}
