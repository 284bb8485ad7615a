//! Subcommand implementations.

pub mod ask;
pub mod config;
pub mod parse;
pub mod query;

use std::path::{Path, PathBuf};

use tracing::debug;

use invq_core::InvqConfig;

/// Per-user config file location.
pub fn default_config_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("invq")
        .join("config.json")
}

/// Config file named with `--config`, else the per-user one.
pub fn config_path(config_path: Option<&str>) -> PathBuf {
    config_path
        .map(PathBuf::from)
        .unwrap_or_else(default_config_path)
}

/// Load the config file given with `--config`.
///
/// Without `--config` the per-user file is used when it exists, and the
/// built-in defaults otherwise.
pub fn load_config(config_path: Option<&str>) -> anyhow::Result<InvqConfig> {
    let config = match config_path {
        Some(path) => InvqConfig::from_file(Path::new(path))?,
        None => {
            let path = default_config_path();
            if path.exists() {
                debug!("Using config file {}", path.display());
                InvqConfig::from_file(&path)?
            } else {
                InvqConfig::default()
            }
        }
    };
    Ok(config)
}

/// Dataset path from the command line, falling back to the config.
pub fn dataset_path(arg: Option<&PathBuf>, config: &InvqConfig) -> PathBuf {
    arg.cloned().unwrap_or_else(|| config.dataset.path.clone())
}
