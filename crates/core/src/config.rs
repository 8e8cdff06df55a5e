//! User configuration for the command-line tool.
//!
//! Settings come from `<config dir>/xwahook/config.toml`, overridden by
//! `XWAHOOK_*` environment variables.

use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::installation::Installation;

/// Directory under the platform config dir.
pub const CONFIG_DIR: &str = "xwahook";
/// Config file name inside [`CONFIG_DIR`].
pub const CONFIG_FILE: &str = "config.toml";
/// Prefix of environment overrides, e.g. `XWAHOOK_INSTALL_DIR`.
pub const ENV_PREFIX: &str = "XWAHOOK";

const DEFAULT_CONFIG: &str = r#"# Game installation root (the folder holding the hook DLLs and Missions/).
# install_dir = "C:/Games/X-Wing Alliance"

# Default log filter when RUST_LOG is unset.
log_level = "info"

# Also append logs to xwahook.log in this folder.
# log_dir = "logs"
"#;

/// Resolved application settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Game installation root, if known.
    pub install_dir: Option<PathBuf>,
    /// Fallback tracing filter directive.
    pub log_level: String,
    /// Directory for the log file; no file logging when unset.
    pub log_dir: Option<PathBuf>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            install_dir: None,
            log_level: "info".to_string(),
            log_dir: None,
        }
    }
}

impl AppConfig {
    /// Load from the default location plus environment overrides.
    pub fn load() -> Result<Self> {
        match config_path() {
            Some(path) => Self::load_from(&path),
            None => Self::load_sources(None),
        }
    }

    /// Load from `path` (which may be missing) plus environment overrides.
    pub fn load_from(path: &Path) -> Result<Self> {
        Self::load_sources(Some(path))
    }

    fn load_sources(path: Option<&Path>) -> Result<Self> {
        let mut builder = ::config::Config::builder();
        if let Some(path) = path {
            builder = builder.add_source(::config::File::from(path).required(false));
        }
        let settings = builder
            .add_source(::config::Environment::with_prefix(ENV_PREFIX))
            .build()
            .context("failed to read configuration")?;
        settings
            .try_deserialize()
            .context("invalid configuration")
    }

    /// Installation described by `install_dir`.
    pub fn installation(&self) -> Option<Installation> {
        self.install_dir.as_ref().map(Installation::new)
    }
}

/// Location of the user config file, when the platform has a config dir.
pub fn config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join(CONFIG_DIR).join(CONFIG_FILE))
}

/// Create the default config file if it does not exist yet.
pub fn ensure_default_config() -> Result<()> {
    match config_path() {
        Some(path) => ensure_config_at(&path),
        None => Ok(()),
    }
}

/// Write the default config template to `path` unless a file is already there.
pub fn ensure_config_at(path: &Path) -> Result<()> {
    if path.exists() {
        return Ok(());
    }
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("failed to create {}", parent.display()))?;
    }
    fs::write(path, DEFAULT_CONFIG)
        .with_context(|| format!("failed to write {}", path.display()))?;
    info!(path = %path.display(), "Created default config");
    Ok(())
}
