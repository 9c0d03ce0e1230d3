//! Locating and loading the javalint configuration.
//!
//! Lookup order, first hit wins:
//!
//! 1. `--config <file>`
//! 2. `javalint.toml`, then `.javalint.toml`, in the analyzed directory
//! 3. `config.toml` in `$JAVALINT_CONFIG_DIR`, or in `~/.javalint/`
//! 4. built-in defaults

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use javalint_core::Config;

/// Origin of the configuration in effect.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSource {
    /// Given on the command line.
    Explicit(PathBuf),
    /// Found next to the sources.
    Project(PathBuf),
    /// Found in the per-user directory.
    Global(PathBuf),
    /// Nothing found.
    Default,
}

impl ConfigSource {
    /// File backing this source, if any.
    #[must_use]
    pub fn path(&self) -> Option<&Path> {
        match self {
            Self::Explicit(p) | Self::Project(p) | Self::Global(p) => Some(p),
            Self::Default => None,
        }
    }

    /// Reads and parses the file, or returns defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load(&self) -> Result<Config> {
        let Some(path) = self.path() else {
            return Ok(Config::default());
        };
        if matches!(self, Self::Global(_)) {
            tracing::info!("Using user config: {}", path.display());
        }
        Config::from_file(path)
            .with_context(|| format!("Failed to load config: {}", path.display()))
    }
}

const PROJECT_FILES: &[&str] = &["javalint.toml", ".javalint.toml"];

const USER_FILE: &str = "config.toml";

/// Finds the configuration for `project_dir`.
#[must_use]
pub fn resolve(project_dir: &Path, explicit: Option<&Path>) -> ConfigSource {
    resolve_in(project_dir, explicit, user_config_dir())
}

fn resolve_in(
    project_dir: &Path,
    explicit: Option<&Path>,
    user_dir: Option<PathBuf>,
) -> ConfigSource {
    if let Some(p) = explicit {
        return ConfigSource::Explicit(p.to_path_buf());
    }

    if let Some(found) = PROJECT_FILES
        .iter()
        .map(|name| project_dir.join(name))
        .find(|candidate| candidate.is_file())
    {
        tracing::debug!("Found project config: {}", found.display());
        return ConfigSource::Project(found);
    }

    match user_dir.map(|dir| dir.join(USER_FILE)) {
        Some(candidate) if candidate.is_file() => {
            tracing::debug!("Found user config: {}", candidate.display());
            ConfigSource::Global(candidate)
        }
        _ => ConfigSource::Default,
    }
}

/// `$JAVALINT_CONFIG_DIR`, else `~/.javalint`.
#[must_use]
pub fn user_config_dir() -> Option<PathBuf> {
    std::env::var_os("JAVALINT_CONFIG_DIR")
        .map(PathBuf::from)
        .or_else(|| home::home_dir().map(|h| h.join(".javalint")))
}
