//! Extractor configuration
//!
//! Settings come from a TOML file: an explicit path when the host gives one,
//! otherwise `<config dir>/docx-extract/config.toml` if it exists, otherwise
//! the built-in defaults.

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const DEFAULT_WORKSPACE_PREFIX: &str = "docx-extract-";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractorConfig {
    /// Parent directory for transient workspaces (system temp dir when unset)
    pub workspace_root: Option<PathBuf>,
    /// Name prefix of every workspace directory
    pub workspace_prefix: String,
    /// Include `word/headerN.xml` text ahead of the body
    pub include_headers: bool,
    /// Include `word/footerN.xml` text after the body
    pub include_footers: bool,
}

impl Default for ExtractorConfig {
    fn default() -> Self {
        Self {
            workspace_root: None,
            workspace_prefix: DEFAULT_WORKSPACE_PREFIX.to_string(),
            include_headers: true,
            include_footers: true,
        }
    }
}

impl ExtractorConfig {
    /// Default location of the user configuration file
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("docx-extract").join("config.toml"))
    }

    /// Load configuration from `path`, or from the default location when `None`
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => {
                if !path.exists() {
                    bail!("Config file not found: {}", path.display());
                }
                Self::from_file(path)
            }
            None => match Self::default_path() {
                Some(path) if path.exists() => Self::from_file(&path),
                _ => Ok(Self::default()),
            },
        }
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        Self::from_toml(&contents)
            .with_context(|| format!("Invalid config file {}", path.display()))
    }

    pub fn from_toml(contents: &str) -> Result<Self> {
        let config: Self = toml::from_str(contents)?;
        if config.workspace_prefix.contains(std::path::is_separator) {
            bail!(
                "workspace_prefix must not contain path separators: {:?}",
                config.workspace_prefix
            );
        }
        Ok(config)
    }
}
