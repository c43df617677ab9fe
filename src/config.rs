//! Site configuration.
//!
//! Loads an optional `site.toml` from the source root. The file is sparse:
//! every field has a stock default and only overrides need to be written.
//!
//! ```toml
//! # All options are optional - defaults shown below
//!
//! layouts = "layouts"     # Template directory, relative to the source root
//!
//! [serve]
//! host = "127.0.0.1"      # Preview server bind address
//! port = 4000             # Preview server port
//! ```
//!
//! Unknown keys are rejected to catch typos early.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Invalid config {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields, default)]
pub struct SiteConfig {
    /// Template directory, relative to the source root.
    pub layouts: String,
    pub serve: ServeConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields, default)]
pub struct ServeConfig {
    pub host: String,
    pub port: u16,
}

impl Default for SiteConfig {
    fn default() -> Self {
        SiteConfig {
            layouts: "layouts".to_string(),
            serve: ServeConfig::default(),
        }
    }
}

impl Default for ServeConfig {
    fn default() -> Self {
        ServeConfig {
            host: "127.0.0.1".to_string(),
            port: 4000,
        }
    }
}

/// The config file name looked up in the source root.
pub const CONFIG_FILE: &str = "site.toml";

/// Load `site.toml` from the source root, falling back to stock defaults
/// when the file does not exist.
pub fn load_config(source_root: &Path) -> Result<SiteConfig, ConfigError> {
    let path = source_root.join(CONFIG_FILE);
    if !path.exists() {
        return Ok(SiteConfig::default());
    }
    let text = fs::read_to_string(&path)?;
    toml::from_str(&text).map_err(|source| ConfigError::Parse { path, source })
}
