//! Project-level defaults
//!
//! Loaded from `benstats.toml` in the input directory, or from an explicit
//! path (`--config` / `BENSTATS_CONFIG`).
//!
//! ```toml
//! # benstats.toml
//! [defaults]
//! scale = 0.25
//! min = 0
//! max = 999
//! precision = 3
//! channel = "gray"      # gray, red, green, blue, hue, saturation, value
//! domain = "spatial"    # spatial, frequency
//! stretch = false
//! ```

use super::Domain;
use crate::error::{BenfordError, BenfordResult};
use crate::imaging::Channel;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::debug;

/// File name looked up in the input directory
pub const CONFIG_FILE_NAME: &str = "benstats.toml";

/// Parsed project configuration
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct ProjectConfig {
    #[serde(default)]
    pub defaults: ConfigDefaults,
}

/// Optional preprocessing values. Used both for the `[defaults]` table and for
/// flags given explicitly on the command line.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct ConfigDefaults {
    /// Resize factor
    #[serde(default)]
    pub scale: Option<f64>,

    /// Remap target minimum
    #[serde(default)]
    pub min: Option<i64>,

    /// Remap target maximum
    #[serde(default)]
    pub max: Option<i64>,

    /// Floating precision for serialized values
    #[serde(default)]
    pub precision: Option<u32>,

    #[serde(default)]
    pub channel: Option<Channel>,

    #[serde(default)]
    pub domain: Option<Domain>,

    /// Min-max contrast stretch before remapping
    #[serde(default)]
    pub stretch: Option<bool>,
}

/// Load project defaults.
///
/// An explicit path must exist. Without one, `benstats.toml` in `dir` is used
/// when present and built-in defaults otherwise. A file that fails to parse is
/// a configuration error.
pub fn load_project_config(dir: &Path, explicit: Option<&Path>) -> BenfordResult<ProjectConfig> {
    let path = match explicit {
        Some(p) => {
            if !p.is_file() {
                return Err(BenfordError::config(format!(
                    "config file not found: {}",
                    p.display()
                )));
            }
            p.to_path_buf()
        }
        None => {
            let candidate = dir.join(CONFIG_FILE_NAME);
            if !candidate.is_file() {
                debug!("No project config found, using defaults");
                return Ok(ProjectConfig::default());
            }
            candidate
        }
    };

    let content = std::fs::read_to_string(&path)?;
    let config: ProjectConfig = toml::from_str(&content).map_err(|e| {
        BenfordError::config(format!("failed to parse {}: {}", path.display(), e))
    })?;
    debug!("Loaded project config from {}", path.display());
    Ok(config)
}
