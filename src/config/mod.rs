//! Analysis configuration
//!
//! This module handles:
//! - The immutable [`AnalysisConfig`] passed into every pipeline call
//! - Validation (all configuration errors are raised before any decoding)
//! - Project defaults from `benstats.toml`
//! - Layering CLI flags over file defaults over built-in defaults

mod project_config;

pub use project_config::{load_project_config, ConfigDefaults, ProjectConfig, CONFIG_FILE_NAME};

pub use crate::imaging::Channel;

use crate::error::{BenfordError, BenfordResult};
use crate::imaging::SampleRange;
use anyhow::anyhow;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Highest accepted output precision (decimal places)
pub const MAX_PRECISION: u32 = 15;

/// Default output precision, in decimal places
pub const DEFAULT_PRECISION: u32 = 8;

/// Largest accepted resize factor; upscaling beyond this only inflates memory
pub const MAX_SCALE_FACTOR: f64 = 16.0;

/// Which representation of the channel the digits are taken from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Domain {
    /// Raw (resized, remapped) intensities
    #[default]
    Spatial,
    /// Coefficients of the 2-D DCT of the channel
    Frequency,
}

impl FromStr for Domain {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "spatial" | "pixel" => Ok(Domain::Spatial),
            "frequency" | "dct" => Ok(Domain::Frequency),
            _ => Err(anyhow!(
                "Unknown domain '{}'. Valid domains: spatial, frequency",
                s
            )),
        }
    }
}

impl std::fmt::Display for Domain {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Domain::Spatial => write!(f, "spatial"),
            Domain::Frequency => write!(f, "frequency"),
        }
    }
}

/// Integer intensity range samples are remapped into before digit extraction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TargetRange {
    pub min: i64,
    pub max: i64,
}

impl TargetRange {
    pub fn new(min: i64, max: i64) -> Self {
        Self { min, max }
    }

    pub fn as_sample_range(&self) -> SampleRange {
        SampleRange::new(self.min as f64, self.max as f64)
    }
}

impl Default for TargetRange {
    fn default() -> Self {
        Self { min: 0, max: 255 }
    }
}

/// Preprocessing parameters for one analysis run.
///
/// Built once, validated once, then only read. No pipeline stage overrides a
/// field internally.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisConfig {
    /// Resize factor applied to both axes (1.0 = no resize)
    pub scale_factor: f64,
    /// Remap target; `None` analyzes the channel's values as decoded
    pub target_range: Option<TargetRange>,
    /// Decimal places for serialized floating columns
    pub precision: u32,
    pub channel: Channel,
    pub domain: Domain,
    /// Use the observed min/max as the remap source instead of the nominal range
    pub stretch: bool,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            scale_factor: 1.0,
            target_range: None,
            precision: DEFAULT_PRECISION,
            channel: Channel::Gray,
            domain: Domain::Spatial,
            stretch: false,
        }
    }
}

impl AnalysisConfig {
    /// Reject parameter combinations the pipeline cannot honor
    pub fn validate(&self) -> BenfordResult<()> {
        if !self.scale_factor.is_finite() || self.scale_factor <= 0.0 {
            return Err(BenfordError::config(format!(
                "scale factor must be a positive number, got {}",
                self.scale_factor
            )));
        }
        if self.scale_factor > MAX_SCALE_FACTOR {
            return Err(BenfordError::config(format!(
                "scale factor must be at most {}, got {}",
                MAX_SCALE_FACTOR, self.scale_factor
            )));
        }

        if let Some(range) = self.target_range {
            if range.min == range.max {
                return Err(BenfordError::config(format!(
                    "target range min ({}) equals max ({})",
                    range.min, range.max
                )));
            }
            if range.min > range.max {
                return Err(BenfordError::config(format!(
                    "target range min ({}) is greater than max ({})",
                    range.min, range.max
                )));
            }
            if range.min < 0 {
                return Err(BenfordError::config(format!(
                    "target range must be non-negative, got min {}",
                    range.min
                )));
            }
        }

        if self.precision > MAX_PRECISION {
            return Err(BenfordError::config(format!(
                "floating precision must be at most {}, got {}",
                MAX_PRECISION, self.precision
            )));
        }

        Ok(())
    }

    /// Build and validate in one step
    pub fn validated(self) -> BenfordResult<Self> {
        self.validate()?;
        Ok(self)
    }

    /// Layer explicit overrides over project defaults over built-in defaults.
    ///
    /// `default_range` is the remap range used when neither layer sets one;
    /// the CLI passes `Some(0..255)`, library callers usually `None`.
    pub fn resolve(
        overrides: &ConfigDefaults,
        project: &ProjectConfig,
        default_range: Option<TargetRange>,
    ) -> BenfordResult<Self> {
        let file = &project.defaults;
        let base = AnalysisConfig::default();

        let min = overrides.min.or(file.min);
        let max = overrides.max.or(file.max);
        let target_range = match (min, max, default_range) {
            (None, None, fallback) => fallback,
            (min, max, fallback) => {
                let fallback = fallback.unwrap_or_default();
                Some(TargetRange::new(
                    min.unwrap_or(fallback.min),
                    max.unwrap_or(fallback.max),
                ))
            }
        };

        AnalysisConfig {
            scale_factor: overrides.scale.or(file.scale).unwrap_or(base.scale_factor),
            target_range,
            precision: overrides.precision.or(file.precision).unwrap_or(base.precision),
            channel: overrides.channel.or(file.channel).unwrap_or(base.channel),
            domain: overrides.domain.or(file.domain).unwrap_or(base.domain),
            stretch: overrides.stretch.or(file.stretch).unwrap_or(base.stretch),
        }
        .validated()
    }
}

/// Round for serialization only; scores are compared unrounded
pub fn round_to(value: f64, precision: u32) -> f64 {
    let factor = 10f64.powi(precision as i32);
    let rounded = (value * factor).round() / factor;
    if rounded.is_finite() {
        rounded
    } else {
        value
    }
}
