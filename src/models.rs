//! Core data models for benstats
//!
//! These models carry per-image results from the pipeline to the reporters.

use crate::benford::{benford_reference, DigitHistogram, Divergence, ProbabilityVector, DIGITS};
use crate::config::{round_to, AnalysisConfig, Channel, Domain};
use crate::error::BenfordError;
use serde::{Deserialize, Serialize, Serializer};
use std::path::{Path, PathBuf};

pub use crate::imaging::PixelStats;

/// Everything computed for one image
#[derive(Debug, Clone, Serialize)]
pub struct ImageAnalysis {
    #[serde(serialize_with = "serialize_path_lossy")]
    pub source_dir: PathBuf,
    pub file_name: String,
    /// Decoded dimensions
    pub width: u32,
    pub height: u32,
    /// Dimensions after resize
    pub analyzed_width: u32,
    pub analyzed_height: u32,
    pub config: AnalysisConfig,
    pub histogram: DigitHistogram,
    pub probabilities: ProbabilityVector,
    pub divergence: Divergence,
    /// Statistics of the analyzed plane (after resize/remap, before any DCT)
    pub pixel_stats: PixelStats,
}

impl ImageAnalysis {
    /// Whole-image divergence score (sum of squared percentage-point differences)
    pub fn score(&self) -> f64 {
        self.divergence.sum_squared
    }

    /// One record per digit, 1 through 9, unrounded
    pub fn records(&self) -> Vec<DivergenceRecord> {
        let reference = benford_reference().percentages();
        let observed = self.probabilities.percentages();
        let (min, max) = match self.config.target_range {
            Some(r) => (Some(r.min), Some(r.max)),
            None => (None, None),
        };

        DIGITS
            .iter()
            .enumerate()
            .map(|(i, &digit)| DivergenceRecord {
                dir: self.source_dir.to_string_lossy().into_owned(),
                file: self.file_name.clone(),
                width: self.width,
                height: self.height,
                analyzed_width: self.analyzed_width,
                analyzed_height: self.analyzed_height,
                scale: self.config.scale_factor,
                min,
                max,
                precision: self.config.precision,
                channel: self.config.channel,
                domain: self.config.domain,
                digit,
                count: self.histogram.counts[i],
                zeros: self.histogram.zeros,
                probability: observed[i],
                benford: reference[i],
                diff: self.divergence.diff[i],
                diff2: self.divergence.squared[i],
                sum_diff2: self.divergence.sum_squared,
            })
            .collect()
    }
}

/// One row of the exported table: a single digit of a single image.
///
/// Field order is the column order of the CSV contract.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DivergenceRecord {
    pub dir: String,
    pub file: String,
    pub width: u32,
    pub height: u32,
    pub analyzed_width: u32,
    pub analyzed_height: u32,
    pub scale: f64,
    pub min: Option<i64>,
    pub max: Option<i64>,
    pub precision: u32,
    pub channel: Channel,
    pub domain: Domain,
    pub digit: u8,
    pub count: u64,
    pub zeros: u64,
    /// Observed share of the digit, percent
    pub probability: f64,
    /// Benford share of the digit, percent
    pub benford: f64,
    /// Percentage points
    pub diff: f64,
    pub diff2: f64,
    pub sum_diff2: f64,
}

impl DivergenceRecord {
    /// Copy with every floating column rounded to the record's precision
    pub fn rounded(&self) -> Self {
        let p = self.precision;
        Self {
            probability: round_to(self.probability, p),
            benford: round_to(self.benford, p),
            diff: round_to(self.diff, p),
            diff2: round_to(self.diff2, p),
            sum_diff2: round_to(self.sum_diff2, p),
            ..self.clone()
        }
    }
}

/// Why an image was left out of the results
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SkipReason {
    Decode,
    EmptyHistogram,
    InvalidDigit,
    Io,
}

impl std::fmt::Display for SkipReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SkipReason::Decode => write!(f, "decode error"),
            SkipReason::EmptyHistogram => write!(f, "no countable samples"),
            SkipReason::InvalidDigit => write!(f, "invalid digit"),
            SkipReason::Io => write!(f, "io error"),
        }
    }
}

/// An image the batch could not analyze
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SkippedImage {
    #[serde(serialize_with = "serialize_path_lossy")]
    pub path: PathBuf,
    pub reason: SkipReason,
    pub message: String,
}

impl SkippedImage {
    pub fn from_error(path: PathBuf, err: &BenfordError) -> Self {
        let reason = match err {
            BenfordError::ImageDecode { .. } => SkipReason::Decode,
            BenfordError::EmptyHistogram => SkipReason::EmptyHistogram,
            BenfordError::InvalidDigit { .. } => SkipReason::InvalidDigit,
            _ => SkipReason::Io,
        };
        Self {
            path,
            reason,
            message: err.to_string(),
        }
    }
}

/// Counts reported at the end of a run
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BatchSummary {
    pub found: usize,
    pub analyzed: usize,
    pub skipped: Vec<SkippedImage>,
}

impl BatchSummary {
    pub fn new(found: usize) -> Self {
        Self {
            found,
            ..Default::default()
        }
    }

    /// Fold one batch outcome into the summary
    pub fn record(&mut self, outcome: &Result<ImageAnalysis, SkippedImage>) {
        match outcome {
            Ok(_) => self.analyzed += 1,
            Err(skipped) => self.skipped.push(skipped.clone()),
        }
    }

    /// Skipped counts grouped by reason, in first-seen order
    pub fn skipped_by_reason(&self) -> Vec<(SkipReason, usize)> {
        let mut groups: Vec<(SkipReason, usize)> = Vec::new();
        for s in &self.skipped {
            match groups.iter_mut().find(|(r, _)| *r == s.reason) {
                Some((_, n)) => *n += 1,
                None => groups.push((s.reason, 1)),
            }
        }
        groups
    }
}

/// Paths from the file system need not be UTF-8; reports replace invalid bytes
fn serialize_path_lossy<S: Serializer>(path: &Path, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&path.to_string_lossy())
}

/// Scores at one size of a downscale sweep
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScaleStep {
    pub width: u32,
    pub height: u32,
    /// Divergence of the intensities at this size; `None` if all were zero
    pub spatial_score: Option<f64>,
    /// Divergence of the DCT coefficients at this size
    pub frequency_score: Option<f64>,
}
