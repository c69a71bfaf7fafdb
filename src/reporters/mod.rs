//! Output reporters for benstats results
//!
//! Supports two table formats:
//! - `csv` - One row per image x digit (the canonical schema, see [`CSV_HEADER`])
//! - `json` - Full per-image analyses plus the run summary
//!
//! and a terminal `text` rendering of the run summary, sweeps and the
//! reference distribution.

mod csv;
mod json;
pub mod text;

pub use self::csv::{write_sweep_csv, CsvSink, CSV_HEADER};
pub use self::json::{render_json, JsonSink};

use crate::error::BenfordResult;
use crate::models::{BatchSummary, ImageAnalysis};
use anyhow::anyhow;
use std::io::Write;
use std::path::Path;
use std::str::FromStr;

/// Supported table formats
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Csv,
    Json,
}

impl OutputFormat {
    /// Guess from the output file extension, falling back to CSV
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("json") => OutputFormat::Json,
            _ => OutputFormat::Csv,
        }
    }

    /// Open a sink of this format over `writer`
    pub fn sink<'w>(self, writer: Box<dyn Write + 'w>) -> Box<dyn ReportSink + 'w> {
        match self {
            OutputFormat::Csv => Box::new(CsvSink::new(writer)),
            OutputFormat::Json => Box::new(JsonSink::new(writer)),
        }
    }
}

impl FromStr for OutputFormat {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "csv" => Ok(OutputFormat::Csv),
            "json" => Ok(OutputFormat::Json),
            _ => Err(anyhow!("Unknown format '{}'. Valid formats: csv, json", s)),
        }
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputFormat::Csv => write!(f, "csv"),
            OutputFormat::Json => write!(f, "json"),
        }
    }
}

/// Destination for per-image results as the batch produces them
pub trait ReportSink {
    /// Append one analyzed image
    fn write_analysis(&mut self, analysis: &ImageAnalysis) -> BenfordResult<()>;

    /// Flush everything; called once after the batch is exhausted
    fn finish(self: Box<Self>, summary: &BatchSummary) -> BenfordResult<()>;
}
