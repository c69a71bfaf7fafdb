//! JSON reporter
//!
//! Outputs the run summary and every per-image analysis (histogram, pixel
//! statistics, unrounded divergence) as pretty-printed JSON.

use super::ReportSink;
use crate::error::BenfordResult;
use crate::models::{BatchSummary, ImageAnalysis};
use serde::Serialize;
use std::io::Write;

#[derive(Serialize)]
struct JsonReport<'a> {
    summary: &'a BatchSummary,
    images: &'a [ImageAnalysis],
}

/// Render a full report as JSON
pub fn render_json(summary: &BatchSummary, images: &[ImageAnalysis]) -> BenfordResult<String> {
    Ok(serde_json::to_string_pretty(&JsonReport { summary, images })?)
}

/// Buffers analyses and writes one JSON document on finish
pub struct JsonSink<W: Write> {
    writer: W,
    images: Vec<ImageAnalysis>,
}

impl<W: Write> JsonSink<W> {
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            images: Vec::new(),
        }
    }
}

impl<W: Write> ReportSink for JsonSink<W> {
    fn write_analysis(&mut self, analysis: &ImageAnalysis) -> BenfordResult<()> {
        self.images.push(analysis.clone());
        Ok(())
    }

    fn finish(mut self: Box<Self>, summary: &BatchSummary) -> BenfordResult<()> {
        let json = render_json(summary, &self.images)?;
        self.writer.write_all(json.as_bytes())?;
        self.writer.write_all(b"\n")?;
        self.writer.flush()?;
        Ok(())
    }
}
