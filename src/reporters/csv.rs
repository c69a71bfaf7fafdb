//! CSV reporter
//!
//! Writes the canonical table: one row per image x digit, floating columns
//! rounded to the configured precision. The header is always written, even
//! when every image was skipped.

use super::ReportSink;
use crate::config::round_to;
use crate::error::BenfordResult;
use crate::models::{BatchSummary, ImageAnalysis, ScaleStep};
use std::io::Write;

/// Column order of the exported table
pub const CSV_HEADER: [&str; 20] = [
    "dir",
    "file",
    "width",
    "height",
    "analyzed_width",
    "analyzed_height",
    "scale",
    "min",
    "max",
    "precision",
    "channel",
    "domain",
    "digit",
    "count",
    "zeros",
    "probability",
    "benford",
    "diff",
    "diff2",
    "sum_diff2",
];

const SWEEP_HEADER: [&str; 5] = ["file", "width", "height", "spatial_score", "frequency_score"];

/// Streams rows as images are analyzed
pub struct CsvSink<W: Write> {
    writer: ::csv::Writer<W>,
    header_written: bool,
}

impl<W: Write> CsvSink<W> {
    pub fn new(writer: W) -> Self {
        Self {
            writer: ::csv::WriterBuilder::new()
                .has_headers(false)
                .from_writer(writer),
            header_written: false,
        }
    }

    fn ensure_header(&mut self) -> BenfordResult<()> {
        if !self.header_written {
            self.writer.write_record(CSV_HEADER)?;
            self.header_written = true;
        }
        Ok(())
    }
}

impl<W: Write> ReportSink for CsvSink<W> {
    fn write_analysis(&mut self, analysis: &ImageAnalysis) -> BenfordResult<()> {
        self.ensure_header()?;
        for record in analysis.records() {
            self.writer.serialize(record.rounded())?;
        }
        Ok(())
    }

    fn finish(mut self: Box<Self>, _summary: &BatchSummary) -> BenfordResult<()> {
        self.ensure_header()?;
        self.writer.flush()?;
        Ok(())
    }
}

/// Write one row per sweep step
pub fn write_sweep_csv<W: Write>(
    writer: W,
    file: &str,
    steps: &[ScaleStep],
    precision: u32,
) -> BenfordResult<()> {
    let mut wtr = ::csv::Writer::from_writer(writer);
    wtr.write_record(SWEEP_HEADER)?;
    for step in steps {
        wtr.write_record([
            file.to_string(),
            step.width.to_string(),
            step.height.to_string(),
            score_cell(step.spatial_score, precision),
            score_cell(step.frequency_score, precision),
        ])?;
    }
    wtr.flush()?;
    Ok(())
}

/// Rounded score, or an empty cell when the size had nothing to count
fn score_cell(score: Option<f64>, precision: u32) -> String {
    score
        .map(|v| round_to(v, precision).to_string())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reporters::tests::test_analysis;

    fn render(analyses: &[ImageAnalysis]) -> String {
        let mut buf = Vec::new();
        {
            let mut sink: Box<dyn ReportSink + '_> = Box::new(CsvSink::new(&mut buf));
            for a in analyses {
                sink.write_analysis(a).unwrap();
            }
            sink.finish(&BatchSummary::new(analyses.len())).unwrap();
        }
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn test_header_and_rows() {
        let out = render(&[test_analysis("a.jpg"), test_analysis("b.jpg")]);
        let lines: Vec<_> = out.lines().collect();
        assert_eq!(lines.len(), 1 + 18);
        assert_eq!(lines[0], CSV_HEADER.join(","));
        assert!(lines[1].starts_with("data,a.jpg,20,10,10,5,0.5,0,255,3,gray,spatial,1,30,0,30.0,30.103,"));
        assert!(lines[10].starts_with("data,b.jpg,"));
    }

    #[test]
    fn test_header_without_rows() {
        let out = render(&[]);
        assert_eq!(out.trim_end(), CSV_HEADER.join(","));
    }

    #[test]
    fn test_values_are_rounded() {
        let out = render(&[test_analysis("a.jpg")]);
        let mut rdr = ::csv::Reader::from_reader(out.as_bytes());
        for row in rdr.records() {
            let row = row.unwrap();
            for col in ["probability", "benford", "diff", "diff2", "sum_diff2"] {
                let idx = CSV_HEADER.iter().position(|c| *c == col).unwrap();
                let value = &row[idx];
                let decimals = value.split('.').nth(1).map(str::len).unwrap_or(0);
                assert!(decimals <= 3, "{} = {} has too many decimals", col, value);
            }
        }
    }

    #[test]
    fn test_missing_range_leaves_columns_empty() {
        let mut analysis = test_analysis("raw.jpg");
        analysis.config.target_range = None;
        let out = render(&[analysis]);
        let row = out.lines().nth(1).unwrap();
        assert!(row.starts_with("data,raw.jpg,20,10,10,5,0.5,,,3,"));
    }

    #[test]
    fn test_sweep_csv() {
        let steps = [
            ScaleStep {
                width: 64,
                height: 64,
                spatial_score: Some(12.345678),
                frequency_score: Some(0.5),
            },
            ScaleStep {
                width: 32,
                height: 32,
                spatial_score: None,
                frequency_score: Some(2.25),
            },
        ];
        let mut buf = Vec::new();
        write_sweep_csv(&mut buf, "img.jpg", &steps, 2).unwrap();
        let out = String::from_utf8(buf).unwrap();
        let lines: Vec<_> = out.lines().collect();
        assert_eq!(lines[0], "file,width,height,spatial_score,frequency_score");
        assert_eq!(lines[1], "img.jpg,64,64,12.35,0.5");
        assert_eq!(lines[2], "img.jpg,32,32,,2.25");
    }
}
