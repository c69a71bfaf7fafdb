//! Terminal rendering: run summary, sweep table, reference distribution

use crate::benford::{benford_reference, DIGITS};
use crate::models::{BatchSummary, ScaleStep};
use console::style;
use std::fmt::Write;
use std::path::Path;

/// End-of-run summary: found, analyzed, skipped (grouped by reason)
pub fn render_summary(summary: &BatchSummary, output: Option<&Path>) -> String {
    let mut out = String::new();
    let _ = writeln!(out);
    let _ = writeln!(out, "{}", style("Benford Image Statistics").bold());
    let _ = writeln!(
        out,
        "  Images found:    {}",
        style(summary.found).cyan()
    );
    let _ = writeln!(
        out,
        "  Analyzed:        {}",
        style(summary.analyzed).green()
    );

    let skipped = summary.skipped.len();
    if skipped == 0 {
        let _ = writeln!(out, "  Skipped:         0");
    } else {
        let _ = writeln!(out, "  Skipped:         {}", style(skipped).yellow());
        for (reason, n) in summary.skipped_by_reason() {
            let _ = writeln!(out, "    {:<22} {}", format!("{}:", reason), n);
        }
        for s in summary.skipped.iter().take(10) {
            let _ = writeln!(
                out,
                "    {} {}",
                style("-").dim(),
                style(s.path.display()).dim()
            );
        }
        if skipped > 10 {
            let _ = writeln!(out, "    ... and {} more", skipped - 10);
        }
    }

    if let Some(path) = output {
        let _ = writeln!(out, "  Results:         {}", style(path.display()).cyan());
    }
    out
}

/// Sweep steps as an aligned table
pub fn render_sweep(steps: &[ScaleStep]) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "{}",
        style(format!(
            "{:>7} {:>7} {:>16} {:>16}",
            "WIDTH", "HEIGHT", "SPATIAL", "FREQUENCY"
        ))
        .dim()
    );
    for s in steps {
        let _ = writeln!(
            out,
            "{:>7} {:>7} {:>16} {:>16}",
            s.width,
            s.height,
            score_text(s.spatial_score),
            score_text(s.frequency_score)
        );
    }
    out
}

fn score_text(score: Option<f64>) -> String {
    match score {
        Some(v) => format!("{:.4}", v),
        None => "-".to_string(),
    }
}

/// The Benford distribution in percent, one digit per line
pub fn render_reference(precision: u32) -> String {
    let reference = benford_reference().percentages();
    let p = precision as usize;
    let mut out = String::new();
    let _ = writeln!(out, "{}", style("DIGIT  BENFORD %").dim());
    for (digit, pct) in DIGITS.iter().zip(reference.iter()) {
        let _ = writeln!(out, "{:>5}  {:.*}", digit, p, pct);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::BenfordError;
    use crate::models::SkippedImage;
    use std::path::PathBuf;

    fn plain(s: &str) -> String {
        console::strip_ansi_codes(s).into_owned()
    }

    #[test]
    fn test_summary_counts() {
        let mut summary = BatchSummary::new(3);
        summary.analyzed = 2;
        summary.skipped.push(SkippedImage::from_error(
            PathBuf::from("data/broken.jpg"),
            &BenfordError::EmptyHistogram,
        ));
        let out = plain(&render_summary(&summary, Some(Path::new("out.csv"))));
        assert!(out.contains("Images found:    3"));
        assert!(out.contains("Analyzed:        2"));
        assert!(out.contains("Skipped:         1"));
        assert!(out.contains("no countable samples:"));
        assert!(out.contains("data/broken.jpg"));
        assert!(out.contains("out.csv"));
    }

    #[test]
    fn test_reference_table() {
        let out = plain(&render_reference(3));
        let lines: Vec<_> = out.lines().collect();
        assert_eq!(lines.len(), 10);
        assert_eq!(lines[1], "    1  30.103");
        assert_eq!(lines[9], "    9  4.576");
    }

    #[test]
    fn test_sweep_table() {
        let steps = [
            ScaleStep {
                width: 512,
                height: 384,
                spatial_score: Some(1.5),
                frequency_score: Some(0.25),
            },
            ScaleStep {
                width: 448,
                height: 320,
                spatial_score: None,
                frequency_score: Some(3.0),
            },
        ];
        let out = plain(&render_sweep(&steps));
        assert!(out.lines().nth(1).unwrap().contains("512"));
        assert!(out.contains("0.2500"));
        let empty_row: Vec<_> = out.lines().nth(2).unwrap().split_whitespace().collect();
        assert_eq!(empty_row, ["448", "320", "-", "3.0000"]);
    }
}
