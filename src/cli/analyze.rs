//! Analyze command implementation
//!
//! 1. Resolve and validate the configuration   (fatal on error)
//! 2. List the images of the input directory
//! 3. Stream the lazy batch into the report sink, skipping failed images
//! 4. Print the summary

use super::AnalyzeArgs;
use benstats::config::{
    load_project_config, AnalysisConfig, Channel, ConfigDefaults, Domain, TargetRange,
};
use benstats::models::BatchSummary;
use benstats::pipeline::{analyze_batch, list_images};
use benstats::reporters::{text, OutputFormat};

use anyhow::{Context, Result};
use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use std::fs::File;
use std::io::BufWriter;
use std::time::Instant;

/// Run the analyze command
pub(super) fn run(args: AnalyzeArgs, quiet: bool) -> Result<()> {
    let start_time = Instant::now();

    if !args.dir.is_dir() {
        anyhow::bail!("Input directory does not exist: {}", args.dir.display());
    }

    // Phase 1: configuration (every error here is fatal)
    let project = load_project_config(&args.dir, args.config.as_deref())?;
    let overrides = ConfigDefaults {
        scale: args.rsz,
        min: args.min,
        max: args.max,
        precision: args.precision,
        channel: args.channel.as_deref().map(str::parse::<Channel>).transpose()?,
        domain: args.domain.as_deref().map(str::parse::<Domain>).transpose()?,
        stretch: args.stretch.then_some(true),
    };
    let config = AnalysisConfig::resolve(&overrides, &project, Some(TargetRange::default()))?;
    let format = match args.format.as_deref() {
        Some(f) => f.parse::<OutputFormat>()?,
        None => OutputFormat::from_path(&args.csv),
    };
    tracing::info!(
        "Config: scale {}, range {:?}, precision {}, channel {}, domain {}, stretch {}",
        config.scale_factor,
        config.target_range,
        config.precision,
        config.channel,
        config.domain,
        config.stretch
    );

    // Phase 2: discovery
    let files = list_images(&args.dir)
        .with_context(|| format!("Failed to list images in {}", args.dir.display()))?;
    tracing::info!("Found {} images in {}", files.len(), args.dir.display());

    // Phase 3: stream results
    if let Some(parent) = args.csv.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory {}", parent.display()))?;
    }
    let file = File::create(&args.csv)
        .with_context(|| format!("Failed to create output file {}", args.csv.display()))?;
    let mut sink = format.sink(Box::new(BufWriter::new(file)));

    let mut summary = BatchSummary::new(files.len());
    let bar = if quiet {
        ProgressBar::hidden()
    } else {
        let bar = ProgressBar::new(files.len() as u64);
        bar.set_style(create_bar_style());
        bar
    };

    for outcome in analyze_batch(files, &config)? {
        summary.record(&outcome);
        match &outcome {
            Ok(analysis) => {
                bar.set_message(analysis.file_name.clone());
                sink.write_analysis(analysis).with_context(|| {
                    format!("Failed to write results to {}", args.csv.display())
                })?;
            }
            Err(skipped) => {
                bar.set_message(format!("skipped {}", skipped.path.display()));
            }
        }
        bar.inc(1);
    }
    bar.finish_and_clear();

    sink.finish(&summary)
        .with_context(|| format!("Failed to write results to {}", args.csv.display()))?;

    // Phase 4: summary
    tracing::info!(
        "Analyzed {}/{} images ({} skipped) in {:.2}s",
        summary.analyzed,
        summary.found,
        summary.skipped.len(),
        start_time.elapsed().as_secs_f64()
    );
    if !quiet {
        print!("{}", text::render_summary(&summary, Some(&args.csv)));
        println!(
            "  {}",
            style(format!(
                "Done in {:.2}s",
                start_time.elapsed().as_secs_f64()
            ))
            .dim()
        );
    }

    Ok(())
}

/// Create bar progress style
fn create_bar_style() -> ProgressStyle {
    ProgressStyle::default_bar()
        .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} {msg}")
        .expect("valid template")
        .progress_chars("█▓▒░  ")
}
