//! CLI command definitions and handlers

mod analyze;
mod sweep;

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// Parse and validate a floating precision (0-15)
fn parse_precision(s: &str) -> Result<u32, String> {
    let n: u32 = s
        .parse()
        .map_err(|_| format!("'{}' is not a valid number", s))?;
    if n > benstats::config::MAX_PRECISION {
        Err(format!(
            "precision cannot exceed {}",
            benstats::config::MAX_PRECISION
        ))
    } else {
        Ok(n)
    }
}

/// benstats - Benford Image Statistics
#[derive(Parser, Debug)]
#[command(name = "benstats")]
#[command(
    version,
    about = "Benford's Law statistics for image batches: leading-digit distributions of pixels and DCT coefficients",
    after_help = "\
Examples:
  benstats analyze --dir data --csv csv/batch_01.csv
  benstats analyze -d data -c csv/batch_01.csv --rsz 0.25 --min 0 --max 999 --fp 3
  benstats analyze -d data -c out.json --channel hue --domain frequency
  benstats sweep --image data/IMG_0026.jpeg --step 64
  benstats reference --fp 4"
)]
pub struct Cli {
    /// Log level (error, warn, info, debug, trace); RUST_LOG takes precedence
    #[arg(long, global = true, default_value = "warn", value_parser = ["error", "warn", "info", "debug", "trace"])]
    pub log_level: String,

    /// Suppress progress bars and the summary
    #[arg(long, short = 'q', global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Analyze every .jpg/.jpeg in a directory and write one row per image x digit
    #[command(after_help = "\
Options given on the command line override [defaults] in benstats.toml,
which override the built-in defaults.

Images that cannot be decoded, or have no non-zero samples, are skipped and
listed in the summary. The exit status is non-zero only for fatal errors
(missing directory, invalid configuration, unwritable output).")]
    Analyze(AnalyzeArgs),

    /// Score one image at a sequence of shrinking sizes (spatial and DCT)
    Sweep(SweepArgs),

    /// Print the Benford reference distribution in percent
    Reference {
        /// Decimal places
        #[arg(long = "fp", short = 'f', default_value = "3", value_parser = parse_precision)]
        precision: u32,
    },
}

#[derive(Args, Debug, Clone)]
pub struct AnalyzeArgs {
    /// Directory containing the images
    #[arg(long, short = 'd')]
    pub dir: PathBuf,

    /// File to store the results in
    #[arg(long, short = 'c')]
    pub csv: PathBuf,

    /// Resize factor, at most 16 (default 1 = no resize)
    #[arg(long, short = 'r')]
    pub rsz: Option<f64>,

    /// Minimum of the remapped intensity range (default 0)
    #[arg(long, short = 'm', allow_negative_numbers = true)]
    pub min: Option<i64>,

    /// Maximum of the remapped intensity range (default 255)
    #[arg(long, short = 'M', allow_negative_numbers = true)]
    pub max: Option<i64>,

    /// Floating precision of the written values (default 8)
    #[arg(long = "fp", short = 'f', value_parser = parse_precision)]
    pub precision: Option<u32>,

    /// Channel to analyze: gray, red, green, blue, hue, saturation, value
    #[arg(long, value_parser = ["gray", "red", "green", "blue", "hue", "saturation", "value"])]
    pub channel: Option<String>,

    /// Sample domain: spatial (intensities) or frequency (DCT coefficients)
    #[arg(long, value_parser = ["spatial", "frequency"])]
    pub domain: Option<String>,

    /// Stretch each image's observed min/max onto the target range
    #[arg(long)]
    pub stretch: bool,

    /// Output format: csv or json (default: from the output extension)
    #[arg(long, value_parser = ["csv", "json"])]
    pub format: Option<String>,

    /// Project config file (default: benstats.toml in the input directory)
    #[arg(long, env = "BENSTATS_CONFIG")]
    pub config: Option<PathBuf>,
}

#[derive(Args, Debug, Clone)]
pub struct SweepArgs {
    /// Image to sweep
    #[arg(long, short = 'i')]
    pub image: PathBuf,

    /// Pixels removed from each axis per step
    #[arg(long, short = 's', default_value = "64")]
    pub step: u32,

    /// Stop once the width drops below this
    #[arg(long, default_value_t = benstats::pipeline::DEFAULT_MIN_WIDTH)]
    pub min_width: u32,

    /// Channel to analyze
    #[arg(long, default_value = "gray", value_parser = ["gray", "red", "green", "blue", "hue", "saturation", "value"])]
    pub channel: String,

    /// Write the steps as CSV here instead of printing a table
    #[arg(long, short = 'o')]
    pub output: Option<PathBuf>,

    /// Floating precision of the CSV values
    #[arg(long = "fp", short = 'f', default_value = "8", value_parser = parse_precision)]
    pub precision: u32,
}

/// Run the CLI with parsed arguments
pub fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Analyze(args) => analyze::run(args, cli.quiet),
        Commands::Sweep(args) => sweep::run(args, cli.quiet),
        Commands::Reference { precision } => {
            print!(
                "{}",
                benstats::reporters::text::render_reference(precision)
            );
            Ok(())
        }
    }
}
