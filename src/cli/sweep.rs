//! Sweep command: one image, decreasing sizes

use super::SweepArgs;
use benstats::config::Channel;
use benstats::pipeline::{decode_image, downscale_sweep};
use benstats::reporters::{text, write_sweep_csv};

use anyhow::{Context, Result};
use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use std::fs::File;
use std::io::BufWriter;
use std::time::Duration;

/// Run the sweep command
pub(super) fn run(args: SweepArgs, quiet: bool) -> Result<()> {
    let channel: Channel = args.channel.parse()?;
    let img = decode_image(&args.image)?;
    let plane = channel.extract(&img);

    let spinner = if quiet {
        ProgressBar::hidden()
    } else {
        let s = ProgressBar::new_spinner();
        s.set_style(create_spinner_style());
        s.enable_steady_tick(Duration::from_millis(100));
        s
    };
    spinner.set_message(format!(
        "Sweeping {} ({}x{}, step {})...",
        args.image.display(),
        plane.width(),
        plane.height(),
        args.step
    ));

    let steps = downscale_sweep(&plane, args.step, args.min_width)?;
    spinner.finish_and_clear();
    tracing::info!("Sweep produced {} steps", steps.len());

    let label = args
        .image
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();

    match &args.output {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("Failed to create output file {}", path.display()))?;
            write_sweep_csv(BufWriter::new(file), &label, &steps, args.precision)
                .with_context(|| format!("Failed to write sweep to {}", path.display()))?;
            if !quiet {
                println!(
                    "{} {} steps written to {}",
                    style("✓").green(),
                    steps.len(),
                    style(path.display()).cyan()
                );
            }
        }
        None => print!("{}", text::render_sweep(&steps)),
    }

    Ok(())
}

/// Create spinner progress style
fn create_spinner_style() -> ProgressStyle {
    ProgressStyle::default_spinner()
        .tick_chars("⠁⠂⠄⡀⢀⠠⠐⠈ ")
        .template("{spinner:.green} {msg}")
        .expect("valid template")
}
