//! The scoring pipeline
//!
//! Orchestrates the per-image analysis:
//! 1. Decode and select a channel          (`decode_image`, [`Channel::extract`])
//! 2. Resize, stretch and remap            ([`preprocess`])
//! 3. Optional DCT, digits, histogram      ([`score_plane`])
//! 4. Divergence from the Benford reference
//!
//! Batches ([`analyze_batch`]) and downscale sweeps ([`downscale_sweep`]) are
//! built on the same steps.
//!
//! [`Channel::extract`]: crate::imaging::Channel::extract

mod batch;
mod files;
mod sweep;

pub use batch::{analyze_batch, Batch, BatchOutcome};
pub use files::{list_images, IGNORE_FILE_NAME, SUPPORTED_SUFFIXES};
pub use sweep::{downscale_sweep, DEFAULT_MIN_WIDTH};

use crate::benford::{benford_reference, divergence, DigitHistogram, Divergence, ProbabilityVector};
use crate::config::{AnalysisConfig, Domain};
use crate::error::{BenfordError, BenfordResult};
use crate::imaging::{dct2, remap_linear, resize_area, scaled_dimensions, Plane, SampleRange};
use crate::models::ImageAnalysis;

use image::{DynamicImage, ImageReader};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Histogram, probabilities and divergence of one plane
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlaneScore {
    pub histogram: DigitHistogram,
    pub probabilities: ProbabilityVector,
    pub divergence: Divergence,
}

/// Resize, then remap, according to `config`
pub fn preprocess(plane: &Plane, config: &AnalysisConfig) -> Plane {
    let (w, h) = plane.dimensions();
    let (nw, nh) = scaled_dimensions(w, h, config.scale_factor);
    let resized = if (nw, nh) == (w, h) {
        plane.clone()
    } else {
        resize_area(plane, nw, nh)
    };

    let Some(target) = config.target_range else {
        return resized;
    };

    let nominal = config.channel.nominal_range();
    let source = if config.stretch {
        match resized.min_max() {
            Some((lo, hi)) if hi > lo => SampleRange::new(lo, hi),
            _ => nominal,
        }
    } else {
        nominal
    };

    remap_linear(&resized, source, target.as_sample_range())
}

/// Digit statistics of a plane in the given domain
pub fn score_plane(plane: &Plane, domain: Domain) -> BenfordResult<PlaneScore> {
    let histogram = match domain {
        Domain::Spatial => DigitHistogram::from_samples(plane.samples().iter().copied(), domain)?,
        Domain::Frequency => {
            let coefficients = dct2(plane);
            DigitHistogram::from_samples(coefficients.samples().iter().copied(), domain)?
        }
    };
    let probabilities = histogram.to_probabilities()?;
    let divergence = divergence(&probabilities, &benford_reference());
    Ok(PlaneScore {
        histogram,
        probabilities,
        divergence,
    })
}

/// Analyze one decoded image.
///
/// `path` only supplies the identity columns (directory and file name).
pub fn analyze_image(
    img: &DynamicImage,
    path: &Path,
    config: &AnalysisConfig,
) -> BenfordResult<ImageAnalysis> {
    config.validate()?;

    let plane = config.channel.extract(img);
    let prepared = preprocess(&plane, config);
    let score = score_plane(&prepared, config.domain)?;

    let source_dir = path
        .parent()
        .map(Path::to_path_buf)
        .unwrap_or_else(PathBuf::new);
    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();

    debug!(
        "{}: {}x{} -> {}x{}, {} samples ({} zero), score {:.4}",
        file_name,
        plane.width(),
        plane.height(),
        prepared.width(),
        prepared.height(),
        score.histogram.total(),
        score.histogram.zeros,
        score.divergence.sum_squared
    );

    Ok(ImageAnalysis {
        source_dir,
        file_name,
        width: plane.width(),
        height: plane.height(),
        analyzed_width: prepared.width(),
        analyzed_height: prepared.height(),
        config: config.clone(),
        histogram: score.histogram,
        probabilities: score.probabilities,
        divergence: score.divergence,
        pixel_stats: prepared.stats(),
    })
}

/// Decode an image file, sniffing the format from its content
pub fn decode_image(path: &Path) -> BenfordResult<DynamicImage> {
    let decode_err = |source: image::ImageError| BenfordError::ImageDecode {
        path: path.to_path_buf(),
        source,
    };

    ImageReader::open(path)
        .and_then(|reader| reader.with_guessed_format())
        .map_err(|e| decode_err(image::ImageError::IoError(e)))?
        .decode()
        .map_err(decode_err)
}

/// Decode and analyze an image file
pub fn analyze_path(path: &Path, config: &AnalysisConfig) -> BenfordResult<ImageAnalysis> {
    let img = decode_image(path)?;
    analyze_image(&img, path, config)
}
