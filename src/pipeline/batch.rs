//! Lazy batch analysis over a list of image paths

use super::analyze_path;
use crate::config::AnalysisConfig;
use crate::error::{BenfordError, BenfordResult};
use crate::models::{ImageAnalysis, SkippedImage};

use std::path::PathBuf;
use tracing::{error, warn};

/// Result for one path: an analysis, or the reason it was skipped
pub type BatchOutcome = Result<ImageAnalysis, SkippedImage>;

/// Iterator over per-image outcomes, in the order the paths were supplied.
///
/// Finite and single-pass: once consumed, analyzing the same files again
/// requires supplying the path list again.
pub struct Batch<I> {
    paths: I,
    config: AnalysisConfig,
}

/// Validate `config` and return a lazy iterator over the images.
///
/// Configuration errors are returned here, before any file is opened.
pub fn analyze_batch<P>(paths: P, config: &AnalysisConfig) -> BenfordResult<Batch<P::IntoIter>>
where
    P: IntoIterator<Item = PathBuf>,
{
    config.validate()?;
    Ok(Batch {
        paths: paths.into_iter(),
        config: config.clone(),
    })
}

impl<I> Iterator for Batch<I>
where
    I: Iterator<Item = PathBuf>,
{
    type Item = BatchOutcome;

    fn next(&mut self) -> Option<Self::Item> {
        let path = self.paths.next()?;
        Some(analyze_path(&path, &self.config).map_err(|e| skip(path, &e)))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.paths.size_hint()
    }
}

fn skip(path: PathBuf, err: &BenfordError) -> SkippedImage {
    match err {
        // Zero samples are excluded before digit extraction, so reaching this
        // means a transform produced a non-finite or negative sample.
        BenfordError::InvalidDigit { .. } => {
            error!("Skipping {}: {}", path.display(), err);
        }
        _ => {
            warn!("Skipping {}: {}", path.display(), err);
        }
    }
    SkippedImage::from_error(path, err)
}
