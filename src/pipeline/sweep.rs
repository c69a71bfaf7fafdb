//! Iterative downscale sweep
//!
//! Scores one plane at a sequence of shrinking sizes, both on its intensities
//! and on its DCT coefficients, to show how the fit to Benford's Law changes
//! with resolution.

use super::score_plane;
use crate::config::Domain;
use crate::error::{BenfordError, BenfordResult};
use crate::imaging::{resize_area, Plane};
use crate::models::ScaleStep;

use tracing::{debug, warn};

/// Smallest width that is still scored
pub const DEFAULT_MIN_WIDTH: u32 = 8;

/// Score `plane`, shrink both axes by `step` pixels, repeat while the width is
/// at least `min_width`.
///
/// Stops early when the next step would collapse the height. A size whose
/// samples are all zero in one domain keeps its step with that score unset.
/// Deterministic: identical input and step sequence give identical output.
pub fn downscale_sweep(plane: &Plane, step: u32, min_width: u32) -> BenfordResult<Vec<ScaleStep>> {
    if step == 0 {
        return Err(BenfordError::config("sweep step must be at least 1 pixel"));
    }
    if min_width == 0 {
        return Err(BenfordError::config("sweep minimum width must be at least 1"));
    }

    let mut steps = Vec::new();
    let mut current = plane.clone();

    while current.width() >= min_width && current.height() > 0 {
        let (w, h) = current.dimensions();
        let spatial_score = step_score(&current, Domain::Spatial)?;
        let frequency_score = step_score(&current, Domain::Frequency)?;

        debug!(
            "sweep {}x{}: spatial {:?}, frequency {:?}",
            w, h, spatial_score, frequency_score
        );
        steps.push(ScaleStep {
            width: w,
            height: h,
            spatial_score,
            frequency_score,
        });

        if w <= step || h <= step {
            break;
        }
        current = resize_area(&current, w - step, h - step);
    }

    Ok(steps)
}

/// Divergence of one domain at the current size; `None` when nothing is countable
fn step_score(plane: &Plane, domain: Domain) -> BenfordResult<Option<f64>> {
    match score_plane(plane, domain) {
        Ok(score) => Ok(Some(score.divergence.sum_squared)),
        Err(BenfordError::EmptyHistogram) => {
            warn!(
                "sweep {}x{}: no non-zero {} samples, score left empty",
                plane.width(),
                plane.height(),
                domain
            );
            Ok(None)
        }
        Err(e) => Err(e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gradient(w: u32, h: u32) -> Plane {
        Plane::from_fn(w, h, |x, y| 1.0 + f64::from(x + y) * 254.0 / f64::from(w + h - 2))
    }

    #[test]
    fn test_steps_follow_sizes() {
        let steps = downscale_sweep(&gradient(64, 48), 16, DEFAULT_MIN_WIDTH).unwrap();
        let sizes: Vec<_> = steps.iter().map(|s| (s.width, s.height)).collect();
        assert_eq!(sizes, vec![(64, 48), (48, 32), (32, 16)]);
    }

    #[test]
    fn test_stops_below_min_width() {
        let steps = downscale_sweep(&gradient(40, 40), 8, DEFAULT_MIN_WIDTH).unwrap();
        let widths: Vec<_> = steps.iter().map(|s| s.width).collect();
        assert_eq!(widths, vec![40, 32, 24, 16, 8]);
        assert!(steps.iter().all(|s| s.width >= DEFAULT_MIN_WIDTH));
    }

    #[test]
    fn test_sweep_is_deterministic() {
        let plane = gradient(96, 96);
        let a = downscale_sweep(&plane, 20, DEFAULT_MIN_WIDTH).unwrap();
        let b = downscale_sweep(&plane, 20, DEFAULT_MIN_WIDTH).unwrap();
        assert_eq!(a, b);
        assert!(a
            .iter()
            .all(|s| s.frequency_score.is_some_and(f64::is_finite)
                && s.spatial_score.is_some_and(|v| v > 0.0)));
    }

    #[test]
    fn test_too_small_gives_no_steps() {
        let steps = downscale_sweep(&gradient(6, 6), 1, DEFAULT_MIN_WIDTH).unwrap();
        assert!(steps.is_empty());
    }

    #[test]
    fn test_zero_step_is_config_error() {
        assert!(matches!(
            downscale_sweep(&gradient(16, 16), 0, DEFAULT_MIN_WIDTH),
            Err(BenfordError::Configuration(_))
        ));
    }

    #[test]
    fn test_sparse_plane_keeps_every_step() {
        // every fourth column lit: averaging drives spatial samples below 0.5
        let sparse = Plane::from_fn(64, 64, |x, _| if x % 4 == 0 { 1.0 } else { 0.0 });
        let steps = downscale_sweep(&sparse, 16, DEFAULT_MIN_WIDTH).unwrap();
        let widths: Vec<_> = steps.iter().map(|s| s.width).collect();
        assert_eq!(widths, vec![64, 48, 32, 16]);
        assert!(steps[0].spatial_score.is_some());
        assert!(steps.iter().any(|s| s.spatial_score.is_none()));
        // the mean stays positive, so the DC term is always countable
        assert!(steps.iter().all(|s| s.frequency_score.is_some()));
    }

    #[test]
    fn test_black_plane_has_no_scores() {
        let steps = downscale_sweep(&Plane::filled(32, 32, 0.0), 8, DEFAULT_MIN_WIDTH).unwrap();
        assert_eq!(steps.len(), 4);
        assert!(steps
            .iter()
            .all(|s| s.spatial_score.is_none() && s.frequency_score.is_none()));
    }
}
