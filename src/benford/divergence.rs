//! Benford reference distribution and divergence scoring

use super::{ProbabilityVector, DIGIT_COUNT};
use serde::{Deserialize, Serialize};
use std::sync::OnceLock;

static REFERENCE: OnceLock<ProbabilityVector> = OnceLock::new();

/// Theoretical Benford distribution, `P(d) = log10(1 + 1/d)`, as fractions
pub fn benford_reference() -> ProbabilityVector {
    *REFERENCE.get_or_init(|| {
        let mut probs = [0.0; DIGIT_COUNT];
        for (i, p) in probs.iter_mut().enumerate() {
            let d = (i + 1) as f64;
            *p = (1.0 + 1.0 / d).log10();
        }
        ProbabilityVector(probs)
    })
}

/// Per-digit deviation of an observed distribution from a reference.
///
/// Differences are in percentage points, so `sum_squared` is on the same
/// scale as the `sum_diff2` column of the exported table.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Divergence {
    pub diff: [f64; DIGIT_COUNT],
    pub squared: [f64; DIGIT_COUNT],
    pub sum_squared: f64,
}

/// Elementwise difference, square, and sum of squares
pub fn divergence(observed: &ProbabilityVector, reference: &ProbabilityVector) -> Divergence {
    let observed = observed.percentages();
    let reference = reference.percentages();

    let mut diff = [0.0; DIGIT_COUNT];
    let mut squared = [0.0; DIGIT_COUNT];
    for i in 0..DIGIT_COUNT {
        diff[i] = observed[i] - reference[i];
        squared[i] = diff[i] * diff[i];
    }

    Divergence {
        diff,
        squared,
        sum_squared: squared.iter().sum(),
    }
}
