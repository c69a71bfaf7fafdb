//! Linear intensity remapping

use super::Plane;
use serde::{Deserialize, Serialize};

/// Closed numeric interval of sample values
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SampleRange {
    pub min: f64,
    pub max: f64,
}

impl SampleRange {
    pub fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    pub fn span(&self) -> f64 {
        self.max - self.min
    }
}

/// Map `from` linearly onto `to`.
///
/// A degenerate source interval collapses every sample to `to.min`.
pub fn remap_linear(plane: &Plane, from: SampleRange, to: SampleRange) -> Plane {
    let span = from.span();
    if span == 0.0 {
        return plane.map(|_| to.min);
    }
    let gain = to.span() / span;
    plane.map(|v| (v - from.min) * gain + to.min)
}
