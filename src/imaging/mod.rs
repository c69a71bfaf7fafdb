//! Sample grids and the transforms applied before digit extraction
//!
//! Decoded images are reduced to a single-channel [`Plane`] of `f64` samples
//! by [`Channel::extract`]. Resize, remap and DCT all operate on planes so
//! that the frequency-domain sweep can resample transformed data too.

mod channel;
mod dct;
mod remap;
mod resize;

pub use channel::Channel;
pub use dct::dct2;
pub use remap::{remap_linear, SampleRange};
pub use resize::{resize_area, scaled_dimensions};

use serde::Serialize;

/// Row-major grid of samples
#[derive(Debug, Clone, PartialEq)]
pub struct Plane {
    width: u32,
    height: u32,
    data: Vec<f64>,
}

impl Plane {
    /// Build a plane from row-major data. Returns `None` if the length does not
    /// match `width * height`.
    pub fn from_vec(width: u32, height: u32, data: Vec<f64>) -> Option<Self> {
        if data.len() != width as usize * height as usize {
            return None;
        }
        Some(Self {
            width,
            height,
            data,
        })
    }

    /// Build a plane by evaluating `f(x, y)` at every pixel
    pub fn from_fn(width: u32, height: u32, mut f: impl FnMut(u32, u32) -> f64) -> Self {
        let mut data = Vec::with_capacity(width as usize * height as usize);
        for y in 0..height {
            for x in 0..width {
                data.push(f(x, y));
            }
        }
        Self {
            width,
            height,
            data,
        }
    }

    /// A plane where every sample has the same value
    pub fn filled(width: u32, height: u32, value: f64) -> Self {
        Self {
            width,
            height,
            data: vec![value; width as usize * height as usize],
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn get(&self, x: u32, y: u32) -> f64 {
        self.data[y as usize * self.width as usize + x as usize]
    }

    /// Flattened samples, row-major
    pub fn samples(&self) -> &[f64] {
        &self.data
    }

    pub fn row(&self, y: u32) -> &[f64] {
        let w = self.width as usize;
        let start = y as usize * w;
        &self.data[start..start + w]
    }

    /// Observed (min, max), `None` for an empty plane
    pub fn min_max(&self) -> Option<(f64, f64)> {
        let mut iter = self.data.iter().copied();
        let first = iter.next()?;
        Some(iter.fold((first, first), |(lo, hi), v| (lo.min(v), hi.max(v))))
    }

    /// Apply `f` to every sample
    pub fn map(&self, f: impl Fn(f64) -> f64) -> Self {
        Self {
            width: self.width,
            height: self.height,
            data: self.data.iter().map(|&v| f(v)).collect(),
        }
    }

    /// Summary statistics of the samples
    pub fn stats(&self) -> PixelStats {
        let count = self.data.len();
        let Some((min, max)) = self.min_max() else {
            return PixelStats::default();
        };
        let n = count as f64;
        let mean = self.data.iter().sum::<f64>() / n;
        let var = self.data.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / n;
        PixelStats {
            count,
            min,
            max,
            mean,
            stddev: var.sqrt(),
        }
    }
}

/// Population statistics of a plane
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct PixelStats {
    pub count: usize,
    pub min: f64,
    pub max: f64,
    pub mean: f64,
    pub stddev: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_vec_checks_length() {
        assert!(Plane::from_vec(2, 2, vec![1.0; 4]).is_some());
        assert!(Plane::from_vec(2, 2, vec![1.0; 3]).is_none());
    }

    #[test]
    fn test_from_fn_is_row_major() {
        let p = Plane::from_fn(3, 2, |x, y| f64::from(x + 10 * y));
        assert_eq!(p.samples(), &[0.0, 1.0, 2.0, 10.0, 11.0, 12.0]);
        assert_eq!(p.get(2, 1), 12.0);
        assert_eq!(p.row(1), &[10.0, 11.0, 12.0]);
    }

    #[test]
    fn test_stats() {
        let p = Plane::from_vec(4, 1, vec![2.0, 4.0, 4.0, 6.0]).unwrap();
        let s = p.stats();
        assert_eq!(s.count, 4);
        assert_eq!(s.min, 2.0);
        assert_eq!(s.max, 6.0);
        assert!((s.mean - 4.0).abs() < 1e-12);
        assert!((s.stddev - 2.0_f64.sqrt()).abs() < 1e-12);
    }

    #[test]
    fn test_empty_plane() {
        let p = Plane::filled(0, 0, 1.0);
        assert!(p.is_empty());
        assert_eq!(p.min_max(), None);
        assert_eq!(p.stats(), PixelStats::default());
    }
}
