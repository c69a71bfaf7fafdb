//! Channel selection: which derived channel of a color image is analyzed

use super::{Plane, SampleRange};
use anyhow::anyhow;
use image::{DynamicImage, RgbImage};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Derived image channel to flatten and analyze
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Channel {
    #[default]
    Gray,
    Red,
    Green,
    Blue,
    Hue,
    Saturation,
    Value,
}

impl Channel {
    pub const ALL: [Channel; 7] = [
        Channel::Gray,
        Channel::Red,
        Channel::Green,
        Channel::Blue,
        Channel::Hue,
        Channel::Saturation,
        Channel::Value,
    ];

    /// Range the channel's 8-bit samples can take.
    ///
    /// Hue follows the 8-bit convention of halved degrees (0..=179).
    pub fn nominal_range(self) -> SampleRange {
        match self {
            Channel::Hue => SampleRange::new(0.0, 179.0),
            _ => SampleRange::new(0.0, 255.0),
        }
    }

    /// Flatten the selected channel of `img` into a plane
    pub fn extract(self, img: &DynamicImage) -> Plane {
        match self {
            Channel::Gray => {
                let luma = img.to_luma8();
                let (w, h) = luma.dimensions();
                Plane::from_fn(w, h, |x, y| f64::from(luma.get_pixel(x, y)[0]))
            }
            Channel::Red => rgb_component(&img.to_rgb8(), 0),
            Channel::Green => rgb_component(&img.to_rgb8(), 1),
            Channel::Blue => rgb_component(&img.to_rgb8(), 2),
            Channel::Hue => hsv_component(&img.to_rgb8(), 0),
            Channel::Saturation => hsv_component(&img.to_rgb8(), 1),
            Channel::Value => hsv_component(&img.to_rgb8(), 2),
        }
    }
}

fn rgb_component(rgb: &RgbImage, idx: usize) -> Plane {
    let (w, h) = rgb.dimensions();
    Plane::from_fn(w, h, |x, y| f64::from(rgb.get_pixel(x, y)[idx]))
}

fn hsv_component(rgb: &RgbImage, idx: usize) -> Plane {
    let (w, h) = rgb.dimensions();
    Plane::from_fn(w, h, |x, y| {
        let [r, g, b] = rgb.get_pixel(x, y).0;
        rgb_to_hsv8(r, g, b)[idx]
    })
}

/// 8-bit HSV: hue in 0..=179 (degrees / 2), saturation and value in 0..=255
pub(crate) fn rgb_to_hsv8(r: u8, g: u8, b: u8) -> [f64; 3] {
    let (r, g, b) = (f64::from(r), f64::from(g), f64::from(b));
    let v = r.max(g).max(b);
    let min = r.min(g).min(b);
    let delta = v - min;

    let s = if v == 0.0 { 0.0 } else { 255.0 * delta / v };

    let mut hue = if delta == 0.0 {
        0.0
    } else if v == r {
        60.0 * (g - b) / delta
    } else if v == g {
        120.0 + 60.0 * (b - r) / delta
    } else {
        240.0 + 60.0 * (r - g) / delta
    };
    if hue < 0.0 {
        hue += 360.0;
    }

    // 360 degrees would wrap to 180; keep it in range
    let h = (hue / 2.0).round() % 180.0;
    [h, s.round(), v]
}

impl FromStr for Channel {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "gray" | "grey" | "luma" => Ok(Channel::Gray),
            "red" | "r" => Ok(Channel::Red),
            "green" | "g" => Ok(Channel::Green),
            "blue" | "b" => Ok(Channel::Blue),
            "hue" | "h" => Ok(Channel::Hue),
            "saturation" | "sat" | "s" => Ok(Channel::Saturation),
            "value" | "val" | "v" => Ok(Channel::Value),
            _ => Err(anyhow!(
                "Unknown channel '{}'. Valid channels: gray, red, green, blue, hue, saturation, value",
                s
            )),
        }
    }
}

impl std::fmt::Display for Channel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Channel::Gray => write!(f, "gray"),
            Channel::Red => write!(f, "red"),
            Channel::Green => write!(f, "green"),
            Channel::Blue => write!(f, "blue"),
            Channel::Hue => write!(f, "hue"),
            Channel::Saturation => write!(f, "saturation"),
            Channel::Value => write!(f, "value"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{GrayImage, Luma, Rgb};

    fn solid_rgb(w: u32, h: u32, px: [u8; 3]) -> DynamicImage {
        DynamicImage::ImageRgb8(RgbImage::from_pixel(w, h, Rgb(px)))
    }

    #[test]
    fn test_gray_from_luma_is_exact() {
        let img = DynamicImage::ImageLuma8(GrayImage::from_pixel(3, 2, Luma([128])));
        let plane = Channel::Gray.extract(&img);
        assert_eq!(plane.dimensions(), (3, 2));
        assert!(plane.samples().iter().all(|&v| v == 128.0));
    }

    #[test]
    fn test_rgb_components() {
        let img = solid_rgb(2, 2, [10, 20, 30]);
        assert_eq!(Channel::Red.extract(&img).get(0, 0), 10.0);
        assert_eq!(Channel::Green.extract(&img).get(1, 1), 20.0);
        assert_eq!(Channel::Blue.extract(&img).get(1, 0), 30.0);
    }

    #[test]
    fn test_hsv_primaries() {
        assert_eq!(rgb_to_hsv8(255, 0, 0), [0.0, 255.0, 255.0]);
        assert_eq!(rgb_to_hsv8(0, 255, 0), [60.0, 255.0, 255.0]);
        assert_eq!(rgb_to_hsv8(0, 0, 255), [120.0, 255.0, 255.0]);
        assert_eq!(rgb_to_hsv8(0, 0, 0), [0.0, 0.0, 0.0]);
        assert_eq!(rgb_to_hsv8(128, 128, 128), [0.0, 0.0, 128.0]);
    }

    #[test]
    fn test_hue_stays_below_180() {
        // Magenta-ish red wraps near 360 degrees
        let [h, _, _] = rgb_to_hsv8(255, 0, 1);
        assert!(h < 180.0);
        assert!(Channel::Hue.nominal_range().max == 179.0);
    }

    #[test]
    fn test_channel_parsing() {
        assert_eq!("gray".parse::<Channel>().unwrap(), Channel::Gray);
        assert_eq!("SAT".parse::<Channel>().unwrap(), Channel::Saturation);
        assert!("alpha".parse::<Channel>().is_err());
        for ch in Channel::ALL {
            assert_eq!(ch.to_string().parse::<Channel>().unwrap(), ch);
        }
    }
}
