//! Area-averaging resample

use super::Plane;

/// Target size for a uniform scale factor: `round(w * s) x round(h * s)`,
/// never collapsing a non-empty axis below one pixel.
pub fn scaled_dimensions(width: u32, height: u32, scale: f64) -> (u32, u32) {
    let axis = |n: u32| -> u32 {
        if n == 0 {
            return 0;
        }
        let scaled = (f64::from(n) * scale).round();
        if scaled < 1.0 {
            1
        } else if scaled > f64::from(u32::MAX) {
            u32::MAX
        } else {
            scaled as u32
        }
    };
    (axis(width), axis(height))
}

/// Resample `plane` to `new_width x new_height`.
///
/// Each output sample is the overlap-weighted mean of the source pixels its
/// footprint covers. Applied separably: rows first, then columns.
pub fn resize_area(plane: &Plane, new_width: u32, new_height: u32) -> Plane {
    let (w, h) = plane.dimensions();
    if (w, h) == (new_width, new_height) {
        return plane.clone();
    }
    if w == 0 || h == 0 || new_width == 0 || new_height == 0 {
        return Plane::filled(new_width, new_height, 0.0);
    }

    let col_weights = area_weights(w as usize, new_width as usize);
    let row_weights = area_weights(h as usize, new_height as usize);

    // Horizontal pass: h rows x new_width
    let nw = new_width as usize;
    let mut horizontal = vec![0.0; h as usize * nw];
    for y in 0..h {
        let src = plane.row(y);
        let dst = &mut horizontal[y as usize * nw..(y as usize + 1) * nw];
        for (out, taps) in dst.iter_mut().zip(&col_weights) {
            *out = taps.iter().map(|&(j, wt)| src[j] * wt).sum();
        }
    }

    // Vertical pass
    let mut data = vec![0.0; nw * new_height as usize];
    for (oy, taps) in row_weights.iter().enumerate() {
        let dst = &mut data[oy * nw..(oy + 1) * nw];
        for &(sy, wt) in taps {
            let src = &horizontal[sy * nw..(sy + 1) * nw];
            for (d, s) in dst.iter_mut().zip(src) {
                *d += s * wt;
            }
        }
    }

    Plane::from_vec(new_width, new_height, data)
        .unwrap_or_else(|| Plane::filled(new_width, new_height, 0.0))
}

/// For each output index, the (source index, weight) taps; weights sum to 1
fn area_weights(n_in: usize, n_out: usize) -> Vec<Vec<(usize, f64)>> {
    let ratio = n_in as f64 / n_out as f64;
    (0..n_out)
        .map(|i| {
            let start = i as f64 * ratio;
            let end = ((i + 1) as f64 * ratio).min(n_in as f64);
            let first = start.floor() as usize;
            let last = (end.ceil() as usize).min(n_in);
            let mut taps = Vec::with_capacity(last.saturating_sub(first));
            for j in first..last {
                let overlap = (end.min((j + 1) as f64) - start.max(j as f64)).max(0.0);
                if overlap > 0.0 {
                    taps.push((j, overlap / (end - start)));
                }
            }
            taps
        })
        .collect()
}
