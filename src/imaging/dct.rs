//! Orthonormal 2-D DCT-II

use super::Plane;
use rustdct::{Dct2, DctPlanner, RequiredScratch};

/// Orthonormal type-II discrete cosine transform of a plane.
///
/// Separable: every row is transformed, then every column, each with a
/// planned `rustdct` kernel. Coefficient `(0, 0)` is the DC term,
/// `mean * sqrt(width * height)`.
pub fn dct2(plane: &Plane) -> Plane {
    let (w, h) = (plane.width() as usize, plane.height() as usize);
    if w == 0 || h == 0 {
        return plane.clone();
    }

    let mut planner = DctPlanner::<f64>::new();
    let row_dct = planner.plan_dct2(w);
    let col_dct = planner.plan_dct2(h);
    let (row_dc, row_ac) = orthonormal_scale(w);
    let (col_dc, col_ac) = orthonormal_scale(h);

    let mut data = plane.samples().to_vec();
    let mut row_scratch = vec![0.0; row_dct.get_scratch_len()];
    let mut col_scratch = vec![0.0; col_dct.get_scratch_len()];

    for row in data.chunks_exact_mut(w) {
        row_dct.process_dct2_with_scratch(row, &mut row_scratch);
        row[0] *= row_dc;
        row[1..].iter_mut().for_each(|c| *c *= row_ac);
    }

    let mut column = vec![0.0; h];
    for x in 0..w {
        for (y, c) in column.iter_mut().enumerate() {
            *c = data[y * w + x];
        }
        col_dct.process_dct2_with_scratch(&mut column, &mut col_scratch);
        for (k, c) in column.iter().enumerate() {
            let alpha = if k == 0 { col_dc } else { col_ac };
            data[k * w + x] = c * alpha;
        }
    }

    Plane::from_vec(plane.width(), plane.height(), data)
        .unwrap_or_else(|| Plane::filled(plane.width(), plane.height(), 0.0))
}

/// `rustdct` is unnormalized; these factors make the basis orthonormal
fn orthonormal_scale(n: usize) -> (f64, f64) {
    let nf = n as f64;
    ((1.0 / nf).sqrt(), (2.0 / nf).sqrt())
}
