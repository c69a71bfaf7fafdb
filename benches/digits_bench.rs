use criterion::{black_box, criterion_group, criterion_main, Criterion};

use benstats::benford::DigitHistogram;
use benstats::config::{AnalysisConfig, Domain};
use benstats::imaging::{dct2, resize_area, Plane};
use benstats::pipeline::preprocess;

fn make_plane(w: u32, h: u32) -> Plane {
    // deterministic texture covering the whole 0..255 range
    Plane::from_fn(w, h, |x, y| {
        let v = (x * 31 + y * 17 + (x * y) % 97) % 256;
        f64::from(v)
    })
}

fn bench_histogram(c: &mut Criterion) {
    let plane = make_plane(1024, 768);

    c.bench_function("histogram_spatial_1024x768", |b| {
        b.iter(|| {
            let h = DigitHistogram::from_samples(
                black_box(plane.samples()).iter().copied(),
                Domain::Spatial,
            );
            black_box(h.map(|h| h.total()).unwrap_or(0))
        })
    });
}

fn bench_dct(c: &mut Criterion) {
    let small = make_plane(64, 64);
    let medium = make_plane(256, 256);

    c.bench_function("dct2_64x64", |b| {
        b.iter(|| black_box(dct2(black_box(&small)).len()))
    });

    c.bench_function("dct2_256x256", |b| {
        b.iter(|| black_box(dct2(black_box(&medium)).len()))
    });
}

fn bench_preprocess(c: &mut Criterion) {
    let plane = make_plane(1024, 768);
    let config = AnalysisConfig {
        scale_factor: 0.25,
        ..Default::default()
    };

    c.bench_function("resize_area_1024x768_to_256x192", |b| {
        b.iter(|| black_box(resize_area(black_box(&plane), 256, 192).len()))
    });

    c.bench_function("preprocess_quarter", |b| {
        b.iter(|| black_box(preprocess(black_box(&plane), &config).len()))
    });
}

criterion_group!(digits, bench_histogram, bench_dct, bench_preprocess);
criterion_main!(digits);
