//! Benchmarks for the CPU-side measurement hot paths: the silhouette
//! boundary scan and the full-frame nearest-pixel comparison.

#![allow(clippy::unwrap_used)]
#![allow(missing_docs)]

use caliper::measure::{calibrate, pick_nearest, scan_margins, ScaleFactor};
use caliper::DepthBuffer;
use criterion::{black_box, criterion_group, criterion_main, Criterion};

const SIZE: u32 = 800;
const DISK_RADIUS: f32 = 120.0;

/// `SIZE` x `SIZE` background with a centered foreground disk at the given
/// device depth.
fn disk_buffer(depth: f32) -> DepthBuffer {
    let center = (SIZE as f32 - 1.0) / 2.0;
    let samples = (0..SIZE * SIZE)
        .map(|i| {
            let col = (i % SIZE) as f32;
            let row = (i / SIZE) as f32;
            let d = ((col - center).powi(2) + (row - center).powi(2)).sqrt();
            if d < DISK_RADIUS {
                depth
            } else {
                1.0
            }
        })
        .collect();
    DepthBuffer::from_device_samples(SIZE, SIZE, samples).unwrap()
}

fn scan_benchmark(c: &mut Criterion) {
    let buffer = disk_buffer(0.5);

    let _ = c.bench_function("scan_margins_800", |b| {
        b.iter(|| scan_margins(black_box(&buffer)).unwrap())
    });

    let _ = c.bench_function("calibrate_800", |b| {
        b.iter(|| calibrate(black_box(&buffer), black_box(6.7)).unwrap())
    });
}

fn pick_benchmark(c: &mut Criterion) {
    let baseline = disk_buffer(0.5);
    // One pixel protrudes toward the camera near the disk center.
    let mut samples: Vec<f32> = baseline
        .samples()
        .iter()
        .map(|&s| (s + 100.0) / 200.0)
        .collect();
    let bump = (SIZE / 2 * SIZE + SIZE / 2 + 20) as usize;
    samples[bump] = 0.35;
    let probe =
        DepthBuffer::from_device_samples(SIZE, SIZE, samples).unwrap();
    let scale = ScaleFactor::new(DISK_RADIUS / 6.7).unwrap();

    let _ = c.bench_function("pick_nearest_800", |b| {
        b.iter(|| {
            pick_nearest(
                black_box(&baseline),
                black_box(&probe),
                black_box(scale),
            )
            .unwrap()
        })
    });
}

criterion_group!(benches, scan_benchmark, pick_benchmark);
criterion_main!(benches);
