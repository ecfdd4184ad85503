//! Benchmarks for polygon boolean operations.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};

use exactum::clip::{paths_intersection, paths_union, FillRule};
use exactum::{Path64, Paths64, Point64};

/// Generates a regular polygon with `num_points` vertices.
fn generate_circle(num_points: usize, cx: i64, cy: i64, radius: i64) -> Path64 {
    (0..num_points)
        .map(|i| {
            let a = i as f64 / num_points as f64 * 2.0 * std::f64::consts::PI;
            Point64::new(
                cx + (a.cos() * radius as f64) as i64,
                cy + (a.sin() * radius as f64) as i64,
            )
        })
        .collect()
}

/// Generates a spiky star so every sweep beam carries many edges.
fn generate_star(num_spikes: usize, cx: i64, cy: i64, radius: i64) -> Path64 {
    (0..num_spikes * 2)
        .map(|i| {
            let a = i as f64 / (num_spikes * 2) as f64 * 2.0 * std::f64::consts::PI;
            let r = if i % 2 == 0 { radius } else { radius / 3 };
            Point64::new(
                cx + (a.cos() * r as f64) as i64,
                cy + (a.sin() * r as f64) as i64,
            )
        })
        .collect()
}

fn bench_intersection(c: &mut Criterion) {
    let mut group = c.benchmark_group("intersection");

    for size in [16, 64, 256, 1024] {
        let subject: Paths64 = vec![generate_circle(size, 0, 0, 1_000_000)];
        let clip: Paths64 = vec![generate_circle(size, 300_000, 300_000, 1_000_000)];
        group.throughput(Throughput::Elements(size as u64));

        group.bench_with_input(
            BenchmarkId::new("offset_circles", size),
            &(subject, clip),
            |b, (s, cl)| {
                b.iter(|| paths_intersection(black_box(s), black_box(cl), FillRule::NonZero))
            },
        );
    }

    group.finish();
}

fn bench_union(c: &mut Criterion) {
    let mut group = c.benchmark_group("union");

    for size in [8, 32, 128] {
        let subject: Paths64 = vec![generate_star(size, 0, 0, 1_000_000)];
        let clip: Paths64 = vec![generate_star(size, 150_000, -90_000, 1_000_000)];
        group.throughput(Throughput::Elements((size * 2) as u64));

        group.bench_with_input(
            BenchmarkId::new("stars", size),
            &(subject, clip),
            |b, (s, cl)| b.iter(|| paths_union(black_box(s), black_box(cl), FillRule::NonZero)),
        );
    }

    group.finish();
}

criterion_group!(benches, bench_intersection, bench_union);
criterion_main!(benches);
