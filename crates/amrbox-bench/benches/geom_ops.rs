//! Criterion micro-benchmarks for box geometry.

use amrbox_geom::{boxset, tile_box, IndexBox};
use criterion::{criterion_group, criterion_main, Criterion};
use std::hint::black_box;

/// 1-D boxes of width 6 on a stride of 8, so no pair overlaps and the
/// overlap scan visits every pair.
fn disjoint_spans(count: i64) -> Vec<IndexBox> {
    (0..count)
        .map(|i| IndexBox::span(i * 8, i * 8 + 5).unwrap())
        .collect()
}

/// Benchmark: pairwise overlap scan over 256 disjoint boxes.
fn bench_first_overlap_256(c: &mut Criterion) {
    let boxes = disjoint_spans(256);

    c.bench_function("first_overlap_256", |b| {
        b.iter(|| black_box(boxset::first_overlap(black_box(&boxes))));
    });
}

/// Benchmark: find a buffered container for each of 256 children among 256
/// refined parents.
fn bench_find_container_256(c: &mut Criterion) {
    let parents = boxset::refine_all(&disjoint_spans(256), 2).unwrap();
    let children: Vec<IndexBox> = parents
        .iter()
        .map(|p| IndexBox::span(p.lower()[0] + 1, p.upper()[0] - 1).unwrap())
        .collect();

    c.bench_function("find_container_256", |b| {
        b.iter(|| {
            for child in &children {
                black_box(boxset::find_container_with_buffer(&parents, child, &[1]));
            }
        });
    });
}

/// Benchmark: tile a 256^3 box into 16^3 patches.
fn bench_tile_3d(c: &mut Criterion) {
    let domain = IndexBox::domain(&[256, 256, 256]).unwrap();

    c.bench_function("tile_box_3d_4096_patches", |b| {
        b.iter(|| {
            let patches = tile_box(&domain, &[8, 8, 8], Some(&[16, 16, 16]));
            black_box(patches.len());
        });
    });
}

criterion_group!(
    benches,
    bench_first_overlap_256,
    bench_find_container_256,
    bench_tile_3d
);
criterion_main!(benches);
