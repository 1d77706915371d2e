//! Resolution benchmarks for attrition_core.
//!
//! Run with: `cargo bench -p attrition_core`

// Benchmark binaries don't need docs on macro-generated functions
#![allow(missing_docs)]

use attrition_core::prelude::*;
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

/// Full pipeline for armies of growing size.
pub fn resolution_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("resolve");
    for size in [2u32, 5, 10, 20] {
        let attacker = Force::new([size, size, size / 2, 0, 0, 0]);
        let defender = Force::new([2 * size, 0, 0, size / 2, 0, 0]);
        group.bench_with_input(BenchmarkId::from_parameter(size), &size, |b, _| {
            b.iter(|| run_battle(black_box(&attacker), black_box(&defender)))
        });
    }
    group.finish();
}

/// Hit distribution for a large mixed dice pool.
pub fn distribution_benchmark(c: &mut Criterion) {
    let tiers = DiceTiers::new([40, 30, 20, 10]);
    c.bench_function("hit_distribution_100_dice", |b| {
        b.iter(|| HitDistribution::from_tiers(black_box(&tiers)))
    });
}

criterion_group!(benches, resolution_benchmark, distribution_benchmark);
criterion_main!(benches);
