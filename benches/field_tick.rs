//! Benchmarks for the per-tick layer update.
//!
//! Run with: `cargo bench`

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use driftfield::prelude::*;
use driftfield::{project, DepthSorter};

fn bench_layer_tick(c: &mut Criterion) {
    let mut group = c.benchmark_group("layer_tick");

    for (name, config) in [("clouds", LayerConfig::clouds()), ("stars", LayerConfig::stars())] {
        group.bench_function(name, |b| {
            let mut field = ParticleField::new(config.clone().with_seed(1)).unwrap();
            b.iter(|| {
                field.advance(black_box(1.0));
                black_box(field.frame().instances.len())
            })
        });
    }

    group.finish();
}

fn bench_pool_sizes(c: &mut Criterion) {
    let mut group = c.benchmark_group("pool_size");

    for count in [50u32, 500, 5_000] {
        group.bench_with_input(BenchmarkId::from_parameter(count), &count, |b, &count| {
            let config = LayerConfig::clouds().with_particle_count(count).with_seed(1);
            let mut field = ParticleField::new(config).unwrap();
            b.iter(|| field.advance(black_box(1.0)))
        });
    }

    group.finish();
}

fn bench_projection(c: &mut Criterion) {
    let mut camera = Camera::new(400.0).unwrap();
    camera.rotation = DVec3::new(0.0, 0.15, 0.0);
    let point = DVec3::new(1200.0, -300.0, 1800.0);

    c.bench_function("project", |b| b.iter(|| project(black_box(&camera), black_box(point))));
}

fn bench_resort(c: &mut Criterion) {
    let mut field = ParticleField::new(LayerConfig::clouds().with_seed(1)).unwrap();
    for _ in 0..10 {
        field.advance(1.0);
    }
    let particles = field.particles().to_vec();
    let mut sorter = DepthSorter::new(particles.len());

    c.bench_function("resort_nearly_sorted", |b| {
        b.iter(|| black_box(sorter.sort_for_paint(black_box(&particles)).len()))
    });
}

criterion_group!(benches, bench_layer_tick, bench_pool_sizes, bench_projection, bench_resort);
criterion_main!(benches);
