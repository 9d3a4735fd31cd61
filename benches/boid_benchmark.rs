/*
 * Boid Simulation Benchmark
 *
 * Measures the grid neighbor query, the nearest-neighbor selection and a full
 * frame step at growing population sizes. With a constant density of boids
 * per cell the per-frame cost should grow roughly linearly with the count.
 */

use boid_swarm::{SimulationWorld, SpawnOptions, SteeringConstants, TuningParams, WorldBounds};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use std::time::Duration;

const POPULATIONS: [usize; 4] = [100, 500, 1000, 2000];

// Scale the area with the population so density stays the same
fn world_for(count: usize) -> SimulationWorld {
    let side = (count as f32 * 2500.0).sqrt();
    let options = SpawnOptions {
        constants: SteeringConstants {
            heading_jitter: 0.0,
            ..SteeringConstants::default()
        },
        seed: Some(1),
        ..SpawnOptions::default()
    };
    SimulationWorld::spawn_with(count, WorldBounds::new(side, side), options)
}

// Benchmark the raw 3x3 grid query
fn bench_spatial_grid(c: &mut Criterion) {
    let mut group = c.benchmark_group("spatial_grid");

    for &count in POPULATIONS.iter() {
        let world = world_for(count);
        group.bench_with_input(BenchmarkId::from_parameter(count), &count, |b, _| {
            b.iter(|| {
                let mut total = 0;
                for (i, boid) in world.boids().iter().enumerate() {
                    total += world.grid().neighbors_of(i, boid.cell()).len();
                }
                black_box(total)
            });
        });
    }

    group.finish();
}

// Benchmark the distance sort and truncation on top of the query
fn bench_nearest_neighbors(c: &mut Criterion) {
    let mut group = c.benchmark_group("nearest_neighbors");

    for &count in POPULATIONS.iter() {
        let world = world_for(count);
        group.bench_with_input(BenchmarkId::from_parameter(count), &count, |b, _| {
            b.iter(|| {
                for i in 0..world.len() {
                    black_box(world.nearest_neighbors(i));
                }
            });
        });
    }

    group.finish();
}

// Benchmark the overall frame step
fn bench_update_loop(c: &mut Criterion) {
    let mut group = c.benchmark_group("update_loop");
    let tuning = TuningParams {
        cohesion: 20.0,
        avoidance: 10.0,
        adherence: 30.0,
        ..TuningParams::default()
    };

    for &count in POPULATIONS.iter() {
        let mut world = world_for(count);
        group.bench_with_input(BenchmarkId::from_parameter(count), &count, |b, _| {
            b.iter(|| world.step(black_box(1.0 / 60.0), &tuning));
        });
    }

    group.finish();
}

// Configure the benchmarks
criterion_group! {
    name = benches;
    config = Criterion::default()
        .sample_size(10)
        .measurement_time(Duration::from_secs(5))
        .warm_up_time(Duration::from_secs(1));
    targets = bench_spatial_grid, bench_nearest_neighbors, bench_update_loop
}

criterion_main!(benches);
