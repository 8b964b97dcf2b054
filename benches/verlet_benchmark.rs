//! Verlet benchmarks
//!
//! Cost of the acceleration model, a single solver step and complete runs.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use double_pendulum::prelude::*;
use nalgebra::Vector2;
use std::io;

/// Benchmark one evaluation of the acceleration model
fn bench_acceleration(c: &mut Criterion) {
    let model = AccelerationModel::new(&SimulationConfig::default());
    let theta = Vector2::new(1.5, 1.0);
    let omega = Vector2::new(0.3, -0.7);

    c.bench_function("acceleration", |b| {
        b.iter(|| model.acceleration(black_box(&theta), black_box(&omega)));
    });
}

/// Benchmark a single Verlet step on the default configuration
fn bench_verlet_step(c: &mut Criterion) {
    let config = SimulationConfig::default();
    let mut solver = Verlet::new(&config);
    solver.bootstrap().unwrap();

    c.bench_function("Verlet step", |b| {
        b.iter(|| {
            solver.step().unwrap();
            black_box(solver.state());
        });
    });
}

/// Benchmark complete runs with different step counts
fn bench_full_run(c: &mut Criterion) {
    let mut group = c.benchmark_group("Full run");

    for total_time in [1.0, 10.0, 100.0].iter() {
        let config = SimulationConfig {
            total_time: *total_time,
            ..Default::default()
        };

        group.bench_with_input(BenchmarkId::new("steps", config.steps()), &config, |b, config| {
            b.iter(|| {
                let last = Simulator::new(config, SimulationOptions::default())
                    .unwrap()
                    .run()
                    .last()
                    .unwrap()
                    .unwrap();
                black_box(last);
            });
        });
    }

    group.finish();
}

/// Benchmark a default run formatted into a sink
fn bench_write(c: &mut Criterion) {
    let config = SimulationConfig::default();
    let options = SimulationOptions {
        sample_stride: 1,
        ..Default::default()
    };

    c.bench_function("write 2001 samples", |b| {
        b.iter(|| {
            let writer = TrajectoryWriter::new(io::sink(), Some(io::sink()), &config).unwrap();
            let rows = Simulator::new(&config, options)
                .unwrap()
                .write_to(writer).unwrap();
            black_box(rows);
        });
    });
}

criterion_group!(
    benches,
    bench_acceleration,
    bench_verlet_step,
    bench_full_run,
    bench_write
);
criterion_main!(benches);
