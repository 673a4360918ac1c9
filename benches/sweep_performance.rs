//! Performance benchmarks for the marching solver
//!
//! # What We're Measuring
//!
//! 1. **One radial sweep** on the ogive-cylinder starting station:
//!    - predictor, closure and corrector over every row
//!    - cost should grow linearly with the number of radial points
//!
//! 2. **A full flat-body run**: one relaxation sweep followed by ~320
//!    marching steps between concentric cylinders
//!
//! # Running Benchmarks
//!
//! ```bash
//! # Run all benchmarks
//! cargo bench --bench sweep_performance
//!
//! # Only the sweep scaling group
//! cargo bench --bench sweep_performance sweep
//! ```

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, SamplingMode};
use std::hint::black_box;
use std::time::Duration;

use pns_rs::geometry::{BodyGeometry, Contour, OuterBoundaryGeometry};
use pns_rs::physics::{FlowField, SonicLatch};
use pns_rs::solver::{sweep, MarchingConfiguration, MarchingSolver, StationPair};

/// Scaling of a single sweep with the number of radial points
fn benchmark_single_sweep(c: &mut Criterion) {
    let mut group = c.benchmark_group("Radial sweep");

    let body = BodyGeometry::ogive_cylinder();
    let config = MarchingConfiguration::ogive_cylinder_case();
    let outer = OuterBoundaryGeometry::cone(config.outer_half_angle, body.reference_length());
    let free = config.free_stream();
    let x = config.start_station;

    for points in [31, 61, 121, 241].iter() {
        group.bench_with_input(BenchmarkId::from_parameter(points), points, |b, &points| {
            // Setup (not measured)
            let stations = StationPair::new(x - config.step_size, x, &body, &outer, &free).unwrap();
            let initial = FlowField::free_stream(points, &free);

            b.iter(|| {
                let mut field = initial.clone();
                let mut latch = SonicLatch::new();
                sweep(
                    black_box(&mut field),
                    black_box(&stations),
                    &free,
                    config.initial_beta,
                    &mut latch,
                )
                .unwrap()
            });
        });
    }

    group.finish();
}

/// Complete relax-then-march run on a straight cylinder
fn benchmark_flat_run(c: &mut Criterion) {
    let mut group = c.benchmark_group("Flat body run");
    group.sampling_mode(SamplingMode::Flat);
    group.sample_size(20);
    group.measurement_time(Duration::from_secs(10));

    let body = BodyGeometry::cylinder(0.1, 1.0, 0.2);
    let outer = OuterBoundaryGeometry::cylinder(0.3, 1.0);
    let config = MarchingConfiguration::default()
        .with_start_station(0.2)
        .with_step_size(1e-3)
        .with_radial_points(21);

    group.bench_function("cylinder_21_points", |b| {
        b.iter(|| {
            let mut solver = MarchingSolver::new(black_box(config.clone()), &body, &outer).unwrap();
            solver.run_quiet().unwrap()
        });
    });

    group.finish();
}

criterion_group!(benches, benchmark_single_sweep, benchmark_flat_run);
criterion_main!(benches);
