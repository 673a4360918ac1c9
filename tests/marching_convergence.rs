//! End-to-end marching runs
//!
//! These tests drive the full relax-then-march state machine on the two
//! reference geometries and check the invariants every accepted station must
//! satisfy.

use pns_rs::physics::{FlowField, FreeStream, SonicLatch};
use pns_rs::solver::{sweep, MarchPhase, MarchingSolver, StationPair};
use pns_rs::PnsError;

mod common;
use common::{assert_boundary_rows, flat_case, ogive_case, relative_error, SnapshotLog};

#[test]
fn test_inviscid_flat_body_preserves_free_stream() {
    let (body, outer, config) = flat_case();
    let config = config.with_viscosity(0.0);
    let pressure = config.free_stream().pressure();
    let mut solver = MarchingSolver::new(config, &body, &outer).unwrap();

    while solver.phase() != MarchPhase::Terminated {
        let report = solver.step().unwrap();
        assert_boundary_rows(solver.field(), solver.free_stream());

        // Nothing turns the flow and nothing diffuses
        let wall = solver.field().row(1);
        assert!(
            relative_error(wall.p, pressure) < 1e-9,
            "wall pressure {} drifted at x = {}",
            wall.p,
            report.x
        );
    }

    let result = solver.result();
    assert!(result.converged);
    assert_eq!(result.relaxation_iterations, 1);
    assert_eq!(result.iterations, result.relaxation_iterations + result.marching_steps);
    assert!(result.final_position > 1.0 - solver.step_size());
    assert!(result.final_position <= 1.0);
    assert!(!result.sonic_locked);
}

#[test]
fn test_viscous_flat_body_boundary_layer_latches_wall_row() {
    let (body, outer, config) = flat_case();
    let mut solver = MarchingSolver::new(config, &body, &outer).unwrap();

    while solver.phase() != MarchPhase::Terminated {
        solver.step().unwrap();
        assert_boundary_rows(solver.field(), solver.free_stream());
    }

    // The growing boundary layer slows the near-wall row to the sonic limit
    let result = solver.result();
    assert!(result.converged);
    assert!(result.sonic_locked);
    assert!(solver.field().row(1).p > solver.free_stream().pressure());
}

#[test]
fn test_viscous_flat_body_relaxes_near_free_stream_pressure() {
    let (body, outer, config) = flat_case();
    let cap = config.max_relaxation_iterations;
    let mut solver = MarchingSolver::new(config, &body, &outer).unwrap();

    while solver.phase() == MarchPhase::Relaxing {
        solver.step().unwrap();
    }

    assert_eq!(solver.phase(), MarchPhase::Marching);
    assert!(solver.iteration() <= cap);
    let wall = solver.field().row(1);
    assert!(relative_error(wall.p, solver.free_stream().pressure()) < 0.01);
}

#[test]
fn test_marching_positions_increase_by_growing_steps() {
    let (body, outer, config) = flat_case();
    let mut solver = MarchingSolver::new(config, &body, &outer).unwrap();
    solver.step().unwrap();
    assert_eq!(solver.phase(), MarchPhase::Marching);

    let mut previous_x = solver.position();
    let mut previous_step = 0.0;
    for _ in 0..50 {
        let expected_step = solver.step_size();
        let report = solver.step().unwrap();
        let taken = report.x - previous_x;

        assert!((taken - expected_step).abs() < 1e-12);
        assert!(taken > previous_step);
        previous_x = report.x;
        previous_step = taken;
    }
}

#[test]
fn test_ogive_cylinder_reference_run() {
    let (body, outer, config) = ogive_case();
    let nplot = config.snapshot_iterations;
    let mut solver = MarchingSolver::new(config, &body, &outer).unwrap();
    let mut log = SnapshotLog::default();

    let result = solver.run(&mut log).unwrap();

    assert!(result.converged, "ogive run stopped early: {:?}", result);
    assert!(result.final_position > 0.99);
    assert!(result.sonic_locked);
    assert_boundary_rows(solver.field(), solver.free_stream());

    // Initial field first, then the relaxation cadence
    assert_eq!(log.entries[0].0, 0);
    let relaxing = log.in_phase(MarchPhase::Relaxing);
    assert_eq!(relaxing.len(), result.relaxation_iterations / nplot + 1);
    assert!(relaxing.iter().all(|(iteration, _)| iteration % nplot == 0));
    assert!(relaxing.iter().all(|(iteration, _)| *iteration <= result.relaxation_iterations));

    // One marching snapshot for each multiple of 0.05 passed after x ≈ 0.114
    let marching = log.in_phase(MarchPhase::Marching);
    assert_eq!(marching.len(), 17);
    assert!(marching.iter().all(|(iteration, _)| *iteration > result.relaxation_iterations));
    for (k, (_, x)) in marching.iter().enumerate() {
        let crossed = 0.15 + 0.05 * k as f64;
        assert!(*x > crossed - 1e-12 && *x < crossed + 0.05, "snapshot at x = {}", x);
    }
}

#[test]
fn test_single_ogive_sweep_enforces_boundaries() {
    let (body, outer, config) = ogive_case();
    let free = config.free_stream();
    let mut field = FlowField::free_stream(config.radial_points, &free);
    let x = config.start_station;
    let stations = StationPair::new(x - config.step_size, x, &body, &outer, &free).unwrap();

    let report = sweep(&mut field, &stations, &free, config.initial_beta, &mut SonicLatch::new()).unwrap();

    assert!(report.delm > 0.0);
    assert_eq!(report.clamped, 0);
    assert_boundary_rows(&field, &free);
    assert!(field.validate(x).is_ok());
}

#[test]
fn test_relaxation_cap_is_reported_on_request() {
    let (body, outer, config) = ogive_case();
    let config = config.with_max_relaxation_iterations(5);
    let mut solver = MarchingSolver::new(config, &body, &outer).unwrap();

    let result = solver.run_quiet().unwrap();

    assert!(!result.converged);
    assert_eq!(result.iterations, 5);
    assert_eq!(solver.phase(), MarchPhase::Terminated);
    match result.into_converged() {
        Err(PnsError::NonConvergence { iterations, residual }) => {
            assert_eq!(iterations, 5);
            assert!(residual > 1e-4);
        }
        other => panic!("expected NonConvergence, got {:?}", other),
    }
}

#[test]
fn test_free_stream_is_reproduced_at_the_outer_boundary() {
    let free = FreeStream::new(5.95, 2e-5);
    let (body, outer, config) = ogive_case();
    let mut solver = MarchingSolver::new(config, &body, &outer).unwrap();

    for _ in 0..10 {
        solver.step().unwrap();
    }

    let n = solver.field().outer_index();
    assert_eq!(solver.field().row(n), free.row());
}
