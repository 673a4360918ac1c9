//! Reference cases and assertions shared by the integration tests

use pns_rs::geometry::{BodyGeometry, Contour, OuterBoundaryGeometry};
use pns_rs::physics::{FlowField, FreeStream};
use pns_rs::solver::{MarchPhase, MarchingConfiguration, Snapshot, SnapshotObserver};

/// Straight cylinder of radius 0.1 inside a cylinder of radius 0.3
///
/// No flow turning anywhere, so the free stream is nearly a solution and the
/// run relaxes on the first sweep.
pub fn flat_case() -> (BodyGeometry, OuterBoundaryGeometry, MarchingConfiguration) {
    let config = MarchingConfiguration::default()
        .with_start_station(0.2)
        .with_step_size(1e-3)
        .with_radial_points(21)
        .with_snapshot_spacing(0.1);

    (
        BodyGeometry::cylinder(0.1, 1.0, 0.2),
        OuterBoundaryGeometry::cylinder(0.3, 1.0),
        config,
    )
}

/// Mach 5.95 ogive-cylinder inside the 22° conical boundary
pub fn ogive_case() -> (BodyGeometry, OuterBoundaryGeometry, MarchingConfiguration) {
    let config = MarchingConfiguration::ogive_cylinder_case();
    let body = BodyGeometry::ogive_cylinder();
    let outer = OuterBoundaryGeometry::cone(config.outer_half_angle, body.reference_length());
    (body, outer, config)
}

/// Assert the outer row holds the free stream and the wall is adiabatic no-slip
pub fn assert_boundary_rows(field: &FlowField, free: &FreeStream) {
    let n = field.outer_index();
    assert_eq!(field.row(n), free.row(), "outer row must be the free stream");

    let wall = field.row(1);
    let next = field.row(2);
    assert_eq!(wall.u, 0.0, "wall axial velocity");
    assert_eq!(wall.v, 0.0, "wall radial velocity");
    assert_eq!(wall.p, next.p, "zero normal pressure gradient at the wall");
    assert!(
        relative_error(wall.rho, free.wall_density(wall.p)) < 1e-12,
        "wall density must follow the stagnation enthalpy"
    );
}

/// Compute relative error: |actual - expected| / |expected|
pub fn relative_error(actual: f64, expected: f64) -> f64 {
    if expected.abs() < 1e-10 {
        (actual - expected).abs()
    } else {
        (actual - expected).abs() / expected.abs()
    }
}

/// Observer recording what it was offered
#[derive(Debug, Default)]
pub struct SnapshotLog {
    pub entries: Vec<(usize, f64, MarchPhase)>,
}

impl SnapshotLog {
    pub fn in_phase(&self, phase: MarchPhase) -> Vec<(usize, f64)> {
        self.entries
            .iter()
            .filter(|(_, _, p)| *p == phase)
            .map(|(i, x, _)| (*i, *x))
            .collect()
    }
}

impl SnapshotObserver for SnapshotLog {
    fn observe(&mut self, snapshot: &Snapshot<'_>) {
        assert!(snapshot.field.validate(snapshot.x).is_ok(), "snapshot of a broken field");
        self.entries.push((snapshot.iteration, snapshot.x, snapshot.phase));
    }
}
