//! One MacCormack predictor-corrector sweep
//!
//! A sweep advances the whole radial profile from the upstream station to
//! the downstream one. The marched vector at a grid line of radius `r` is
//!
//! ```text
//! U = r·(ρu, ρu² + p, ρuv)
//! ```
//!
//! and the axisymmetric PNS equations in the stretched coordinate read
//!
//! ```text
//! ∂U/∂x = −(η_x ∂E/∂η + η_r ∂F/∂η) + H
//! E = r·(ρu, ρu² + p − τxx, ρuv − σxr)
//! F = r·(ρv, ρuv − σxr, ρv² + p − τrr)
//! H = (0, 0, p − 2μv/r + ⅔μβ∇·V)
//! ```
//!
//! The predictor differences fluxes forward in `η` on the upstream station;
//! the corrector differences the predicted fluxes backward on the downstream
//! station and averages with the upstream state. Inside each flux the
//! velocity gradients are one-sided in the opposite direction. The corrector
//! lags the predictor by one row, and the three predicted rows it needs live
//! in a [`PredictorWindow`].
//!
//! Boundary rows are not marched: the outer boundary is held at the free
//! stream and the wall is adiabatic with no slip.

use crate::error::{PnsError, PnsResult};
use crate::physics::{recover_primitives, ConservedDensities, FlowField, FlowRow, FreeStream, SonicLatch};
use crate::solver::station::{GridMetrics, StationGeometry, StationPair};
use crate::solver::window::PredictorWindow;

/// Outcome of one sweep
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SweepReport {
    /// Largest pressure change `max |Δp|` over the corrected rows
    pub delm: f64,
    /// Closure evaluations whose discriminant root was clamped to zero
    pub clamped: usize,
}

/// Fluxes and source of one row
#[derive(Debug, Clone, Copy)]
struct RowFluxes {
    e: [f64; 3],
    f: [f64; 3],
    h: [f64; 3],
}

impl RowFluxes {
    /// `u_eta`, `v_eta` are the one-sided velocity gradients at this row
    fn new(row: FlowRow, u_eta: f64, v_eta: f64, metrics: &GridMetrics, viscosity: f64, beta: f64) -> Self {
        let GridMetrics { eta_x, eta_r, radius: r } = *metrics;

        let divergence = eta_x * u_eta + eta_r * v_eta + row.v / r;
        let bulk = 2.0 / 3.0 * viscosity * beta * divergence;
        let tau_xx = 2.0 * viscosity * eta_x * u_eta - bulk;
        let sigma_xr = viscosity * (eta_x * v_eta + eta_r * u_eta);
        let tau_rr = 2.0 * viscosity * eta_r * v_eta - bulk;

        let axial_mass = row.rho * row.u * r;
        let radial_mass = row.rho * row.v * r;

        Self {
            e: [
                axial_mass,
                axial_mass * row.u + (row.p - tau_xx) * r,
                axial_mass * row.v - sigma_xr * r,
            ],
            f: [
                radial_mass,
                radial_mass * row.u - sigma_xr * r,
                radial_mass * row.v + (row.p - tau_rr) * r,
            ],
            h: [0.0, 0.0, row.p - 2.0 * viscosity * row.v / r + bulk],
        }
    }
}

/// Marched vector `r·(ρu, ρu² + p, ρuv)`
fn weighted_conserved(row: &FlowRow, radius: f64) -> [f64; 3] {
    let ConservedDensities { a, b, c } = ConservedDensities::from_row(row);
    [a * radius, b * radius, c * radius]
}

/// Run the closure and attach grid context to failures
fn close(
    weighted: [f64; 3],
    radius: f64,
    index: usize,
    station: &StationGeometry,
    free: &FreeStream,
    latch: &mut SonicLatch,
    clamped: &mut usize,
) -> PnsResult<FlowRow> {
    let densities = ConservedDensities::from_weighted(weighted, radius);
    let result = recover_primitives(densities, free.total_enthalpy(), index, latch).map_err(|cause| {
        PnsError::NonphysicalState {
            index,
            station: station.x,
            cause,
        }
    })?;

    if result.clamped {
        *clamped += 1;
    }
    Ok(result.row)
}

/// Gas at rest on the wall at pressure `p`
fn wall_row(pressure: f64, free: &FreeStream) -> FlowRow {
    FlowRow::new(free.wall_density(pressure), 0.0, 0.0, pressure)
}

/// Advance `field` from `stations.upstream` to `stations.downstream`
///
/// Rows `2..N−1` are predicted and corrected; row `N` is reset to the free
/// stream and row 1 to the adiabatic no-slip wall (`p₁ = p₂`, `u₁ = v₁ = 0`,
/// `ρ₁ = γp₁/((γ−1)H∞)`). `beta` scales the bulk-viscosity terms.
///
/// # Errors
///
/// [`PnsError::NonphysicalState`] when the closure rejects a row. The field
/// is left partially updated in that case.
pub fn sweep(
    field: &mut FlowField,
    stations: &StationPair,
    free: &FreeStream,
    beta: f64,
    latch: &mut SonicLatch,
) -> PnsResult<SweepReport> {
    let n = field.radial_points();
    let d_eta = field.delta_eta();
    let step = stations.step();
    let upstream = &stations.upstream;
    let downstream = &stations.downstream;

    let mut window = PredictorWindow::filled(free.row());
    let mut delm: f64 = 0.0;
    let mut clamped = 0;

    for i in 2..=n {
        // Predictor (row i)
        if i == n {
            window.push(free.row());
        } else {
            let (below, here, above) = (field.row(i - 1), field.row(i), field.row(i + 1));
            let metrics = GridMetrics::at(field.eta(i), upstream);
            let metrics_above = GridMetrics::at(field.eta(i + 1), upstream);

            let flux = RowFluxes::new(
                here,
                (here.u - below.u) / d_eta,
                (here.v - below.v) / d_eta,
                &metrics,
                upstream.viscosity,
                beta,
            );
            let flux_above = RowFluxes::new(
                above,
                (above.u - here.u) / d_eta,
                (above.v - here.v) / d_eta,
                &metrics_above,
                upstream.viscosity,
                beta,
            );

            let mut predicted = weighted_conserved(&here, metrics.radius);
            for j in 0..3 {
                predicted[j] += -step
                    * (metrics.eta_x * (flux_above.e[j] - flux.e[j]) + metrics.eta_r * (flux_above.f[j] - flux.f[j]))
                    / d_eta
                    + step * flux.h[j];
            }

            let radius = downstream.radius_at(field.eta(i));
            let row = close(predicted, radius, i, downstream, free, latch, &mut clamped)?;

            if i == 2 {
                window.push(wall_row(row.p, free));
            }
            window.push(row);
        }

        // Corrector (row k = i − 1, lagging one row)
        if i > 2 {
            let k = i - 1;
            let (below, here, above) = (window.previous(), window.current(), window.incoming());
            let metrics = GridMetrics::at(field.eta(k), downstream);
            let metrics_below = GridMetrics::at(field.eta(k - 1), downstream);

            let flux = RowFluxes::new(
                here,
                (above.u - here.u) / d_eta,
                (above.v - here.v) / d_eta,
                &metrics,
                downstream.viscosity,
                beta,
            );
            let flux_below = RowFluxes::new(
                below,
                (here.u - below.u) / d_eta,
                (here.v - below.v) / d_eta,
                &metrics_below,
                downstream.viscosity,
                beta,
            );

            let original = field.row(k);
            let predicted = weighted_conserved(&here, metrics.radius);
            let upstream_state = weighted_conserved(&original, GridMetrics::at(field.eta(k), upstream).radius);

            let mut corrected = [0.0; 3];
            for j in 0..3 {
                corrected[j] = 0.5
                    * (predicted[j] + upstream_state[j]
                        - step
                            * (metrics.eta_x * (flux.e[j] - flux_below.e[j])
                                + metrics.eta_r * (flux.f[j] - flux_below.f[j]))
                            / d_eta
                        + step * flux.h[j]);
            }

            let row = close(corrected, metrics.radius, k, downstream, free, latch, &mut clamped)?;
            delm = delm.max((row.p - original.p).abs());
            field.set_row(k, row);
        }
    }

    // Boundary rows
    field.set_row(n, free.row());
    let wall_pressure = field.row(2).p;
    field.set_row(1, wall_row(wall_pressure, free));

    Ok(SweepReport { delm, clamped })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::{BodyGeometry, Contour, OuterBoundaryGeometry};
    use approx::assert_relative_eq;

    fn parallel_walls() -> (BodyGeometry, OuterBoundaryGeometry) {
        (BodyGeometry::cylinder(1.0, 10.0, 2.0), OuterBoundaryGeometry::cylinder(3.0, 10.0))
    }

    #[test]
    fn test_inviscid_uniform_flow_is_preserved() {
        let (body, outer) = parallel_walls();
        let free = FreeStream::new(5.95, 0.0);
        let stations = StationPair::new(0.2, 0.21, &body, &outer, &free).unwrap();
        let mut field = FlowField::free_stream(11, &free);
        let mut latch = SonicLatch::new();

        let report = sweep(&mut field, &stations, &free, -20.0, &mut latch).unwrap();

        assert!(report.delm < 1e-12);
        assert_eq!(report.clamped, 0);
        for (_, row) in field.rows().skip(1) {
            assert_relative_eq!(row.rho, 1.0, epsilon = 1e-10);
            assert_relative_eq!(row.u, 1.0, epsilon = 1e-10);
            assert!(row.v.abs() < 1e-10);
            assert_relative_eq!(row.p, free.pressure(), epsilon = 1e-12);
        }
        assert!(!latch.is_locked());
    }

    #[test]
    fn test_boundary_rows_after_sweep() {
        let body = BodyGeometry::ogive_cylinder();
        let outer = OuterBoundaryGeometry::cone(22.0, body.reference_length());
        let free = FreeStream::new(5.95, 2e-5);
        let start = body.start_station();
        let stations = StationPair::new(start - 4e-4, start, &body, &outer, &free).unwrap();
        let mut field = FlowField::free_stream(31, &free);
        let mut latch = SonicLatch::new();

        sweep(&mut field, &stations, &free, -20.0, &mut latch).unwrap();

        assert_eq!(field.row(31), free.row());
        let wall = field.row(1);
        assert_eq!(wall.u, 0.0);
        assert_eq!(wall.v, 0.0);
        assert_eq!(wall.p, field.row(2).p);
        assert_relative_eq!(wall.rho, free.wall_density(wall.p));
    }

    #[test]
    fn test_pressure_drop_counts_toward_residual() {
        let body = BodyGeometry::cylinder(0.1, 1.0, 0.2);
        let outer = OuterBoundaryGeometry::cylinder(0.3, 1.0);
        let free = FreeStream::new(5.95, 0.0);
        let stations = StationPair::new(0.199, 0.2, &body, &outer, &free).unwrap();
        let n = 21;
        let mut field = FlowField::free_stream(n, &free);
        for j in 2..n {
            field.set_row(j, FlowRow::new(1.0, 1.0, 0.0, 1.5 * free.pressure()));
        }
        let before: Vec<f64> = (2..n).map(|j| field.row(j).p).collect();
        let mut latch = SonicLatch::new();

        let report = sweep(&mut field, &stations, &free, -20.0, &mut latch).unwrap();

        for (j, p_old) in (2..n).zip(before) {
            assert!(field.row(j).p < p_old, "row {} did not relax", j);
        }
        assert!(report.delm > 1e-2);
    }

    #[test]
    fn test_closure_failure_names_row_and_station() {
        let (body, outer) = parallel_walls();
        let free = FreeStream::new(5.95, 0.0);
        let stations = StationPair::new(0.2, 0.21, &body, &outer, &free).unwrap();
        let mut field = FlowField::free_stream(11, &free);
        field.set_row(5, FlowRow::new(1.0, -1.0, 0.0, free.pressure()));
        let mut latch = SonicLatch::new();

        match sweep(&mut field, &stations, &free, -20.0, &mut latch) {
            Err(PnsError::NonphysicalState { index, station, .. }) => {
                assert_eq!(index, 5);
                assert_relative_eq!(station, 0.21);
            }
            other => panic!("unexpected {:?}", other),
        }
    }
}
