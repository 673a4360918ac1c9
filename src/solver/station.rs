//! Axial stations and grid metrics
//!
//! The radial coordinate is stretched between body and outer boundary:
//!
//! ```text
//! η = (r − r_b(x)) / (r_s(x) − r_b(x))
//! ```
//!
//! so that `η = 0` on the body and `η = 1` on the outer boundary. A
//! [`StationGeometry`] caches what one axial station needs (radii, slopes,
//! viscosity); [`GridMetrics::at`] turns it into the derivatives `η_x`, `η_r`
//! and the physical radius of a grid line. The metrics are a pure function
//! of `η` and the station, so predictor and corrector call it for each row
//! they touch instead of carrying values across loop iterations.

use crate::error::{PnsError, PnsResult};
use crate::geometry::Contour;
use crate::physics::FreeStream;

/// Geometry and viscosity of one axial station (nondimensional)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StationGeometry {
    /// Axial position `x / L`
    pub x: f64,
    /// Body radius `r_b / L`
    pub body_radius: f64,
    /// Body slope `dr_b/dx`
    pub body_slope: f64,
    /// Outer-boundary radius `r_s / L`
    pub outer_radius: f64,
    /// Outer-boundary slope `dr_s/dx`
    pub outer_slope: f64,
    /// Station viscosity `μ∞·x`
    pub viscosity: f64,
}

impl StationGeometry {
    /// Query both contours at nondimensional position `x`
    ///
    /// Both contours are scaled by the body reference length.
    ///
    /// # Errors
    ///
    /// Propagates geometry lookup failures and returns
    /// [`PnsError::DegenerateGrid`] when the outer boundary does not lie
    /// strictly outside the body.
    pub fn at(x: f64, body: &dyn Contour, outer: &dyn Contour, free: &FreeStream) -> PnsResult<Self> {
        let length = body.reference_length();
        let xd = x * length;

        let station = Self {
            x,
            body_radius: body.radius(xd)? / length,
            body_slope: body.slope(xd)?,
            outer_radius: outer.radius(xd)? / length,
            outer_slope: outer.slope(xd)?,
            viscosity: free.station_viscosity(x),
        };

        if station.outer_radius <= station.body_radius {
            return Err(PnsError::DegenerateGrid {
                x,
                body_radius: station.body_radius,
                outer_radius: station.outer_radius,
            });
        }

        Ok(station)
    }

    /// Shock-layer thickness `r_s − r_b`
    pub fn thickness(&self) -> f64 {
        self.outer_radius - self.body_radius
    }

    /// Physical radius of grid line `η`
    pub fn radius_at(&self, eta: f64) -> f64 {
        self.body_radius + eta * self.thickness()
    }
}

/// The two stations bracketing one marching step
///
/// `upstream` (station 1) holds the known solution, `downstream`
/// (station 2) is being solved for.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StationPair {
    pub upstream: StationGeometry,
    pub downstream: StationGeometry,
}

impl StationPair {
    /// Evaluate both stations
    pub fn new(
        x1: f64,
        x2: f64,
        body: &dyn Contour,
        outer: &dyn Contour,
        free: &FreeStream,
    ) -> PnsResult<Self> {
        Ok(Self {
            upstream: StationGeometry::at(x1, body, outer, free)?,
            downstream: StationGeometry::at(x2, body, outer, free)?,
        })
    }

    /// Axial distance between the stations
    pub fn step(&self) -> f64 {
        self.downstream.x - self.upstream.x
    }
}

/// Coordinate metrics of one grid line at one station
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridMetrics {
    /// `∂η/∂x`
    pub eta_x: f64,
    /// `∂η/∂r`
    pub eta_r: f64,
    /// Physical radius of the grid line
    pub radius: f64,
}

impl GridMetrics {
    /// Metrics at `η` on `station`
    ///
    /// `η_r = 1/(r_s − r_b)` and `η_x = ((η − 1)·r_b' − η·r_s')·η_r`.
    pub fn at(eta: f64, station: &StationGeometry) -> Self {
        let eta_r = 1.0 / station.thickness();
        Self {
            eta_x: ((eta - 1.0) * station.body_slope - eta * station.outer_slope) * eta_r,
            eta_r,
            radius: station.radius_at(eta),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::{BodyGeometry, OuterBoundaryGeometry};
    use approx::assert_relative_eq;

    fn free() -> FreeStream {
        FreeStream::new(5.95, 2e-5)
    }

    #[test]
    fn test_station_is_scaled_by_body_length() {
        let body = BodyGeometry::cylinder(1.0, 10.0, 1.0);
        let outer = OuterBoundaryGeometry::cylinder(3.0, 10.0);

        let station = StationGeometry::at(0.5, &body, &outer, &free()).unwrap();

        assert_relative_eq!(station.body_radius, 0.1);
        assert_relative_eq!(station.outer_radius, 0.3);
        assert_eq!(station.body_slope, 0.0);
        assert_relative_eq!(station.viscosity, 1e-5);
        assert_relative_eq!(station.thickness(), 0.2, epsilon = 1e-14);
    }

    #[test]
    fn test_parallel_walls_have_no_axial_metric() {
        let body = BodyGeometry::cylinder(1.0, 10.0, 1.0);
        let outer = OuterBoundaryGeometry::cylinder(3.0, 10.0);
        let station = StationGeometry::at(0.5, &body, &outer, &free()).unwrap();

        for eta in [0.0, 0.3, 1.0] {
            let metrics = GridMetrics::at(eta, &station);
            assert_eq!(metrics.eta_x, 0.0);
            assert_relative_eq!(metrics.eta_r, 5.0, epsilon = 1e-12);
            assert_relative_eq!(metrics.radius, 0.1 + 0.2 * eta, epsilon = 1e-14);
        }
    }

    #[test]
    fn test_metric_follows_boundary_slopes() {
        let body = BodyGeometry::ogive_cylinder();
        let outer = OuterBoundaryGeometry::cone(22.0, body.reference_length());
        let station = StationGeometry::at(0.2, &body, &outer, &free()).unwrap();

        let at_body = GridMetrics::at(0.0, &station);
        let at_outer = GridMetrics::at(1.0, &station);

        assert_relative_eq!(at_body.eta_x, -station.body_slope / station.thickness(), epsilon = 1e-12);
        assert_relative_eq!(at_outer.eta_x, -station.outer_slope / station.thickness(), epsilon = 1e-12);
        assert_relative_eq!(at_body.radius, station.body_radius);
        assert_relative_eq!(at_outer.radius, station.outer_radius, epsilon = 1e-15);
    }

    #[test]
    fn test_degenerate_grid_is_rejected() {
        let body = BodyGeometry::cylinder(2.0, 10.0, 1.0);
        let outer = OuterBoundaryGeometry::cylinder(1.0, 10.0);

        let result = StationGeometry::at(0.5, &body, &outer, &free());
        assert!(matches!(result, Err(PnsError::DegenerateGrid { .. })));
    }

    #[test]
    fn test_station_outside_geometry_fails() {
        let body = BodyGeometry::cylinder(1.0, 10.0, 1.0);
        let outer = OuterBoundaryGeometry::cylinder(3.0, 10.0);

        let result = StationPair::new(0.9, 1.2, &body, &outer, &free());
        assert!(matches!(result, Err(PnsError::GeometryLookup { .. })));
    }

    #[test]
    fn test_pair_step() {
        let body = BodyGeometry::cylinder(1.0, 10.0, 1.0);
        let outer = OuterBoundaryGeometry::cylinder(3.0, 10.0);
        let pair = StationPair::new(0.25, 0.5, &body, &outer, &free()).unwrap();
        assert_relative_eq!(pair.step(), 0.25, epsilon = 1e-15);
    }
}
