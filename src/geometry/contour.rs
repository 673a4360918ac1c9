//! Body and outer-boundary contours
//!
//! The solver only needs radius, slope and curvature as functions of the
//! axial position, plus the length used to nondimensionalize them. That is
//! the [`Contour`] trait. [`BodyGeometry`] and [`OuterBoundaryGeometry`] wrap
//! a [`GeometryCurve`] and provide the reference shapes used for
//! verification: the ogive-cylinder test body, straight cylinders and the
//! conical outer boundary.

use crate::error::PnsResult;
use crate::geometry::curve::GeometryCurve;
use crate::geometry::segment::PolySegment;

/// Read-only axisymmetric contour queried by the marching solver
///
/// Positions and radii are dimensional; slopes are dimensionless.
/// Implementations must be free of side effects so that several solvers can
/// share one contour.
pub trait Contour: Send + Sync {
    /// Display name
    fn name(&self) -> &str;

    /// Radius at `x`
    fn radius(&self, x: f64) -> PnsResult<f64>;

    /// Slope `dr/dx` at `x`
    fn slope(&self, x: f64) -> PnsResult<f64>;

    /// Curvature `d²r/dx²` at `x`
    fn curvature(&self, x: f64) -> PnsResult<f64>;

    /// Characteristic length used to nondimensionalize positions and radii
    fn reference_length(&self) -> f64;
}

// =================================================================================================
// Body
// =================================================================================================

/// Solid body contour
#[derive(Debug, Clone, PartialEq)]
pub struct BodyGeometry {
    curve: GeometryCurve,
    reference_length: f64,
    /// Dimensional axial position of the first computational station
    start: f64,
}

impl BodyGeometry {
    /// Wrap a curve as a body
    ///
    /// # Panics
    ///
    /// Panics if the reference length is not positive or `start` lies outside
    /// `[0, reference_length)`.
    pub fn new(curve: GeometryCurve, reference_length: f64, start: f64) -> Self {
        assert!(
            reference_length > 0.0,
            "Reference length must be positive, got {}",
            reference_length
        );
        assert!(
            (0.0..reference_length).contains(&start),
            "Start position {} outside body length {}",
            start,
            reference_length
        );

        Self { curve, reference_length, start }
    }

    /// Ogive-cylinder test body
    ///
    /// A sharp cone is followed by a quartic transition that matches the
    /// cone radius and slope at its upstream end and the cylinder radius with
    /// zero slope at its downstream end. The transition starts where the
    /// cone meets a tangent circular-arc ogive of nose length 22.5 and radius
    /// 4.25 evaluated at x = 5, and the whole body is shifted so the cone tip
    /// sits at the origin. Total length is 50 plus that shift.
    ///
    /// # Example
    ///
    /// ```rust
    /// use pns_rs::geometry::{BodyGeometry, Contour};
    ///
    /// let body = BodyGeometry::ogive_cylinder();
    /// assert!((body.radius(body.reference_length()).unwrap() - 4.25).abs() < 1e-12);
    /// assert!(body.start_station() > 0.0 && body.start_station() < 0.2);
    /// ```
    pub fn ogive_cylinder() -> Self {
        let x0: f64 = 5.0; // first computational point
        let x1 = 22.5; // ogive length
        let x2 = 50.0; // overall length
        let xh = 4.25; // cylinder radius

        let rn = (x1 * x1 + xh * xh) / (2.0 * xh);
        let thetab = ((x1 - x0) / rn).asin();
        let rb0 = xh - rn + (rn * rn - (x1 - x0) * (x1 - x0)).sqrt();
        let tan_thetab = thetab.tan();

        // Shift so the tangent cone through (x0, rb0) starts at the origin
        let dx0 = rb0 / tan_thetab - x0;
        let x0 = x0 + dx0;
        let x1 = x1 + dx0;
        let x2 = x2 + dx0;

        let length = x1 - x0;
        let rise = xh - rb0;
        let b = 4.0 * rise - 3.0 * length * tan_thetab;
        let a = rise - b - length * tan_thetab;
        let transition = vec![a, b, 0.0, length * tan_thetab, rb0];

        let curve = GeometryCurve::new(
            "ogive-cylinder",
            vec![
                PolySegment::new(0.0, x0, vec![x0 * tan_thetab, 0.0]),
                PolySegment::new(x0, x1, transition),
                PolySegment::constant(x1, x2, xh),
            ],
        );

        Self::new(curve, x2, x0)
    }

    /// Straight circular cylinder of the given radius
    pub fn cylinder(radius: f64, length: f64, start: f64) -> Self {
        let curve = GeometryCurve::new("cylinder", vec![PolySegment::constant(0.0, length, radius)]);
        Self::new(curve, length, start)
    }

    /// Underlying curve
    pub fn curve(&self) -> &GeometryCurve {
        &self.curve
    }

    /// Dimensional position of the first computational station
    pub fn start(&self) -> f64 {
        self.start
    }

    /// Nondimensional first station `start / reference_length`
    pub fn start_station(&self) -> f64 {
        self.start / self.reference_length
    }
}

impl Contour for BodyGeometry {
    fn name(&self) -> &str {
        self.curve.name()
    }

    fn radius(&self, x: f64) -> PnsResult<f64> {
        self.curve.radius(x)
    }

    fn slope(&self, x: f64) -> PnsResult<f64> {
        self.curve.slope(x)
    }

    fn curvature(&self, x: f64) -> PnsResult<f64> {
        self.curve.curvature(x)
    }

    fn reference_length(&self) -> f64 {
        self.reference_length
    }
}

// =================================================================================================
// Outer boundary
// =================================================================================================

/// Outer computational boundary (placed outside the bow shock)
#[derive(Debug, Clone, PartialEq)]
pub struct OuterBoundaryGeometry {
    curve: GeometryCurve,
    reference_length: f64,
}

impl OuterBoundaryGeometry {
    /// Wrap a curve as an outer boundary
    ///
    /// # Panics
    ///
    /// Panics if the reference length is not positive.
    pub fn new(curve: GeometryCurve, reference_length: f64) -> Self {
        assert!(
            reference_length > 0.0,
            "Reference length must be positive, got {}",
            reference_length
        );
        Self { curve, reference_length }
    }

    /// Cone from the origin with the given half-angle in degrees
    ///
    /// # Example
    ///
    /// ```rust
    /// use pns_rs::geometry::{Contour, OuterBoundaryGeometry};
    ///
    /// let outer = OuterBoundaryGeometry::cone(45.0, 10.0);
    /// assert!((outer.radius(4.0).unwrap() - 4.0).abs() < 1e-12);
    /// assert!((outer.slope(4.0).unwrap() - 1.0).abs() < 1e-12);
    /// ```
    pub fn cone(half_angle_degrees: f64, length: f64) -> Self {
        let tan_theta = half_angle_degrees.to_radians().tan();
        let curve = GeometryCurve::new(
            "conical outer boundary",
            vec![PolySegment::new(0.0, length, vec![length * tan_theta, 0.0])],
        );
        Self::new(curve, length)
    }

    /// Cylindrical outer boundary of constant radius
    pub fn cylinder(radius: f64, length: f64) -> Self {
        let curve = GeometryCurve::new(
            "cylindrical outer boundary",
            vec![PolySegment::constant(0.0, length, radius)],
        );
        Self::new(curve, length)
    }

    /// Underlying curve
    pub fn curve(&self) -> &GeometryCurve {
        &self.curve
    }
}

impl Contour for OuterBoundaryGeometry {
    fn name(&self) -> &str {
        self.curve.name()
    }

    fn radius(&self, x: f64) -> PnsResult<f64> {
        self.curve.radius(x)
    }

    fn slope(&self, x: f64) -> PnsResult<f64> {
        self.curve.slope(x)
    }

    fn curvature(&self, x: f64) -> PnsResult<f64> {
        self.curve.curvature(x)
    }

    fn reference_length(&self) -> f64 {
        self.reference_length
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_ogive_cylinder_layout() {
        let body = BodyGeometry::ogive_cylinder();
        let segments = body.curve().segments();

        assert_eq!(segments.len(), 3);
        assert_eq!(segments[1].degree(), 4);
        assert_relative_eq!(segments[0].start(), 0.0);
        assert_relative_eq!(segments[2].end(), body.reference_length(), epsilon = 1e-12);
        assert_relative_eq!(body.start(), segments[1].start(), epsilon = 1e-12);
    }

    #[test]
    fn test_ogive_cylinder_cone_tip_at_origin() {
        let body = BodyGeometry::ogive_cylinder();
        assert_eq!(body.radius(0.0).unwrap(), 0.0);
        assert!(body.slope(0.0).unwrap() > 0.0);
    }

    #[test]
    fn test_ogive_cylinder_ends_flat() {
        let body = BodyGeometry::ogive_cylinder();
        let end = body.reference_length();
        assert_relative_eq!(body.radius(end).unwrap(), 4.25, epsilon = 1e-12);
        assert_eq!(body.slope(end).unwrap(), 0.0);
    }

    #[test]
    fn test_cone_outer_boundary() {
        let outer = OuterBoundaryGeometry::cone(22.0, 50.0);
        let tan = 22f64.to_radians().tan();
        assert_relative_eq!(outer.radius(10.0).unwrap(), 10.0 * tan, epsilon = 1e-12);
        assert_relative_eq!(outer.slope(49.0).unwrap(), tan, epsilon = 1e-12);
        assert_eq!(outer.curvature(25.0).unwrap(), 0.0);
        assert!(outer.radius(50.5).is_err());
    }

    #[test]
    fn test_cylinder_body() {
        let body = BodyGeometry::cylinder(0.1, 1.0, 0.2);
        assert_eq!(body.radius(0.7).unwrap(), 0.1);
        assert_eq!(body.slope(0.7).unwrap(), 0.0);
        assert_relative_eq!(body.start_station(), 0.2);
    }

    #[test]
    #[should_panic(expected = "outside body length")]
    fn test_start_beyond_body_panics() {
        BodyGeometry::cylinder(0.1, 1.0, 1.5);
    }
}
