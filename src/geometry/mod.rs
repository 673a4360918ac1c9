//! Axisymmetric body and outer-boundary geometry
//!
//! Contours are described piecewise by polynomial segments:
//!
//! - [`PolySegment`]: one polynomial on one axial interval
//! - [`GeometryCurve`]: ordered segments, first covering segment answers
//! - [`Contour`]: what the solver queries (radius, slope, curvature,
//!   reference length), implemented by [`BodyGeometry`] and
//!   [`OuterBoundaryGeometry`]
//!
//! Geometry is immutable once built and can be shared between solvers.

pub mod segment;
pub mod curve;
pub mod contour;

pub use segment::PolySegment;
pub use curve::GeometryCurve;
pub use contour::{BodyGeometry, Contour, OuterBoundaryGeometry};
