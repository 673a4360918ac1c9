//! Ordered collection of polynomial segments
//!
//! Segments are tried in order and the first one covering `x` answers. At a
//! shared end point this means the upstream segment wins. A position no
//! segment covers is an error: a radius that does not exist cannot be fed
//! into the grid metrics.

use crate::error::{PnsError, PnsResult};
use crate::geometry::segment::PolySegment;

/// Piecewise-polynomial contour `r(x)`
#[derive(Debug, Clone, PartialEq)]
pub struct GeometryCurve {
    name: String,
    segments: Vec<PolySegment>,
}

impl GeometryCurve {
    /// Build a curve from ordered segments
    ///
    /// # Panics
    ///
    /// Panics if `segments` is empty.
    pub fn new(name: impl Into<String>, segments: Vec<PolySegment>) -> Self {
        assert!(!segments.is_empty(), "A geometry curve needs at least one segment");
        Self {
            name: name.into(),
            segments,
        }
    }

    /// Curve name (used in error messages)
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Segments in evaluation order
    pub fn segments(&self) -> &[PolySegment] {
        &self.segments
    }

    /// Axial extent `(min x0, max x1)` over all segments
    pub fn domain(&self) -> (f64, f64) {
        self.segments.iter().fold(
            (f64::INFINITY, f64::NEG_INFINITY),
            |(lo, hi), segment| (lo.min(segment.start()), hi.max(segment.end())),
        )
    }

    /// First segment covering `x`
    pub fn segment_at(&self, x: f64) -> Option<&PolySegment> {
        self.segments.iter().find(|segment| segment.covers(x))
    }

    /// Radius at `x`
    pub fn radius(&self, x: f64) -> PnsResult<f64> {
        self.lookup(x, PolySegment::radius)
    }

    /// Slope `dr/dx` at `x`
    pub fn slope(&self, x: f64) -> PnsResult<f64> {
        self.lookup(x, PolySegment::slope)
    }

    /// Curvature `d²r/dx²` at `x`
    pub fn curvature(&self, x: f64) -> PnsResult<f64> {
        self.lookup(x, PolySegment::curvature)
    }

    fn lookup(&self, x: f64, evaluate: fn(&PolySegment, f64) -> Option<f64>) -> PnsResult<f64> {
        self.segments
            .iter()
            .find_map(|segment| evaluate(segment, x))
            .ok_or_else(|| PnsError::GeometryLookup {
                curve: self.name.clone(),
                x,
            })
    }

    /// Sample `count` evenly spaced `(x, r)` points across the domain
    ///
    /// # Example
    ///
    /// ```rust
    /// use pns_rs::geometry::{GeometryCurve, PolySegment};
    ///
    /// let curve = GeometryCurve::new("cylinder", vec![PolySegment::constant(0.0, 2.0, 0.5)]);
    /// let points = curve.sample(5).unwrap();
    /// assert_eq!(points.len(), 5);
    /// assert_eq!(points[4], (2.0, 0.5));
    /// ```
    pub fn sample(&self, count: usize) -> PnsResult<Vec<(f64, f64)>> {
        let (lo, hi) = self.domain();
        if count < 2 {
            return Ok(vec![(lo, self.radius(lo)?)]);
        }

        let dx = (hi - lo) / (count - 1) as f64;
        (0..count)
            .map(|k| {
                // Computed from the index so the last point is exactly `hi`
                let x = if k + 1 == count { hi } else { lo + k as f64 * dx };
                self.radius(x).map(|r| (x, r))
            })
            .collect()
    }
}
