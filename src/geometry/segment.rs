//! Polynomial geometry segment
//!
//! A segment describes a radius distribution `r(x)` on the axial interval
//! `[x0, x1]` as a polynomial in the normalized coordinate
//!
//! ```text
//! x̄ = (x - x0) / (x1 - x0),     r(x̄) = c₀ x̄ⁿ + c₁ x̄ⁿ⁻¹ + … + cₙ
//! ```
//!
//! Coefficients are stored highest degree first so every evaluation is a
//! single Horner pass. Slope and curvature are the first and second
//! derivatives with respect to the dimensional `x`, hence the `1/L` and
//! `1/L²` scaling.
//!
//! Positions outside the segment yield `None`; the curve combinator decides
//! what to do with that.

/// Slack on the normalized coordinate so stations that land on an end point
/// after floating-point accumulation are still covered.
pub const COVERAGE_TOLERANCE: f64 = 1e-12;

/// Piecewise-polynomial segment of a body or boundary contour
#[derive(Debug, Clone, PartialEq)]
pub struct PolySegment {
    x0: f64,
    x1: f64,
    /// Highest degree first
    coefficients: Vec<f64>,
}

impl PolySegment {
    /// Create a segment on `[x0, x1]`
    ///
    /// # Panics
    ///
    /// Panics if the interval is empty or no coefficient is given.
    ///
    /// # Example
    ///
    /// ```rust
    /// use pns_rs::geometry::PolySegment;
    ///
    /// // 10° cone from the origin: r = 10·tan(10°)·x̄ on [0, 10]
    /// let cone = PolySegment::new(0.0, 10.0, vec![10.0 * 10f64.to_radians().tan(), 0.0]);
    /// assert!((cone.slope(5.0).unwrap() - 10f64.to_radians().tan()).abs() < 1e-12);
    /// assert!(cone.radius(11.0).is_none());
    /// ```
    pub fn new(x0: f64, x1: f64, coefficients: Vec<f64>) -> Self {
        assert!(
            x1 > x0,
            "Segment interval must be increasing, got [{}, {}]",
            x0,
            x1
        );
        assert!(
            !coefficients.is_empty(),
            "Segment needs at least one polynomial coefficient"
        );

        Self { x0, x1, coefficients }
    }

    /// Constant-radius segment (cylinder)
    pub fn constant(x0: f64, x1: f64, radius: f64) -> Self {
        Self::new(x0, x1, vec![radius])
    }

    /// Lower axial bound
    pub fn start(&self) -> f64 {
        self.x0
    }

    /// Upper axial bound
    pub fn end(&self) -> f64 {
        self.x1
    }

    /// Polynomial degree
    pub fn degree(&self) -> usize {
        self.coefficients.len() - 1
    }

    /// Interval length `x1 - x0`
    #[inline]
    fn length(&self) -> f64 {
        self.x1 - self.x0
    }

    /// Normalized coordinate, `None` if `x` is not covered
    pub fn normalized(&self, x: f64) -> Option<f64> {
        let xbar = (x - self.x0) / self.length();

        if !(-COVERAGE_TOLERANCE..=1.0 + COVERAGE_TOLERANCE).contains(&xbar) {
            return None;
        }

        Some(xbar.clamp(0.0, 1.0))
    }

    /// Whether `x` falls inside the segment
    pub fn covers(&self, x: f64) -> bool {
        self.normalized(x).is_some()
    }

    /// Radius at `x`
    pub fn radius(&self, x: f64) -> Option<f64> {
        let xbar = self.normalized(x)?;
        Some(self.horner(xbar, 0))
    }

    /// First derivative `dr/dx` at `x`
    pub fn slope(&self, x: f64) -> Option<f64> {
        let xbar = self.normalized(x)?;
        Some(self.horner(xbar, 1) / self.length())
    }

    /// Second derivative `d²r/dx²` at `x`
    ///
    /// Constant and linear segments have no second-derivative terms and
    /// return exactly zero.
    pub fn curvature(&self, x: f64) -> Option<f64> {
        let xbar = self.normalized(x)?;
        Some(self.horner(xbar, 2) / (self.length() * self.length()))
    }

    /// Horner evaluation of the `order`-th derivative in `x̄`
    fn horner(&self, xbar: f64, order: usize) -> f64 {
        let degree = self.degree();
        if order > degree {
            return 0.0;
        }

        self.coefficients[..=degree - order]
            .iter()
            .enumerate()
            .fold(0.0, |acc, (j, &c)| {
                let power = degree - j;
                // power · (power-1) · … for the derivative order
                let factor: usize = (0..order).map(|k| power - k).product();
                acc * xbar + factor as f64 * c
            })
    }
}
