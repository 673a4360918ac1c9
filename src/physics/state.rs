//! Flow-field state
//!
//! The field stores primitive variables on the radial grid of one axial
//! station. Indices follow the grid: slot 0 is a ghost point one spacing
//! inside the body, row 1 is the body surface and row `N` the outer
//! boundary. The arrays are allocated once and overwritten in place as the
//! solution marches downstream.

use nalgebra::DVector;

use crate::error::{ClosureFailure, PnsError, PnsResult};
use crate::physics::gas::FreeStream;

// =================================================================================================
// Flow row
// =================================================================================================

/// Primitive variables at one grid point
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FlowRow {
    /// Density
    pub rho: f64,
    /// Axial velocity
    pub u: f64,
    /// Radial velocity
    pub v: f64,
    /// Static pressure
    pub p: f64,
}

impl FlowRow {
    pub fn new(rho: f64, u: f64, v: f64, p: f64) -> Self {
        Self { rho, u, v, p }
    }

    /// `u² + v²`
    pub fn speed_squared(&self) -> f64 {
        self.u * self.u + self.v * self.v
    }

    pub fn is_finite(&self) -> bool {
        self.rho.is_finite() && self.u.is_finite() && self.v.is_finite() && self.p.is_finite()
    }
}

// =================================================================================================
// Flow field
// =================================================================================================

/// Primitive variables on the radial grid
///
/// # Example
///
/// ```rust
/// use pns_rs::physics::{FlowField, FreeStream};
///
/// let free = FreeStream::new(5.95, 2e-5);
/// let field = FlowField::free_stream(31, &free);
///
/// assert_eq!(field.radial_points(), 31);
/// assert_eq!(field.eta(1), 0.0);
/// assert_eq!(field.row(1).u, 0.0);
/// assert_eq!(field.row(31), free.row());
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct FlowField {
    rho: DVector<f64>,
    u: DVector<f64>,
    v: DVector<f64>,
    p: DVector<f64>,
    eta: DVector<f64>,
    delta_eta: f64,
}

impl FlowField {
    /// Uniform free stream with a no-slip starting guess at the body
    ///
    /// # Panics
    ///
    /// Panics if `radial_points < 2`.
    pub fn free_stream(radial_points: usize, free: &FreeStream) -> Self {
        assert!(
            radial_points >= 2,
            "The radial grid needs at least two points, got {}",
            radial_points
        );

        let slots = radial_points + 1;
        let delta_eta = 1.0 / (radial_points - 1) as f64;
        let mut field = Self {
            rho: DVector::from_element(slots, 1.0),
            u: DVector::from_element(slots, 1.0),
            v: DVector::zeros(slots),
            p: DVector::from_element(slots, free.pressure()),
            eta: DVector::from_fn(slots, |k, _| (k as f64 - 1.0) * delta_eta),
            delta_eta,
        };

        field.u[1] = 0.0;
        field.v[1] = 0.0;
        field
    }

    // ======================================== Accessors =========================================

    /// Number of physical rows `N`
    pub fn radial_points(&self) -> usize {
        self.rho.len() - 1
    }

    /// Index of the outer-boundary row
    pub fn outer_index(&self) -> usize {
        self.radial_points()
    }

    /// Uniform spacing `Δη = 1/(N − 1)`
    pub fn delta_eta(&self) -> f64 {
        self.delta_eta
    }

    /// Body-fitted coordinate of row `k`
    pub fn eta(&self, k: usize) -> f64 {
        self.eta[k]
    }

    /// Primitive row `k`
    pub fn row(&self, k: usize) -> FlowRow {
        FlowRow::new(self.rho[k], self.u[k], self.v[k], self.p[k])
    }

    /// Overwrite row `k`
    pub fn set_row(&mut self, k: usize, row: FlowRow) {
        self.rho[k] = row.rho;
        self.u[k] = row.u;
        self.v[k] = row.v;
        self.p[k] = row.p;
    }

    /// Physical rows `1..=N` as `(index, row)` pairs
    pub fn rows(&self) -> impl DoubleEndedIterator<Item = (usize, FlowRow)> + '_ {
        (1..=self.radial_points()).map(move |k| (k, self.row(k)))
    }

    /// Density column (ghost slot included)
    pub fn rho(&self) -> &DVector<f64> {
        &self.rho
    }

    /// Axial velocity column (ghost slot included)
    pub fn u(&self) -> &DVector<f64> {
        &self.u
    }

    /// Radial velocity column (ghost slot included)
    pub fn v(&self) -> &DVector<f64> {
        &self.v
    }

    /// Pressure column (ghost slot included)
    pub fn p(&self) -> &DVector<f64> {
        &self.p
    }

    // ======================================== Validation ========================================

    /// Check every physical row for NaN or infinity
    ///
    /// # Errors
    ///
    /// Returns [`PnsError::NonphysicalState`] naming the first offending row.
    pub fn validate(&self, station: f64) -> PnsResult<()> {
        match self.rows().find(|(_, row)| !row.is_finite()) {
            Some((index, _)) => Err(PnsError::NonphysicalState {
                index,
                station,
                cause: ClosureFailure::NonFinite,
            }),
            None => Ok(()),
        }
    }
}
