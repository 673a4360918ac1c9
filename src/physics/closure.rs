//! Primitive-variable recovery
//!
//! The marched quantities are the axial fluxes of mass, axial momentum and
//! radial momentum. Dividing them by the local radius gives the densities
//!
//! ```text
//! A = ρu        B = ρu² + p        C = ρuv
//! ```
//!
//! Together with the stagnation enthalpy `H∞` they determine `(ρ, u, v, p)`.
//! Writing `Mx = ρu²/(γp)` (the axial Mach number squared) and
//! `K = H∞ − ½(C/A)²`, the perfect-gas relations reduce to a quadratic in
//! `Mx` whose discriminant vanishes at the sonic point `Mx = 1`, where the
//! group `φ = 0.8·K·A²/(1.4·B²)` reaches `φ_max = 1.4/2.4`. The supersonic
//! root is always taken.
//!
//! Near the wall the axial Mach number can drop towards one. Once any row
//! gets within 5% of the sonic limit a [`SonicLatch`] is set, and from then
//! on the first row off the body is evaluated exactly at the sonic point.

use crate::error::ClosureFailure;
use crate::physics::gas::GAMMA;
use crate::physics::state::FlowRow;

/// Sonic limit of `φ`
pub const PHI_MAX: f64 = GAMMA / (GAMMA + 1.0);

/// Fraction of [`PHI_MAX`] above which the sonic latch sets
pub const LATCH_FRACTION: f64 = 0.95;

/// Row whose `φ` is pinned to [`PHI_MAX`] once latched (first row off the body)
pub const LATCHED_ROW: usize = 2;

/// Conserved densities `(A, B, C)` of one row
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ConservedDensities {
    /// Mass flux density `ρu`
    pub a: f64,
    /// Axial momentum density `ρu² + p`
    pub b: f64,
    /// Radial momentum flux density `ρuv`
    pub c: f64,
}

impl ConservedDensities {
    pub fn new(a: f64, b: f64, c: f64) -> Self {
        Self { a, b, c }
    }

    /// Densities carried by a primitive row
    pub fn from_row(row: &FlowRow) -> Self {
        let a = row.rho * row.u;
        Self {
            a,
            b: a * row.u + row.p,
            c: a * row.v,
        }
    }

    /// Densities from radius-weighted fluxes `r·(A, B, C)`
    pub fn from_weighted(flux: [f64; 3], radius: f64) -> Self {
        Self {
            a: flux[0] / radius,
            b: flux[1] / radius,
            c: flux[2] / radius,
        }
    }

    fn is_finite(&self) -> bool {
        self.a.is_finite() && self.b.is_finite() && self.c.is_finite()
    }
}

/// Outcome of one closure evaluation
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClosureResult {
    /// Recovered primitives
    pub row: FlowRow,
    /// Similarity group actually used (after latching)
    pub phi: f64,
    /// Axial Mach number squared
    pub mach_axial_sq: f64,
    /// `φ` was beyond the sonic limit and the discriminant root was set to zero
    pub clamped: bool,
}

/// Run-wide "locally sonic" flag
///
/// Never clears once set. One latch belongs to one solver run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SonicLatch {
    locked: bool,
}

impl SonicLatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_locked(&self) -> bool {
        self.locked
    }

    /// Record `φ`; returns `true` if this call set the latch
    fn observe(&mut self, phi: f64) -> bool {
        if !self.locked && phi > LATCH_FRACTION * PHI_MAX {
            self.locked = true;
            return true;
        }
        false
    }
}

/// Recover `(ρ, u, v, p)` from conserved densities at radial row `index`
///
/// # Errors
///
/// Fails when `A ≤ 0`, `B ≤ 0`, `φ` is at or below the hypersonic limit
/// `(γ−1)/γ`, the recovered pressure or density is not positive,
/// or anything along the way is not finite.
///
/// # Example
///
/// ```rust
/// use pns_rs::physics::{recover_primitives, ConservedDensities, FlowRow, SonicLatch};
///
/// let row = FlowRow::new(1.0, 1.0, 0.0, 1.0 / (1.4 * 36.0));
/// let total_enthalpy = (1.0 + 2.0 / (0.4 * 36.0)) / 2.0;
/// let mut latch = SonicLatch::new();
///
/// let result = recover_primitives(ConservedDensities::from_row(&row), total_enthalpy, 5, &mut latch).unwrap();
/// assert!((result.row.p - row.p).abs() < 1e-12);
/// assert!((result.mach_axial_sq - 36.0).abs() < 1e-9);
/// ```
pub fn recover_primitives(
    densities: ConservedDensities,
    total_enthalpy: f64,
    index: usize,
    latch: &mut SonicLatch,
) -> Result<ClosureResult, ClosureFailure> {
    if !densities.is_finite() || !total_enthalpy.is_finite() {
        return Err(ClosureFailure::NonFinite);
    }
    let ConservedDensities { a, b, c } = densities;
    if a <= 0.0 {
        return Err(ClosureFailure::NonPositiveMassFlux(a));
    }
    if b <= 0.0 {
        return Err(ClosureFailure::NonPositiveMomentum(b));
    }

    let v = c / a;
    let k = total_enthalpy - 0.5 * v * v;
    let mut phi = (GAMMA - 1.0) * 2.0 * k * a * a / (GAMMA * b * b);

    if latch.observe(phi) {
        log::warn!(
            "Sonic limit approached at row {} (phi = {:.5}, limit {:.5}), latching near-wall row",
            index,
            phi,
            PHI_MAX
        );
    }
    if index == LATCHED_ROW && latch.is_locked() {
        phi = PHI_MAX;
    }

    let clamped = phi > PHI_MAX;
    let root = if phi < PHI_MAX {
        (1.0 - phi - phi / GAMMA).max(0.0).sqrt()
    } else {
        0.0
    };

    // φ tends to (γ−1)/γ as Mx → ∞; no real state lies below it
    let denominator = GAMMA * phi - (GAMMA - 1.0);
    if denominator <= 0.0 {
        return Err(ClosureFailure::BelowHypersonicLimit(phi));
    }

    let mach_axial_sq = (1.0 - phi + root) / denominator;
    let p = b / (1.0 + GAMMA * mach_axial_sq);
    let enthalpy = k / (1.0 + 0.5 * (GAMMA - 1.0) * mach_axial_sq);
    let rho = GAMMA * p / ((GAMMA - 1.0) * enthalpy);

    if !(mach_axial_sq.is_finite() && p.is_finite() && rho.is_finite()) {
        return Err(ClosureFailure::NonFinite);
    }
    if p <= 0.0 {
        return Err(ClosureFailure::NonPositivePressure(p));
    }
    if rho <= 0.0 {
        return Err(ClosureFailure::NonPositiveDensity(rho));
    }

    Ok(ClosureResult {
        row: FlowRow::new(rho, a / rho, v, p),
        phi,
        mach_axial_sq,
        clamped,
    })
}
