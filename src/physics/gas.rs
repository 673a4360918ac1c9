//! Perfect-gas free stream
//!
//! All flow quantities are nondimensionalized by the free-stream density and
//! velocity, so the free stream itself is `ρ = 1, u = 1, v = 0` and the only
//! free parameters are the Mach number and the viscosity scaling. Pressure
//! is scaled by `ρ∞U∞²` and enthalpy by `U∞²`.

use crate::physics::state::FlowRow;

/// Ratio of specific heats (air)
pub const GAMMA: f64 = 1.4;

/// Free-stream reference conditions
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FreeStream {
    mach: f64,
    total_enthalpy: f64,
    pressure: f64,
    /// Nondimensional free-stream viscosity
    viscosity: f64,
    /// Dimensional reference temperature (K), informational
    reference_temperature: f64,
    /// Reference Reynolds number, informational
    reference_reynolds: f64,
    /// Dimensional reference viscosity, informational
    reference_viscosity: f64,
}

impl FreeStream {
    /// Free stream at Mach `mach` with nondimensional viscosity `viscosity`
    ///
    /// Stagnation enthalpy and static pressure follow from the perfect-gas
    /// relations: `H∞ = (1 + 2/((γ−1)M²))/2` and `p∞ = 1/(γM²)`.
    ///
    /// # Panics
    ///
    /// Panics if `mach` is not positive.
    ///
    /// # Example
    ///
    /// ```rust
    /// use pns_rs::physics::FreeStream;
    ///
    /// let free = FreeStream::new(5.95, 2e-5);
    /// assert!((free.pressure() - 1.0 / (1.4 * 5.95 * 5.95)).abs() < 1e-15);
    /// ```
    pub fn new(mach: f64, viscosity: f64) -> Self {
        assert!(mach > 0.0, "Mach number must be positive, got {}", mach);

        let m2 = mach * mach;
        Self {
            mach,
            total_enthalpy: (1.0 + 2.0 / ((GAMMA - 1.0) * m2)) / 2.0,
            pressure: 1.0 / (GAMMA * m2),
            viscosity,
            reference_temperature: 0.0,
            reference_reynolds: 0.0,
            reference_viscosity: 0.0,
        }
    }

    /// Attach the dimensional reference values carried by a case file
    ///
    /// They are reported but do not enter the nondimensional equations.
    pub fn with_reference(mut self, temperature: f64, reynolds: f64, viscosity: f64) -> Self {
        self.reference_temperature = temperature;
        self.reference_reynolds = reynolds;
        self.reference_viscosity = viscosity;
        self
    }

    // ======================================== Accessors =========================================

    /// Free-stream Mach number
    pub fn mach(&self) -> f64 {
        self.mach
    }

    /// Stagnation enthalpy `H∞`
    pub fn total_enthalpy(&self) -> f64 {
        self.total_enthalpy
    }

    /// Static pressure `p∞`
    pub fn pressure(&self) -> f64 {
        self.pressure
    }

    /// Nondimensional viscosity `μ∞`
    pub fn viscosity(&self) -> f64 {
        self.viscosity
    }

    /// Reference temperature (K)
    pub fn reference_temperature(&self) -> f64 {
        self.reference_temperature
    }

    /// Reference Reynolds number
    pub fn reference_reynolds(&self) -> f64 {
        self.reference_reynolds
    }

    /// Reference viscosity
    pub fn reference_viscosity(&self) -> f64 {
        self.reference_viscosity
    }

    // ========================================= Relations ========================================

    /// Uniform free-stream row `(1, 1, 0, p∞)`
    pub fn row(&self) -> FlowRow {
        FlowRow::new(1.0, 1.0, 0.0, self.pressure)
    }

    /// Viscosity at nondimensional station `x`
    ///
    /// Linear in `x`; the wall distance growth is folded into the scaling.
    pub fn station_viscosity(&self, x: f64) -> f64 {
        self.viscosity * x
    }

    /// Density of gas at rest with pressure `p` and stagnation enthalpy `H∞`
    ///
    /// `ρ = γp/((γ−1)H∞)`; used for the adiabatic wall.
    pub fn wall_density(&self, pressure: f64) -> f64 {
        GAMMA * pressure / ((GAMMA - 1.0) * self.total_enthalpy)
    }

    // ======================================== Diagnostics =======================================

    /// Static enthalpy `h = H∞ − ½(u² + v²)`
    pub fn static_enthalpy(&self, row: &FlowRow) -> f64 {
        self.total_enthalpy - 0.5 * row.speed_squared()
    }

    /// Local Mach number `√((u² + v²)/((γ−1)h))`
    ///
    /// `None` when the static enthalpy is not positive.
    pub fn local_mach(&self, row: &FlowRow) -> Option<f64> {
        let h = self.static_enthalpy(row);
        (h > 0.0).then(|| (row.speed_squared() / ((GAMMA - 1.0) * h)).sqrt())
    }

    /// Pitot total-pressure ratio relative to the free stream
    ///
    /// `p/p∞ · (M/M∞)^7 · ((7M∞² − 1)/(7M² − 1))^2.5`, the normal-shock
    /// total pressure behind the local state over the free-stream one.
    /// `None` when the local Mach is undefined or below the `7M² > 1` limit.
    pub fn total_pressure_ratio(&self, row: &FlowRow) -> Option<f64> {
        let m = self.local_mach(row)?;
        let denominator = 7.0 * m * m - 1.0;
        if denominator <= 0.0 {
            return None;
        }

        let numerator = 7.0 * self.mach * self.mach - 1.0;
        Some(row.p / self.pressure * (m / self.mach).powi(7) * (numerator / denominator).powf(2.5))
    }
}
