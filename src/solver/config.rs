//! Marching configuration
//!
//! A [`MarchingConfiguration`] gathers every input of a run: the free
//! stream, the grid, the marching controls and the snapshot cadence. It is a
//! plain record with public fields, preset constructors, `with_*` setters
//! and a [`validate`](MarchingConfiguration::validate) method called by the
//! solver before anything is allocated.
//!
//! Case files are JSON. Missing keys fall back to the ogive-cylinder preset,
//! and the short legacy names (`minf`, `dxi`, `neta`, ...) are accepted as
//! aliases.
//!
//! ```rust
//! use pns_rs::solver::MarchingConfiguration;
//!
//! let config = MarchingConfiguration::from_json(r#"{ "minf": 4.0, "neta": 21 }"#).unwrap();
//! assert_eq!(config.mach, 4.0);
//! assert_eq!(config.radial_points, 21);
//! assert_eq!(config.max_relaxation_iterations, 750);
//! ```

use serde::{Deserialize, Serialize};

use crate::error::{PnsError, PnsResult};
use crate::geometry::BodyGeometry;
use crate::physics::FreeStream;

/// Default relaxation convergence threshold on `max |Δp|`
pub const DEFAULT_TOLERANCE: f64 = 1e-4;

/// Starting value of the relaxation parameter `β`
pub const DEFAULT_INITIAL_BETA: f64 = -20.0;

/// Geometric growth factor of the marching step
pub const DEFAULT_STEP_GROWTH: f64 = 1.005;

/// Inputs of one marching run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MarchingConfiguration {
    /// Free-stream Mach number
    #[serde(alias = "minf")]
    pub mach: f64,

    /// Reference temperature (K)
    #[serde(alias = "tref")]
    pub reference_temperature: f64,

    /// Reference Reynolds number
    #[serde(alias = "reref")]
    pub reference_reynolds: f64,

    /// Dimensional reference viscosity
    #[serde(alias = "muref")]
    pub reference_viscosity: f64,

    /// Nondimensional free-stream viscosity `μ∞`
    #[serde(alias = "muinf")]
    pub free_stream_viscosity: f64,

    /// Outer-boundary cone half-angle (degrees)
    #[serde(alias = "thetas")]
    pub outer_half_angle: f64,

    /// Initial axial step `Δξ` (nondimensional)
    #[serde(alias = "dxi")]
    pub step_size: f64,

    /// Radial grid points `N`, body and outer boundary included
    #[serde(alias = "neta")]
    pub radial_points: usize,

    /// Relaxation iteration cap
    #[serde(alias = "nitmax")]
    pub max_relaxation_iterations: usize,

    /// Snapshot every this many relaxation iterations
    #[serde(alias = "nplot")]
    pub snapshot_iterations: usize,

    /// Snapshot spacing in `x` while marching
    #[serde(alias = "dplot")]
    pub snapshot_spacing: f64,

    /// Nondimensional position of the first computational station
    pub start_station: f64,

    /// Relaxation convergence threshold on `max |Δp|`
    pub tolerance: f64,

    /// Starting relaxation parameter `β`
    pub initial_beta: f64,

    /// Marching step growth factor (β shrinks by the same factor)
    pub step_growth: f64,
}

impl Default for MarchingConfiguration {
    fn default() -> Self {
        Self::ogive_cylinder_case()
    }
}

impl MarchingConfiguration {
    /// Mach 5.95 ogive-cylinder test case inside a 22° conical boundary
    pub fn ogive_cylinder_case() -> Self {
        Self {
            mach: 5.95,
            reference_temperature: 1464.7157,
            reference_reynolds: 2_179_168.0,
            reference_viscosity: 7.65034e-7,
            free_stream_viscosity: 2e-5,
            outer_half_angle: 22.0,
            step_size: 4e-4,
            radial_points: 31,
            max_relaxation_iterations: 750,
            snapshot_iterations: 25,
            snapshot_spacing: 0.05,
            start_station: BodyGeometry::ogive_cylinder().start_station(),
            tolerance: DEFAULT_TOLERANCE,
            initial_beta: DEFAULT_INITIAL_BETA,
            step_growth: DEFAULT_STEP_GROWTH,
        }
    }

    /// Parse a JSON case and validate it
    ///
    /// # Errors
    ///
    /// [`PnsError::Config`] for malformed JSON,
    /// [`PnsError::InvalidConfiguration`] for rejected values.
    pub fn from_json(json: &str) -> PnsResult<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Serialize to pretty JSON
    pub fn to_json(&self) -> PnsResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Free stream described by this configuration
    pub fn free_stream(&self) -> FreeStream {
        FreeStream::new(self.mach, self.free_stream_viscosity).with_reference(
            self.reference_temperature,
            self.reference_reynolds,
            self.reference_viscosity,
        )
    }

    // ========================================= Setters ==========================================

    pub fn with_mach(mut self, mach: f64) -> Self {
        self.mach = mach;
        self
    }

    pub fn with_viscosity(mut self, free_stream_viscosity: f64) -> Self {
        self.free_stream_viscosity = free_stream_viscosity;
        self
    }

    pub fn with_outer_half_angle(mut self, degrees: f64) -> Self {
        self.outer_half_angle = degrees;
        self
    }

    pub fn with_step_size(mut self, step_size: f64) -> Self {
        self.step_size = step_size;
        self
    }

    pub fn with_radial_points(mut self, radial_points: usize) -> Self {
        self.radial_points = radial_points;
        self
    }

    pub fn with_max_relaxation_iterations(mut self, iterations: usize) -> Self {
        self.max_relaxation_iterations = iterations;
        self
    }

    pub fn with_snapshot_iterations(mut self, iterations: usize) -> Self {
        self.snapshot_iterations = iterations;
        self
    }

    pub fn with_snapshot_spacing(mut self, spacing: f64) -> Self {
        self.snapshot_spacing = spacing;
        self
    }

    pub fn with_start_station(mut self, start_station: f64) -> Self {
        self.start_station = start_station;
        self
    }

    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance;
        self
    }

    pub fn with_initial_beta(mut self, beta: f64) -> Self {
        self.initial_beta = beta;
        self
    }

    pub fn with_step_growth(mut self, growth: f64) -> Self {
        self.step_growth = growth;
        self
    }

    // ======================================== Validation ========================================

    /// Check that the parameters describe a runnable case
    pub fn validate(&self) -> PnsResult<()> {
        let reals = [
            ("mach", self.mach),
            ("reference_temperature", self.reference_temperature),
            ("reference_reynolds", self.reference_reynolds),
            ("reference_viscosity", self.reference_viscosity),
            ("free_stream_viscosity", self.free_stream_viscosity),
            ("outer_half_angle", self.outer_half_angle),
            ("step_size", self.step_size),
            ("snapshot_spacing", self.snapshot_spacing),
            ("start_station", self.start_station),
            ("tolerance", self.tolerance),
            ("initial_beta", self.initial_beta),
            ("step_growth", self.step_growth),
        ];
        if let Some((name, _)) = reals.iter().find(|(_, value)| !value.is_finite()) {
            return Err(invalid(format!("{} is not finite", name)));
        }

        if self.mach <= 1.0 {
            return Err(invalid(format!("Mach number must exceed 1, got {}", self.mach)));
        }
        if self.radial_points < 4 {
            return Err(invalid(format!(
                "at least 4 radial points are required, got {}",
                self.radial_points
            )));
        }
        if self.step_size <= 0.0 || self.step_size >= 1.0 {
            return Err(invalid(format!("step size must lie in (0, 1), got {}", self.step_size)));
        }
        if self.max_relaxation_iterations == 0 {
            return Err(invalid("relaxation iteration cap must be at least 1".to_string()));
        }
        if self.snapshot_iterations == 0 {
            return Err(invalid("snapshot iteration interval must be at least 1".to_string()));
        }
        if self.snapshot_spacing <= 0.0 {
            return Err(invalid(format!(
                "snapshot spacing must be positive, got {}",
                self.snapshot_spacing
            )));
        }
        if !(0.0..1.0).contains(&self.start_station) {
            return Err(invalid(format!(
                "start station must lie in [0, 1), got {}",
                self.start_station
            )));
        }
        if self.tolerance <= 0.0 {
            return Err(invalid(format!("tolerance must be positive, got {}", self.tolerance)));
        }
        if self.step_growth < 1.0 {
            return Err(invalid(format!("step growth must be at least 1, got {}", self.step_growth)));
        }
        if self.free_stream_viscosity < 0.0 {
            return Err(invalid(format!(
                "viscosity must not be negative, got {}",
                self.free_stream_viscosity
            )));
        }
        if self.outer_half_angle <= 0.0 || self.outer_half_angle >= 90.0 {
            return Err(invalid(format!(
                "outer half-angle must lie in (0, 90) degrees, got {}",
                self.outer_half_angle
            )));
        }

        Ok(())
    }
}

fn invalid(message: String) -> PnsError {
    PnsError::InvalidConfiguration(message)
}
