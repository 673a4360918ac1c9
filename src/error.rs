//! Error types for the marching solver
//!
//! Every fallible operation in the crate returns [`PnsResult`]. Geometry and
//! closure failures abort the current run; failing to converge during the
//! relaxation phase is reported through
//! [`MarchingResult`](crate::solver::MarchingResult) rather than as an error,
//! unless the caller asks for it with `into_converged()`.

use thiserror::Error;

/// Result alias used throughout the crate
pub type PnsResult<T> = Result<T, PnsError>;

/// Solver error taxonomy
#[derive(Debug, Error)]
pub enum PnsError {
    /// No geometry segment covers the requested axial position
    #[error("no segment of the {curve} curve covers x = {x}")]
    GeometryLookup {
        /// Name of the curve that was queried
        curve: String,
        /// Dimensional axial position
        x: f64,
    },

    /// The primitive-variable recovery produced (or was fed) a non-physical state
    #[error("non-physical flow state at radial index {index}, station x = {station:.6}: {cause}")]
    NonphysicalState {
        /// Radial row (1 = body surface, N = outer boundary)
        index: usize,
        /// Nondimensional axial station being computed
        station: f64,
        /// What went wrong
        #[source]
        cause: ClosureFailure,
    },

    /// Relaxation phase hit its iteration cap
    #[error("relaxation did not converge after {iterations} iterations (residual {residual:e})")]
    NonConvergence {
        /// Iterations performed
        iterations: usize,
        /// Last maximum pressure change
        residual: f64,
    },

    /// The outer boundary does not enclose the body at some station
    #[error("degenerate grid at x = {x:.6}: outer radius {outer_radius} <= body radius {body_radius}")]
    DegenerateGrid {
        /// Nondimensional axial station
        x: f64,
        /// Nondimensional body radius
        body_radius: f64,
        /// Nondimensional outer-boundary radius
        outer_radius: f64,
    },

    /// Configuration rejected by `validate()`
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),

    /// Malformed JSON case file
    #[error("cannot parse configuration: {0}")]
    Config(#[from] serde_json::Error),
}

/// Reasons the nonlinear closure can reject a set of conserved densities
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum ClosureFailure {
    /// Mass flux density `A = ρu` is not positive
    #[error("mass flux density {0} is not positive")]
    NonPositiveMassFlux(f64),

    /// Momentum density `B = ρu² + p` is not positive
    #[error("momentum density {0} is not positive")]
    NonPositiveMomentum(f64),

    /// `φ` at or below `(γ−1)/γ`, the infinite-Mach limit
    #[error("similarity group phi = {0} is below the hypersonic limit")]
    BelowHypersonicLimit(f64),

    /// Recovered pressure is not positive
    #[error("recovered pressure {0} is not positive")]
    NonPositivePressure(f64),

    /// Recovered density is not positive
    #[error("recovered density {0} is not positive")]
    NonPositiveDensity(f64),

    /// NaN or infinity in the inputs or the recovered state
    #[error("non-finite value encountered")]
    NonFinite,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as _;

    #[test]
    fn test_nonphysical_state_reports_index_and_cause() {
        let error = PnsError::NonphysicalState {
            index: 7,
            station: 0.25,
            cause: ClosureFailure::NonPositiveDensity(-0.5),
        };

        let message = error.to_string();
        assert!(message.contains("radial index 7"));
        assert!(message.contains("0.250000"));
        assert!(error.source().is_some());
    }

    #[test]
    fn test_json_error_converts() {
        let parse: Result<serde_json::Value, _> = serde_json::from_str("{ not json");
        let error: PnsError = parse.unwrap_err().into();
        assert!(matches!(error, PnsError::Config(_)));
    }
}
