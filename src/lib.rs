//! pns-rs: Parabolized Navier-Stokes Space-Marching Solver
//!
//! Computes steady, axisymmetric, supersonic or hypersonic flow of a perfect
//! gas (γ = 1.4) over a slender body of revolution by marching the PNS
//! equations downstream with MacCormack's predictor-corrector scheme.
//!
//! # Architecture
//!
//! pns-rs keeps the same layering as its sibling simulation crates:
//!
//! 1. **Separation of Physics and Numerics**
//!    - [`geometry`] and [`physics`] define the body, the gas and the
//!      closure (what is solved)
//!    - [`solver`] marches them downstream (how it is solved)
//!
//! 2. **Read-only consumers**
//!    - [`output`] prints, exports and plots snapshots through an observer
//!      hook and never touches solver state
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use pns_rs::prelude::*;
//!
//! # fn main() -> Result<(), PnsError> {
//! // 1. Geometry: ogive-cylinder inside a conical outer boundary
//! let body = BodyGeometry::ogive_cylinder();
//! let config = MarchingConfiguration::ogive_cylinder_case();
//! let outer = OuterBoundaryGeometry::cone(config.outer_half_angle, body.reference_length());
//!
//! // 2. Solver
//! let mut solver = MarchingSolver::new(config, &body, &outer)?;
//!
//! // 3. Run, printing the classic table at every snapshot
//! let mut table = FlowTable::new(std::io::stdout());
//! let result = solver.run(&mut table)?;
//!
//! println!("Stopped at x = {:.4}, converged: {}", result.final_position, result.converged);
//! # Ok(())
//! # }
//! ```
//!
//! # Modules
//!
//! - [`error`]: error taxonomy
//! - [`geometry`]: piecewise-polynomial contours
//! - [`physics`]: free stream, closure and flow-field storage
//! - [`solver`]: station metrics, radial sweep and marching state machine
//! - [`output`]: console table, CSV export and plots

pub mod error;

// Core modules
pub mod geometry;
pub mod physics;
pub mod solver;

pub mod output;

pub use error::{ClosureFailure, PnsError, PnsResult};

pub mod prelude {
    //! Convenient imports for common usage
    //!
    //! ```rust
    //! use pns_rs::prelude::*;
    //! ```
    pub use crate::error::{PnsError, PnsResult};
    pub use crate::geometry::{BodyGeometry,
                              Contour,
                              OuterBoundaryGeometry};
    pub use crate::physics::{FlowField,
                             FlowRow,
                             FreeStream};
    pub use crate::solver::{MarchPhase,
                            MarchingConfiguration,
                            MarchingResult,
                            MarchingSolver,
                            Snapshot,
                            SnapshotObserver};
    pub use crate::output::FlowTable;
}
