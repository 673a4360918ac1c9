//! Space-marching solver
//!
//! The solver marches the axisymmetric PNS equations downstream with
//! MacCormack's predictor-corrector scheme.
//!
//! # Module Organization
//!
//! - **`config`**: [`MarchingConfiguration`], the inputs of a run
//! - **`station`**: station geometry cache and coordinate metrics
//! - **`window`**: [`PredictorWindow`], the rolling store of predicted rows
//! - **`sweep`**: one predictor-corrector radial sweep with boundary rows
//! - **`marching`**: [`MarchingSolver`] and its relaxing/marching state
//!   machine, snapshot observers and the run summary
//!
//! # Workflow
//!
//! ```text
//! ┌──────────────────────┐   ┌──────────────────────┐
//! │ Body geometry        │   │ Outer boundary       │
//! └──────────┬───────────┘   └──────────┬───────────┘
//!            └────────────┬─────────────┘
//!                ┌────────▼────────┐
//!                │ Station pair    │ ← radii, slopes, μ at x₁ and x₂
//!                └────────┬────────┘
//!                ┌────────▼────────┐
//!                │ Radial sweep    │ ← predictor, closure, corrector
//!                └────────┬────────┘
//!                ┌────────▼────────┐
//!                │ State machine   │ ← relax / march / stop, snapshots
//!                └─────────────────┘
//! ```
//!
//! # Example
//!
//! ```rust,no_run
//! use pns_rs::geometry::{BodyGeometry, Contour, OuterBoundaryGeometry};
//! use pns_rs::solver::{MarchingConfiguration, MarchingSolver, Snapshot};
//!
//! let body = BodyGeometry::ogive_cylinder();
//! let outer = OuterBoundaryGeometry::cone(22.0, body.reference_length());
//! let config = MarchingConfiguration::ogive_cylinder_case();
//!
//! let mut solver = MarchingSolver::new(config, &body, &outer).unwrap();
//! let result = solver
//!     .run(&mut |snapshot: &Snapshot<'_>| println!("x = {:.4}", snapshot.x))
//!     .unwrap();
//! println!("stopped at x = {:.4}", result.final_position);
//! ```

pub mod config;
pub mod station;
pub mod window;
pub mod sweep;
pub mod marching;

pub use config::MarchingConfiguration;
pub use station::{GridMetrics, StationGeometry, StationPair};
pub use window::PredictorWindow;
pub use sweep::{sweep, SweepReport};
pub use marching::{
    MarchPhase,
    MarchingResult,
    MarchingSolver,
    Snapshot,
    SnapshotObserver,
    StepReport, };
