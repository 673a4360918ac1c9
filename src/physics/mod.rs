//! Gas physics of the marching scheme
//!
//! This module holds what the equations are, independent of how they are
//! marched:
//!
//! - **`gas`**: perfect-gas constants and the nondimensional free stream
//!   (`H∞`, `p∞`, viscosity scaling, diagnostic relations)
//! - **`closure`**: recovery of `(ρ, u, v, p)` from the marched conserved
//!   densities, with the sonic latch for the near-wall row
//! - **`state`**: the [`FlowRow`] value type and the [`FlowField`] radial
//!   grid arrays
//!
//! # Nondimensionalization
//!
//! | Quantity | Scale |
//! |---|---|
//! | density | `ρ∞` |
//! | velocity | `U∞` |
//! | pressure | `ρ∞U∞²` |
//! | enthalpy | `U∞²` |
//! | lengths | body reference length |
//!
//! # Example
//!
//! ```rust
//! use pns_rs::physics::{recover_primitives, ConservedDensities, FreeStream, SonicLatch};
//!
//! let free = FreeStream::new(5.95, 2e-5);
//! let densities = ConservedDensities::from_row(&free.row());
//! let mut latch = SonicLatch::new();
//!
//! let result = recover_primitives(densities, free.total_enthalpy(), 10, &mut latch).unwrap();
//! assert!((result.row.u - 1.0).abs() < 1e-10);
//! ```

pub mod gas;
pub mod closure;
pub mod state;

pub use gas::{FreeStream, GAMMA};
pub use closure::{
    recover_primitives,
    ClosureResult,
    ConservedDensities,
    SonicLatch,
    LATCHED_ROW,
    PHI_MAX, };
pub use state::{FlowField, FlowRow};
