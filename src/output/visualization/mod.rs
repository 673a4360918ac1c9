//! Plotting of solver snapshots and geometry using plotters
//!
//! - [`plot_profiles`]: radial profiles of one snapshot against `η`
//! - [`plot_contours`]: body and outer-boundary contours
//!
//! Customisation goes through [`PlotConfig`].

pub mod config;
pub mod profiles;

pub use config::{IntoOptionalTitle, PlotConfig, NO_TITLE};
pub use profiles::{plot_contours, plot_profiles, ProfileQuantity};
