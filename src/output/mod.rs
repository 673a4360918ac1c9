//! Output of solver snapshots
//!
//! Everything here consumes [`Snapshot`](crate::solver::Snapshot) views
//! and never touches solver state:
//! - **Table**: the classic console listing of a snapshot
//! - **Export**: CSV files for external analysis
//! - **Visualization**: PNG/SVG profile plots using plotters
//!
//! # Architecture
//!
//! ```text
//! output/
//! ├── mod.rs              ← This file
//! ├── table.rs            ← Console table
//! ├── visualization/      ← Plots
//! │   ├── mod.rs
//! │   ├── config.rs
//! │   └── profiles.rs
//! └── export/             ← Data export
//!     ├── mod.rs
//!     └── csv.rs
//! ```
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use pns_rs::output::{plot_profiles, FlowTable, ProfileQuantity, SnapshotCsvWriter};
//!
//! let mut table = FlowTable::new(std::io::stdout());
//! solver.run(&mut table)?;
//!
//! plot_profiles(&solver.snapshot(), &[ProfileQuantity::PressureRatio], "pressure.png", None)?;
//! ```

pub mod table;
pub mod visualization;
pub mod export;

pub use table::{write_snapshot, FlowTable};

pub use visualization::{plot_contours, plot_profiles, PlotConfig, ProfileQuantity};

pub use export::{export_snapshot_csv, CsvConfig, CsvMetadata, SnapshotCsvWriter};
