//! Export of flow-field snapshots
//!
//! # Available formats
//!
//! | Format | Module | Entry points |
//! |--------|--------|--------------|
//! | CSV    | [`csv`] | [`export_snapshot_csv`], [`SnapshotCsvWriter`] |
//!
//! # Usage example
//!
//! ```rust,ignore
//! use pns_rs::output::export::{export_snapshot_csv, SnapshotCsvWriter};
//!
//! // Every snapshot of the run in one long-format file
//! let mut history = SnapshotCsvWriter::create("history.csv", None)?;
//! let result = solver.run(&mut history)?;
//! history.finish()?;
//!
//! // Final field only
//! export_snapshot_csv(&solver.snapshot(), "final.csv", None)?;
//! ```

pub mod csv;

pub use csv::{export_snapshot_csv, CsvConfig, CsvMetadata, SnapshotCsvWriter};
