//! CSV export of flow-field snapshots
//!
//! Two entry points:
//!
//! - [`export_snapshot_csv`]: one snapshot, one file, one line per grid row
//! - [`SnapshotCsvWriter`]: a [`SnapshotObserver`] appending every snapshot
//!   of a run to a single long-format file (one line per row per snapshot)
//!
//! # Columns
//!
//! | Column | Meaning |
//! |---|---|
//! | `x` | axial station (history file only) |
//! | `iteration` | sweep counter (history file only) |
//! | `phase` | `relaxing` / `marching` (history file only) |
//! | `index` | radial row, 1 = body |
//! | `eta` | body-fitted coordinate |
//! | `rho`, `u`, `v`, `p` | primitive variables |
//! | `h` | static enthalpy |
//! | `mach` | local Mach number |
//! | `pt_ratio` | Pitot total-pressure ratio (empty where undefined) |
//!
//! # Example
//!
//! ```rust,ignore
//! use pns_rs::output::export::{export_snapshot_csv, CsvConfig, CsvMetadata};
//!
//! let config = CsvConfig::default().with_metadata(CsvMetadata::from_configuration("ogive", solver.configuration()));
//! export_snapshot_csv(&solver.snapshot(), "final.csv", Some(&config))?;
//! ```
//!
//! **Output** (`final.csv`):
//! ```csv
//! # PNS Marching Solution
//! # Generated: 2026-02-11T15:30:00+00:00
//! # Case: ogive
//! # Mach: 5.95
//! #
//! index,eta,rho,u,v,p,h,mach,pt_ratio
//! 1,0.000000,...
//! ```

use std::error::Error;
use std::fs::File;
use std::io::{BufWriter, Write};

use crate::physics::{FlowRow, FreeStream};
use crate::solver::{MarchingConfiguration, Snapshot, SnapshotObserver};

// =============================================================================
// Configuration Structures
// =============================================================================

/// Configuration for CSV export
///
/// # Example
///
/// ```rust,ignore
/// let config = CsvConfig {
///     delimiter: ';',
///     precision: 10,
///     ..Default::default()
/// };
/// ```
#[derive(Debug, Clone)]
pub struct CsvConfig {
    /// Column delimiter (default: ',')
    pub delimiter: char,

    /// Decimal separator (default: '.')
    pub decimal_separator: char,

    /// Number of decimal places for floating-point values (default: 6)
    pub precision: usize,

    /// Include metadata header comments (default: false)
    pub include_metadata: bool,

    /// Metadata to include in header
    pub metadata: Option<CsvMetadata>,
}

impl Default for CsvConfig {
    fn default() -> Self {
        Self {
            delimiter: ',',
            decimal_separator: '.',
            precision: 6,
            include_metadata: false,
            metadata: None,
        }
    }
}

impl CsvConfig {
    /// European CSV format (semicolon, comma for decimal)
    pub fn european() -> Self {
        Self {
            delimiter: ';',
            decimal_separator: ',',
            ..Default::default()
        }
    }

    /// High precision (12 decimal places)
    pub fn high_precision() -> Self {
        Self {
            precision: 12,
            ..Default::default()
        }
    }

    /// Builder pattern: set delimiter
    pub fn delimiter(mut self, delimiter: char) -> Self {
        self.delimiter = delimiter;
        self
    }

    /// Builder pattern: set precision
    pub fn precision(mut self, precision: usize) -> Self {
        self.precision = precision;
        self
    }

    /// Builder pattern: enable metadata
    pub fn with_metadata(mut self, metadata: CsvMetadata) -> Self {
        self.include_metadata = true;
        self.metadata = Some(metadata);
        self
    }
}

/// Metadata for CSV header comments
///
/// Only the fields that are set appear in the header.
#[derive(Debug, Clone, Default)]
pub struct CsvMetadata {
    /// Case name
    pub case_name: Option<String>,

    /// Free-stream Mach number
    pub mach: Option<f64>,

    /// Radial grid points
    pub radial_points: Option<usize>,

    /// Initial marching step
    pub step_size: Option<f64>,

    /// Outer-boundary half-angle (degrees)
    pub outer_half_angle: Option<f64>,

    /// Additional custom parameters
    pub custom: Vec<(String, String)>,
}

impl CsvMetadata {
    /// Metadata describing a run configuration
    pub fn from_configuration(case_name: &str, config: &MarchingConfiguration) -> Self {
        Self {
            case_name: Some(case_name.to_string()),
            mach: Some(config.mach),
            radial_points: Some(config.radial_points),
            step_size: Some(config.step_size),
            outer_half_angle: Some(config.outer_half_angle),
            custom: Vec::new(),
        }
    }

    /// Add custom parameter
    pub fn add_custom(&mut self, key: String, value: String) {
        self.custom.push((key, value));
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Write metadata header comments
fn write_metadata_header<W: Write>(out: &mut W, metadata: &CsvMetadata) -> Result<(), Box<dyn Error>> {
    writeln!(out, "# PNS Marching Solution")?;
    writeln!(out, "# Generated: {}", chrono::Utc::now().to_rfc3339())?;

    if let Some(case) = &metadata.case_name {
        writeln!(out, "# Case: {}", case)?;
    }
    if let Some(mach) = metadata.mach {
        writeln!(out, "# Mach: {}", mach)?;
    }
    if let Some(points) = metadata.radial_points {
        writeln!(out, "# Radial Points: {}", points)?;
    }
    if let Some(step) = metadata.step_size {
        writeln!(out, "# Initial Step: {}", step)?;
    }
    if let Some(angle) = metadata.outer_half_angle {
        writeln!(out, "# Outer Half-Angle: {} deg", angle)?;
    }
    for (key, value) in &metadata.custom {
        writeln!(out, "# {}: {}", key, value)?;
    }

    writeln!(out, "#")?;
    Ok(())
}

/// Format number with configured precision and decimal separator
fn format_number(value: f64, config: &CsvConfig) -> String {
    let formatted = format!("{:.prec$}", value, prec = config.precision);

    if config.decimal_separator != '.' {
        formatted.replace('.', &config.decimal_separator.to_string())
    } else {
        formatted
    }
}

fn format_optional(value: Option<f64>, config: &CsvConfig) -> String {
    value.map(|v| format_number(v, config)).unwrap_or_default()
}

const ROW_HEADERS: [&str; 9] = ["index", "eta", "rho", "u", "v", "p", "h", "mach", "pt_ratio"];

/// Row columns from `index` onwards, delimited
fn format_row(index: usize, eta: f64, row: &FlowRow, free: &FreeStream, config: &CsvConfig) -> String {
    let d = config.delimiter;
    let mach = if index == 1 { Some(0.0) } else { free.local_mach(row) };
    let ratio = if index == 1 { None } else { free.total_pressure_ratio(row) };

    [
        index.to_string(),
        format_number(eta, config),
        format_number(row.rho, config),
        format_number(row.u, config),
        format_number(row.v, config),
        format_number(row.p, config),
        format_number(free.static_enthalpy(row), config),
        format_optional(mach, config),
        format_optional(ratio, config),
    ]
    .join(&d.to_string())
}

// =============================================================================
// Export Functions
// =============================================================================

/// Export one snapshot to CSV
///
/// # Errors
///
/// - NaN or Inf values in the field
/// - File creation or write errors
pub fn export_snapshot_csv(
    snapshot: &Snapshot<'_>,
    output_path: &str,
    configuration: Option<&CsvConfig>,
) -> Result<(), Box<dyn Error>> {
    if snapshot.field.rows().any(|(_, row)| !row.is_finite()) {
        return Err("Invalid data: NaN or Inf detected in flow field".into());
    }

    let binding = CsvConfig::default();
    let configuration = configuration.unwrap_or(&binding);

    let mut file = BufWriter::new(File::create(output_path)?);

    if configuration.include_metadata
        && let Some(metadata) = &configuration.metadata
    {
        write_metadata_header(&mut file, metadata)?;
        writeln!(file, "# x: {}", snapshot.x)?;
        writeln!(file, "# Iteration: {}", snapshot.iteration)?;
    }

    writeln!(file, "{}", ROW_HEADERS.join(&configuration.delimiter.to_string()))?;

    for (index, row) in snapshot.field.rows() {
        let line = format_row(index, snapshot.field.eta(index), &row, snapshot.free_stream, configuration);
        writeln!(file, "{}", line)?;
    }

    file.flush()?;
    Ok(())
}

/// Snapshot observer collecting a whole run into one CSV file
///
/// The first write error is kept and later snapshots are dropped;
/// [`finish`](SnapshotCsvWriter::finish) reports it.
///
/// # Example
///
/// ```rust,ignore
/// let mut history = SnapshotCsvWriter::create("history.csv", None)?;
/// solver.run(&mut history)?;
/// let snapshots = history.finish()?;
/// ```
pub struct SnapshotCsvWriter {
    out: BufWriter<File>,
    config: CsvConfig,
    written: usize,
    error: Option<Box<dyn Error>>,
}

impl SnapshotCsvWriter {
    /// Create the file and write the header
    pub fn create(output_path: &str, configuration: Option<&CsvConfig>) -> Result<Self, Box<dyn Error>> {
        let config = configuration.cloned().unwrap_or_default();
        let mut out = BufWriter::new(File::create(output_path)?);

        if config.include_metadata
            && let Some(metadata) = &config.metadata
        {
            write_metadata_header(&mut out, metadata)?;
        }

        let d = config.delimiter.to_string();
        writeln!(out, "x{d}iteration{d}phase{d}{}", ROW_HEADERS.join(&d))?;

        Ok(Self { out, config, written: 0, error: None })
    }

    /// Snapshots written so far
    pub fn written(&self) -> usize {
        self.written
    }

    fn write(&mut self, snapshot: &Snapshot<'_>) -> Result<(), Box<dyn Error>> {
        let d = self.config.delimiter;
        let prefix = format!(
            "{}{d}{}{d}{}{d}",
            format_number(snapshot.x, &self.config),
            snapshot.iteration,
            snapshot.phase
        );

        for (index, row) in snapshot.field.rows() {
            let line = format_row(index, snapshot.field.eta(index), &row, snapshot.free_stream, &self.config);
            writeln!(self.out, "{}{}", prefix, line)?;
        }
        Ok(())
    }

    /// Flush the file; returns the number of snapshots written
    pub fn finish(mut self) -> Result<usize, Box<dyn Error>> {
        if let Some(error) = self.error.take() {
            return Err(error);
        }
        self.out.flush()?;
        Ok(self.written)
    }
}

impl SnapshotObserver for SnapshotCsvWriter {
    fn observe(&mut self, snapshot: &Snapshot<'_>) {
        if self.error.is_some() {
            return;
        }
        match self.write(snapshot) {
            Ok(()) => self.written += 1,
            Err(error) => {
                log::warn!("CSV snapshot export failed: {}", error);
                self.error = Some(error);
            }
        }
    }
}

// =================================================================================================
// Tests
// =================================================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::physics::FlowField;
    use crate::solver::MarchPhase;
    use std::fs;
    use tempfile::NamedTempFile;

    fn field_and_free() -> (FlowField, FreeStream) {
        let free = FreeStream::new(5.95, 0.0);
        (FlowField::free_stream(5, &free), free)
    }

    fn snapshot<'a>(field: &'a FlowField, free: &'a FreeStream, x: f64) -> Snapshot<'a> {
        Snapshot {
            field,
            free_stream: free,
            x,
            iteration: 7,
            phase: MarchPhase::Marching,
            residual: 0.0,
        }
    }

    #[test]
    fn test_export_snapshot_rows() {
        let (field, free) = field_and_free();
        let temp = NamedTempFile::new().unwrap();
        let path = temp.path().to_str().unwrap();

        export_snapshot_csv(&snapshot(&field, &free, 0.3), path, None).unwrap();

        let content = fs::read_to_string(path).unwrap();
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(lines.len(), 1 + 5);
        assert_eq!(lines[0], "index,eta,rho,u,v,p,h,mach,pt_ratio");
        assert!(lines[1].starts_with("1,0.000000,"));
        // no Pitot ratio on the wall
        assert!(lines[1].ends_with(','));
        assert!(lines[5].starts_with("5,1.000000,1.000000,1.000000,0.000000,"));
        assert!(lines[5].contains(",5.950000,1.000000"));
    }

    #[test]
    fn test_export_with_metadata_and_european_format() {
        let (field, free) = field_and_free();
        let temp = NamedTempFile::new().unwrap();
        let path = temp.path().to_str().unwrap();

        let metadata = CsvMetadata::from_configuration("flat plate", &MarchingConfiguration::default());
        let config = CsvConfig::european().with_metadata(metadata);
        export_snapshot_csv(&snapshot(&field, &free, 0.3), path, Some(&config)).unwrap();

        let content = fs::read_to_string(path).unwrap();
        assert!(content.starts_with("# PNS Marching Solution"));
        assert!(content.contains("# Case: flat plate"));
        assert!(content.contains("# Mach: 5.95"));
        assert!(content.contains("index;eta;rho;u;v;p;h;mach;pt_ratio"));
        assert!(content.contains("5;1,000000;1,000000"));
    }

    #[test]
    fn test_export_rejects_non_finite_field() {
        let (mut field, free) = field_and_free();
        field.set_row(2, FlowRow::new(f64::NAN, 1.0, 0.0, 0.1));
        let temp = NamedTempFile::new().unwrap();

        let result = export_snapshot_csv(&snapshot(&field, &free, 0.3), temp.path().to_str().unwrap(), None);
        assert!(result.is_err());
    }

    #[test]
    fn test_history_writer_appends_snapshots() {
        let (field, free) = field_and_free();
        let temp = NamedTempFile::new().unwrap();
        let path = temp.path().to_str().unwrap();

        let mut writer = SnapshotCsvWriter::create(path, None).unwrap();
        writer.observe(&snapshot(&field, &free, 0.2));
        writer.observe(&snapshot(&field, &free, 0.4));
        assert_eq!(writer.written(), 2);
        assert_eq!(writer.finish().unwrap(), 2);

        let content = fs::read_to_string(path).unwrap();
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(lines[0], "x,iteration,phase,index,eta,rho,u,v,p,h,mach,pt_ratio");
        assert_eq!(lines.len(), 1 + 2 * 5);
        assert!(lines[1].starts_with("0.200000,7,marching,1,"));
        assert!(lines[10].starts_with("0.400000,7,marching,5,"));
    }

    #[test]
    fn test_format_number_precision() {
        let config = CsvConfig::default().precision(2);
        assert_eq!(format_number(1.23456, &config), "1.23");
        assert_eq!(format_optional(None, &config), "");
    }
}
