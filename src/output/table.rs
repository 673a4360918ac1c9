//! Console table of a flow-field snapshot
//!
//! Prints one line per grid row from the outer boundary down to the body:
//! density, velocities, pressure, static enthalpy, local Mach number and a
//! bar of `*` proportional to the Pitot total-pressure ratio (the static
//! pressure on the wall row, where the Mach number is zero).
//!
//! ```text
//! Flow Field Properties
//! Axial Location    0.25000
//!   I      Rho         U          V          P          T          M        Pt
//!  31    1.00000    1.00000    0.00000    0.02018    0.07062    5.95000 ****
//! ...
//! ```

use std::io::{self, Write};

use crate::solver::{MarchPhase, Snapshot, SnapshotObserver};

/// Bar length for a total-pressure ratio
fn bar_length(ratio: f64) -> usize {
    // float-to-int casts saturate, NaN maps to 0
    (ratio / 3.0 * 10.0) as usize + 1
}

/// Write one snapshot as a table
///
/// # Errors
///
/// Propagates I/O errors from `out`.
pub fn write_snapshot<W: Write + ?Sized>(out: &mut W, snapshot: &Snapshot<'_>) -> io::Result<()> {
    let free = snapshot.free_stream;

    writeln!(out, "Flow Field Properties")?;
    match snapshot.phase {
        MarchPhase::Relaxing => writeln!(
            out,
            "Tangent Cone Iteration {:3} ({:10.5})",
            snapshot.iteration, snapshot.residual
        )?,
        _ => writeln!(out, "Axial Location {:10.5}", snapshot.x)?,
    }
    writeln!(
        out,
        "  I      Rho         U          V          P          T          M        Pt"
    )?;

    for (k, row) in snapshot.field.rows().rev() {
        let enthalpy = free.static_enthalpy(&row);
        let (mach, ratio) = if k == 1 {
            (0.0, row.p)
        } else {
            (
                free.local_mach(&row).unwrap_or(0.0),
                free.total_pressure_ratio(&row).unwrap_or(0.0),
            )
        };

        writeln!(
            out,
            " {:2} {:10.5} {:10.5} {:10.5} {:10.5} {:10.5} {:10.5} {}",
            k,
            row.rho,
            row.u,
            row.v,
            row.p,
            enthalpy,
            mach,
            "*".repeat(bar_length(ratio))
        )?;
    }

    Ok(())
}

/// Snapshot observer printing tables to a writer
///
/// Observers cannot fail, so the first I/O error is kept and later
/// snapshots are skipped; [`into_inner`](FlowTable::into_inner) reports it.
///
/// # Example
///
/// ```rust,ignore
/// let mut table = FlowTable::new(std::io::stdout());
/// solver.run(&mut table)?;
/// table.into_inner()?;
/// ```
#[derive(Debug)]
pub struct FlowTable<W: Write> {
    out: W,
    printed: usize,
    error: Option<io::Error>,
}

impl<W: Write> FlowTable<W> {
    pub fn new(out: W) -> Self {
        Self { out, printed: 0, error: None }
    }

    /// Tables written so far
    pub fn printed(&self) -> usize {
        self.printed
    }

    /// Recover the writer, or the first error encountered
    pub fn into_inner(mut self) -> io::Result<W> {
        if let Some(error) = self.error.take() {
            return Err(error);
        }
        self.out.flush()?;
        Ok(self.out)
    }
}

impl<W: Write> SnapshotObserver for FlowTable<W> {
    fn observe(&mut self, snapshot: &Snapshot<'_>) {
        if self.error.is_some() {
            return;
        }
        match write_snapshot(&mut self.out, snapshot) {
            Ok(()) => self.printed += 1,
            Err(error) => {
                log::warn!("Flow table output failed: {}", error);
                self.error = Some(error);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::physics::{FlowField, FreeStream};

    fn snapshot_text(phase: MarchPhase) -> String {
        let free = FreeStream::new(5.95, 0.0);
        let field = FlowField::free_stream(5, &free);
        let snapshot = Snapshot {
            field: &field,
            free_stream: &free,
            x: 0.25,
            iteration: 3,
            phase,
            residual: 0.5,
        };

        let mut out = Vec::new();
        write_snapshot(&mut out, &snapshot).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_table_layout() {
        let text = snapshot_text(MarchPhase::Marching);
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines.len(), 3 + 5);
        assert_eq!(lines[0], "Flow Field Properties");
        assert_eq!(lines[1], "Axial Location    0.25000");
        assert!(lines[3].starts_with("  5    1.00000    1.00000    0.00000"));
        assert!(lines[7].starts_with("  1"));
    }

    #[test]
    fn test_relaxation_header() {
        let text = snapshot_text(MarchPhase::Relaxing);
        assert!(text.contains("Tangent Cone Iteration   3 (   0.50000)"));
    }

    #[test]
    fn test_free_stream_rows_report_free_stream_mach() {
        let text = snapshot_text(MarchPhase::Marching);
        let outer = text.lines().nth(3).unwrap();

        assert!(outer.contains("5.95000"));
        // ratio 1 gives int(10/3) + 1 = 4 stars
        assert!(outer.ends_with(" ****"));
    }

    #[test]
    fn test_bar_length() {
        assert_eq!(bar_length(0.0), 1);
        assert_eq!(bar_length(3.0), 11);
        assert_eq!(bar_length(f64::NAN), 1);
    }

    #[test]
    fn test_observer_counts_tables() {
        let free = FreeStream::new(5.95, 0.0);
        let field = FlowField::free_stream(4, &free);
        let snapshot = Snapshot {
            field: &field,
            free_stream: &free,
            x: 0.1,
            iteration: 0,
            phase: MarchPhase::Relaxing,
            residual: 0.0,
        };

        let mut table = FlowTable::new(Vec::new());
        table.observe(&snapshot);
        table.observe(&snapshot);

        assert_eq!(table.printed(), 2);
        let text = String::from_utf8(table.into_inner().unwrap()).unwrap();
        assert_eq!(text.matches("Flow Field Properties").count(), 2);
    }
}
