//! Marching state machine
//!
//! A run starts by relaxing at a fixed station: the same upstream/downstream
//! pair is swept repeatedly until the largest pressure change drops below the
//! tolerance, which yields the tangent-cone starting profile. The solver
//! then marches: every sweep moves the station pair one step downstream, the
//! step grows geometrically and the bulk-viscosity factor `β` decays by the
//! same factor. The run ends when the next step would leave the body, or
//! when relaxation hits its iteration cap.
//!
//! ```text
//! Relaxing ──(delm ≤ tol)──▶ Marching ──(x₂ > 1 − Δξ)──▶ Terminated
//!     │                                                      ▲
//!     └──────────────(iterations ≥ cap)──────────────────────┘
//! ```
//!
//! Snapshots are offered to a [`SnapshotObserver`] at iteration 0, every
//! `snapshot_iterations` relaxation sweeps and every `snapshot_spacing` in
//! `x` while marching. Observers only get shared references and cannot
//! influence the run.

use std::fmt;

use crate::error::{PnsError, PnsResult};
use crate::geometry::Contour;
use crate::physics::{FlowField, FreeStream, SonicLatch};
use crate::solver::config::MarchingConfiguration;
use crate::solver::station::StationPair;
use crate::solver::sweep::sweep;

// =================================================================================================
// Phase, snapshots, results
// =================================================================================================

/// Where the run is in its life cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MarchPhase {
    /// Iterating at the starting station
    Relaxing,
    /// Advancing downstream
    Marching,
    /// Finished (converged or not)
    Terminated,
}

impl fmt::Display for MarchPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MarchPhase::Relaxing => write!(f, "relaxing"),
            MarchPhase::Marching => write!(f, "marching"),
            MarchPhase::Terminated => write!(f, "terminated"),
        }
    }
}

/// Read-only view of the solver handed to observers
#[derive(Debug, Clone, Copy)]
pub struct Snapshot<'a> {
    /// Current flow field
    pub field: &'a FlowField,
    /// Free-stream reference state
    pub free_stream: &'a FreeStream,
    /// Axial position of the field (downstream station)
    pub x: f64,
    /// Sweeps performed so far
    pub iteration: usize,
    /// Phase the last sweep was performed in (`Relaxing` before the first)
    pub phase: MarchPhase,
    /// Residual `max |Δp|` of the last sweep
    pub residual: f64,
}

/// Consumer of snapshots (printers, exporters, plotters)
pub trait SnapshotObserver {
    fn observe(&mut self, snapshot: &Snapshot<'_>);
}

impl<F> SnapshotObserver for F
where
    F: FnMut(&Snapshot<'_>),
{
    fn observe(&mut self, snapshot: &Snapshot<'_>) {
        self(snapshot)
    }
}

/// Summary of a finished run
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MarchingResult {
    /// Last downstream station reached
    pub final_position: f64,
    /// Relaxation converged (and marching ran to the end of the body)
    pub converged: bool,
    /// Sweeps spent relaxing
    pub relaxation_iterations: usize,
    /// Sweeps spent marching
    pub marching_steps: usize,
    /// Total sweeps
    pub iterations: usize,
    /// Residual of the last sweep
    pub residual: f64,
    /// The sonic latch was set during the run
    pub sonic_locked: bool,
    /// Closure evaluations clamped at the sonic limit
    pub clamped_evaluations: usize,
}

impl MarchingResult {
    /// Turn a non-converged run into [`PnsError::NonConvergence`]
    pub fn into_converged(self) -> PnsResult<Self> {
        if self.converged {
            Ok(self)
        } else {
            Err(PnsError::NonConvergence {
                iterations: self.relaxation_iterations,
                residual: self.residual,
            })
        }
    }
}

/// What a single [`MarchingSolver::step`] did
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StepReport {
    /// Sweep counter after the step
    pub iteration: usize,
    /// Downstream station of the sweep
    pub x: f64,
    /// `max |Δp|` of the sweep
    pub residual: f64,
    /// Phase the sweep was performed in
    pub swept_in: MarchPhase,
    /// Phase after the step
    pub phase: MarchPhase,
    /// A snapshot boundary was crossed
    pub snapshot_due: bool,
}

// =================================================================================================
// Solver
// =================================================================================================

/// Space-marching PNS solver over a body and an outer boundary
///
/// # Example
///
/// ```rust
/// use pns_rs::geometry::{BodyGeometry, OuterBoundaryGeometry};
/// use pns_rs::solver::{MarchPhase, MarchingConfiguration, MarchingSolver};
///
/// let body = BodyGeometry::cylinder(0.1, 1.0, 0.2);
/// let outer = OuterBoundaryGeometry::cylinder(0.3, 1.0);
/// let config = MarchingConfiguration::default()
///     .with_start_station(0.2)
///     .with_step_size(1e-3)
///     .with_radial_points(21);
///
/// let mut solver = MarchingSolver::new(config, &body, &outer).unwrap();
/// let result = solver.run_quiet().unwrap();
///
/// assert!(result.converged);
/// assert_eq!(solver.phase(), MarchPhase::Terminated);
/// ```
pub struct MarchingSolver<'g> {
    config: MarchingConfiguration,
    body: &'g dyn Contour,
    outer: &'g dyn Contour,
    free: FreeStream,
    field: FlowField,
    latch: SonicLatch,

    phase: MarchPhase,
    /// Phase of the last sweep, reported by snapshots
    swept_in: MarchPhase,
    converged: bool,
    step_size: f64,
    beta: f64,
    upstream_x: f64,
    downstream_x: f64,
    next_snapshot_x: f64,

    iteration: usize,
    relaxation_iterations: usize,
    marching_steps: usize,
    residual: f64,
    clamped_evaluations: usize,
}

impl<'g> MarchingSolver<'g> {
    /// Validate the configuration and set up the free-stream starting field
    ///
    /// # Errors
    ///
    /// Invalid configurations, and geometry that cannot form a grid at the
    /// starting station pair.
    pub fn new(config: MarchingConfiguration, body: &'g dyn Contour, outer: &'g dyn Contour) -> PnsResult<Self> {
        config.validate()?;

        let free = config.free_stream();
        let field = FlowField::free_stream(config.radial_points, &free);
        let upstream_x = config.start_station - config.step_size;
        let downstream_x = config.start_station;

        // Fail now rather than on the first sweep
        StationPair::new(upstream_x, downstream_x, body, outer, &free)?;

        log::info!(
            "PNS solver: {} in {}, M = {}, H = {:.6}, p = {:.6}, {} radial points, start x = {:.6}",
            body.name(),
            outer.name(),
            free.mach(),
            free.total_enthalpy(),
            free.pressure(),
            config.radial_points,
            config.start_station
        );

        Ok(Self {
            step_size: config.step_size,
            beta: config.initial_beta,
            config,
            body,
            outer,
            free,
            field,
            latch: SonicLatch::new(),
            phase: MarchPhase::Relaxing,
            swept_in: MarchPhase::Relaxing,
            converged: false,
            upstream_x,
            downstream_x,
            next_snapshot_x: 0.0,
            iteration: 0,
            relaxation_iterations: 0,
            marching_steps: 0,
            residual: 0.0,
            clamped_evaluations: 0,
        })
    }

    // ======================================== Accessors =========================================

    pub fn phase(&self) -> MarchPhase {
        self.phase
    }

    pub fn field(&self) -> &FlowField {
        &self.field
    }

    pub fn free_stream(&self) -> &FreeStream {
        &self.free
    }

    pub fn configuration(&self) -> &MarchingConfiguration {
        &self.config
    }

    /// Axial position of the current field
    pub fn position(&self) -> f64 {
        self.downstream_x
    }

    /// Current marching step `Δξ`
    pub fn step_size(&self) -> f64 {
        self.step_size
    }

    /// Current bulk-viscosity factor `β`
    pub fn beta(&self) -> f64 {
        self.beta
    }

    /// Residual of the last sweep
    pub fn residual(&self) -> f64 {
        self.residual
    }

    pub fn iteration(&self) -> usize {
        self.iteration
    }

    pub fn marching_steps(&self) -> usize {
        self.marching_steps
    }

    pub fn sonic_locked(&self) -> bool {
        self.latch.is_locked()
    }

    /// Read-only view of the current state
    pub fn snapshot(&self) -> Snapshot<'_> {
        Snapshot {
            field: &self.field,
            free_stream: &self.free,
            x: self.downstream_x,
            iteration: self.iteration,
            phase: self.swept_in,
            residual: self.residual,
        }
    }

    /// Summary of the run so far
    pub fn result(&self) -> MarchingResult {
        MarchingResult {
            final_position: self.downstream_x,
            converged: self.converged,
            relaxation_iterations: self.relaxation_iterations,
            marching_steps: self.marching_steps,
            iterations: self.iteration,
            residual: self.residual,
            sonic_locked: self.latch.is_locked(),
            clamped_evaluations: self.clamped_evaluations,
        }
    }

    // ========================================= Stepping =========================================

    /// Perform one sweep and advance the state machine
    ///
    /// Has no effect once the run is terminated.
    ///
    /// # Errors
    ///
    /// Geometry lookups outside the contours, degenerate stations and
    /// closure failures. The solver should not be stepped again after an
    /// error.
    pub fn step(&mut self) -> PnsResult<StepReport> {
        let phase = self.phase;
        match phase {
            MarchPhase::Terminated => {
                return Ok(StepReport {
                    iteration: self.iteration,
                    x: self.downstream_x,
                    residual: self.residual,
                    swept_in: phase,
                    phase,
                    snapshot_due: false,
                });
            }
            MarchPhase::Relaxing => {
                self.upstream_x = self.config.start_station - self.step_size;
                self.downstream_x = self.config.start_station;
            }
            MarchPhase::Marching => {
                self.upstream_x = self.downstream_x;
                self.downstream_x = self.upstream_x + self.step_size;
                self.step_size *= self.config.step_growth;
                self.beta /= self.config.step_growth;
            }
        }

        let stations = StationPair::new(self.upstream_x, self.downstream_x, self.body, self.outer, &self.free)?;
        let report = sweep(&mut self.field, &stations, &self.free, self.beta, &mut self.latch)?;
        self.field.validate(self.downstream_x)?;

        self.iteration += 1;
        self.swept_in = phase;
        self.residual = report.delm;
        self.clamped_evaluations += report.clamped;
        if report.clamped > 0 {
            log::warn!(
                "Iteration {}: {} closure evaluations clamped at the sonic limit (x = {:.6})",
                self.iteration,
                report.clamped,
                self.downstream_x
            );
        }

        let snapshot_due = match phase {
            MarchPhase::Relaxing => self.advance_relaxation(),
            _ => self.advance_marching(),
        };

        Ok(StepReport {
            iteration: self.iteration,
            x: self.downstream_x,
            residual: self.residual,
            swept_in: phase,
            phase: self.phase,
            snapshot_due,
        })
    }

    fn advance_relaxation(&mut self) -> bool {
        self.relaxation_iterations += 1;
        log::debug!("Relaxation iteration {}: delm = {:e}", self.iteration, self.residual);

        let snapshot_due = self.iteration % self.config.snapshot_iterations == 0;

        if self.residual <= self.config.tolerance {
            self.phase = MarchPhase::Marching;
            let spacing = self.config.snapshot_spacing;
            self.next_snapshot_x = ((self.downstream_x / spacing).floor() + 1.0) * spacing;
            log::info!(
                "Relaxation converged on iteration {} (delm = {:e}), marching from x = {:.6}",
                self.iteration,
                self.residual,
                self.downstream_x
            );
        } else if self.iteration >= self.config.max_relaxation_iterations {
            self.phase = MarchPhase::Terminated;
            log::warn!(
                "Run stopped: relaxation did not converge within {} iterations (delm = {:e})",
                self.config.max_relaxation_iterations,
                self.residual
            );
        }

        snapshot_due
    }

    fn advance_marching(&mut self) -> bool {
        self.marching_steps += 1;
        log::debug!(
            "Marching step {}: x = {:.6}, step = {:e}, beta = {:.6}, delm = {:e}",
            self.marching_steps,
            self.downstream_x,
            self.step_size,
            self.beta,
            self.residual
        );

        if self.downstream_x > 1.0 - self.step_size {
            self.phase = MarchPhase::Terminated;
            self.converged = true;
            log::info!(
                "Solution ending at x = {:.6} after {} marching steps",
                self.downstream_x,
                self.marching_steps
            );
            return false;
        }

        if self.downstream_x > self.next_snapshot_x {
            self.next_snapshot_x += self.config.snapshot_spacing;
            return true;
        }
        false
    }

    // ========================================== Running ==========================================

    /// Step until terminated, offering snapshots to `observer`
    ///
    /// The initial field is offered before the first sweep.
    pub fn run<O>(&mut self, observer: &mut O) -> PnsResult<MarchingResult>
    where
        O: SnapshotObserver + ?Sized,
    {
        if self.iteration == 0 {
            observer.observe(&self.snapshot());
        }

        while self.phase != MarchPhase::Terminated {
            let report = self.step()?;
            if report.snapshot_due {
                observer.observe(&self.snapshot());
            }
        }

        Ok(self.result())
    }

    /// Step until terminated without observing
    pub fn run_quiet(&mut self) -> PnsResult<MarchingResult> {
        self.run(&mut |_: &Snapshot<'_>| {})
    }
}

impl fmt::Debug for MarchingSolver<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MarchingSolver")
            .field("body", &self.body.name())
            .field("outer", &self.outer.name())
            .field("phase", &self.phase)
            .field("x", &self.downstream_x)
            .field("step_size", &self.step_size)
            .field("beta", &self.beta)
            .field("iteration", &self.iteration)
            .finish()
    }
}
