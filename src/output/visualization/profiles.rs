//! Static plots of radial profiles and geometry contours
//!
//! Profiles are drawn with `η` on the vertical axis, the way a shock layer is
//! usually read: body at the bottom, outer boundary at the top. Output format
//! follows the file extension (`.svg` for vector output, anything else PNG).
//!
//! # Example
//!
//! ```rust,ignore
//! use pns_rs::output::visualization::{plot_profiles, PlotConfig, ProfileQuantity};
//!
//! let snapshot = solver.snapshot();
//! plot_profiles(
//!     &snapshot,
//!     &[ProfileQuantity::PressureRatio, ProfileQuantity::Mach],
//!     "profiles.png",
//!     None,
//! )?;
//! ```

use std::error::Error;
use std::fmt;

use plotters::prelude::*;

use crate::geometry::{BodyGeometry, Contour, OuterBoundaryGeometry};
use crate::physics::{FlowRow, FreeStream};
use crate::solver::Snapshot;

use super::config::PlotConfig;

/// Quantity drawn against `η`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProfileQuantity {
    /// `ρ/ρ∞`
    Density,
    /// `u/U∞`
    AxialVelocity,
    /// `v/U∞`
    RadialVelocity,
    /// `p/p∞`
    PressureRatio,
    /// Local Mach number, zero where undefined
    Mach,
}

impl ProfileQuantity {
    /// Every quantity, in legend order
    pub const ALL: [ProfileQuantity; 5] = [
        ProfileQuantity::Density,
        ProfileQuantity::AxialVelocity,
        ProfileQuantity::RadialVelocity,
        ProfileQuantity::PressureRatio,
        ProfileQuantity::Mach,
    ];

    /// Legend label
    pub fn label(&self) -> &'static str {
        match self {
            ProfileQuantity::Density => "ρ/ρ∞",
            ProfileQuantity::AxialVelocity => "u/U∞",
            ProfileQuantity::RadialVelocity => "v/U∞",
            ProfileQuantity::PressureRatio => "p/p∞",
            ProfileQuantity::Mach => "Mach",
        }
    }

    /// Value of this quantity for one row
    pub fn value(&self, row: &FlowRow, free: &FreeStream) -> f64 {
        match self {
            ProfileQuantity::Density => row.rho,
            ProfileQuantity::AxialVelocity => row.u,
            ProfileQuantity::RadialVelocity => row.v,
            ProfileQuantity::PressureRatio => row.p / free.pressure(),
            ProfileQuantity::Mach => free.local_mach(row).unwrap_or(0.0),
        }
    }

    /// `(value, η)` pairs from body to outer boundary
    pub fn profile(&self, snapshot: &Snapshot<'_>) -> Vec<(f64, f64)> {
        snapshot
            .field
            .rows()
            .map(|(k, row)| (self.value(&row, snapshot.free_stream), snapshot.field.eta(k)))
            .collect()
    }
}

impl fmt::Display for ProfileQuantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Axis range padded by 10%, never empty
fn padded_range(values: impl Iterator<Item = f64>) -> (f64, f64) {
    let (lo, hi) = values
        .filter(|v| v.is_finite())
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| (lo.min(v), hi.max(v)));

    if !lo.is_finite() {
        return (0.0, 1.0);
    }

    let span = hi - lo;
    let pad = if span > 0.0 { 0.1 * span } else { 0.1 * lo.abs().max(1.0) };
    (lo - pad, hi + pad)
}

/// Draws labelled line series on any drawing area
fn draw_series_on_area<DB: DrawingBackend>(
    root: &DrawingArea<DB, plotters::coord::Shift>,
    series: &[(String, Vec<(f64, f64)>)],
    x_range: (f64, f64),
    y_range: (f64, f64),
    config: &PlotConfig,
) -> Result<(), Box<dyn Error>>
where
    <DB as DrawingBackend>::ErrorType: 'static,
{
    root.fill(&config.background)?;

    let mut chart = ChartBuilder::on(root)
        .caption(&config.title, ("sans-serif", 40.0).into_font())
        .margin(15)
        .x_label_area_size(50)
        .y_label_area_size(70)
        .build_cartesian_2d(x_range.0..x_range.1, y_range.0..y_range.1)?;

    let mut mesh = chart.configure_mesh();
    mesh.x_desc(&config.xlabel).y_desc(&config.ylabel);

    if config.show_grid {
        mesh.draw()?;
    } else {
        mesh.disable_mesh().draw()?;
    }

    for (i, (label, points)) in series.iter().enumerate() {
        let color = config.series_color(i);
        let width = config.line_width;
        chart
            .draw_series(LineSeries::new(points.iter().copied(), color.stroke_width(width)))?
            .label(label.as_str())
            .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], color.stroke_width(width)));
    }

    chart
        .configure_series_labels()
        .background_style(WHITE.mix(0.8))
        .border_style(BLACK)
        .draw()?;

    root.present()?;
    Ok(())
}

/// Picks the backend from the file extension
fn render(
    output_path: &str,
    series: &[(String, Vec<(f64, f64)>)],
    x_range: (f64, f64),
    y_range: (f64, f64),
    config: &PlotConfig,
) -> Result<(), Box<dyn Error>> {
    if output_path.ends_with(".svg") {
        let root = SVGBackend::new(output_path, (config.width, config.height)).into_drawing_area();
        draw_series_on_area(&root, series, x_range, y_range, config)
    } else {
        let root = BitMapBackend::new(output_path, (config.width, config.height)).into_drawing_area();
        draw_series_on_area(&root, series, x_range, y_range, config)
    }
}

/// Plot radial profiles of a snapshot
///
/// # Arguments
///
/// * `snapshot` - Solver snapshot to draw
/// * `quantities` - One line per quantity; empty means [`ProfileQuantity::ALL`]
/// * `output_path` - Output file path (.png or .svg)
/// * `configuration` - Optional PlotConfig, defaults to [`PlotConfig::profiles`]
///   titled with the station
pub fn plot_profiles(
    snapshot: &Snapshot<'_>,
    quantities: &[ProfileQuantity],
    output_path: &str,
    configuration: Option<&PlotConfig>,
) -> Result<(), Box<dyn Error>> {
    let config = configuration.cloned().unwrap_or_else(|| {
        PlotConfig::profiles(format!("x = {:.4} ({}, iteration {})", snapshot.x, snapshot.phase, snapshot.iteration))
    });

    let quantities = if quantities.is_empty() { &ProfileQuantity::ALL[..] } else { quantities };

    let series: Vec<(String, Vec<(f64, f64)>)> = quantities
        .iter()
        .map(|q| (q.label().to_string(), q.profile(snapshot)))
        .collect();

    let x_range = padded_range(series.iter().flat_map(|(_, pts)| pts.iter().map(|p| p.0)));

    render(output_path, &series, x_range, (0.0, 1.0), &config)
}

/// Plot the body and outer-boundary contours, nondimensionalised by the body length
///
/// Both curves are sampled with `samples` points over their own domains.
pub fn plot_contours(
    body: &BodyGeometry,
    outer: &OuterBoundaryGeometry,
    samples: usize,
    output_path: &str,
    configuration: Option<&PlotConfig>,
) -> Result<(), Box<dyn Error>> {
    let config = configuration.cloned().unwrap_or_else(|| PlotConfig::contours(body.name()));
    let length = body.reference_length();

    let scale = |points: Vec<(f64, f64)>| -> Vec<(f64, f64)> {
        points.into_iter().map(|(x, r)| (x / length, r / length)).collect()
    };

    let series = vec![
        (body.name().to_string(), scale(body.curve().sample(samples)?)),
        (outer.name().to_string(), scale(outer.curve().sample(samples)?)),
    ];

    let x_range = padded_range(series.iter().flat_map(|(_, pts)| pts.iter().map(|p| p.0)));
    let (_, r_max) = padded_range(series.iter().flat_map(|(_, pts)| pts.iter().map(|p| p.1)));

    render(output_path, &series, x_range, (0.0, r_max), &config)
}
