//! Example: Mach 5.95 flow over the ogive-cylinder
//!
//! Marches the PNS equations along the ogive-cylinder test body inside a
//! conical outer boundary, printing the classic flow table at every
//! snapshot and writing all snapshots to CSV.
//!
//! **Case** (defaults):
//! - M∞ = 5.95, μ∞ = 2·10⁻⁵
//! - 22° conical outer boundary
//! - 31 radial points, Δξ = 4·10⁻⁴ growing by 0.5% per step
//!
//! Any field can be overridden from a JSON file:
//!
//! ```bash
//! RUST_LOG=info cargo run --example ogive_cylinder -- case.json
//! ```
//!
//! with for instance `{ "minf": 4.0, "neta": 41 }`.

use pns_rs::{
    geometry::{BodyGeometry, Contour, OuterBoundaryGeometry},
    output::{
        plot_contours,
        plot_profiles,
        CsvConfig,
        CsvMetadata,
        FlowTable,
        ProfileQuantity,
        SnapshotCsvWriter,
    },
    solver::{MarchingConfiguration, MarchingSolver, Snapshot, SnapshotObserver},
};

use std::time::Instant;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    println!("═══════════════════════════════════════════════════════");
    println!("  PNS Space Marching - Ogive-Cylinder");
    println!("═══════════════════════════════════════════════════════\n");

    // ====== Configuration ======

    let config = match std::env::args().nth(1) {
        Some(path) => {
            println!("Case file: {}\n", path);
            MarchingConfiguration::from_json(&std::fs::read_to_string(path)?)?
        }
        None => MarchingConfiguration::ogive_cylinder_case(),
    };

    println!("Case:");
    println!("  M∞             : {}", config.mach);
    println!("  μ∞             : {:e}", config.free_stream_viscosity);
    println!("  Outer angle    : {}°", config.outer_half_angle);
    println!("  Radial points  : {}", config.radial_points);
    println!("  Δξ             : {:e}", config.step_size);
    println!("  Start station  : {:.6}\n", config.start_station);

    // ====== Geometry ======

    let body = BodyGeometry::ogive_cylinder();
    let outer = OuterBoundaryGeometry::cone(config.outer_half_angle, body.reference_length());
    println!("Geometry: {} ({:.3} long) in {}\n", body.name(), body.reference_length(), outer.name());

    // ====== Output ======

    let tmp_dir = std::env::temp_dir();
    let csv_path = tmp_dir.join("ogive_cylinder_snapshots.csv");
    let csv_config = CsvConfig::default()
        .with_metadata(CsvMetadata::from_configuration("ogive-cylinder", &config));

    let mut csv = SnapshotCsvWriter::create(&csv_path.to_string_lossy(), Some(&csv_config))?;
    let mut table = FlowTable::new(std::io::stdout());

    // ====== Run ======

    let started = Instant::now();
    let mut solver = MarchingSolver::new(config, &body, &outer)?;
    let result = solver.run(&mut |snapshot: &Snapshot<'_>| {
        table.observe(snapshot);
        csv.observe(snapshot);
    })?;
    let elapsed = started.elapsed().as_secs_f64();

    table.into_inner()?;
    let rows = csv.finish()?;

    // ====== Summary ======

    println!("\n═══════════════════════════════════════════════════════");
    println!("  Results");
    println!("═══════════════════════════════════════════════════════\n");
    println!("  Converged            : {}", result.converged);
    println!("  Final station        : {:.6}", result.final_position);
    println!("  Relaxation sweeps    : {}", result.relaxation_iterations);
    println!("  Marching steps       : {}", result.marching_steps);
    println!("  Sonic latch          : {}", result.sonic_locked);
    println!("  Clamped evaluations  : {}", result.clamped_evaluations);
    println!("  Wall time            : {:.3} s\n", elapsed);

    let profile_path = tmp_dir.join("ogive_cylinder_profiles.png");
    plot_profiles(
        &solver.snapshot(),
        &[ProfileQuantity::PressureRatio, ProfileQuantity::Mach, ProfileQuantity::Density],
        &profile_path.to_string_lossy(),
        None,
    )?;

    let contour_path = tmp_dir.join("ogive_cylinder_geometry.svg");
    plot_contours(&body, &outer, 200, &contour_path.to_string_lossy(), None)?;

    println!("  CSV ({} rows)        : {}", rows, csv_path.display());
    println!("  Profiles             : {}", profile_path.display());
    println!("  Geometry             : {}", contour_path.display());

    result.into_converged()?;
    Ok(())
}
