use std::error::Error;
use std::path::PathBuf;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use ramjet_sim::config::Scenario;
use ramjet_sim::io::csv;
use ramjet_sim::io::json::{self, FlightSummary};
use ramjet_sim::physics::{AeroDatabase, AeroModel};
use ramjet_sim::sim::{self, EventKind, Termination};

/// Guided projectile flight simulation.
#[derive(Debug, Parser)]
#[command(version, about)]
struct Cli {
    /// Scenario JSON; missing fields take the built-in defaults
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Aerodynamic table CSV (Mach, Alpha, Cd, Cl_Slope)
    #[arg(short, long)]
    aero_table: Option<PathBuf>,

    /// Integration timestep, s
    #[arg(long)]
    dt: Option<f64>,

    /// Maximum simulated time, s
    #[arg(long)]
    max_time: Option<f64>,

    /// Write the trajectory as CSV
    #[arg(long)]
    csv: Option<PathBuf>,

    /// Write the flight summary as JSON
    #[arg(long)]
    summary: Option<PathBuf>,

    /// Only print warnings and the impact line
    #[arg(short, long)]
    quiet: bool,
}

fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(if cli.quiet { "warn" } else { "info" }));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();

    let mut scenario = match &cli.config {
        Some(path) => Scenario::from_file(path)?,
        None => Scenario::default(),
    };
    if let Some(path) = cli.aero_table {
        scenario.aero_table = Some(path);
    }
    if let Some(dt) = cli.dt {
        scenario.sim.dt = dt;
    }
    if let Some(max_time) = cli.max_time {
        scenario.sim.max_time = max_time;
    }
    scenario.validate()?;

    // -----------------------------------------------------------------------
    // Run simulation
    // -----------------------------------------------------------------------
    let (outcome, aero) = sim::run(&scenario);
    let summary = FlightSummary::new(&outcome, &scenario, &aero);

    match outcome.termination {
        Termination::Impact { time } => println!("Impact at t={:.2}s", time),
        Termination::Timeout { time } => println!("No impact within {:.2}s", time),
    }

    if !cli.quiet {
        print_report(&scenario, &aero, &outcome, &summary);
    }

    // -----------------------------------------------------------------------
    // Export
    // -----------------------------------------------------------------------
    if let Some(path) = &cli.csv {
        csv::write_trajectory_file(path, &outcome.trajectory)?;
        println!("Trajectory written to {}", path.display());
    }
    if let Some(path) = &cli.summary {
        json::write_summary_file(path, &summary)?;
        println!("Summary written to {}", path.display());
    }

    Ok(())
}

fn print_report(
    scenario: &Scenario,
    aero: &AeroDatabase,
    outcome: &sim::SimOutcome,
    summary: &FlightSummary,
) {
    let vehicle = &scenario.vehicle;
    let target = scenario.target.position;

    println!();
    println!("====================================================================");
    println!("  GUIDED TRAJECTORY: {}", vehicle.name);
    println!("====================================================================");
    println!();
    println!("  Vehicle & Setup");
    println!("  ──────────────────────────────────────────────────────────────────");
    println!(
        "  Mass:          {:>8.1} kg    Diameter:     {:>8.3} m",
        vehicle.mass, vehicle.diameter
    );
    println!(
        "  Ref. area:     {:>8.5} m^2   Cd @ M2.0:    {:>8.3}{}",
        vehicle.reference_area(),
        aero.cd(2.0),
        if aero.is_fallback() { " (fallback)" } else { "" }
    );
    println!(
        "  Launch:  x={:>8.0} m  h={:>7.0} m  V={:>6.1} m/s",
        scenario.initial.position.x,
        scenario.initial.position.y,
        scenario.initial.velocity.norm()
    );
    println!("  Target:  x={:>8.0} m  h={:>7.0} m", target.x, target.y);
    println!();

    println!("  Flight Events");
    println!("  ──────────────────────────────────────────────────────────────────");
    for e in &outcome.events {
        let label = match e.kind {
            EventKind::Apogee => "APOGEE",
            EventKind::GuidanceSaturated => "AOA LIMIT",
            EventKind::GuidanceUnsaturated => "AOA FREE",
            EventKind::Impact => "IMPACT",
            EventKind::Timeout => "TIMEOUT",
        };
        println!(
            "  {:<10} t={:>6.2}s   x={:>8.0}m   h={:>7.0}m",
            label, e.time, e.downrange, e.altitude
        );
    }
    println!();

    println!("  Performance Summary");
    println!("  ──────────────────────────────────────────────────────────────────");
    println!("  Max altitude:  {:>8.0} m", summary.max_altitude_m);
    println!("  Max Mach:      {:>8.2}", summary.max_mach);
    println!("  Final Mach:    {:>8.2}", summary.final_mach);
    println!("  Final range:   {:>8.0} m", summary.final_downrange_m);
    if let Some(ca) = summary.closest_approach {
        println!(
            "  Closest pass:  {:>8.1} m   at t={:.2}s",
            ca.miss_distance_m, ca.time
        );
    }
    println!(
        "  AoA saturated: {:>8.1} % of flight",
        summary.guidance_saturated_fraction * 100.0
    );
    println!();

    // -----------------------------------------------------------------------
    // Trajectory table (sampled)
    // -----------------------------------------------------------------------
    println!("  Trajectory");
    println!("  ──────────────────────────────────────────────────────────────────");
    println!(
        "  {:>7}  {:>10}  {:>9}  {:>7}",
        "t (s)", "range (m)", "alt (m)", "Mach"
    );
    println!("  {}", "─".repeat(40));

    let samples = outcome.trajectory.as_slice();
    let sample_interval = (samples.len() / 30).max(1);
    for (i, s) in samples.iter().enumerate() {
        if i % sample_interval != 0 && i != samples.len() - 1 {
            continue;
        }
        println!(
            "  {:>7.2}  {:>10.1}  {:>9.1}  {:>7.3}",
            s.time, s.downrange, s.altitude, s.mach
        );
    }

    println!();
    println!(
        "  Simulation: {} steps, dt={} s",
        outcome.steps, scenario.sim.dt
    );
    println!("====================================================================");
    println!();
}
