use std::io::Write;
use std::path::Path;

use serde::Serialize;

use crate::config::Scenario;
use crate::physics::{AeroDatabase, AeroModel};
use crate::sim::{EventKind, FlightEvent, SimOutcome, Termination};

/// Closest recorded approach to the target in the vertical plane.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ClosestApproach {
    pub time: f64,
    pub miss_distance_m: f64,
    pub downrange_m: f64,
    pub altitude_m: f64,
}

/// Summary statistics computed from a finished run.
#[derive(Debug, Clone, Serialize)]
pub struct FlightSummary {
    pub vehicle: String,
    pub termination: Termination,
    pub steps: usize,
    pub final_downrange_m: f64,
    pub max_altitude_m: f64,
    pub max_mach: f64,
    pub final_mach: f64,
    pub closest_approach: Option<ClosestApproach>,
    /// Share of flight time spent at the angle-of-attack limit.
    pub guidance_saturated_fraction: f64,
    pub aero_fallback: bool,
    /// Drag coefficient at Mach 2, the reference value shown on plots.
    pub cd_mach_2: f64,
    pub events: Vec<FlightEvent>,
}

impl FlightSummary {
    pub fn new(outcome: &SimOutcome, scenario: &Scenario, aero: &AeroDatabase) -> Self {
        let target = scenario.target.position;
        let traj = &outcome.trajectory;

        let max_altitude_m = traj
            .iter()
            .map(|s| s.altitude)
            .fold(outcome.final_state.altitude(), f64::max);

        let max_mach = traj.iter().map(|s| s.mach).fold(0.0_f64, f64::max);

        let closest_approach = traj
            .iter()
            .map(|s| {
                let miss = (s.downrange - target.x).hypot(s.altitude - target.y);
                ClosestApproach {
                    time: s.time,
                    miss_distance_m: miss,
                    downrange_m: s.downrange,
                    altitude_m: s.altitude,
                }
            })
            .min_by(|a, b| a.miss_distance_m.total_cmp(&b.miss_distance_m));

        let flight_time = outcome.termination.time();
        let saturated = saturated_duration(&outcome.events, flight_time);
        let guidance_saturated_fraction = if flight_time > 0.0 {
            (saturated / flight_time).clamp(0.0, 1.0)
        } else {
            0.0
        };

        FlightSummary {
            vehicle: scenario.vehicle.name.clone(),
            termination: outcome.termination,
            steps: outcome.steps,
            final_downrange_m: outcome.final_state.downrange(),
            max_altitude_m,
            max_mach,
            final_mach: outcome.final_state.mach(),
            closest_approach,
            guidance_saturated_fraction,
            aero_fallback: aero.is_fallback(),
            cd_mach_2: aero.cd(2.0),
            events: outcome.events.clone(),
        }
    }
}

/// Total time between saturation and release events; an open interval runs
/// to `end`.
fn saturated_duration(events: &[FlightEvent], end: f64) -> f64 {
    let mut total = 0.0;
    let mut since: Option<f64> = None;
    for e in events {
        match e.kind {
            EventKind::GuidanceSaturated => since = Some(e.time),
            EventKind::GuidanceUnsaturated => {
                if let Some(start) = since.take() {
                    total += e.time - start;
                }
            }
            _ => {}
        }
    }
    if let Some(start) = since {
        total += end - start;
    }
    total
}

/// Write flight summary as pretty JSON to a writer.
pub fn write_summary<W: Write>(writer: W, summary: &FlightSummary) -> serde_json::Result<()> {
    serde_json::to_writer_pretty(writer, summary)
}

/// Write flight summary JSON to a file.
pub fn write_summary_file(path: impl AsRef<Path>, summary: &FlightSummary) -> std::io::Result<()> {
    let file = std::fs::File::create(path)?;
    write_summary(file, summary)?;
    Ok(())
}
