use tracing::{debug, info};

use super::event::{
    ApogeeDetector, EventDetector, EventKind, FlightEvent, SaturationDetector, Termination,
};
use super::trajectory::{Trajectory, TrajectorySample};
use crate::config::{Scenario, SimulationConfig, Target};
use crate::dynamics::{FlightState, Projectile};
use crate::gnc::Guidance;
use crate::physics::{AeroDatabase, AeroModel};

/// Upper bound on the samples reserved up front; longer runs grow the buffer.
const MAX_PREALLOCATED: usize = 200_000;

/// Everything a finished run produces.
#[derive(Debug, Clone)]
pub struct SimOutcome {
    pub trajectory: Trajectory,
    pub events: Vec<FlightEvent>,
    pub termination: Termination,
    pub final_state: FlightState,
    /// Steps that returned "still flying".
    pub steps: usize,
}

// ---------------------------------------------------------------------------
// Fixed-step flight loop
// ---------------------------------------------------------------------------

/// Step `projectile` from its current time until impact or until the time
/// budget runs out, recording one sample per surviving step.
pub fn simulate_with<A: AeroModel, G: Guidance>(
    projectile: &mut Projectile<A, G>,
    target: &Target,
    config: &SimulationConfig,
) -> SimOutcome {
    debug!(
        dt = config.dt,
        max_time = config.max_time,
        guidance = projectile.guidance().name(),
        "starting flight"
    );

    let capacity = (config.max_time / config.dt)
        .max(0.0)
        .min(MAX_PREALLOCATED as f64) as usize
        + 1;
    let mut trajectory = Trajectory::with_capacity(capacity);
    let mut events = Vec::new();
    let mut detectors: Vec<Box<dyn EventDetector>> = vec![
        Box::new(ApogeeDetector),
        Box::new(SaturationDetector::default()),
    ];
    let mut steps = 0;

    let termination = loop {
        let t = projectile.state().time;
        if !(t < config.max_time) {
            info!(t, "time budget exhausted without impact");
            break Termination::Timeout { time: t };
        }

        let prev = projectile.state().clone();
        if !projectile.update(config.dt, target) {
            info!(t, "impact at t={:.2}s", t);
            break Termination::Impact { time: t };
        }
        steps += 1;

        let current = projectile.state();
        if let Some(step) = projectile.last_step() {
            for detector in detectors.iter_mut() {
                if let Some(kind) = detector.check(&prev, current, step) {
                    events.push(FlightEvent::at(current, kind));
                }
            }
        }

        trajectory.push(TrajectorySample::from_state(current));
    };

    let final_state = projectile.state().clone();
    let kind = if termination.is_impact() {
        EventKind::Impact
    } else {
        EventKind::Timeout
    };
    events.push(FlightEvent::at(&final_state, kind));

    SimOutcome {
        trajectory,
        events,
        termination,
        final_state,
        steps,
    }
}

/// Fly a scenario with the given coefficient source and the default
/// proportional-navigation law.
pub fn simulate<A: AeroModel>(scenario: &Scenario, aero: A) -> SimOutcome {
    let mut projectile = Projectile::new(&scenario.vehicle, &scenario.sim, &scenario.initial, aero);
    simulate_with(&mut projectile, &scenario.target, &scenario.sim)
}

/// Load the scenario's aerodynamic table (falling back to constants) and fly.
pub fn run(scenario: &Scenario) -> (SimOutcome, AeroDatabase) {
    let aero = AeroDatabase::load(scenario.aero_table_path());
    let outcome = simulate(scenario, aero.clone());
    (outcome, aero)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
