use tracing::trace;

use super::integrator::euler_step;
use super::state::{FlightPhase, FlightState, StepReport};
use crate::config::{InitialConditions, IntegrationScheme, SimulationConfig, Target, Vehicle};
use crate::gnc::{Engagement, Guidance, ProportionalNavigation};
use crate::physics::{resolve_wind_forces, AeroDatabase, AeroModel, AirData};

// ---------------------------------------------------------------------------
// Guided projectile: planar point mass with lift and drag
// ---------------------------------------------------------------------------

/// Owns the flight state and advances it one fixed step at a time.
///
/// Per update:
///   1. Air data (exponential atmosphere, constant speed of sound)
///   2. Guidance command from the current geometry
///   3. Coefficients at the current Mach, linear lift Cl = Cl_alpha * alpha
///   4. Drag and lift magnitudes from dynamic pressure
///   5. Wind frame -> inertial at the flight-path angle
///   6. Euler integration with gravity on the vertical axis
#[derive(Debug, Clone)]
pub struct Projectile<A = AeroDatabase, G = ProportionalNavigation> {
    state: FlightState,
    phase: FlightPhase,
    mass: f64,
    reference_area: f64,
    gravity: f64,
    integration: IntegrationScheme,
    aero: A,
    guidance: G,
    last_step: Option<StepReport>,
}

impl<A: AeroModel> Projectile<A, ProportionalNavigation> {
    /// Projectile steered by the default proportional-navigation law.
    pub fn new(
        vehicle: &Vehicle,
        config: &SimulationConfig,
        initial: &InitialConditions,
        aero: A,
    ) -> Self {
        Self::with_guidance(vehicle, config, initial, aero, ProportionalNavigation::default())
    }
}

impl<A: AeroModel, G: Guidance> Projectile<A, G> {
    pub fn with_guidance(
        vehicle: &Vehicle,
        config: &SimulationConfig,
        initial: &InitialConditions,
        aero: A,
        guidance: G,
    ) -> Self {
        Self {
            state: FlightState::new(initial),
            phase: FlightPhase::Flying,
            mass: vehicle.mass,
            reference_area: vehicle.reference_area(),
            gravity: config.gravity,
            integration: config.integration,
            aero,
            guidance,
            last_step: None,
        }
    }

    /// Advance one step toward `target`. Returns `false` once the projectile
    /// is below ground, after which the state no longer changes.
    ///
    /// The step that carries the altitude below zero is kept as is; impact is
    /// detected at the start of the following call, with no interpolation to
    /// the exact ground crossing.
    pub fn update(&mut self, dt: f64, target: &Target) -> bool {
        if self.phase == FlightPhase::Impacted {
            return false;
        }

        // --- Atmosphere ---
        let altitude = self.state.altitude();
        if altitude < 0.0 {
            self.phase = FlightPhase::Impacted;
            return false;
        }
        let air = AirData::new(altitude, self.state.speed());

        // --- Guidance ---
        let geometry = Engagement::new(self.state.pos, &self.state.vel, target.position);
        let gamma = geometry.flight_path_angle;
        let cmd = self.guidance.command(&geometry);

        // --- Coefficients ---
        let coeffs = self.aero.coefficients(air.mach);
        let cl = coeffs.cl_alpha * cmd.alpha;

        // --- Forces (wind frame magnitudes -> inertial) ---
        let q_s = air.dynamic_force(self.reference_area);
        let drag = q_s * coeffs.cd;
        let lift = q_s * cl;
        let aero_force = resolve_wind_forces(drag, lift, gamma);

        // --- Integration ---
        let mut accel = aero_force / self.mass;
        accel.y -= self.gravity;

        let report = StepReport {
            time: self.state.time,
            density: air.density,
            mach: air.mach,
            dynamic_force: q_s,
            flight_path_angle: gamma,
            los_angle: cmd.los_angle,
            alpha: cmd.alpha,
            alpha_saturated: cmd.saturated,
            cd: coeffs.cd,
            cl,
            drag,
            lift,
            aero_force,
            accel,
        };
        trace!(t = report.time, mach = report.mach, alpha = report.alpha, "step");

        euler_step(&mut self.state, &accel, dt, self.integration);
        self.last_step = Some(report);
        true
    }

    pub fn state(&self) -> &FlightState {
        &self.state
    }

    pub fn phase(&self) -> FlightPhase {
        self.phase
    }

    pub fn is_flying(&self) -> bool {
        self.phase == FlightPhase::Flying
    }

    /// Diagnostics of the most recent successful update.
    pub fn last_step(&self) -> Option<&StepReport> {
        self.last_step.as_ref()
    }

    pub fn guidance(&self) -> &G {
        &self.guidance
    }
}
