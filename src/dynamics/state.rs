use nalgebra::{UnitQuaternion, Vector3};

use crate::config::InitialConditions;
use crate::physics::atmosphere;

// ---------------------------------------------------------------------------
// Planar flight state: position, velocity, reserved attitude
// ---------------------------------------------------------------------------

/// Frame: x downrange, y altitude, z crossrange. Only x and y evolve.
#[derive(Debug, Clone, PartialEq)]
pub struct FlightState {
    pub time: f64,                         // s
    pub pos: Vector3<f64>,                 // m, inertial
    pub vel: Vector3<f64>,                 // m/s, inertial
    /// Body attitude. Not read or written by the planar dynamics; kept for a
    /// 3D extension and always the identity today.
    pub orientation: UnitQuaternion<f64>,
}

impl FlightState {
    pub fn new(initial: &InitialConditions) -> Self {
        Self {
            time: 0.0,
            pos: initial.position,
            vel: initial.velocity,
            orientation: UnitQuaternion::identity(),
        }
    }

    pub fn downrange(&self) -> f64 {
        self.pos.x
    }

    pub fn altitude(&self) -> f64 {
        self.pos.y
    }

    pub fn speed(&self) -> f64 {
        self.vel.norm()
    }

    pub fn mach(&self) -> f64 {
        atmosphere::mach(self.speed())
    }
}

// ---------------------------------------------------------------------------
// Flight phase
// ---------------------------------------------------------------------------

/// `Impacted` is terminal and only entered when an update starts below
/// ground.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FlightPhase {
    #[default]
    Flying,
    Impacted,
}

// ---------------------------------------------------------------------------
// Per-step diagnostics
// ---------------------------------------------------------------------------

/// Everything computed during one successful update, before integration.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StepReport {
    pub time: f64,              // s, at the start of the step
    pub density: f64,           // kg/m^3
    pub mach: f64,
    pub dynamic_force: f64,     // N, 0.5 * rho * V^2 * S
    pub flight_path_angle: f64, // rad
    pub los_angle: f64,         // rad
    pub alpha: f64,             // rad, applied
    pub alpha_saturated: bool,
    pub cd: f64,
    pub cl: f64,
    pub drag: f64,              // N
    pub lift: f64,              // N, negative for a downward turn
    pub aero_force: Vector3<f64>, // N, inertial
    pub accel: Vector3<f64>,    // m/s^2, inertial, gravity included
}
