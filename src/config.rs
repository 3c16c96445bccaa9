use std::f64::consts::PI;
use std::path::{Path, PathBuf};

use nalgebra::Vector3;
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

// ---------------------------------------------------------------------------
// Integration scheme
// ---------------------------------------------------------------------------

/// How velocity and position are advanced from the step acceleration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IntegrationScheme {
    /// x += v_old * dt, v += a * dt
    #[default]
    ForwardEuler,
    /// v += a * dt, x += v_new * dt
    SemiImplicitEuler,
}

// ---------------------------------------------------------------------------
// Simulation configuration
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    pub dt: f64,       // integration timestep, s
    pub max_time: f64, // hard stop, s
    pub gravity: f64,  // m/s^2, acts on the vertical axis only
    pub integration: IntegrationScheme,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            dt: 0.01,
            max_time: 100.0,
            gravity: 9.81,
            integration: IntegrationScheme::ForwardEuler,
        }
    }
}

// ---------------------------------------------------------------------------
// Vehicle definition
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Vehicle {
    pub name: String,
    pub mass: f64,     // kg
    pub diameter: f64, // m
}

impl Vehicle {
    /// Frontal reference area: pi * (d/2)^2
    pub fn reference_area(&self) -> f64 {
        PI * (self.diameter / 2.0).powi(2)
    }
}

impl Default for Vehicle {
    /// 155 mm M549 shell.
    fn default() -> Self {
        Self {
            name: "M549".into(),
            mass: 43.5,
            diameter: 0.155,
        }
    }
}

// ---------------------------------------------------------------------------
// Initial conditions and target
// ---------------------------------------------------------------------------

/// Inertial frame: x downrange, y altitude, z crossrange.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct InitialConditions {
    pub position: Vector3<f64>, // m
    pub velocity: Vector3<f64>, // m/s
}

impl Default for InitialConditions {
    fn default() -> Self {
        Self {
            position: Vector3::new(0.0, 2000.0, 0.0),
            velocity: Vector3::new(680.0, 0.0, 0.0), // ~Mach 2
        }
    }
}

/// Fixed aim point, immutable for a run.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Target {
    pub position: Vector3<f64>,
}

impl Target {
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { position: Vector3::new(x, y, z) }
    }
}

impl Default for Target {
    fn default() -> Self {
        Self::new(15_000.0, 500.0, 0.0)
    }
}

pub const DEFAULT_AERO_TABLE: &str = "aerodynamics.csv";

// ---------------------------------------------------------------------------
// Scenario: everything a run needs, loadable from JSON
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Scenario {
    pub sim: SimulationConfig,
    pub vehicle: Vehicle,
    pub initial: InitialConditions,
    pub target: Target,
    /// Aerodynamic table (CSV). `None` means [`DEFAULT_AERO_TABLE`].
    pub aero_table: Option<PathBuf>,
}

impl Scenario {
    pub fn aero_table_path(&self) -> &Path {
        self.aero_table
            .as_deref()
            .unwrap_or_else(|| Path::new(DEFAULT_AERO_TABLE))
    }

    /// Read a scenario from a JSON file. Missing fields take their defaults.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json(&text)
    }

    pub fn from_json(text: &str) -> Result<Self, ConfigError> {
        let scenario: Scenario = serde_json::from_str(text)?;
        Ok(scenario)
    }

    /// Boundary checks for user-supplied scenarios. The flight core itself
    /// does not validate its inputs.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let positive = [
            ("sim.dt", self.sim.dt),
            ("sim.max_time", self.sim.max_time),
            ("vehicle.mass", self.vehicle.mass),
            ("vehicle.diameter", self.vehicle.diameter),
        ];
        for (name, value) in positive {
            if !value.is_finite() || value <= 0.0 {
                return Err(ConfigError::Invalid(format!(
                    "{name} must be positive and finite, got {value}"
                )));
            }
        }
        if !self.sim.gravity.is_finite() {
            return Err(ConfigError::Invalid("sim.gravity must be finite".into()));
        }
        let vectors = [
            ("initial.position", &self.initial.position),
            ("initial.velocity", &self.initial.velocity),
            ("target.position", &self.target.position),
        ];
        for (name, v) in vectors {
            if v.iter().any(|c| !c.is_finite()) {
                return Err(ConfigError::Invalid(format!("{name} must be finite")));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn m549_reference_area() {
        let v = Vehicle::default();
        assert_relative_eq!(v.reference_area(), 0.018_869_19, epsilon = 1e-8);
    }

    #[test]
    fn empty_json_gives_defaults() {
        let s = Scenario::from_json("{}").unwrap();
        assert_eq!(s.sim.dt, 0.01);
        assert_eq!(s.sim.max_time, 100.0);
        assert_eq!(s.initial.position, Vector3::new(0.0, 2000.0, 0.0));
        assert_eq!(s.target, Target::default());
        assert!(s.aero_table.is_none());
        assert_eq!(s.aero_table_path(), Path::new("aerodynamics.csv"));
    }

    #[test]
    fn partial_json_overrides_fields() {
        let json = r#"{
            "sim": { "dt": 0.005, "integration": "semi_implicit_euler" },
            "target": { "position": [12000.0, 0.0, 0.0] },
            "aero_table": "data/aerodynamics.csv"
        }"#;
        let s = Scenario::from_json(json).unwrap();
        assert_eq!(s.sim.dt, 0.005);
        assert_eq!(s.sim.max_time, 100.0);
        assert_eq!(s.sim.integration, IntegrationScheme::SemiImplicitEuler);
        assert_eq!(s.target.position.x, 12000.0);
        assert_eq!(s.aero_table.as_deref(), Some(Path::new("data/aerodynamics.csv")));
    }

    #[test]
    fn validate_rejects_non_positive_dt() {
        let mut s = Scenario::default();
        assert!(s.validate().is_ok());
        s.sim.dt = 0.0;
        assert!(matches!(s.validate(), Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn validate_rejects_nan_target() {
        let mut s = Scenario::default();
        s.target.position.y = f64::NAN;
        assert!(s.validate().is_err());
    }

    #[test]
    fn bad_json_is_parse_error() {
        assert!(matches!(Scenario::from_json("{ nope"), Err(ConfigError::Parse(_))));
    }
}
