pub mod config;
pub mod dynamics;
pub mod error;
pub mod gnc;
pub mod io;
pub mod physics;
pub mod sim;

pub use config::{Scenario, SimulationConfig, Target, Vehicle};
pub use dynamics::{FlightState, Projectile};
pub use error::{ConfigError, TableLoadError};
pub use physics::{AeroDatabase, AeroModel};
pub use sim::{simulate, simulate_with, SimOutcome};
