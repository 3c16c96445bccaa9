pub mod event;
pub mod runner;
pub mod trajectory;

pub use event::{EventKind, FlightEvent, Termination};
pub use runner::{run, simulate, simulate_with, SimOutcome};
pub use trajectory::{Trajectory, TrajectorySample};
