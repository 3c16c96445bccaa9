pub mod integrator;
pub mod projectile;
pub mod state;

pub use integrator::euler_step;
pub use projectile::Projectile;
pub use state::{FlightPhase, FlightState, StepReport};
