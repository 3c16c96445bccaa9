use nalgebra::Vector3;

use super::state::FlightState;
use crate::config::IntegrationScheme;

// ---------------------------------------------------------------------------
// Fixed-step Euler integration (downrange and vertical axes)
// ---------------------------------------------------------------------------

/// Advance velocity, position and time by one step of constant acceleration.
/// The crossrange axis is left untouched.
pub fn euler_step(
    state: &mut FlightState,
    accel: &Vector3<f64>,
    dt: f64,
    scheme: IntegrationScheme,
) {
    match scheme {
        IntegrationScheme::ForwardEuler => {
            let (vx, vy) = (state.vel.x, state.vel.y);
            state.vel.x += accel.x * dt;
            state.vel.y += accel.y * dt;
            state.pos.x += vx * dt;
            state.pos.y += vy * dt;
        }
        IntegrationScheme::SemiImplicitEuler => {
            state.vel.x += accel.x * dt;
            state.vel.y += accel.y * dt;
            state.pos.x += state.vel.x * dt;
            state.pos.y += state.vel.y * dt;
        }
    }
    state.time += dt;
}
