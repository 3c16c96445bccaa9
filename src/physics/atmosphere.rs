// ---------------------------------------------------------------------------
// Exponential atmosphere with constant speed of sound
// ---------------------------------------------------------------------------

pub const RHO_SEA_LEVEL: f64 = 1.225; // kg/m^3
pub const SCALE_HEIGHT: f64 = 8500.0; // m
pub const SPEED_OF_SOUND: f64 = 340.0; // m/s, held constant with altitude

/// Air data at the current state.
#[derive(Debug, Clone, Copy)]
pub struct AirData {
    pub density: f64, // kg/m^3
    pub speed: f64,   // m/s
    pub mach: f64,
}

impl AirData {
    pub fn new(altitude: f64, speed: f64) -> Self {
        Self {
            density: density(altitude),
            speed,
            mach: mach(speed),
        }
    }

    /// 0.5 * rho * V^2 * S, the force scale shared by drag and lift.
    pub fn dynamic_force(&self, reference_area: f64) -> f64 {
        0.5 * self.density * self.speed * self.speed * reference_area
    }
}

/// rho = rho0 * exp(-h / H). Not clamped: callers stop at h < 0.
pub fn density(altitude: f64) -> f64 {
    RHO_SEA_LEVEL * (-altitude / SCALE_HEIGHT).exp()
}

pub fn mach(speed: f64) -> f64 {
    speed / SPEED_OF_SOUND
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn sea_level_density() {
        assert_relative_eq!(density(0.0), 1.225);
    }

    #[test]
    fn density_falls_by_e_per_scale_height() {
        assert_relative_eq!(density(SCALE_HEIGHT), 1.225 / std::f64::consts::E, epsilon = 1e-12);
        assert!(density(2000.0) < density(1000.0));
    }

    #[test]
    fn mach_two_at_680() {
        assert_relative_eq!(mach(680.0), 2.0);
    }

    #[test]
    fn dynamic_force_scales_with_speed_squared() {
        let slow = AirData::new(0.0, 100.0).dynamic_force(1.0);
        let fast = AirData::new(0.0, 200.0).dynamic_force(1.0);
        assert_relative_eq!(slow, 0.5 * 1.225 * 100.0 * 100.0);
        assert_relative_eq!(fast / slow, 4.0, epsilon = 1e-12);
    }
}
