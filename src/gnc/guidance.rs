use nalgebra::Vector3;

// ---------------------------------------------------------------------------
// Engagement geometry
// ---------------------------------------------------------------------------

/// Planar geometry seen by the guidance law at one step.
#[derive(Debug, Clone, Copy)]
pub struct Engagement {
    pub position: Vector3<f64>,
    pub target: Vector3<f64>,
    /// Bearing of the velocity vector, computed once per step and shared
    /// with force resolution.
    pub flight_path_angle: f64,
}

impl Engagement {
    pub fn new(position: Vector3<f64>, velocity: &Vector3<f64>, target: Vector3<f64>) -> Self {
        Self {
            position,
            target,
            flight_path_angle: flight_path_angle(velocity),
        }
    }

    /// Bearing from the projectile to the target in the vertical plane.
    pub fn los_angle(&self) -> f64 {
        let r = self.target - self.position;
        r.y.atan2(r.x)
    }
}

/// atan2(vy, vx). Zero for a zero velocity.
pub fn flight_path_angle(velocity: &Vector3<f64>) -> f64 {
    velocity.y.atan2(velocity.x)
}

// ---------------------------------------------------------------------------
// Guidance command output
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct GuidanceCommand {
    pub alpha: f64,           // rad, applied angle of attack
    pub unclamped_alpha: f64, // rad, law output before the structural limit
    pub los_angle: f64,       // rad
    pub flight_path_angle: f64, // rad
    pub saturated: bool,
}

/// Trait for guidance laws.
///
/// Implement this to drive the projectile with a different law; the
/// simulation loop takes any `Guidance`.
pub trait Guidance {
    /// Commanded angle of attack from the current geometry.
    fn command(&mut self, geometry: &Engagement) -> GuidanceCommand;

    fn name(&self) -> &str {
        "unnamed"
    }
}

// ---------------------------------------------------------------------------
// Proportional navigation
// ---------------------------------------------------------------------------

/// alpha = N * (los - gamma), clamped to the structural limit.
///
/// Memoryless: every command comes from the current geometry only, with no
/// integral or rate term.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProportionalNavigation {
    pub gain: f64,
    pub alpha_limit: f64, // rad
}

impl ProportionalNavigation {
    pub const DEFAULT_GAIN: f64 = 3.0;

    pub fn new(gain: f64, alpha_limit: f64) -> Self {
        Self { gain, alpha_limit }
    }
}

impl Default for ProportionalNavigation {
    fn default() -> Self {
        Self::new(Self::DEFAULT_GAIN, 10.0_f64.to_radians())
    }
}

impl Guidance for ProportionalNavigation {
    fn command(&mut self, geometry: &Engagement) -> GuidanceCommand {
        let los_angle = geometry.los_angle();
        let gamma = geometry.flight_path_angle;
        let raw = self.gain * (los_angle - gamma);
        let alpha = raw.clamp(-self.alpha_limit, self.alpha_limit);

        GuidanceCommand {
            alpha,
            unclamped_alpha: raw,
            los_angle,
            flight_path_angle: gamma,
            saturated: raw.abs() > self.alpha_limit,
        }
    }

    fn name(&self) -> &str {
        "ProportionalNavigation"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn geometry(pos: [f64; 2], vel: [f64; 2], target: [f64; 2]) -> Engagement {
        Engagement::new(
            Vector3::new(pos[0], pos[1], 0.0),
            &Vector3::new(vel[0], vel[1], 0.0),
            Vector3::new(target[0], target[1], 0.0),
        )
    }

    #[test]
    fn on_course_gives_zero_command() {
        let mut pn = ProportionalNavigation::default();
        let cmd = pn.command(&geometry([0.0, 0.0], [100.0, 0.0], [1000.0, 0.0]));
        assert_eq!(cmd.alpha, 0.0);
        assert!(!cmd.saturated);
    }

    #[test]
    fn small_error_is_gain_times_error() {
        let mut pn = ProportionalNavigation::default();
        // los = atan2(10, 1000), gamma = 0
        let cmd = pn.command(&geometry([0.0, 0.0], [300.0, 0.0], [1000.0, 10.0]));
        let los = 10.0_f64.atan2(1000.0);
        assert_relative_eq!(cmd.los_angle, los, epsilon = 1e-12);
        assert_relative_eq!(cmd.alpha, 3.0 * los, epsilon = 1e-12);
        assert_eq!(cmd.alpha, cmd.unclamped_alpha);
    }

    #[test]
    fn large_positive_error_clamps_to_limit() {
        let mut pn = ProportionalNavigation::default();
        // target 45 deg above, flying level: raw = 3 * 45 deg
        let cmd = pn.command(&geometry([0.0, 0.0], [300.0, 0.0], [1000.0, 1000.0]));
        assert!(cmd.saturated);
        assert_eq!(cmd.alpha, 10.0_f64.to_radians());
        assert_relative_eq!(
            cmd.unclamped_alpha,
            3.0 * std::f64::consts::FRAC_PI_4,
            epsilon = 1e-12
        );
    }

    #[test]
    fn large_negative_error_clamps_to_negative_limit() {
        let mut pn = ProportionalNavigation::default();
        let cmd = pn.command(&geometry([0.0, 2000.0], [680.0, 0.0], [1000.0, 0.0]));
        assert!(cmd.saturated);
        assert_eq!(cmd.alpha, -10.0_f64.to_radians());
    }

    #[test]
    fn flight_path_angle_of_climbing_velocity() {
        assert_relative_eq!(
            flight_path_angle(&Vector3::new(1.0, 1.0, 0.0)),
            std::f64::consts::FRAC_PI_4
        );
        assert_eq!(flight_path_angle(&Vector3::zeros()), 0.0);
    }
}
