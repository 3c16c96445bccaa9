use serde::Serialize;

use crate::dynamics::{FlightState, StepReport};

// ---------------------------------------------------------------------------
// Termination
// ---------------------------------------------------------------------------

/// Why the loop stopped. Both are normal outcomes.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Termination {
    /// `update` reported the projectile below ground.
    Impact { time: f64 },
    /// Time budget exhausted while still flying.
    Timeout { time: f64 },
}

impl Termination {
    pub fn time(&self) -> f64 {
        match *self {
            Termination::Impact { time } | Termination::Timeout { time } => time,
        }
    }

    pub fn is_impact(&self) -> bool {
        matches!(self, Termination::Impact { .. })
    }
}

// ---------------------------------------------------------------------------
// Flight events
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EventKind {
    Apogee,
    GuidanceSaturated,
    GuidanceUnsaturated,
    Impact,
    Timeout,
}

/// A discrete event that occurred during the flight.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FlightEvent {
    pub time: f64,
    pub kind: EventKind,
    pub downrange: f64,
    pub altitude: f64,
}

impl FlightEvent {
    pub fn at(state: &FlightState, kind: EventKind) -> Self {
        Self {
            time: state.time,
            kind,
            downrange: state.downrange(),
            altitude: state.altitude(),
        }
    }
}

/// Trait for passive event detectors.
/// Implementations inspect consecutive states and the step between them.
pub trait EventDetector {
    fn check(
        &mut self,
        prev: &FlightState,
        current: &FlightState,
        step: &StepReport,
    ) -> Option<EventKind>;
}

/// Vertical velocity going from positive to non-positive.
pub struct ApogeeDetector;

impl EventDetector for ApogeeDetector {
    fn check(
        &mut self,
        prev: &FlightState,
        current: &FlightState,
        _step: &StepReport,
    ) -> Option<EventKind> {
        if prev.vel.y > 0.0 && current.vel.y <= 0.0 {
            Some(EventKind::Apogee)
        } else {
            None
        }
    }
}

/// Edges of the angle-of-attack limit being hit or released.
#[derive(Debug, Default)]
pub struct SaturationDetector {
    saturated: bool,
}

impl EventDetector for SaturationDetector {
    fn check(
        &mut self,
        _prev: &FlightState,
        _current: &FlightState,
        step: &StepReport,
    ) -> Option<EventKind> {
        if step.alpha_saturated == self.saturated {
            return None;
        }
        self.saturated = step.alpha_saturated;
        Some(if self.saturated {
            EventKind::GuidanceSaturated
        } else {
            EventKind::GuidanceUnsaturated
        })
    }
}
