use serde::Serialize;

use crate::dynamics::FlightState;

/// One recorded step: where the projectile is and how fast.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TrajectorySample {
    pub time: f64,      // s
    pub downrange: f64, // m
    pub altitude: f64,  // m
    pub mach: f64,
}

impl TrajectorySample {
    pub fn from_state(state: &FlightState) -> Self {
        Self {
            time: state.time,
            downrange: state.downrange(),
            altitude: state.altitude(),
            mach: state.mach(),
        }
    }
}

/// Append-only record of surviving steps, in call order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Trajectory {
    samples: Vec<TrajectorySample>,
}

impl Trajectory {
    pub fn with_capacity(capacity: usize) -> Self {
        Self { samples: Vec::with_capacity(capacity) }
    }

    pub fn push(&mut self, sample: TrajectorySample) {
        self.samples.push(sample);
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn last(&self) -> Option<&TrajectorySample> {
        self.samples.last()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, TrajectorySample> {
        self.samples.iter()
    }

    pub fn as_slice(&self) -> &[TrajectorySample] {
        &self.samples
    }
}

impl<'a> IntoIterator for &'a Trajectory {
    type Item = &'a TrajectorySample;
    type IntoIter = std::slice::Iter<'a, TrajectorySample>;

    fn into_iter(self) -> Self::IntoIter {
        self.samples.iter()
    }
}
