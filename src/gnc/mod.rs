pub mod guidance;

pub use guidance::{Engagement, Guidance, GuidanceCommand, ProportionalNavigation};
