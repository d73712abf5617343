use log::Level;

use crate::animation::easing::Ease;

#[cfg(debug_assertions)]
pub fn log_level() -> Level {
    Level::Debug  // Verbose logging when running locally
}

#[cfg(not(debug_assertions))]
pub fn log_level() -> Level {
    Level::Info
}

/// Fraction of a counter that must be on screen before it starts.
pub const COUNTER_VISIBILITY_THRESHOLD: f64 = 0.5;

/// Seconds a counter takes to reach its target unless told otherwise.
pub const DEFAULT_COUNTER_DURATION: f64 = 2.0;

pub const COUNTER_EASE: Ease = Ease::PowerOut(2);

/// Ambient particles rendered behind the page.
pub const PARTICLE_COUNT: usize = 20;

pub const REDUCED_MOTION_QUERY: &str = "(prefers-reduced-motion: reduce)";
