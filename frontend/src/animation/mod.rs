//! Entrance animations and count-up counters for the landing page.
//!
//! Everything here is browser independent: nodes are reached through a
//! [`Stage`], visibility through a [`ViewportObserver`], and randomness
//! through a [`RandomSource`]. The `web` module supplies the real ones.

pub mod choreography;
pub mod context;
pub mod counter;
pub mod easing;
pub mod engine;
pub mod instruction;
pub mod observer;
pub mod props;
pub mod random;
pub mod stage;
pub mod tween;

#[cfg(test)]
pub mod testing;

pub use context::{AnimationContext, MotionPreference};
pub use counter::{CounterFormat, CounterState, ViewportCounter};
pub use observer::{ObserverError, ViewportObserver};
pub use random::{RandomSource, SeededRandom};
pub use stage::{NodeId, Stage};
