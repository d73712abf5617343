//! Viewport observation as a capability.
//!
//! Counters and scroll-gated reveals only need "tell me when this node
//! crosses this line, until I say stop". The browser answers that with an
//! `IntersectionObserver`; tests answer it with a fake they drive by hand.

use std::fmt;

use super::stage::NodeId;

/// When a watch should report.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Threshold {
    /// At least this fraction of the node's box is inside the viewport.
    Visible(f64),
    /// The node's top edge has crossed this fraction of the viewport
    /// height, measured from the top.
    TopCrosses(f64),
}

/// One observation delivered to a watch callback.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Intersection {
    pub is_intersecting: bool,
    /// Seconds on the same clock the frame loop uses.
    pub time: f64,
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ObserverError {
    #[error("viewport observation is not available")]
    Unsupported,
    #[error("failed to observe node: {0}")]
    Js(String),
}

pub type WatchCallback = Box<dyn FnMut(Intersection)>;

pub trait ViewportObserver {
    fn watch(
        &self,
        node: NodeId,
        threshold: Threshold,
        callback: WatchCallback,
    ) -> Result<WatchHandle, ObserverError>;
}

/// Keeps a watch alive. Releasing or dropping it disconnects the watch.
pub struct WatchHandle {
    release: Option<Box<dyn FnOnce()>>,
}

impl WatchHandle {
    pub fn new(release: impl FnOnce() + 'static) -> Self {
        Self { release: Some(Box::new(release)) }
    }

    pub fn release(mut self) {
        self.disconnect();
    }

    fn disconnect(&mut self) {
        if let Some(release) = self.release.take() {
            release();
        }
    }
}

impl Drop for WatchHandle {
    fn drop(&mut self) {
        self.disconnect();
    }
}

impl fmt::Debug for WatchHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WatchHandle")
            .field("live", &self.release.is_some())
            .finish()
    }
}
