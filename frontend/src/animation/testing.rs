//! Deterministic stand-ins for the browser, used by unit tests.

use std::cell::RefCell;
use std::collections::{BTreeMap, VecDeque};
use std::rc::{Rc, Weak};

use super::observer::{
    Intersection, ObserverError, Threshold, ViewportObserver, WatchCallback, WatchHandle,
};
use super::props::VisualState;
use super::random::RandomSource;
use super::stage::{NodeId, Stage};

/// A document of nodes, each matching a fixed set of selectors.
#[derive(Default)]
pub struct FakeStage {
    nodes: Vec<Vec<String>>,
    current: RefCell<BTreeMap<NodeId, VisualState>>,
    writes: RefCell<BTreeMap<NodeId, usize>>,
    resets: RefCell<Vec<NodeId>>,
}

impl FakeStage {
    /// `nodes[i]` is a space separated list of selectors node `i` matches.
    pub fn with_nodes(nodes: &[&str]) -> Self {
        Self {
            nodes: nodes
                .iter()
                .map(|n| n.split_whitespace().map(str::to_string).collect())
                .collect(),
            ..Self::default()
        }
    }

    pub fn last(&self, node: NodeId) -> Option<VisualState> {
        self.current.borrow().get(&node).cloned()
    }

    pub fn write_count(&self, node: NodeId) -> usize {
        self.writes.borrow().get(&node).copied().unwrap_or(0)
    }

    pub fn total_writes(&self) -> usize {
        self.writes.borrow().values().sum()
    }

    pub fn resets(&self) -> Vec<NodeId> {
        self.resets.borrow().clone()
    }
}

impl Stage for FakeStage {
    fn select(&self, selector: &str) -> Vec<NodeId> {
        self.nodes
            .iter()
            .enumerate()
            .filter(|(_, matches)| matches.iter().any(|m| m == selector))
            .map(|(i, _)| NodeId(i))
            .collect()
    }

    fn apply(&self, node: NodeId, state: &VisualState) {
        self.current.borrow_mut().insert(node, state.clone());
        *self.writes.borrow_mut().entry(node).or_default() += 1;
    }

    fn reset(&self, node: NodeId) {
        self.current.borrow_mut().remove(&node);
        self.resets.borrow_mut().push(node);
    }
}

struct FakeWatch {
    node: NodeId,
    threshold: Threshold,
    callback: Option<WatchCallback>,
}

#[derive(Default)]
struct FakeViewportInner {
    next_id: u64,
    watches: BTreeMap<u64, FakeWatch>,
    supported: bool,
}

/// Viewport observer driven by hand. Callbacks may release their own
/// watch while being delivered.
#[derive(Clone)]
pub struct FakeViewport {
    inner: Rc<RefCell<FakeViewportInner>>,
}

impl FakeViewport {
    pub fn new() -> Self {
        Self {
            inner: Rc::new(RefCell::new(FakeViewportInner { supported: true, ..Default::default() })),
        }
    }

    pub fn unsupported() -> Self {
        let viewport = Self::new();
        viewport.inner.borrow_mut().supported = false;
        viewport
    }

    pub fn active_watches(&self) -> usize {
        self.inner.borrow().watches.len()
    }

    pub fn thresholds_for(&self, node: NodeId) -> Vec<Threshold> {
        self.inner
            .borrow()
            .watches
            .values()
            .filter(|w| w.node == node)
            .map(|w| w.threshold)
            .collect()
    }

    /// Deliver an observation to every watch on `node`.
    pub fn observe(&self, node: NodeId, entry: Intersection) {
        let ids: Vec<u64> = self
            .inner
            .borrow()
            .watches
            .iter()
            .filter(|(_, w)| w.node == node)
            .map(|(id, _)| *id)
            .collect();

        for id in ids {
            let callback = self
                .inner
                .borrow_mut()
                .watches
                .get_mut(&id)
                .and_then(|w| w.callback.take());
            if let Some(mut callback) = callback {
                callback(entry);
                if let Some(watch) = self.inner.borrow_mut().watches.get_mut(&id) {
                    watch.callback = Some(callback);
                }
            }
        }
    }

    /// Scroll `node` fully into view at `time`.
    pub fn enter(&self, node: NodeId, time: f64) {
        self.observe(node, Intersection { is_intersecting: true, time });
    }

    /// Scroll `node` out of view at `time`.
    pub fn leave(&self, node: NodeId, time: f64) {
        self.observe(node, Intersection { is_intersecting: false, time });
    }
}

impl ViewportObserver for FakeViewport {
    fn watch(
        &self,
        node: NodeId,
        threshold: Threshold,
        callback: WatchCallback,
    ) -> Result<WatchHandle, ObserverError> {
        let mut inner = self.inner.borrow_mut();
        if !inner.supported {
            return Err(ObserverError::Unsupported);
        }
        let id = inner.next_id;
        inner.next_id += 1;
        inner.watches.insert(id, FakeWatch { node, threshold, callback: Some(callback) });

        let weak: Weak<RefCell<FakeViewportInner>> = Rc::downgrade(&self.inner);
        Ok(WatchHandle::new(move || {
            if let Some(inner) = weak.upgrade() {
                inner.borrow_mut().watches.remove(&id);
            }
        }))
    }
}

/// Replays a fixed sequence, cycling when exhausted.
pub struct ScriptedRandom {
    values: VecDeque<f64>,
}

impl ScriptedRandom {
    pub fn new(values: &[f64]) -> Self {
        Self { values: values.iter().copied().collect() }
    }
}

impl RandomSource for ScriptedRandom {
    fn next_f64(&mut self) -> f64 {
        match self.values.pop_front() {
            Some(v) => {
                self.values.push_back(v);
                v
            }
            None => 0.0,
        }
    }
}
