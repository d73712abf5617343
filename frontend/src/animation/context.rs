//! Scoped ownership of everything a page's animations acquire.
//!
//! An [`AnimationContext`] is created when a page mounts. Every instruction
//! is registered against it; it records the tweens it spawned, the watches
//! it holds and the nodes it wrote to. [`AnimationContext::revert`] gives all
//! of it back in one call and runs again from `Drop`, so a page that never
//! calls it (or bails out half way through setup) still leaves nothing
//! behind.

use std::cell::{Cell, RefCell};
use std::collections::BTreeSet;
use std::rc::{Rc, Weak};

use log::{debug, log_enabled, trace, warn, Level};

use super::engine::{TweenEngine, TweenId};
use super::instruction::{AnimationInstruction, Trigger};
use super::observer::{Intersection, ObserverError, Threshold, ViewportObserver, WatchHandle};
use super::random::RandomSource;
use super::stage::{NodeId, Stage};
use super::tween::Tween;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ContextError {
    #[error("animation context has already been reverted")]
    Reverted,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MotionPreference {
    #[default]
    Full,
    /// Jump to final states, run no tweens.
    Reduced,
}

/// What `register` did with an instruction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Registration {
    /// The selector matched nothing.
    Skipped,
    /// Tweens for this many nodes are running.
    Running(usize),
    /// Waiting for its section to scroll into view.
    Gated,
    /// Final state written directly.
    Settled,
}

#[derive(Default)]
struct ContextState {
    tweens: Vec<TweenId>,
    gates: Vec<Option<WatchHandle>>,
    touched: BTreeSet<NodeId>,
    reverted: bool,
}

pub struct AnimationContext {
    stage: Rc<dyn Stage>,
    observer: Rc<dyn ViewportObserver>,
    random: RefCell<Box<dyn RandomSource>>,
    motion: MotionPreference,
    engine: Rc<RefCell<TweenEngine>>,
    state: Rc<RefCell<ContextState>>,
}

impl AnimationContext {
    pub fn new(
        stage: Rc<dyn Stage>,
        observer: Rc<dyn ViewportObserver>,
        random: Box<dyn RandomSource>,
    ) -> Self {
        Self {
            stage,
            observer,
            random: RefCell::new(random),
            motion: MotionPreference::Full,
            engine: Rc::new(RefCell::new(TweenEngine::new())),
            state: Rc::new(RefCell::new(ContextState::default())),
        }
    }

    pub fn with_motion(mut self, motion: MotionPreference) -> Self {
        self.motion = motion;
        self
    }

    pub fn register(&self, instruction: AnimationInstruction) -> Result<Registration, ContextError> {
        if self.state.borrow().reverted {
            return Err(ContextError::Reverted);
        }
        if log_enabled!(Level::Trace) {
            if let Ok(json) = serde_json::to_string(&instruction) {
                trace!("registering {}", json);
            }
        }

        let nodes = self.stage.select(&instruction.selector);
        if nodes.is_empty() {
            debug!("`{}` matched no nodes, skipping", instruction.selector);
            return Ok(Registration::Skipped);
        }

        let tweens = self.prepare(&instruction, &nodes);
        {
            let mut state = self.state.borrow_mut();
            for node in &nodes {
                self.stage.apply(*node, &instruction.from);
                state.touched.insert(*node);
            }
        }

        if self.motion == MotionPreference::Reduced {
            for tween in tweens.iter().filter(|t| !t.repeat.is_infinite()) {
                self.stage.apply(tween.node, &tween.to);
            }
            return Ok(Registration::Settled);
        }

        let Trigger::OnScrollIntoView { section, range } = &instruction.trigger else {
            return Ok(Registration::Running(self.spawn(tweens)));
        };

        let Some(section_node) = self.stage.select(section).first().copied() else {
            debug!("section `{}` for `{}` not found, playing now", section, instruction.selector);
            return Ok(Registration::Running(self.spawn(tweens)));
        };

        let gate = {
            let mut state = self.state.borrow_mut();
            state.gates.push(None);
            state.gates.len() - 1
        };
        let fired = Rc::new(Cell::new(false));
        let callback = self.gate_callback(gate, tweens.clone(), fired.clone());
        match self.observer.watch(section_node, Threshold::TopCrosses(range.start), callback) {
            Ok(handle) => {
                // the section may already be in view and have fired during `watch`
                if fired.get() {
                    drop(handle);
                    return Ok(Registration::Running(nodes.len()));
                }
                if let Some(slot) = self.state.borrow_mut().gates.get_mut(gate) {
                    *slot = Some(handle);
                }
                debug!("`{}` waits for `{}` at {:.0}%", instruction.selector, section, range.start * 100.0);
                Ok(Registration::Gated)
            }
            Err(err) => {
                if err != ObserverError::Unsupported {
                    warn!("could not watch `{}`: {}", section, err);
                }
                Ok(Registration::Running(self.spawn(tweens)))
            }
        }
    }

    /// Resolve per-node timing, stagger and randomized values.
    fn prepare(&self, instruction: &AnimationInstruction, nodes: &[NodeId]) -> Vec<Tween> {
        let mut random = self.random.borrow_mut();
        nodes
            .iter()
            .enumerate()
            .map(|(index, node)| {
                let mut tween = Tween::new(*node, instruction.from.clone(), instruction.to.clone());
                tween.duration = instruction.timing.duration;
                tween.delay = instruction.start_offset(index);
                tween.ease = instruction.timing.ease;
                tween.repeat = instruction.repeat;

                if let Some(variance) = &instruction.variance {
                    if let Some(spread) = variance.duration {
                        tween.duration = random.in_range(spread.min, spread.max);
                    }
                    if let Some(spread) = variance.delay {
                        tween.delay += random.in_range(spread.min, spread.max);
                    }
                    for (property, spread) in &variance.targets {
                        tween.to.set(*property, random.in_range(spread.min, spread.max));
                    }
                }
                tween
            })
            .collect()
    }

    fn spawn(&self, tweens: Vec<Tween>) -> usize {
        spawn_into(&self.engine, &self.state, tweens)
    }

    fn gate_callback(
        &self,
        gate: usize,
        tweens: Vec<Tween>,
        fired: Rc<Cell<bool>>,
    ) -> Box<dyn FnMut(Intersection)> {
        let engine: Weak<RefCell<TweenEngine>> = Rc::downgrade(&self.engine);
        let state: Weak<RefCell<ContextState>> = Rc::downgrade(&self.state);
        let mut pending = Some(tweens);
        Box::new(move |entry: Intersection| {
            if !entry.is_intersecting {
                return;
            }
            let (Some(engine), Some(state)) = (engine.upgrade(), state.upgrade()) else {
                return;
            };
            if state.borrow().reverted {
                return;
            }
            let handle = state.borrow_mut().gates.get_mut(gate).and_then(Option::take);
            if let Some(handle) = handle {
                handle.release();
            }
            if let Some(tweens) = pending.take() {
                fired.set(true);
                let count = spawn_into(&engine, &state, tweens);
                debug!("scroll gate {} fired at {:.3}s, {} tweens", gate, entry.time, count);
            }
        })
    }

    /// Advance every live tween to `now` (seconds). Returns how many are
    /// still live.
    pub fn tick(&self, now: f64) -> usize {
        if self.state.borrow().reverted {
            return 0;
        }
        self.engine.borrow_mut().tick(now, self.stage.as_ref())
    }

    pub fn live_tweens(&self) -> usize {
        self.engine.borrow().active_count()
    }

    /// Scroll gates registered but not yet fired.
    pub fn pending_gates(&self) -> usize {
        self.state.borrow().gates.iter().filter(|g| g.is_some()).count()
    }

    /// Start time of every tween this context spawned, in spawn order.
    pub fn start_times(&self) -> Vec<(NodeId, Option<f64>)> {
        let engine = self.engine.borrow();
        self.state
            .borrow()
            .tweens
            .iter()
            .filter_map(|id| engine.get(*id))
            .map(|tween| (tween.node, tween.start_time()))
            .collect()
    }

    pub fn is_reverted(&self) -> bool {
        self.state.borrow().reverted
    }

    /// Cancel every tween, release every watch and clear every node this
    /// context wrote to. Safe to call any number of times.
    pub fn revert(&self) {
        let (tweens, gates, touched) = {
            let mut state = self.state.borrow_mut();
            if state.reverted {
                return;
            }
            state.reverted = true;
            (
                std::mem::take(&mut state.tweens),
                std::mem::take(&mut state.gates),
                std::mem::take(&mut state.touched),
            )
        };

        let released = gates.iter().filter(|g| g.is_some()).count();
        drop(gates);

        let mut engine = self.engine.borrow_mut();
        let cancelled = tweens.into_iter().filter(|id| engine.cancel(*id)).count();
        engine.clear();
        drop(engine);

        for node in &touched {
            self.stage.reset(*node);
        }
        debug!(
            "animation context reverted: {} tweens cancelled, {} watches released, {} nodes reset",
            cancelled,
            released,
            touched.len()
        );
    }
}

fn spawn_into(engine: &RefCell<TweenEngine>, state: &RefCell<ContextState>, tweens: Vec<Tween>) -> usize {
    let mut engine = engine.borrow_mut();
    let mut state = state.borrow_mut();
    let count = tweens.len();
    for tween in tweens {
        let id = engine.spawn(tween);
        state.tweens.push(id);
    }
    count
}

impl Drop for AnimationContext {
    fn drop(&mut self) {
        self.revert();
    }
}
