//! Frame-driven tween engine.
//!
//! Holds every live tween and writes sampled states to a [`Stage`] once per
//! frame. Tweens anchor their clock on the first tick after they are
//! spawned, so callers never need to know the current time.

use slotmap::{new_key_type, SlotMap};

use super::stage::Stage;
use super::tween::Tween;

new_key_type! {
    /// Handle to a spawned tween
    pub struct TweenId;
}

#[derive(Default)]
pub struct TweenEngine {
    tweens: SlotMap<TweenId, Tween>,
}

impl TweenEngine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn spawn(&mut self, tween: Tween) -> TweenId {
        self.tweens.insert(tween)
    }

    /// Returns whether the tween was still live.
    pub fn cancel(&mut self, id: TweenId) -> bool {
        self.tweens.remove(id).is_some()
    }

    pub fn is_live(&self, id: TweenId) -> bool {
        self.tweens.contains_key(id)
    }

    pub fn get(&self, id: TweenId) -> Option<&Tween> {
        self.tweens.get(id)
    }

    pub fn active_count(&self) -> usize {
        self.tweens.len()
    }

    /// Advance every tween to `now` (seconds) and write the result.
    /// Finished one-shot tweens are written at their final state, then
    /// dropped. Returns the number still live.
    pub fn tick(&mut self, now: f64, stage: &dyn Stage) -> usize {
        let mut finished = Vec::new();
        for (id, tween) in self.tweens.iter_mut() {
            tween.anchor(now);
            let sample = tween.sample(now);
            stage.apply(tween.node, &sample.state);
            if sample.finished {
                finished.push(id);
            }
        }
        for id in finished {
            self.tweens.remove(id);
        }
        self.tweens.len()
    }

    pub fn clear(&mut self) {
        self.tweens.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::animation::easing::Ease;
    use crate::animation::instruction::Repeat;
    use crate::animation::props::{VisualProperty::*, VisualState};
    use crate::animation::stage::NodeId;
    use crate::animation::testing::FakeStage;

    fn slide(node: usize, duration: f64, repeat: Repeat) -> Tween {
        let mut tween = Tween::new(
            NodeId(node),
            VisualState::new().with(Y, 100.0),
            VisualState::new().with(Y, 0.0),
        );
        tween.duration = duration;
        tween.ease = Ease::Linear;
        tween.repeat = repeat;
        tween
    }

    #[test]
    fn finished_tweens_are_dropped_after_final_write() {
        let stage = FakeStage::with_nodes(&[".a", ".a"]);
        let mut engine = TweenEngine::new();
        let short = engine.spawn(slide(0, 1.0, Repeat::None));
        let looping = engine.spawn(slide(1, 1.0, Repeat::Loop));

        assert_eq!(engine.tick(5.0, &stage), 2);
        assert_eq!(stage.last(NodeId(0)).and_then(|s| s.get(Y)), Some(100.0));

        assert_eq!(engine.tick(6.5, &stage), 1);
        assert!(!engine.is_live(short));
        assert!(engine.is_live(looping));
        assert_eq!(stage.last(NodeId(0)).and_then(|s| s.get(Y)), Some(0.0));
        assert_eq!(stage.last(NodeId(1)).and_then(|s| s.get(Y)), Some(50.0));
    }

    #[test]
    fn cancelled_tweens_stop_writing() {
        let stage = FakeStage::with_nodes(&[".a"]);
        let mut engine = TweenEngine::new();
        let id = engine.spawn(slide(0, 10.0, Repeat::Yoyo));
        engine.tick(0.0, &stage);
        let writes = stage.write_count(NodeId(0));

        assert!(engine.cancel(id));
        assert!(!engine.cancel(id));
        engine.tick(1.0, &stage);
        assert_eq!(stage.write_count(NodeId(0)), writes);
        assert_eq!(engine.active_count(), 0);
    }

    #[test]
    fn tweens_anchor_on_their_first_tick() {
        let stage = FakeStage::with_nodes(&[".a", ".a"]);
        let mut engine = TweenEngine::new();
        let first = engine.spawn(slide(0, 1.0, Repeat::None));
        engine.tick(2.0, &stage);
        let second = engine.spawn(slide(1, 1.0, Repeat::None));
        engine.tick(2.5, &stage);

        assert_eq!(engine.get(first).and_then(Tween::start_time), Some(2.0));
        assert_eq!(engine.get(second).and_then(Tween::start_time), Some(2.5));
    }
}
