use super::easing::Ease;
use super::instruction::Repeat;
use super::props::VisualState;
use super::stage::NodeId;

/// One node's share of an instruction, with its own resolved timing.
#[derive(Debug, Clone, PartialEq)]
pub struct Tween {
    pub node: NodeId,
    pub from: VisualState,
    pub to: VisualState,
    pub duration: f64,
    pub delay: f64,
    pub ease: Ease,
    pub repeat: Repeat,
    anchor: Option<f64>,
}

/// Result of sampling a tween at some instant.
#[derive(Debug, Clone, PartialEq)]
pub struct Sample {
    pub state: VisualState,
    pub finished: bool,
}

impl Tween {
    pub fn new(node: NodeId, from: VisualState, to: VisualState) -> Self {
        Self {
            node,
            from,
            to,
            duration: 1.0,
            delay: 0.0,
            ease: Ease::default(),
            repeat: Repeat::None,
            anchor: None,
        }
    }

    /// Pin the clock origin. The first call wins.
    pub fn anchor(&mut self, now: f64) {
        if self.anchor.is_none() {
            self.anchor = Some(now);
        }
    }

    /// Absolute time the first pass starts, once anchored.
    pub fn start_time(&self) -> Option<f64> {
        self.anchor.map(|anchor| anchor + self.delay)
    }

    /// Eased progress of the current pass.
    pub fn progress(&self, now: f64) -> f64 {
        let Some(start) = self.start_time() else {
            return 0.0;
        };
        let local = now - start;
        if local <= 0.0 {
            return 0.0;
        }
        if self.duration <= 0.0 {
            return 1.0;
        }

        let raw = match self.repeat {
            Repeat::None => (local / self.duration).min(1.0),
            Repeat::Loop => (local % self.duration) / self.duration,
            Repeat::Yoyo => {
                let cycle = (local / self.duration).floor() as u64;
                let within = (local % self.duration) / self.duration;
                if cycle % 2 == 0 {
                    within
                } else {
                    1.0 - within
                }
            }
        };
        self.ease.apply(raw)
    }

    pub fn sample(&self, now: f64) -> Sample {
        let finished = match (self.repeat, self.start_time()) {
            (Repeat::None, Some(start)) => now - start >= self.duration,
            _ => false,
        };
        let t = if finished { 1.0 } else { self.progress(now) };
        Sample { state: self.from.lerp(&self.to, t), finished }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::animation::props::VisualProperty::*;

    fn fade(repeat: Repeat) -> Tween {
        let mut tween = Tween::new(
            NodeId(0),
            VisualState::new().with(Opacity, 0.0),
            VisualState::new().with(Opacity, 1.0),
        );
        tween.duration = 2.0;
        tween.delay = 1.0;
        tween.ease = Ease::Linear;
        tween.repeat = repeat;
        tween
    }

    #[test]
    fn holds_from_state_until_delay_elapses() {
        let mut tween = fade(Repeat::None);
        tween.anchor(10.0);
        assert_eq!(tween.start_time(), Some(11.0));
        assert_eq!(tween.sample(10.5).state.get(Opacity), Some(0.0));
    }

    #[test]
    fn unanchored_tween_samples_from_state() {
        let tween = fade(Repeat::None);
        let sample = tween.sample(100.0);
        assert_eq!(sample.state.get(Opacity), Some(0.0));
        assert!(!sample.finished);
    }

    #[test]
    fn finite_tween_finishes_on_target() {
        let mut tween = fade(Repeat::None);
        tween.anchor(0.0);
        assert_eq!(tween.sample(2.0).state.get(Opacity), Some(0.5));
        let end = tween.sample(3.5);
        assert!(end.finished);
        assert_eq!(end.state.get(Opacity), Some(1.0));
    }

    #[test]
    fn anchor_is_sticky() {
        let mut tween = fade(Repeat::None);
        tween.anchor(1.0);
        tween.anchor(5.0);
        assert_eq!(tween.start_time(), Some(2.0));
    }

    #[test]
    fn loop_restarts() {
        let mut tween = fade(Repeat::Loop);
        tween.anchor(0.0);
        assert!((tween.progress(1.5) - 0.25).abs() < 1e-12);
        assert!((tween.progress(3.5) - 0.25).abs() < 1e-12);
        assert!(!tween.sample(1000.0).finished);
    }

    #[test]
    fn yoyo_plays_back() {
        let mut tween = fade(Repeat::Yoyo);
        tween.anchor(0.0);
        assert!((tween.progress(2.5) - 0.75).abs() < 1e-12);
        assert!((tween.progress(4.5) - 0.25).abs() < 1e-12);
        assert!((tween.progress(6.5) - 0.75).abs() < 1e-12);
    }
}
