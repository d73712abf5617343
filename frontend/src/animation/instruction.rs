//! Declarative description of one visual transition.
//!
//! Instructions are plain data: a selector, the two ends of the transition,
//! timing, repeat mode, trigger, and the optional per-node stagger and
//! randomization. [`AnimationContext`](super::context::AnimationContext)
//! turns them into tweens.

use serde::{Deserialize, Serialize};

use super::easing::Ease;
use super::props::{VisualProperty, VisualState};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Timing {
    /// Seconds for one forward pass.
    pub duration: f64,
    /// Seconds before the first pass starts.
    #[serde(default)]
    pub delay: f64,
    #[serde(default)]
    pub ease: Ease,
}

impl Timing {
    pub fn new(duration: f64, ease: Ease) -> Self {
        Self { duration, delay: 0.0, ease }
    }

    pub fn delayed(mut self, delay: f64) -> Self {
        self.delay = delay;
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Repeat {
    /// Play once and hold the final state.
    #[default]
    None,
    /// Restart from the beginning forever.
    Loop,
    /// Play forward then backward forever.
    Yoyo,
}

impl Repeat {
    pub fn is_infinite(self) -> bool {
        !matches!(self, Repeat::None)
    }
}

/// Viewport-height fractions measured from the top of the viewport.
///
/// `start: 0.7` reads as "when the section's top reaches 70% of the
/// viewport height". `end` is the matching bound for the section's bottom.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScrollRange {
    pub start: f64,
    #[serde(default)]
    pub end: Option<f64>,
}

impl ScrollRange {
    pub fn top_at(start: f64) -> Self {
        Self { start, end: None }
    }

    pub fn until_bottom_at(mut self, end: f64) -> Self {
        self.end = Some(end);
        self
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum Trigger {
    Immediate,
    /// Fire once, the first time `section` scrolls past `range.start`.
    OnScrollIntoView { section: String, range: ScrollRange },
}

/// A `[min, max)` range values are drawn from.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Spread {
    pub min: f64,
    pub max: f64,
}

impl Spread {
    pub fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }
}

/// Per-node randomization so concurrent loop instances drift apart.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Variance {
    /// Replaces the instruction's duration.
    #[serde(default)]
    pub duration: Option<Spread>,
    /// Added to the instruction's delay.
    #[serde(default)]
    pub delay: Option<Spread>,
    /// Replaces the target value of a property.
    #[serde(default)]
    pub targets: Vec<(VisualProperty, Spread)>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnimationInstruction {
    pub selector: String,
    pub from: VisualState,
    pub to: VisualState,
    pub timing: Timing,
    #[serde(default)]
    pub repeat: Repeat,
    pub trigger: Trigger,
    #[serde(default)]
    pub stagger: Option<f64>,
    #[serde(default)]
    pub variance: Option<Variance>,
}

impl AnimationInstruction {
    /// Animate from an explicit start state to `to`.
    pub fn from_to(selector: &str, from: VisualState, to: VisualState, timing: Timing) -> Self {
        Self {
            selector: selector.to_string(),
            from,
            to,
            timing,
            repeat: Repeat::None,
            trigger: Trigger::Immediate,
            stagger: None,
            variance: None,
        }
    }

    /// Animate from the rest state of every property in `to`.
    pub fn to(selector: &str, to: VisualState, timing: Timing) -> Self {
        let from = to.rest_of();
        Self::from_to(selector, from, to, timing)
    }

    pub fn repeat(mut self, repeat: Repeat) -> Self {
        self.repeat = repeat;
        self
    }

    pub fn stagger(mut self, step: f64) -> Self {
        self.stagger = Some(step);
        self
    }

    pub fn on_scroll(mut self, section: &str, range: ScrollRange) -> Self {
        self.trigger = Trigger::OnScrollIntoView { section: section.to_string(), range };
        self
    }

    pub fn vary(mut self, variance: Variance) -> Self {
        self.variance = Some(variance);
        self
    }

    pub fn is_scroll_gated(&self) -> bool {
        matches!(self.trigger, Trigger::OnScrollIntoView { .. })
    }

    /// Start offset of the node at `index` in document order, before any
    /// randomized delay.
    pub fn start_offset(&self, index: usize) -> f64 {
        self.timing.delay + self.stagger.unwrap_or(0.0) * index as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use VisualProperty::*;

    #[test]
    fn to_starts_from_rest() {
        let instr = AnimationInstruction::to(
            ".float",
            VisualState::new().with(Y, -20.0).with(Rotation, 3.0),
            Timing::new(4.0, Ease::PowerInOut(2)),
        );
        assert_eq!(instr.from.get(Y), Some(0.0));
        assert_eq!(instr.from.get(Rotation), Some(0.0));
        assert_eq!(instr.trigger, Trigger::Immediate);
    }

    #[test]
    fn stagger_offsets_follow_document_order() {
        let instr = AnimationInstruction::to(
            ".card",
            VisualState::new().with(Opacity, 1.0),
            Timing::new(1.0, Ease::Linear).delayed(0.6),
        )
        .stagger(0.2);
        assert_eq!(instr.start_offset(0), 0.6);
        assert!((instr.start_offset(3) - 1.2).abs() < 1e-12);
    }

    #[test]
    fn deserializes_an_authored_instruction() {
        let json = r##"{
            "selector": ".ultra-premium-cta",
            "from": {"opacity": 0.0, "y": 60.0},
            "to": {"opacity": 1.0, "y": 0.0},
            "timing": {"duration": 1.4, "ease": "power4.out"},
            "trigger": {"kind": "onScrollIntoView", "section": "#join", "range": {"start": 0.75}}
        }"##;
        let instr: AnimationInstruction = serde_json::from_str(json).unwrap();
        assert_eq!(instr.timing.ease, Ease::PowerOut(4));
        assert_eq!(instr.repeat, Repeat::None);
        assert!(instr.is_scroll_gated());
        assert_eq!(instr.from.get(Y), Some(60.0));
    }
}
