//! Numeric counters that count up once, the first time they are seen.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use log::{debug, warn};

use super::observer::{Intersection, ObserverError, Threshold, ViewportObserver, WatchHandle};
use super::stage::NodeId;
use crate::config;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct CounterFormat {
    pub decimals: usize,
    pub prefix: String,
    pub suffix: String,
}

impl CounterFormat {
    /// `prefix`, the value fixed to `decimals` places with `,` grouping
    /// on the integer part, then `suffix`.
    pub fn render(&self, value: f64) -> String {
        format!("{}{}{}", self.prefix, group_thousands(value, self.decimals), self.suffix)
    }
}

/// Fixed-point text for `value` rounded half away from zero, with
/// thousands separators.
pub fn group_thousands(value: f64, decimals: usize) -> String {
    let fixed = format!("{:.*}", decimals, round_half_up(value, decimals));
    let (sign, unsigned) = match fixed.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", fixed.as_str()),
    };
    let (int_part, frac_part) = match unsigned.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (unsigned, None),
    };

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, digit) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }

    // "-0" and "-0.0" read as zero.
    let sign = if unsigned.chars().all(|c| c == '0' || c == '.') { "" } else { sign };
    match frac_part {
        Some(frac) => format!("{sign}{grouped}.{frac}"),
        None => format!("{sign}{grouped}"),
    }
}

// `format!` rounds ties to even; counters round 2.5 to 3.
fn round_half_up(value: f64, decimals: usize) -> f64 {
    let scale = 10f64.powi(decimals.min(i32::MAX as usize) as i32);
    let scaled = value * scale;
    if !scaled.is_finite() {
        return value;
    }
    scaled.round() / scale
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CounterPhase {
    Armed,
    Firing { started_at: f64 },
    Settled,
    Disposed,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CounterState {
    pub target: f64,
    pub duration: f64,
    pub format: CounterFormat,
    phase: CounterPhase,
}

impl CounterState {
    pub fn new(target: f64, duration: f64, format: CounterFormat) -> Self {
        Self { target, duration, format, phase: CounterPhase::Armed }
    }

    pub fn phase(&self) -> CounterPhase {
        self.phase
    }

    pub fn is_armed(&self) -> bool {
        self.phase == CounterPhase::Armed
    }

    /// Start counting at `now`. Only an armed counter starts; every later
    /// call is ignored.
    pub fn trigger(&mut self, now: f64) -> bool {
        if !self.is_armed() {
            return false;
        }
        self.phase = if self.duration > 0.0 {
            CounterPhase::Firing { started_at: now }
        } else {
            CounterPhase::Settled
        };
        true
    }

    /// Jump straight to the target without animating.
    pub fn settle(&mut self) {
        if self.phase != CounterPhase::Disposed {
            self.phase = CounterPhase::Settled;
        }
    }

    pub fn dispose(&mut self) {
        self.phase = CounterPhase::Disposed;
    }

    pub fn value_at(&self, now: f64) -> f64 {
        match self.phase {
            CounterPhase::Armed => 0.0,
            CounterPhase::Firing { started_at } => {
                let t = (now - started_at) / self.duration;
                if t >= 1.0 {
                    self.target
                } else {
                    self.target * config::COUNTER_EASE.apply(t)
                }
            }
            CounterPhase::Settled => self.target,
            CounterPhase::Disposed => 0.0,
        }
    }

    /// Text for `now`, advancing `Firing` to `Settled` once the duration
    /// has elapsed. `None` once disposed.
    pub fn sample(&mut self, now: f64) -> Option<String> {
        if let CounterPhase::Firing { started_at } = self.phase {
            if now - started_at >= self.duration {
                self.phase = CounterPhase::Settled;
            }
        }
        match self.phase {
            CounterPhase::Disposed => None,
            _ => Some(self.format.render(self.value_at(now))),
        }
    }

    pub fn text(&self, now: f64) -> String {
        self.format.render(self.value_at(now))
    }
}

/// A counter bound to a viewport watch.
///
/// The watch fires at most once: the first intersecting observation
/// releases it and starts the count.
pub struct ViewportCounter {
    state: Rc<RefCell<CounterState>>,
    watch: Rc<RefCell<Option<WatchHandle>>>,
}

impl ViewportCounter {
    /// Arm `state` against `node`. `on_fire` runs once, with the
    /// observation time, when counting starts.
    ///
    /// If the viewport cannot be observed the counter settles right away so
    /// the final value is still shown.
    pub fn arm(
        observer: &dyn ViewportObserver,
        node: NodeId,
        state: CounterState,
        on_fire: impl FnOnce(f64) + 'static,
    ) -> Self {
        let state = Rc::new(RefCell::new(state));
        let watch: Rc<RefCell<Option<WatchHandle>>> = Rc::new(RefCell::new(None));

        let callback_state = Rc::downgrade(&state);
        let callback_watch: Weak<RefCell<Option<WatchHandle>>> = Rc::downgrade(&watch);
        let mut on_fire = Some(on_fire);
        let callback = Box::new(move |entry: Intersection| {
            if !entry.is_intersecting {
                return;
            }
            if let Some(slot) = callback_watch.upgrade() {
                let handle = slot.borrow_mut().take();
                if let Some(handle) = handle {
                    handle.release();
                }
            }
            let Some(state) = callback_state.upgrade() else {
                return;
            };
            let fired = state.borrow_mut().trigger(entry.time);
            if fired {
                debug!("counter to {} started at {:.3}s", state.borrow().target, entry.time);
                if let Some(on_fire) = on_fire.take() {
                    on_fire(entry.time);
                }
            }
        });

        match observer.watch(node, Threshold::Visible(config::COUNTER_VISIBILITY_THRESHOLD), callback) {
            Ok(handle) => {
                // The observation may already have fired and released itself
                // during registration; only keep the handle if still armed.
                if state.borrow().is_armed() {
                    *watch.borrow_mut() = Some(handle);
                }
            }
            Err(ObserverError::Unsupported) => {
                debug!("viewport observation unavailable, showing final counter value");
                state.borrow_mut().settle();
            }
            Err(err) => {
                warn!("counter could not observe its node: {}", err);
                state.borrow_mut().settle();
            }
        }

        Self { state, watch }
    }

    pub fn phase(&self) -> CounterPhase {
        self.state.borrow().phase()
    }

    pub fn is_watching(&self) -> bool {
        self.watch.borrow().is_some()
    }

    pub fn sample(&self, now: f64) -> Option<String> {
        self.state.borrow_mut().sample(now)
    }

    pub fn text(&self, now: f64) -> String {
        self.state.borrow().text(now)
    }

    /// Release the watch if it never fired and stop any running count.
    pub fn dispose(&self) {
        let handle = self.watch.borrow_mut().take();
        drop(handle);
        self.state.borrow_mut().dispose();
    }
}

impl Drop for ViewportCounter {
    fn drop(&mut self) {
        self.dispose();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::animation::testing::FakeViewport;
    use std::cell::Cell;

    fn format(decimals: usize, prefix: &str, suffix: &str) -> CounterFormat {
        CounterFormat { decimals, prefix: prefix.to_string(), suffix: suffix.to_string() }
    }

    #[test]
    fn groups_thousands() {
        assert_eq!(group_thousands(0.0, 0), "0");
        assert_eq!(group_thousands(999.0, 0), "999");
        assert_eq!(group_thousands(1800.0, 0), "1,800");
        assert_eq!(group_thousands(25000.0, 0), "25,000");
        assert_eq!(group_thousands(120000.0, 0), "120,000");
        assert_eq!(group_thousands(1234567.891, 2), "1,234,567.89");
        assert_eq!(group_thousands(-4321.0, 0), "-4,321");
        assert_eq!(group_thousands(-0.01, 1), "0.0");
    }

    #[test]
    fn ties_round_away_from_zero() {
        assert_eq!(group_thousands(0.5, 0), "1");
        assert_eq!(group_thousands(2.5, 0), "3");
        assert_eq!(group_thousands(1.25, 1), "1.3");
        assert_eq!(group_thousands(-2.5, 0), "-3");
    }

    #[test]
    fn settled_text_rounds_ties_up() {
        for (target, decimals, expected) in [(0.5, 0, "1"), (2.5, 0, "3"), (1.25, 1, "1.3")] {
            let mut state = CounterState::new(target, 2.0, format(decimals, "", ""));
            state.settle();
            assert_eq!(state.text(0.0), expected);
        }
    }

    #[test]
    fn initial_text_is_zero_at_precision() {
        let state = CounterState::new(2.5, 2.0, format(1, "$", "M+"));
        assert_eq!(state.text(0.0), "$0.0M+");
    }

    #[test]
    fn renders_prefix_and_suffix_at_the_end() {
        let mut state = CounterState::new(2.5, 2.0, format(1, "$", "M+"));
        assert!(state.trigger(1.0));
        assert_eq!(state.sample(3.0).as_deref(), Some("$2.5M+"));
        assert_eq!(state.phase(), CounterPhase::Settled);
    }

    #[test]
    fn eases_out_monotonically_without_overshoot() {
        let mut state = CounterState::new(25000.0, 2.0, CounterFormat::default());
        state.trigger(0.0);
        let mut previous = 0.0;
        let mut first_half_gain = 0.0;
        for step in 0..=200 {
            let now = step as f64 / 100.0;
            let value = state.value_at(now);
            assert!(value >= previous, "went backwards at {now}");
            assert!(value <= 25000.0);
            if step == 100 {
                first_half_gain = value;
            }
            previous = value;
        }
        assert_eq!(previous, 25000.0);
        assert!(first_half_gain > 12500.0, "ease-out should front-load progress");
    }

    #[test]
    fn fractional_targets_land_exactly() {
        let mut state = CounterState::new(93.0, 2.0, format(0, "", "%"));
        state.trigger(10.0);
        assert_eq!(state.sample(10.0).as_deref(), Some("0%"));
        assert_eq!(state.sample(12.5).as_deref(), Some("93%"));
    }

    #[test]
    fn fires_once_on_first_half_visible_intersection() {
        let viewport = FakeViewport::new();
        let fired = Rc::new(Cell::new(0));
        let fired_in_cb = fired.clone();
        let counter = ViewportCounter::arm(
            &viewport,
            NodeId(0),
            CounterState::new(25000.0, 2.0, CounterFormat::default()),
            move |_| fired_in_cb.set(fired_in_cb.get() + 1),
        );
        assert_eq!(viewport.thresholds_for(NodeId(0)), vec![Threshold::Visible(0.5)]);
        assert_eq!(counter.text(0.0), "0");

        viewport.leave(NodeId(0), 0.5);
        assert_eq!(counter.phase(), CounterPhase::Armed);
        assert_eq!(viewport.active_watches(), 1);

        viewport.enter(NodeId(0), 1.0);
        assert_eq!(counter.phase(), CounterPhase::Firing { started_at: 1.0 });
        assert_eq!(viewport.active_watches(), 0);
        assert!(!counter.is_watching());

        viewport.leave(NodeId(0), 1.5);
        viewport.enter(NodeId(0), 2.0);
        assert_eq!(fired.get(), 1);
        assert_eq!(counter.phase(), CounterPhase::Firing { started_at: 1.0 });

        assert_eq!(counter.sample(5.0).as_deref(), Some("25,000"));
        viewport.enter(NodeId(0), 6.0);
        assert_eq!(counter.sample(7.0).as_deref(), Some("25,000"));
    }

    #[test]
    fn starting_in_view_still_animates_from_zero() {
        let viewport = FakeViewport::new();
        let counter = ViewportCounter::arm(
            &viewport,
            NodeId(3),
            CounterState::new(1800.0, 2.0, format(0, "", "+")),
            |_| {},
        );
        // first callback of an already visible node
        viewport.enter(NodeId(3), 0.0);
        assert_eq!(counter.sample(0.0).as_deref(), Some("0+"));
        assert_eq!(counter.sample(2.0).as_deref(), Some("1,800+"));
    }

    #[test]
    fn unsupported_viewport_renders_final_value() {
        let viewport = FakeViewport::unsupported();
        let counter = ViewportCounter::arm(
            &viewport,
            NodeId(0),
            CounterState::new(2.5, 2.0, format(1, "$", "M+")),
            |_| panic!("must not fire"),
        );
        assert_eq!(counter.phase(), CounterPhase::Settled);
        assert_eq!(counter.text(0.0), "$2.5M+");
    }

    #[test]
    fn dispose_before_firing_releases_the_watch() {
        let viewport = FakeViewport::new();
        let counter = ViewportCounter::arm(
            &viewport,
            NodeId(0),
            CounterState::new(10.0, 2.0, CounterFormat::default()),
            |_| panic!("must not fire"),
        );
        assert_eq!(viewport.active_watches(), 1);
        counter.dispose();
        assert_eq!(viewport.active_watches(), 0);
        viewport.enter(NodeId(0), 1.0);
        assert_eq!(counter.phase(), CounterPhase::Disposed);
    }

    #[test]
    fn dispose_mid_count_stops_sampling() {
        let viewport = FakeViewport::new();
        let counter = ViewportCounter::arm(
            &viewport,
            NodeId(0),
            CounterState::new(10.0, 2.0, CounterFormat::default()),
            |_| {},
        );
        viewport.enter(NodeId(0), 0.0);
        assert!(counter.sample(1.0).is_some());
        counter.dispose();
        assert_eq!(counter.sample(1.5), None);
    }

    #[test]
    fn dropping_the_counter_releases_the_watch() {
        let viewport = FakeViewport::new();
        {
            let _counter = ViewportCounter::arm(
                &viewport,
                NodeId(0),
                CounterState::new(10.0, 2.0, CounterFormat::default()),
                |_| {},
            );
            assert_eq!(viewport.active_watches(), 1);
        }
        assert_eq!(viewport.active_watches(), 0);
    }
}
