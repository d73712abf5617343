use std::cell::RefCell;
use std::rc::{Rc, Weak};

use log::warn;
use web_sys::Element;
use yew::prelude::*;

use crate::animation::counter::CounterPhase;
use crate::animation::{CounterFormat, CounterState, ViewportCounter};
use crate::config;
use crate::web::dom_stage::DomStage;
use crate::web::frame_loop::FrameLoop;
use crate::web::viewport::{prefers_reduced_motion, BrowserViewport};

#[derive(Properties, PartialEq)]
pub struct AnimatedCounterProps {
    pub end: f64,
    #[prop_or(config::DEFAULT_COUNTER_DURATION)]
    pub duration: f64,
    #[prop_or_default]
    pub prefix: AttrValue,
    #[prop_or_default]
    pub suffix: AttrValue,
    #[prop_or_default]
    pub decimals: usize,
}

/// Counts from 0 to `end` the first time at least half of it is on screen.
#[function_component(AnimatedCounter)]
pub fn animated_counter(props: &AnimatedCounterProps) -> Html {
    let format = CounterFormat {
        decimals: props.decimals,
        prefix: props.prefix.to_string(),
        suffix: props.suffix.to_string(),
    };
    let text = {
        let format = format.clone();
        use_state(move || format.render(0.0))
    };
    let node_ref = use_node_ref();

    {
        let text = text.clone();
        let node_ref = node_ref.clone();
        use_effect_with_deps(
            move |(end, duration, format)| {
                let mut state = CounterState::new(*end, *duration, format.clone());
                text.set(state.text(0.0));

                let counter: Rc<RefCell<Option<Rc<ViewportCounter>>>> = Rc::default();
                let frames: Rc<RefCell<Option<FrameLoop>>> = Rc::default();

                let element = node_ref.cast::<Element>();
                let stage = DomStage::from_window();
                match (element, stage) {
                    (Some(element), Some(stage)) if !prefers_reduced_motion() => {
                        let stage = Rc::new(stage);
                        let node = stage.adopt(element);
                        let viewport = BrowserViewport::new(stage);
                        let on_fire = start_counting(Rc::downgrade(&counter), frames.clone(), text.clone());
                        let armed = Rc::new(ViewportCounter::arm(&viewport, node, state, on_fire));
                        if armed.phase() == CounterPhase::Settled {
                            text.set(armed.text(0.0));
                        }
                        *counter.borrow_mut() = Some(armed);
                    }
                    _ => {
                        state.settle();
                        text.set(state.text(0.0));
                    }
                }

                move || {
                    frames.borrow_mut().take();
                    if let Some(counter) = counter.borrow_mut().take() {
                        counter.dispose();
                    }
                }
            },
            (props.end, props.duration, format),
        );
    }

    html! {
        <span ref={node_ref} class="tabular-nums">{ (*text).clone() }</span>
    }
}

type CounterSlot = Weak<RefCell<Option<Rc<ViewportCounter>>>>;

fn current(slot: &CounterSlot) -> Option<Rc<ViewportCounter>> {
    let slot = slot.upgrade()?;
    let counter = slot.borrow().clone();
    counter
}

// Returns the `on_fire` hook: once the counter starts, render it every
// frame until it settles.
fn start_counting(
    counter: CounterSlot,
    frames: Rc<RefCell<Option<FrameLoop>>>,
    text: UseStateHandle<String>,
) -> impl FnOnce(f64) + 'static {
    move |_started_at| {
        let ticking = counter.clone();
        let frame_text = text.clone();
        let result = FrameLoop::start(move |now| {
            let Some(counter) = current(&ticking) else {
                return false;
            };
            match counter.sample(now) {
                Some(rendered) => {
                    frame_text.set(rendered);
                    counter.phase() != CounterPhase::Settled
                }
                None => false,
            }
        });
        match result {
            Ok(frame_loop) => *frames.borrow_mut() = Some(frame_loop),
            Err(err) => {
                warn!("counter cannot animate: {}", err);
                // no frames to count with, show where it would have landed
                if let Some(rendered) = current(&counter).and_then(|c| c.sample(f64::INFINITY)) {
                    text.set(rendered);
                }
            }
        }
    }
}
