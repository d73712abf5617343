//! The landing page's entrance choreography.

use log::info;

use super::context::{AnimationContext, ContextError, Registration};
use super::easing::Ease;
use super::instruction::{AnimationInstruction, Repeat, ScrollRange, Spread, Timing, Variance};
use super::props::{VisualProperty::*, VisualState};

const REVEAL: Ease = Ease::PowerOut(4);
const FLOAT: Ease = Ease::PowerInOut(2);

fn state(values: &[(super::props::VisualProperty, f64)]) -> VisualState {
    values.iter().copied().collect()
}

fn hero(selector: &str, from: VisualState, duration: f64, delay: f64) -> AnimationInstruction {
    let to = from.rest_of();
    AnimationInstruction::from_to(selector, from, to, Timing::new(duration, REVEAL).delayed(delay))
}

fn floating(selector: &str, y: f64, rotation: f64, duration: f64) -> AnimationInstruction {
    AnimationInstruction::to(selector, state(&[(Y, y), (Rotation, rotation)]), Timing::new(duration, FLOAT))
        .repeat(Repeat::Yoyo)
}

/// Every instruction the landing page registers, in registration order.
pub fn landing_instructions() -> Vec<AnimationInstruction> {
    let scroll_75 = ScrollRange::top_at(0.75);

    vec![
        // ambient particles drift up and fade, forever
        AnimationInstruction::from_to(
            ".particle",
            state(&[(Opacity, 0.1), (X, 0.0), (Y, 0.0)]),
            state(&[(Opacity, 0.0), (X, 0.0), (Y, -100.0)]),
            Timing::new(2.0, Ease::PowerOut(2)),
        )
        .repeat(Repeat::Loop)
        .vary(Variance {
            duration: Some(Spread::new(2.0, 5.0)),
            delay: Some(Spread::new(0.0, 2.0)),
            targets: vec![(X, Spread::new(-50.0, 50.0))],
        }),
        hero(".hero-badge", state(&[(Opacity, 0.0), (Y, 40.0), (Scale, 0.9)]), 1.4, 0.0),
        hero(".hero-title", state(&[(Opacity, 0.0), (Y, 80.0), (RotationX, 15.0)]), 1.6, 0.2),
        hero(".hero-subtitle", state(&[(Opacity, 0.0), (Y, 50.0)]), 1.4, 0.5),
        hero(".hero-buttons", state(&[(Opacity, 0.0), (Y, 40.0), (Scale, 0.95)]), 1.2, 0.8),
        hero(".hero-stats", state(&[(Opacity, 0.0), (Y, 30.0)]), 1.0, 1.1),
        hero(
            ".hero-phone",
            state(&[(Opacity, 0.0), (Scale, 0.8), (Y, 60.0), (RotationY, 15.0)]),
            1.8,
            0.6,
        ),
        hero(
            ".ultra-premium-card",
            state(&[(Opacity, 0.0), (Y, 100.0), (RotationX, 20.0), (Scale, 0.9)]),
            1.4,
            0.0,
        )
        .stagger(0.12)
        .on_scroll("#platform", ScrollRange::top_at(0.70).until_bottom_at(0.30)),
        hero(".executive-testimonial", state(&[(Opacity, 0.0), (X, -80.0), (RotationY, -10.0)]), 1.2, 0.0)
            .stagger(0.15)
            .on_scroll("#testimonials", scroll_75),
        hero(".download-content", state(&[(Opacity, 0.0), (Y, 50.0)]), 1.2, 0.0)
            .on_scroll("#download", scroll_75),
        hero(".download-phones", state(&[(Opacity, 0.0), (Scale, 0.9)]), 1.4, 0.3)
            .on_scroll("#download", scroll_75),
        hero(".download-badge", state(&[(Opacity, 0.0), (Y, 30.0), (Scale, 0.9)]), 1.0, 0.6)
            .stagger(0.2)
            .on_scroll("#download", scroll_75),
        // decorative floats; random start offsets keep instances apart
        floating(".ultra-premium-floating", -20.0, 3.0, 4.0).vary(Variance {
            delay: Some(Spread::new(0.0, 2.0)),
            ..Variance::default()
        }),
        floating(".ultra-premium-floating-slow", -12.0, -2.0, 5.0).vary(Variance {
            delay: Some(Spread::new(0.0, 2.0)),
            ..Variance::default()
        }),
        floating(".phone-float-1", -15.0, 2.0, 4.0),
        {
            let mut second = floating(".phone-float-2", -10.0, -1.0, 3.5);
            second.timing.delay = 0.5;
            second
        },
        hero(".ultra-premium-cta", state(&[(Opacity, 0.0), (Y, 60.0), (Scale, 0.95)]), 1.4, 0.0)
            .on_scroll("#join", scroll_75),
    ]
}

/// Register `table` against `context`. On error the context is dropped,
/// which reverts whatever was already registered.
pub fn choreograph(
    context: AnimationContext,
    table: Vec<AnimationInstruction>,
) -> Result<AnimationContext, ContextError> {
    let total = table.len();
    let mut gated = 0;
    let mut skipped = 0;
    for instruction in table {
        match context.register(instruction)? {
            Registration::Gated => gated += 1,
            Registration::Skipped => skipped += 1,
            Registration::Running(_) | Registration::Settled => {}
        }
    }
    info!(
        "registered {} entrance instructions ({} scroll gated, {} without targets)",
        total, gated, skipped
    );
    Ok(context)
}

/// Mount the landing page choreography.
pub fn mount_landing(context: AnimationContext) -> Result<AnimationContext, ContextError> {
    choreograph(context, landing_instructions())
}
