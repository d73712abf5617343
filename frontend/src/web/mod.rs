//! Browser implementations of the animation capabilities.

pub mod dom_stage;
pub mod frame_loop;
pub mod viewport;

use std::rc::Rc;

use log::{info, warn};

use crate::animation::choreography::mount_landing;
use crate::animation::{AnimationContext, MotionPreference, SeededRandom};
use dom_stage::DomStage;
use frame_loop::FrameLoop;
use viewport::{prefers_reduced_motion, BrowserViewport};

/// The landing page's animations for as long as the page is mounted.
/// Dropping it stops the frame loop and reverts the context.
pub struct PageAnimations {
    frames: Option<FrameLoop>,
    context: Rc<AnimationContext>,
}

impl PageAnimations {
    pub fn mount() -> Option<Self> {
        let stage = Rc::new(DomStage::from_window()?);
        let viewport = Rc::new(BrowserViewport::new(stage.clone()));
        let motion = if prefers_reduced_motion() {
            info!("reduced motion requested, skipping entrance animations");
            MotionPreference::Reduced
        } else {
            MotionPreference::Full
        };
        let random = SeededRandom::from_seed(web_sys::js_sys::Date::now() as u64);

        let context = AnimationContext::new(stage, viewport, Box::new(random)).with_motion(motion);
        let context = match mount_landing(context) {
            Ok(context) => Rc::new(context),
            Err(err) => {
                warn!("entrance animations not mounted: {}", err);
                return None;
            }
        };

        let ticking = context.clone();
        let frames = match FrameLoop::start(move |now| {
            ticking.tick(now);
            !ticking.is_reverted()
        }) {
            Ok(frames) => Some(frames),
            Err(err) => {
                warn!("no animation frames, showing the page without animations: {}", err);
                context.revert();
                None
            }
        };

        Some(Self { frames, context })
    }
}

impl Drop for PageAnimations {
    fn drop(&mut self) {
        self.frames.take();
        self.context.revert();
    }
}
