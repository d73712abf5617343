use std::rc::Rc;

use log::debug;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::js_sys::{Array, Reflect};
use web_sys::{IntersectionObserver, IntersectionObserverEntry, IntersectionObserverInit};

use super::dom_stage::DomStage;
use crate::animation::observer::{Intersection, Threshold, WatchCallback, WatchHandle};
use crate::animation::{NodeId, ObserverError, ViewportObserver};
use crate::config;

// Browsers round intersection ratios, a node sitting exactly on the
// threshold can report slightly under it.
const RATIO_SLACK: f64 = 0.01;

/// [`ViewportObserver`] backed by one `IntersectionObserver` per watch.
pub struct BrowserViewport {
    stage: Rc<DomStage>,
}

impl BrowserViewport {
    pub fn new(stage: Rc<DomStage>) -> Self {
        Self { stage }
    }
}

pub fn intersection_observer_supported() -> bool {
    web_sys::window()
        .map(|window| Reflect::has(&window, &JsValue::from_str("IntersectionObserver")).unwrap_or(false))
        .unwrap_or(false)
}

pub fn prefers_reduced_motion() -> bool {
    web_sys::window()
        .and_then(|window| window.match_media(config::REDUCED_MOTION_QUERY).ok().flatten())
        .map(|query| query.matches())
        .unwrap_or(false)
}

// "top 70%" means the node's top edge passes 70% of the viewport height, so
// the bottom 30% of the viewport is cut off the observation root.
fn root_margin(threshold: Threshold) -> Option<String> {
    match threshold {
        Threshold::Visible(_) => None,
        Threshold::TopCrosses(fraction) => {
            let cut = ((1.0 - fraction.clamp(0.0, 1.0)) * 100.0).round();
            Some(format!("0px 0px -{}% 0px", cut))
        }
    }
}

impl ViewportObserver for BrowserViewport {
    fn watch(
        &self,
        node: NodeId,
        threshold: Threshold,
        mut callback: WatchCallback,
    ) -> Result<WatchHandle, ObserverError> {
        if !intersection_observer_supported() {
            return Err(ObserverError::Unsupported);
        }
        let element = self
            .stage
            .element(node)
            .ok_or_else(|| ObserverError::Js(format!("node {} is not on the stage", node.0)))?;

        // The first callback reports any overlap at all, so hold visibility
        // watches to their ratio.
        let min_ratio = match threshold {
            Threshold::Visible(fraction) => fraction - RATIO_SLACK,
            Threshold::TopCrosses(_) => 0.0,
        };
        let on_entries = Closure::wrap(Box::new(move |entries: Array, _observer: IntersectionObserver| {
            for entry in entries.iter() {
                let Ok(entry) = entry.dyn_into::<IntersectionObserverEntry>() else {
                    continue;
                };
                callback(Intersection {
                    is_intersecting: entry.is_intersecting() && entry.intersection_ratio() >= min_ratio,
                    time: entry.time() / 1000.0,
                });
            }
        }) as Box<dyn FnMut(Array, IntersectionObserver)>);

        let init = IntersectionObserverInit::new();
        match threshold {
            Threshold::Visible(fraction) => init.set_threshold(&JsValue::from_f64(fraction)),
            Threshold::TopCrosses(_) => init.set_threshold(&JsValue::from_f64(0.0)),
        }
        if let Some(margin) = root_margin(threshold) {
            init.set_root_margin(&margin);
        }

        let observer = IntersectionObserver::new_with_options(on_entries.as_ref().unchecked_ref(), &init)
            .map_err(|err| ObserverError::Js(format!("{:?}", err)))?;
        observer.observe(&element);
        debug!("watching node {} at {:?}", node.0, threshold);

        Ok(WatchHandle::new(move || {
            observer.disconnect();
            drop(on_entries);
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scroll_start_maps_to_bottom_margin() {
        assert_eq!(root_margin(Threshold::TopCrosses(0.7)).as_deref(), Some("0px 0px -30% 0px"));
        assert_eq!(root_margin(Threshold::TopCrosses(0.75)).as_deref(), Some("0px 0px -25% 0px"));
        assert_eq!(root_margin(Threshold::Visible(0.5)), None);
    }
}
