use std::cell::{Cell, RefCell};
use std::rc::Rc;

use log::warn;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum FrameLoopError {
    #[error("no window to request animation frames from")]
    NoWindow,
    #[error("requestAnimationFrame failed: {0}")]
    Js(String),
}

struct FrameLoopInner {
    closure: RefCell<Option<Closure<dyn FnMut(f64)>>>,
    request: Cell<Option<i32>>,
    running: Cell<bool>,
}

impl FrameLoopInner {
    fn schedule(&self) -> Result<(), FrameLoopError> {
        let window = web_sys::window().ok_or(FrameLoopError::NoWindow)?;
        let closure = self.closure.borrow();
        if let Some(closure) = closure.as_ref() {
            let id = window
                .request_animation_frame(closure.as_ref().unchecked_ref())
                .map_err(|err| FrameLoopError::Js(format!("{:?}", err)))?;
            self.request.set(Some(id));
        }
        Ok(())
    }
}

/// Calls `on_frame` with the frame time in seconds on every animation
/// frame until it returns `false` or the loop is dropped.
pub struct FrameLoop {
    inner: Rc<FrameLoopInner>,
}

impl FrameLoop {
    pub fn start(mut on_frame: impl FnMut(f64) -> bool + 'static) -> Result<Self, FrameLoopError> {
        let inner = Rc::new(FrameLoopInner {
            closure: RefCell::new(None),
            request: Cell::new(None),
            running: Cell::new(true),
        });

        let weak = Rc::downgrade(&inner);
        let closure = Closure::wrap(Box::new(move |timestamp: f64| {
            let Some(inner) = weak.upgrade() else {
                return;
            };
            inner.request.set(None);
            if !inner.running.get() {
                return;
            }
            if on_frame(timestamp / 1000.0) {
                if let Err(err) = inner.schedule() {
                    warn!("frame loop stopped: {}", err);
                    inner.running.set(false);
                }
            } else {
                inner.running.set(false);
            }
        }) as Box<dyn FnMut(f64)>);

        *inner.closure.borrow_mut() = Some(closure);
        inner.schedule()?;
        Ok(Self { inner })
    }
}

impl Drop for FrameLoop {
    fn drop(&mut self) {
        self.inner.running.set(false);
        if let Some(id) = self.inner.request.take() {
            if let Some(window) = web_sys::window() {
                let _ = window.cancel_animation_frame(id);
            }
        }
        self.inner.closure.borrow_mut().take();
    }
}
