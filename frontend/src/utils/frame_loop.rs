use std::cell::{Cell, RefCell};
use std::rc::Rc;

use wasm_bindgen::prelude::Closure;
use wasm_bindgen::JsCast;

/// A `requestAnimationFrame` loop around a single reusable closure.
///
/// `step` receives the frame timestamp and returns whether it wants another
/// frame. Calling [`FrameLoop::start`] while the loop is running is a no-op.
pub struct FrameLoop {
    closure: RefCell<Option<Closure<dyn FnMut(f64)>>>,
    running: Cell<bool>,
    pending: Cell<Option<i32>>,
}

impl FrameLoop {
    pub fn new(mut step: impl FnMut(f64) -> bool + 'static) -> Rc<Self> {
        let frame_loop = Rc::new(Self {
            closure: RefCell::new(None),
            running: Cell::new(false),
            pending: Cell::new(None),
        });
        let weak = Rc::downgrade(&frame_loop);
        let closure = Closure::<dyn FnMut(f64)>::new(move |now: f64| {
            let Some(this) = weak.upgrade() else { return };
            this.pending.set(None);
            if step(now) {
                this.request();
            } else {
                this.running.set(false);
            }
        });
        *frame_loop.closure.borrow_mut() = Some(closure);
        frame_loop
    }

    pub fn start(&self) {
        if self.running.replace(true) {
            return;
        }
        self.request();
    }

    /// Cancels the pending frame, if any. `start` resumes the loop.
    pub fn stop(&self) {
        if let (Some(handle), Some(window)) = (self.pending.take(), web_sys::window()) {
            let _ = window.cancel_animation_frame(handle);
        }
        self.running.set(false);
    }

    fn request(&self) {
        let Some(window) = web_sys::window() else {
            self.running.set(false);
            return;
        };
        let closure = self.closure.borrow();
        let Some(closure) = closure.as_ref() else {
            self.running.set(false);
            return;
        };
        match window.request_animation_frame(closure.as_ref().unchecked_ref()) {
            Ok(handle) => self.pending.set(Some(handle)),
            Err(e) => {
                log::warn!("requestAnimationFrame failed: {:?}", e);
                self.running.set(false);
            }
        }
    }
}

impl Drop for FrameLoop {
    fn drop(&mut self) {
        self.stop();
    }
}
