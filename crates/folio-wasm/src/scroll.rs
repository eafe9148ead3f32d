//! Smooth window scrolling driven by animation frames.

use std::cell::RefCell;
use std::rc::Rc;

use folio_core::ScrollAnimator;
use wasm_bindgen::{closure::Closure, JsCast};
use web_sys::Window;

use crate::dom::scroll_offset;

type FrameSlot = Rc<RefCell<Option<Closure<dyn FnMut(f64)>>>>;

/// Animates the window scroll position.
///
/// Only the most recent animation writes to the scroll position; frames of
/// older runs drop themselves.
pub(crate) struct SmoothScroller {
    window: Window,
    animator: ScrollAnimator,
}

impl SmoothScroller {
    pub(crate) fn new(window: Window) -> Rc<Self> {
        Rc::new(Self {
            window,
            animator: ScrollAnimator::new(),
        })
    }

    /// Animate from the current offset to `target` over `duration_ms`.
    pub(crate) fn scroll_to(self: &Rc<Self>, target: f64, duration_ms: f64) {
        let mut run = self
            .animator
            .begin(scroll_offset(&self.window), target, duration_ms);
        log::debug!("Smooth scroll {:.0} -> {:.0} over {duration_ms}ms", run.start(), run.target());

        let slot: FrameSlot = Rc::new(RefCell::new(None));
        let frame_slot = Rc::clone(&slot);
        let scroller = Rc::clone(self);

        *slot.borrow_mut() = Some(Closure::new(move |now: f64| {
            let Some(frame) = scroller.animator.step(&mut run, now) else {
                frame_slot.borrow_mut().take();
                return;
            };
            scroller.window.scroll_to_with_x_and_y(0.0, frame.offset);
            if frame.finished || !scroller.request_frame(&frame_slot) {
                frame_slot.borrow_mut().take();
            }
        }));

        if !self.request_frame(&slot) {
            slot.borrow_mut().take();
            self.window.scroll_to_with_x_and_y(0.0, target);
        }
    }

    /// Stop whatever animation is in flight.
    pub(crate) fn cancel(&self) {
        self.animator.cancel();
    }

    fn request_frame(&self, slot: &FrameSlot) -> bool {
        let slot = slot.borrow();
        let Some(callback) = slot.as_ref() else {
            return false;
        };
        self.window
            .request_animation_frame(callback.as_ref().unchecked_ref())
            .is_ok()
    }
}
