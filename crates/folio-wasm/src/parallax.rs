//! 3D tilt of the hero card, following the pointer or slowly orbiting on
//! touch screens.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use folio_core::parallax::{AUTO_ROTATE_INTERVAL_MS, ENTRANCE_ANIMATION, REDUCED_MOTION_QUERY};
use folio_core::{Capabilities, LayerTransforms, ParallaxMode, ParallaxState, Result};
use wasm_bindgen::{closure::Closure, JsCast, JsValue};
use web_sys::{Document, HtmlElement, MouseEvent, Window};

use crate::dom::{by_id, js_err, query_html, set_style, viewport, Listener};

type FrameSlot = Rc<RefCell<Option<Closure<dyn FnMut()>>>>;

struct Layers {
    card: HtmlElement,
    container: HtmlElement,
    rim_light: Option<HtmlElement>,
    glow: Option<HtmlElement>,
}

impl Layers {
    fn apply(&self, transforms: &LayerTransforms) {
        set_style(&self.card, "transform", &transforms.card_transform());
        set_style(&self.container, "transform", &transforms.container_transform());
        if let Some(rim_light) = &self.rim_light {
            set_style(rim_light, "transform", &transforms.rim_transform());
            set_style(rim_light, "opacity", &transforms.rim_opacity().to_string());
        }
        if let Some(glow) = &self.glow {
            set_style(glow, "transform", &transforms.glow_transform());
            set_style(glow, "opacity", &transforms.glow_opacity().to_string());
        }
    }
}

/// What the environment allows.
pub(crate) fn detect_capabilities(window: &Window) -> Capabilities {
    let mut capabilities = Capabilities::empty();
    let reduced_motion = window
        .match_media(REDUCED_MOTION_QUERY)
        .ok()
        .flatten()
        .is_some_and(|query| query.matches());
    if reduced_motion {
        capabilities |= Capabilities::REDUCED_MOTION;
    }
    let touch_events =
        js_sys::Reflect::has(window.as_ref(), &JsValue::from_str("ontouchstart")).unwrap_or(false);
    if touch_events || window.navigator().max_touch_points() > 0 {
        capabilities |= Capabilities::TOUCH;
    }
    capabilities
}

/// The running parallax loop.
///
/// Dropping the task cancels the pending animation frame, stops the
/// auto-rotate timer and removes the pointer listeners.
pub(crate) struct ParallaxTask {
    window: Window,
    frame_handle: Rc<Cell<Option<i32>>>,
    frame: FrameSlot,
    interval: Option<(i32, Closure<dyn FnMut()>)>,
    _listeners: Vec<Listener>,
}

impl ParallaxTask {
    /// Start the effect on `#hero-card`, if the page has one.
    pub(crate) fn start(window: &Window, document: &Document) -> Result<Option<Self>> {
        let (Some(card), Some(container)) = (
            by_id::<HtmlElement>(document, "hero-card"),
            query_html(document, ".avatar-container"),
        ) else {
            log::debug!("No hero card; parallax disabled");
            return Ok(None);
        };

        let mode = ParallaxMode::select(detect_capabilities(window));
        if !mode.is_animated() {
            set_style(&card, "animation", ENTRANCE_ANIMATION);
            log::info!("Reduced motion requested; parallax disabled");
            return Ok(None);
        }
        log::debug!("Parallax mode: {mode:?}");

        let layers = Layers {
            card: card.clone(),
            container,
            rim_light: query_html(document, ".avatar-rim-light"),
            glow: query_html(document, ".avatar-glow"),
        };
        let state = Rc::new(RefCell::new(ParallaxState::new(mode, viewport(window))));

        let mut listeners = Vec::new();
        let mut interval = None;
        match mode {
            ParallaxMode::PointerTracking => {
                let tracked = Rc::clone(&state);
                listeners.push(Listener::new(card.as_ref(), "mousemove", move |event| {
                    if let Some(event) = event.dyn_ref::<MouseEvent>() {
                        let (x, y) = (event.client_x(), event.client_y());
                        tracked
                            .borrow_mut()
                            .on_pointer_move(f64::from(x), f64::from(y));
                    }
                })?);

                let tracked = Rc::clone(&state);
                let win = window.clone();
                listeners.push(Listener::new(card.as_ref(), "mouseleave", move |_| {
                    tracked.borrow_mut().on_pointer_leave(viewport(&win));
                })?);
            }
            ParallaxMode::TouchAutoRotate => {
                let rotating = Rc::clone(&state);
                let win = window.clone();
                let tick = Closure::<dyn FnMut()>::new(move || {
                    rotating.borrow_mut().auto_rotate_tick(viewport(&win));
                });
                let id = window
                    .set_interval_with_callback_and_timeout_and_arguments_0(
                        tick.as_ref().unchecked_ref(),
                        AUTO_ROTATE_INTERVAL_MS,
                    )
                    .map_err(js_err)?;
                interval = Some((id, tick));
            }
            ParallaxMode::Disabled => {}
        }

        let task = Self {
            window: window.clone(),
            frame_handle: Rc::new(Cell::new(None)),
            frame: Rc::new(RefCell::new(None)),
            interval,
            _listeners: listeners,
        };

        {
            let slot = Rc::clone(&task.frame);
            let handle = Rc::clone(&task.frame_handle);
            let win = window.clone();
            *task.frame.borrow_mut() = Some(Closure::new(move || {
                let transforms = state.borrow_mut().frame(viewport(&win));
                layers.apply(&transforms);
                handle.set(request_frame(&win, &slot));
            }));
        }
        task.frame_handle.set(request_frame(window, &task.frame));

        Ok(Some(task))
    }
}

impl Drop for ParallaxTask {
    fn drop(&mut self) {
        if let Some(id) = self.frame_handle.take() {
            let _ = self.window.cancel_animation_frame(id);
        }
        if let Some((id, _tick)) = self.interval.take() {
            self.window.clear_interval_with_handle(id);
        }
        self.frame.borrow_mut().take();
    }
}

fn request_frame(window: &Window, slot: &FrameSlot) -> Option<i32> {
    let slot = slot.borrow();
    let callback = slot.as_ref()?;
    match window.request_animation_frame(callback.as_ref().unchecked_ref()) {
        Ok(id) => Some(id),
        Err(err) => {
            log::warn!("Parallax frame request failed: {}", crate::dom::describe(&err));
            None
        }
    }
}
