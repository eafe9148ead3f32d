//! Scroll-position reactors: navbar style, active link, scroll-to-top.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use folio_core::reactors::{active_section, link_is_active};
use folio_core::{
    FrameCoalescer, Result, SectionBounds, ThresholdToggle, ACTIVE_CLASS, DEFAULT_NAVBAR_HEIGHT,
    SCROLLED_CLASS, VISIBLE_CLASS,
};
use js_sys::Function;
use wasm_bindgen::{closure::Closure, JsCast};
use web_sys::{Document, Element, Window};

use crate::dom::{
    js_err, offset_height, offset_top, query, query_all, scroll_offset, set_class, Listener,
};
use crate::scroll::SmoothScroller;

const SCROLL_TOP_ICON: &str = r#"<svg width="24" height="24" viewBox="0 0 24 24" fill="none" stroke="currentColor" stroke-width="2" stroke-linecap="round" stroke-linejoin="round"><path d="M18 15l-6-6-6 6"/></svg>"#;

/// Runs a recomputation at most once per animation frame while the window
/// scrolls.
pub(crate) struct FrameThrottle {
    window: Window,
    handle: Rc<Cell<Option<i32>>>,
    _frame: Closure<dyn FnMut()>,
    _listener: Listener,
}

impl FrameThrottle {
    /// Recompute on scroll, coalesced per frame.
    pub(crate) fn on_scroll<F>(window: &Window, mut recompute: F) -> Result<Self>
    where
        F: FnMut() + 'static,
    {
        let coalescer = Rc::new(FrameCoalescer::new());
        let handle = Rc::new(Cell::new(None));

        let frame = {
            let coalescer = Rc::clone(&coalescer);
            let handle = Rc::clone(&handle);
            Closure::<dyn FnMut()>::new(move || {
                handle.set(None);
                coalescer.run_frame(&mut recompute);
            })
        };
        let frame_fn: Function = frame.as_ref().unchecked_ref::<Function>().clone();

        let listener = {
            let window = window.clone();
            let handle = Rc::clone(&handle);
            Listener::passive(window.clone().as_ref(), "scroll", move |_| {
                if !coalescer.request() {
                    return;
                }
                match window.request_animation_frame(&frame_fn) {
                    Ok(id) => handle.set(Some(id)),
                    Err(err) => {
                        log::warn!("Frame request failed: {}", crate::dom::describe(&err));
                        coalescer.reset();
                    }
                }
            })?
        };

        Ok(Self {
            window: window.clone(),
            handle,
            _frame: frame,
            _listener: listener,
        })
    }
}

impl Drop for FrameThrottle {
    fn drop(&mut self) {
        if let Some(id) = self.handle.take() {
            let _ = self.window.cancel_animation_frame(id);
        }
    }
}

/// The three scroll reactors and the scroll-to-top button they own.
pub(crate) struct ScrollReactors {
    button: Element,
    _throttles: Vec<FrameThrottle>,
    _click: Listener,
}

impl ScrollReactors {
    pub(crate) fn install(
        window: &Window,
        document: &Document,
        scroller: &Rc<SmoothScroller>,
        top_duration_ms: f64,
    ) -> Result<Self> {
        let mut throttles = Vec::new();

        if let Some(throttle) = navbar_style(window, document)? {
            throttles.push(throttle);
        }
        if let Some(throttle) = active_links(window, document)? {
            throttles.push(throttle);
        }
        let (button, throttle, click) =
            scroll_to_top(window, document, scroller, top_duration_ms)?;
        throttles.push(throttle);

        Ok(Self {
            button,
            _throttles: throttles,
            _click: click,
        })
    }
}

impl Drop for ScrollReactors {
    fn drop(&mut self) {
        self.button.remove();
    }
}

fn navbar_style(window: &Window, document: &Document) -> Result<Option<FrameThrottle>> {
    let Some(navbar) = query(document, ".navbar") else {
        log::debug!("No .navbar; navbar scroll style disabled");
        return Ok(None);
    };

    let toggle = Rc::new(RefCell::new(ThresholdToggle::navbar()));
    let recompute = {
        let window = window.clone();
        move || {
            if let Some(scrolled) = toggle.borrow_mut().update_changed(scroll_offset(&window)) {
                set_class(&navbar, SCROLLED_CLASS, scrolled);
            }
        }
    };
    initial_then_throttle(window, recompute).map(Some)
}

fn active_links(window: &Window, document: &Document) -> Result<Option<FrameThrottle>> {
    let sections = query_all(document, "section[id]");
    let links = query_all(document, ".nav-link");
    if sections.is_empty() || links.is_empty() {
        log::debug!("No sections or nav links; active link highlighting disabled");
        return Ok(None);
    }

    let recompute = {
        let window = window.clone();
        let document = document.clone();
        move || {
            let navbar_height = query(&document, ".navbar")
                .and_then(|navbar| offset_height(&navbar))
                .filter(|height| *height > 0.0)
                .unwrap_or(DEFAULT_NAVBAR_HEIGHT);
            let bounds = section_bounds(&sections);
            let active = active_section(&bounds, scroll_offset(&window), navbar_height);
            for link in &links {
                let href = link.get_attribute("href");
                set_class(link, ACTIVE_CLASS, link_is_active(href.as_deref(), active));
            }
        }
    };
    initial_then_throttle(window, recompute).map(Some)
}

fn section_bounds(sections: &[Element]) -> Vec<SectionBounds> {
    sections
        .iter()
        .map(|section| {
            SectionBounds::new(
                section.id(),
                offset_top(section).unwrap_or(0.0),
                offset_height(section).unwrap_or(0.0),
            )
        })
        .collect()
}

fn scroll_to_top(
    window: &Window,
    document: &Document,
    scroller: &Rc<SmoothScroller>,
    duration_ms: f64,
) -> Result<(Element, FrameThrottle, Listener)> {
    let button = document.create_element("button").map_err(js_err)?;
    button.set_class_name("scroll-to-top");
    button
        .set_attribute("aria-label", "Scroll to top")
        .map_err(js_err)?;
    button.set_inner_html(SCROLL_TOP_ICON);
    if let Some(body) = document.body() {
        body.append_child(&button).map_err(js_err)?;
    }

    let click = {
        let scroller = Rc::clone(scroller);
        Listener::new(button.as_ref(), "click", move |_| scroller.scroll_to(0.0, duration_ms))?
    };

    let toggle = Rc::new(RefCell::new(ThresholdToggle::scroll_top()));
    let recompute = {
        let window = window.clone();
        let button = button.clone();
        move || {
            if let Some(visible) = toggle.borrow_mut().update_changed(scroll_offset(&window)) {
                set_class(&button, VISIBLE_CLASS, visible);
            }
        }
    };
    Ok((button, initial_then_throttle(window, recompute)?, click))
}

/// Run `recompute` once now, then on every coalesced scroll frame.
fn initial_then_throttle<F>(window: &Window, mut recompute: F) -> Result<FrameThrottle>
where
    F: FnMut() + 'static,
{
    recompute();
    FrameThrottle::on_scroll(window, recompute)
}
