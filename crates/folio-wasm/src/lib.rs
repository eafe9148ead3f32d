//! WebAssembly front end for the folio portfolio page
//!
//! This crate wires the [`folio_core`] controllers to the browser: DOM
//! events, animation frames, timers, `IntersectionObserver` and the EmailJS
//! relay SDK.
//!
//! # Features
//!
//! - Mobile navigation menu with ARIA state and scroll lock
//! - Eased scrolling for in-page links and the scroll-to-top button
//! - One-shot fade-in of sections as they enter the viewport
//! - Navbar style and active link tracking while scrolling
//! - 3D pointer parallax on the hero avatar
//! - Validated contact form delivered through EmailJS
//!
//! # Example Usage (HTML)
//!
//! ```html
//! <script type="application/json" id="folio-config">
//!   { "relay": { "service_id": "service_x", "template_id": "template_y",
//!                "public_key": "key_z" } }
//! </script>
//! <script type="module">
//!   import init, { teardown } from './folio_wasm.js';
//!   await init();
//! </script>
//! ```
//!
//! The module mounts itself once the document is parsed and releases every
//! listener, observer and timer on `pagehide` or when `teardown()` is called.
//! A page restored from the back/forward cache is mounted again on
//! `pageshow`.

#![warn(missing_docs)]

mod config;
mod dom;
mod form;
mod nav;
mod parallax;
mod reactors;
mod relay;
mod reveal;
mod scroll;

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use folio_core::{EmailRelay, PageConfig, RelayError, Result};
use wasm_bindgen::prelude::*;
use web_sys::{Document, ErrorEvent, PageTransitionEvent, Window};

use crate::dom::Listener;
use crate::form::FormController;
use crate::nav::{AnchorLinks, MobileMenu};
use crate::parallax::ParallaxTask;
use crate::reactors::ScrollReactors;
use crate::relay::EmailJsRelay;
use crate::reveal::RevealController;
use crate::scroll::SmoothScroller;

thread_local! {
    static PAGE: RefCell<Option<Page>> = const { RefCell::new(None) };
    static LIFECYCLE_HOOKED: Cell<bool> = const { Cell::new(false) };
}

/// Install the panic hook and mount the page once the DOM is ready
#[wasm_bindgen(start)]
pub fn start() -> std::result::Result<(), JsValue> {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();

    let window = dom::window().map_err(to_js)?;
    let document = dom::document(&window).map_err(to_js)?;

    if document.ready_state() == "loading" {
        let on_ready = Closure::once_into_js(|| {
            if let Err(err) = mount() {
                log::error!("Page setup failed: {err:?}");
            }
        });
        document.add_event_listener_with_callback("DOMContentLoaded", on_ready.unchecked_ref())?;
    } else {
        mount()?;
    }
    Ok(())
}

/// Bind every controller to the current document
///
/// Mounting again replaces the previous page controllers.
#[wasm_bindgen]
pub fn mount() -> std::result::Result<(), JsValue> {
    let window = dom::window().map_err(to_js)?;
    let document = dom::document(&window).map_err(to_js)?;

    let (config, config_error) = match config::load(&document) {
        Ok(config) => (config, None),
        Err(err) => (PageConfig::default(), Some(err)),
    };
    console_log::init_with_level(config.log_level()).ok();
    if let Some(err) = config_error {
        log::error!("Invalid page configuration, using defaults: {err}");
    }

    hook_lifecycle(&window)?;
    let page = Page::mount(&window, &document, &config).map_err(to_js)?;
    let previous = PAGE.with(|slot| slot.borrow_mut().replace(page));
    drop(previous);
    log::info!("Page mounted");
    Ok(())
}

/// Release every listener, observer, timer and animation
#[wasm_bindgen]
pub fn teardown() {
    let page = PAGE.with(|slot| slot.borrow_mut().take());
    if page.is_some() {
        drop(page);
        log::info!("Page torn down");
    }
}

/// Whether the page controllers are currently mounted
#[wasm_bindgen(js_name = isMounted)]
pub fn is_mounted() -> bool {
    PAGE.with(|slot| slot.borrow().is_some())
}

/// Tear down on `pagehide` and mount again when the page comes back from
/// the back/forward cache. Registered once for the life of the module.
fn hook_lifecycle(window: &Window) -> std::result::Result<(), JsValue> {
    if LIFECYCLE_HOOKED.get() {
        return Ok(());
    }

    let on_pagehide = Closure::<dyn FnMut()>::new(teardown);
    window.add_event_listener_with_callback("pagehide", on_pagehide.as_ref().unchecked_ref())?;
    on_pagehide.forget();

    let on_pageshow = Closure::<dyn FnMut(_)>::new(|event: PageTransitionEvent| {
        if !event.persisted() || is_mounted() {
            return;
        }
        log::info!("Page restored from cache");
        if let Err(err) = mount() {
            log::error!("Page remount failed: {err:?}");
        }
    });
    window.add_event_listener_with_callback("pageshow", on_pageshow.as_ref().unchecked_ref())?;
    on_pageshow.forget();

    LIFECYCLE_HOOKED.set(true);
    Ok(())
}

/// Everything the page keeps alive while mounted.
struct Page {
    scroller: Rc<SmoothScroller>,
    _error_log: Option<Listener>,
    _menu: Option<MobileMenu>,
    _anchors: Option<AnchorLinks>,
    _reveal: Option<RevealController>,
    _reactors: Option<ScrollReactors>,
    _form: Option<FormController>,
    _parallax: Option<ParallaxTask>,
}

impl Page {
    fn mount(window: &Window, document: &Document, config: &PageConfig) -> Result<Self> {
        let relay = EmailJsRelay::default();
        match relay.init(&config.relay.public_key) {
            Ok(()) => log::info!("Email relay initialized"),
            Err(RelayError::Unavailable) => {
                log::error!("Email relay SDK not loaded; check the emailjs script tag")
            }
            Err(err) => log::error!("Email relay init failed: {err}"),
        }

        let scroller = SmoothScroller::new(window.clone());
        let scroll = &config.scroll;

        Ok(Self {
            _error_log: enabled("error log", error_log(window).map(Some)),
            _menu: enabled("mobile menu", MobileMenu::install(document)),
            _anchors: enabled(
                "anchor links",
                AnchorLinks::install(document, &scroller, scroll.anchor_duration_ms).map(Some),
            ),
            _reveal: enabled("reveal", RevealController::observe(document, &config.reveal)),
            _reactors: enabled(
                "scroll reactors",
                ScrollReactors::install(window, document, &scroller, scroll.top_duration_ms)
                    .map(Some),
            ),
            _form: enabled(
                "contact form",
                FormController::install(window, document, config.relay.clone(), relay),
            ),
            _parallax: enabled("parallax", ParallaxTask::start(window, document)),
            scroller,
        })
    }
}

impl Drop for Page {
    fn drop(&mut self) {
        self.scroller.cancel();
    }
}

/// A controller that failed to start is left out; the rest keep working.
fn enabled<T>(name: &str, result: Result<Option<T>>) -> Option<T> {
    result.unwrap_or_else(|err| {
        log::error!("{name} disabled: {err}");
        None
    })
}

/// Log uncaught script errors.
fn error_log(window: &Window) -> Result<Listener> {
    Listener::new(window.as_ref(), "error", |event| {
        let message = event
            .dyn_ref::<ErrorEvent>()
            .map(|err| err.message())
            .unwrap_or_else(|| event.type_());
        log::error!("Script error: {message}");
    })
}

fn to_js(err: folio_core::FolioError) -> JsValue {
    JsValue::from_str(&err.to_string())
}
