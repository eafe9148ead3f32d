//! One-shot fade-in of page content as it enters the viewport.

use std::cell::RefCell;
use std::rc::Rc;

use folio_core::{Result, RevealOptions, RevealTracker, VISIBLE_CLASS};
use wasm_bindgen::{closure::Closure, JsCast, JsValue};
use web_sys::{
    Document, Element, IntersectionObserver, IntersectionObserverEntry, IntersectionObserverInit,
};

use crate::dom::{js_err, query_all, set_class};

const REVEAL_SELECTOR: &str =
    ".education-item, .skills-category, .project-card, .contact-form, .section-title, .about-content";

type ObserverCallback = Closure<dyn FnMut(js_sys::Array, IntersectionObserver)>;

/// Owns the intersection observer; disconnects it on drop.
pub(crate) struct RevealController {
    observer: IntersectionObserver,
    _callback: ObserverCallback,
}

impl RevealController {
    /// Observe the page's sections and content blocks.
    pub(crate) fn observe(document: &Document, options: &RevealOptions) -> Result<Option<Self>> {
        let targets = Rc::new(reveal_targets(document));
        if targets.is_empty() {
            log::debug!("Nothing to reveal");
            return Ok(None);
        }

        let tracker = Rc::new(RefCell::new(RevealTracker::<usize>::new()));
        let callback: ObserverCallback = {
            let targets = Rc::clone(&targets);
            let tracker = Rc::clone(&tracker);
            Closure::new(move |entries: js_sys::Array, observer: IntersectionObserver| {
                for entry in entries.iter() {
                    let Ok(entry) = entry.dyn_into::<IntersectionObserverEntry>() else {
                        continue;
                    };
                    let target = entry.target();
                    let Some(index) = targets.iter().position(|el| *el == target) else {
                        continue;
                    };
                    let revealed =
                        tracker.borrow_mut().on_intersection(&index, entry.is_intersecting());
                    if revealed {
                        set_class(&target, VISIBLE_CLASS, true);
                        observer.unobserve(&target);
                    }
                }
            })
        };

        let init = IntersectionObserverInit::new();
        init.set_threshold(&JsValue::from_f64(options.threshold));
        init.set_root_margin(&options.root_margin.to_string());
        let observer =
            IntersectionObserver::new_with_options(callback.as_ref().unchecked_ref(), &init)
                .map_err(js_err)?;

        let mut tracker = tracker.borrow_mut();
        for (index, element) in targets.iter().enumerate() {
            if tracker.register(index) {
                observer.observe(element);
            }
        }
        log::debug!("Observing {} elements for reveal", tracker.pending());

        Ok(Some(Self {
            observer,
            _callback: callback,
        }))
    }
}

impl Drop for RevealController {
    fn drop(&mut self) {
        self.observer.disconnect();
    }
}

/// Sections except the landing one, then content blocks, without duplicates.
fn reveal_targets(document: &Document) -> Vec<Element> {
    let mut targets: Vec<Element> = query_all(document, "section[id]")
        .into_iter()
        .filter(|section| !RevealTracker::<usize>::is_excluded(Some(&section.id())))
        .collect();
    for element in query_all(document, REVEAL_SELECTOR) {
        if !targets.contains(&element) {
            targets.push(element);
        }
    }
    targets
}
