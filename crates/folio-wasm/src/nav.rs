//! Mobile navigation menu and smooth in-page links.

use std::cell::Cell;
use std::rc::Rc;

use folio_core::scroll::{anchor_id, anchor_offset};
use folio_core::{NavMenu, Result, ACTIVE_CLASS, DEFAULT_NAVBAR_HEIGHT};
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, HtmlElement, KeyboardEvent, Node};

use crate::dom::{
    offset_height, offset_top, query, query_all, query_html, set_class, set_style, Listener,
};
use crate::scroll::SmoothScroller;

/// Hamburger menu for narrow viewports.
pub(crate) struct MobileMenu {
    _listeners: Vec<Listener>,
}

#[derive(Clone)]
struct MenuElements {
    document: Document,
    menu: Element,
    hamburger: HtmlElement,
}

impl MenuElements {
    fn render(&self, state: NavMenu) {
        set_class(&self.menu, ACTIVE_CLASS, state.is_open());
        set_class(&self.hamburger, ACTIVE_CLASS, state.is_open());
        let _ = self
            .hamburger
            .set_attribute("aria-expanded", state.aria_expanded());
        let _ = self.hamburger.set_attribute("aria-label", state.aria_label());
        if let Some(body) = self.document.body() {
            set_style(&body, "overflow", state.body_overflow());
        }
    }

    fn contains(&self, target: Option<&Node>) -> bool {
        self.hamburger.contains(target) || self.menu.contains(target)
    }
}

impl MobileMenu {
    /// Bind `.hamburger` and `.nav-menu`, if both exist.
    pub(crate) fn install(document: &Document) -> Result<Option<Self>> {
        let (Some(hamburger), Some(menu)) =
            (query_html(document, ".hamburger"), query(document, ".nav-menu"))
        else {
            log::debug!("No hamburger or nav menu; mobile menu disabled");
            return Ok(None);
        };
        let elements = MenuElements {
            document: document.clone(),
            menu,
            hamburger,
        };
        let state = Rc::new(Cell::new(NavMenu::new()));
        let mut listeners = Vec::new();

        {
            let (elements, state) = (elements.clone(), Rc::clone(&state));
            listeners.push(Listener::new(
                elements.hamburger.clone().as_ref(),
                "click",
                move |_| {
                    let mut menu = state.get();
                    menu.toggle();
                    state.set(menu);
                    elements.render(menu);
                },
            )?);
        }

        for link in query_all(document, ".nav-link") {
            let (elements, state) = (elements.clone(), Rc::clone(&state));
            listeners.push(Listener::new(link.as_ref(), "click", move |_| {
                close(&state, &elements);
            })?);
        }

        {
            let (elements, state) = (elements.clone(), Rc::clone(&state));
            listeners.push(Listener::new(document.as_ref(), "click", move |event| {
                let target = event.target().and_then(|t| t.dyn_into::<Node>().ok());
                if !elements.contains(target.as_ref()) {
                    close(&state, &elements);
                }
            })?);
        }

        {
            let (elements, state) = (elements.clone(), Rc::clone(&state));
            listeners.push(Listener::new(document.as_ref(), "keydown", move |event| {
                let is_escape = event
                    .dyn_ref::<KeyboardEvent>()
                    .is_some_and(|key| key.key() == "Escape");
                if is_escape && close(&state, &elements) {
                    let _ = elements.hamburger.focus();
                }
            })?);
        }

        Ok(Some(Self {
            _listeners: listeners,
        }))
    }
}

/// Close the menu; returns whether it was open.
fn close(state: &Cell<NavMenu>, elements: &MenuElements) -> bool {
    let mut menu = state.get();
    if !menu.close() {
        return false;
    }
    state.set(menu);
    elements.render(menu);
    true
}

/// Animated scrolling for links to sections on this page.
pub(crate) struct AnchorLinks {
    _listeners: Vec<Listener>,
}

impl AnchorLinks {
    pub(crate) fn install(
        document: &Document,
        scroller: &Rc<SmoothScroller>,
        duration_ms: f64,
    ) -> Result<Self> {
        let mut listeners = Vec::new();
        for link in query_all(document, r##".nav-link, .btn[href^="#"]"##) {
            let document = document.clone();
            let scroller = Rc::clone(scroller);
            let anchor = link.clone();
            listeners.push(Listener::new(link.as_ref(), "click", move |event| {
                let href = anchor.get_attribute("href").unwrap_or_default();
                let Some(id) = anchor_id(&href) else {
                    return;
                };
                event.prevent_default();
                let Some(section) = document.get_element_by_id(id) else {
                    log::debug!("Anchor target #{id} not found");
                    return;
                };
                let navbar_height = query(&document, ".navbar")
                    .and_then(|navbar| offset_height(&navbar))
                    .unwrap_or(DEFAULT_NAVBAR_HEIGHT);
                let top = offset_top(&section).unwrap_or(0.0);
                scroller.scroll_to(anchor_offset(top, navbar_height), duration_ms);
            })?);
        }
        Ok(Self {
            _listeners: listeners,
        })
    }
}
