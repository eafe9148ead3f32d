//! Contact form wiring: DOM view, submit and field listeners.

use std::cell::Cell;
use std::rc::Rc;

use folio_core::{ContactForm, Field, FormView, RelayConfig, Result, StatusKind};
use wasm_bindgen::{closure::Closure, JsCast};
use wasm_bindgen_futures::spawn_local;
use web_sys::{
    Document, Element, HtmlButtonElement, HtmlElement, HtmlFormElement, HtmlInputElement,
    HtmlTextAreaElement, ScrollBehavior, ScrollIntoViewOptions, ScrollLogicalPosition, Window,
};

use crate::dom::{by_id, query_all, set_class, set_style, Listener};
use crate::relay::EmailJsRelay;

const SENDING_CLASS: &str = "sending";

/// [`FormView`] over the page's `#contact-form`.
pub(crate) struct DomFormView {
    window: Window,
    document: Document,
    form: HtmlFormElement,
    submit: HtmlButtonElement,
    status: Option<HtmlElement>,
    hide_timer: Rc<Cell<Option<i32>>>,
}

impl DomFormView {
    fn cancel_hide(&self) {
        if let Some(id) = self.hide_timer.take() {
            self.window.clear_timeout_with_handle(id);
        }
    }
}

impl Drop for DomFormView {
    fn drop(&mut self) {
        self.cancel_hide();
    }
}

impl FormView for DomFormView {
    fn field_value(&self, field: Field) -> String {
        let Some(element) = self.document.get_element_by_id(field.id()) else {
            return String::new();
        };
        if let Some(input) = element.dyn_ref::<HtmlInputElement>() {
            input.value()
        } else if let Some(textarea) = element.dyn_ref::<HtmlTextAreaElement>() {
            textarea.value()
        } else {
            String::new()
        }
    }

    fn set_field_error(&self, field: Field, message: &str) {
        if let Some(error) = by_id::<Element>(&self.document, field.error_id()) {
            error.set_text_content(Some(message));
        }
    }

    fn clear_errors(&self) {
        for error in query_all(&self.document, ".error-message") {
            error.set_text_content(Some(""));
        }
    }

    fn show_status(&self, message: &str, kind: StatusKind) {
        self.cancel_hide();
        let Some(status) = &self.status else {
            return;
        };
        status.set_text_content(Some(message));
        status.set_class_name(&format!("form-status {}", kind.as_class()));
        set_style(status, "display", "block");

        let options = ScrollIntoViewOptions::new();
        options.set_behavior(ScrollBehavior::Smooth);
        options.set_block(ScrollLogicalPosition::Nearest);
        status.scroll_into_view_with_scroll_into_view_options(&options);
    }

    fn hide_status(&self) {
        self.cancel_hide();
        if let Some(status) = &self.status {
            set_style(status, "display", "none");
        }
    }

    fn hide_status_after(&self, delay_ms: u32) {
        self.cancel_hide();
        let Some(status) = self.status.clone() else {
            return;
        };
        let timer = Rc::clone(&self.hide_timer);
        let hide = Closure::once_into_js(move || {
            timer.set(None);
            set_style(&status, "display", "none");
        });
        let delay = i32::try_from(delay_ms).unwrap_or(i32::MAX);
        match self
            .window
            .set_timeout_with_callback_and_timeout_and_arguments_0(hide.unchecked_ref(), delay)
        {
            Ok(id) => self.hide_timer.set(Some(id)),
            Err(err) => {
                log::warn!("Could not schedule status hide: {}", crate::dom::describe(&err))
            }
        }
    }

    fn set_submitting(&self, submitting: bool) {
        self.submit.set_disabled(submitting);
        set_class(&self.submit, SENDING_CLASS, submitting);
    }

    fn reset_fields(&self) {
        self.form.reset();
    }
}

/// Contact form controller bound to the page.
pub(crate) struct FormController {
    form: Rc<ContactForm<DomFormView, EmailJsRelay>>,
    _listeners: Vec<Listener>,
}

impl Drop for FormController {
    fn drop(&mut self) {
        // A send still in flight keeps the view alive past teardown.
        self.form.view().cancel_hide();
    }
}

impl FormController {
    /// Bind `#contact-form`, if present together with `#submit-btn`.
    pub(crate) fn install(
        window: &Window,
        document: &Document,
        config: RelayConfig,
        relay: EmailJsRelay,
    ) -> Result<Option<Self>> {
        let (Some(form_el), Some(submit)) = (
            by_id::<HtmlFormElement>(document, "contact-form"),
            by_id::<HtmlButtonElement>(document, "submit-btn"),
        ) else {
            log::debug!("No contact form; form controller disabled");
            return Ok(None);
        };

        let view = DomFormView {
            window: window.clone(),
            document: document.clone(),
            form: form_el.clone(),
            submit,
            status: by_id::<HtmlElement>(document, "form-status"),
            hide_timer: Rc::new(Cell::new(None)),
        };
        let form = Rc::new(ContactForm::new(view, relay.with_form(form_el.clone()), config));

        let mut listeners = Vec::new();
        {
            let form = Rc::clone(&form);
            listeners.push(Listener::new(form_el.as_ref(), "submit", move |event| {
                event.prevent_default();
                let form = Rc::clone(&form);
                spawn_local(async move {
                    let outcome = form.submit().await;
                    log::debug!("Contact form submit: {outcome:?}");
                });
            })?);
        }

        for field in Field::ALL {
            let Some(input) = document.get_element_by_id(field.id()) else {
                continue;
            };
            let on_blur = Rc::clone(&form);
            listeners.push(Listener::new(input.as_ref(), "blur", move |_| {
                on_blur.on_blur(field)
            })?);
            let on_input = Rc::clone(&form);
            listeners.push(Listener::new(input.as_ref(), "input", move |_| {
                on_input.on_input(field)
            })?);
        }

        Ok(Some(Self {
            form,
            _listeners: listeners,
        }))
    }
}
