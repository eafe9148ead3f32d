//! EmailJS browser SDK binding.

use folio_core::{EmailRelay, RelayConfig, RelayError, RelayResponse, TemplateParams};
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::JsFuture;
use web_sys::HtmlFormElement;

use crate::dom::describe;

#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(js_namespace = emailjs, js_name = init, catch)]
    fn emailjs_init(public_key: &str) -> Result<(), JsValue>;

    #[wasm_bindgen(js_namespace = emailjs, js_name = sendForm, catch)]
    fn emailjs_send_form(
        service_id: &str,
        template_id: &str,
        form: &HtmlFormElement,
        public_key: &str,
    ) -> Result<js_sys::Promise, JsValue>;
}

/// Relay backed by the `emailjs` global the page loads from its CDN.
///
/// Every named field of the bound form is sent, so the template sees
/// whatever inputs the page declares.
#[derive(Debug, Default, Clone)]
pub(crate) struct EmailJsRelay {
    form: Option<HtmlFormElement>,
}

impl EmailJsRelay {
    /// Relay that submits `form` as a whole.
    pub(crate) fn with_form(self, form: HtmlFormElement) -> Self {
        Self { form: Some(form) }
    }

    /// Whether the SDK script has been loaded.
    pub(crate) fn is_loaded() -> bool {
        js_sys::Reflect::has(&js_sys::global(), &JsValue::from_str("emailjs")).unwrap_or(false)
    }
}

impl EmailRelay for EmailJsRelay {
    fn init(&self, public_key: &str) -> Result<(), RelayError> {
        if !Self::is_loaded() {
            return Err(RelayError::Unavailable);
        }
        emailjs_init(public_key).map_err(|err| RelayError::Transport(describe(&err)))
    }

    async fn send_form(
        &self,
        config: &RelayConfig,
        _params: &TemplateParams,
    ) -> Result<RelayResponse, RelayError> {
        if !Self::is_loaded() {
            return Err(RelayError::Unavailable);
        }
        let Some(form) = &self.form else {
            return Err(RelayError::Transport("no form bound to the relay".into()));
        };
        let promise = emailjs_send_form(
            &config.service_id,
            &config.template_id,
            form,
            &config.public_key,
        )
        .map_err(|err| RelayError::Transport(describe(&err)))?;

        match JsFuture::from(promise).await {
            Ok(value) => serde_wasm_bindgen::from_value(value)
                .map_err(|err| RelayError::Transport(format!("unexpected relay reply: {err}"))),
            Err(value) => Err(rejection(value)),
        }
    }
}

/// The SDK rejects with a `{status, text}` object for relay errors and with
/// an `Error` for everything else.
fn rejection(value: JsValue) -> RelayError {
    match serde_wasm_bindgen::from_value::<RelayResponse>(value.clone()) {
        Ok(response) => RelayError::Rejected {
            status: response.status,
            text: response.text,
        },
        Err(_) => RelayError::Transport(describe(&value)),
    }
}
