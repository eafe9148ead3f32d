//! Email relay capability.
//!
//! The page never sends mail itself. A hosted relay receives the form fields
//! and dispatches the message; [`EmailRelay`] is the seam between the form
//! controller and that service.

use serde::{Deserialize, Serialize};

/// Status code the relay returns for a delivered message.
pub const RELAY_OK: u16 = 200;

/// Placeholder service id shipped with an unconfigured page.
pub const PLACEHOLDER_SERVICE_ID: &str = "YOUR_SERVICE_ID";

/// Placeholder template id shipped with an unconfigured page.
pub const PLACEHOLDER_TEMPLATE_ID: &str = "YOUR_TEMPLATE_ID";

/// Placeholder public key shipped with an unconfigured page.
pub const PLACEHOLDER_PUBLIC_KEY: &str = "YOUR_PUBLIC_KEY";

/// Relay failures.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum RelayError {
    /// The relay client is not loaded on the page.
    #[error("relay client is not available")]
    Unavailable,

    /// The relay answered with a non-success status.
    #[error("relay rejected the message with status {status}: {text}")]
    Rejected {
        /// Status code from the relay.
        status: u16,
        /// Response text from the relay.
        text: String,
    },

    /// The call itself failed.
    #[error("relay call failed: {0}")]
    Transport(String),
}

/// Credentials identifying the relay account, service and template.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RelayConfig {
    /// Relay service id.
    pub service_id: String,
    /// Message template id.
    pub template_id: String,
    /// Public key of the relay account.
    pub public_key: String,
}

impl Default for RelayConfig {
    fn default() -> Self {
        Self {
            service_id: PLACEHOLDER_SERVICE_ID.to_string(),
            template_id: PLACEHOLDER_TEMPLATE_ID.to_string(),
            public_key: PLACEHOLDER_PUBLIC_KEY.to_string(),
        }
    }
}

impl RelayConfig {
    /// Credentials from explicit ids.
    pub fn new(
        service_id: impl Into<String>,
        template_id: impl Into<String>,
        public_key: impl Into<String>,
    ) -> Self {
        Self {
            service_id: service_id.into(),
            template_id: template_id.into(),
            public_key: public_key.into(),
        }
    }

    /// Whether all three ids are set to real values.
    pub fn is_configured(&self) -> bool {
        let set = |value: &str, placeholder: &str| {
            let value = value.trim();
            !value.is_empty() && value != placeholder
        };
        set(&self.service_id, PLACEHOLDER_SERVICE_ID)
            && set(&self.template_id, PLACEHOLDER_TEMPLATE_ID)
            && set(&self.public_key, PLACEHOLDER_PUBLIC_KEY)
    }
}

/// Template variables sent with each message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TemplateParams {
    /// Sender name.
    pub from_name: String,
    /// Sender reply address.
    pub from_email: String,
    /// Message body.
    pub message: String,
}

/// Relay reply.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RelayResponse {
    /// Status code, [`RELAY_OK`] on success.
    pub status: u16,
    /// Free-form response text.
    #[serde(default)]
    pub text: String,
}

impl RelayResponse {
    /// Whether the relay accepted the message.
    pub fn is_success(&self) -> bool {
        self.status == RELAY_OK
    }
}

/// A hosted email relay.
///
/// Implemented by the browser SDK binding in production and by fakes in
/// tests. Futures are polled on the page's single thread, so they need not
/// be `Send`.
#[allow(async_fn_in_trait)]
pub trait EmailRelay {
    /// Prepare the client with the account's public key.
    fn init(&self, public_key: &str) -> Result<(), RelayError>;

    /// Deliver one validated submission.
    ///
    /// `params` carries the checked field values. A relay that posts the
    /// page's form element directly sends every named input instead.
    async fn send_form(
        &self,
        config: &RelayConfig,
        params: &TemplateParams,
    ) -> Result<RelayResponse, RelayError>;
}
