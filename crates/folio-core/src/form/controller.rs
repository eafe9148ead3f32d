use std::cell::Cell;

use super::validation::{validate, validate_field, Field, FormValues};
use crate::relay::{EmailRelay, RelayConfig, RelayError};

/// Status shown when validation fails.
pub const STATUS_FIX_ERRORS: &str = "Please fix the errors above";
/// Status shown when the relay credentials are still placeholders.
pub const STATUS_NOT_CONFIGURED: &str =
    "Email relay is not configured. Please set the relay credentials in the page configuration.";
/// Status shown while the relay call is in flight.
pub const STATUS_SENDING: &str = "Sending...";
/// Status shown after the relay accepted the message.
pub const STATUS_SENT: &str = "Message sent successfully! I'll get back to you soon.";
/// Status shown when delivery failed.
pub const STATUS_FAILED: &str =
    "Failed to send message. Please try again later or contact me directly.";

/// How long the success status stays up, in milliseconds.
pub const STATUS_HIDE_DELAY_MS: u32 = 5000;

/// Styling of the form status line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusKind {
    /// Positive or neutral progress.
    Success,
    /// Something needs the reader's attention.
    Error,
}

impl StatusKind {
    /// CSS modifier class.
    pub fn as_class(self) -> &'static str {
        match self {
            StatusKind::Success => "success",
            StatusKind::Error => "error",
        }
    }
}

/// Where the form is in the submission lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SubmissionStatus {
    /// Nothing submitted yet.
    #[default]
    Idle,
    /// Relay call in flight.
    Sending,
    /// Last submission was delivered.
    Success,
    /// Last submission was rejected locally or failed to deliver.
    Error,
}

/// Result of one submit attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// A submission was already in flight; nothing happened.
    Busy,
    /// At least one field failed validation.
    Invalid,
    /// Relay credentials are placeholders; the relay was not called.
    NotConfigured,
    /// The relay accepted the message.
    Sent,
    /// The relay rejected the message or the call failed.
    Failed(RelayError),
}

/// The form's rendering surface.
///
/// Methods take `&self`; DOM handles are shared references and fakes use
/// interior mutability.
pub trait FormView {
    /// Current raw text of `field`.
    fn field_value(&self, field: Field) -> String;

    /// Show `message` under `field`.
    fn set_field_error(&self, field: Field, message: &str);

    /// Remove the inline error of `field`.
    fn clear_field_error(&self, field: Field) {
        self.set_field_error(field, "");
    }

    /// Remove every inline error.
    fn clear_errors(&self) {
        for field in Field::ALL {
            self.clear_field_error(field);
        }
    }

    /// Show the status line.
    fn show_status(&self, message: &str, kind: StatusKind);

    /// Hide the status line now.
    fn hide_status(&self);

    /// Hide the status line after `delay_ms`.
    fn hide_status_after(&self, delay_ms: u32);

    /// Disable (`true`) or re-enable (`false`) the submit control.
    fn set_submitting(&self, submitting: bool);

    /// Empty all fields.
    fn reset_fields(&self);
}

/// Contact form controller.
pub struct ContactForm<V, R> {
    view: V,
    relay: R,
    config: RelayConfig,
    status: Cell<SubmissionStatus>,
}

impl<V: FormView, R: EmailRelay> ContactForm<V, R> {
    /// Controller for `view`, delivering through `relay` with `config`.
    pub fn new(view: V, relay: R, config: RelayConfig) -> Self {
        Self {
            view,
            relay,
            config,
            status: Cell::new(SubmissionStatus::Idle),
        }
    }

    /// Current lifecycle state.
    pub fn status(&self) -> SubmissionStatus {
        self.status.get()
    }

    /// The rendering surface.
    pub fn view(&self) -> &V {
        &self.view
    }

    /// The relay client.
    pub fn relay(&self) -> &R {
        &self.relay
    }

    /// Read all three fields from the view.
    pub fn values(&self) -> FormValues {
        FormValues::new(
            self.view.field_value(Field::Name),
            self.view.field_value(Field::Email),
            self.view.field_value(Field::Message),
        )
    }

    /// Run the submission protocol.
    ///
    /// The submit control is disabled only once the relay is about to be
    /// called and is re-enabled on every exit from that point, including when
    /// this future is dropped mid-flight.
    pub async fn submit(&self) -> SubmitOutcome {
        if self.status.get() == SubmissionStatus::Sending {
            log::debug!("Submit ignored: a message is already being sent");
            return SubmitOutcome::Busy;
        }

        self.view.hide_status();
        self.view.clear_errors();

        let values = self.values();
        let report = validate(&values);
        if !report.is_valid() {
            for (field, message) in report.errors() {
                self.view.set_field_error(field, message);
            }
            self.finish(STATUS_FIX_ERRORS, StatusKind::Error, SubmissionStatus::Error);
            return SubmitOutcome::Invalid;
        }

        if !self.config.is_configured() {
            log::error!(
                "Email relay not configured: replace the placeholder relay credentials in the page configuration"
            );
            self.finish(STATUS_NOT_CONFIGURED, StatusKind::Error, SubmissionStatus::Error);
            return SubmitOutcome::NotConfigured;
        }

        let _guard = SubmitGuard::engage(&self.view, &self.status);
        self.view.show_status(STATUS_SENDING, StatusKind::Success);

        let params = values.to_template_params();
        let outcome = match self.relay.send_form(&self.config, &params).await {
            Ok(response) if response.is_success() => Ok(()),
            Ok(response) => Err(RelayError::Rejected {
                status: response.status,
                text: response.text,
            }),
            Err(err) => Err(err),
        };

        match outcome {
            Ok(()) => {
                log::info!("Contact message delivered");
                self.finish(STATUS_SENT, StatusKind::Success, SubmissionStatus::Success);
                self.view.reset_fields();
                self.view.clear_errors();
                self.view.hide_status_after(STATUS_HIDE_DELAY_MS);
                SubmitOutcome::Sent
            }
            Err(err) => {
                log::error!("Email relay error: {err}");
                self.finish(STATUS_FAILED, StatusKind::Error, SubmissionStatus::Error);
                SubmitOutcome::Failed(err)
            }
        }
    }

    /// A field lost focus: validate it alone.
    pub fn on_blur(&self, field: Field) {
        let value = self.view.field_value(field);
        match validate_field(field, &value) {
            Some(message) => self.view.set_field_error(field, message),
            None => self.view.clear_field_error(field),
        }
    }

    /// A field was edited: drop its error without re-validating.
    pub fn on_input(&self, field: Field) {
        self.view.clear_field_error(field);
    }

    fn finish(&self, message: &str, kind: StatusKind, status: SubmissionStatus) {
        self.view.show_status(message, kind);
        self.status.set(status);
    }
}

/// Holds the submit control disabled for its lifetime.
struct SubmitGuard<'a, V: FormView> {
    view: &'a V,
    status: &'a Cell<SubmissionStatus>,
}

impl<'a, V: FormView> SubmitGuard<'a, V> {
    fn engage(view: &'a V, status: &'a Cell<SubmissionStatus>) -> Self {
        view.set_submitting(true);
        status.set(SubmissionStatus::Sending);
        Self { view, status }
    }
}

impl<V: FormView> Drop for SubmitGuard<'_, V> {
    fn drop(&mut self) {
        self.view.set_submitting(false);
        if self.status.get() == SubmissionStatus::Sending {
            self.status.set(SubmissionStatus::Idle);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_classes() {
        assert_eq!(StatusKind::Success.as_class(), "success");
        assert_eq!(StatusKind::Error.as_class(), "error");
        assert_eq!(SubmissionStatus::default(), SubmissionStatus::Idle);
    }
}
