use std::cell::{Cell, RefCell};
use std::collections::HashMap;

use folio_core::form::{
    Field, STATUS_FAILED, STATUS_FIX_ERRORS, STATUS_HIDE_DELAY_MS, STATUS_NOT_CONFIGURED,
    STATUS_SENDING, STATUS_SENT,
};
use folio_core::{
    ContactForm, EmailRelay, FormView, RelayConfig, RelayError, RelayResponse, StatusKind,
    SubmissionStatus, SubmitOutcome, TemplateParams,
};
use futures::executor::block_on;
use futures::FutureExt;

#[derive(Default)]
struct FakeView {
    values: RefCell<HashMap<Field, String>>,
    errors: RefCell<HashMap<Field, String>>,
    status: RefCell<Option<(String, StatusKind)>>,
    status_history: RefCell<Vec<String>>,
    hide_after: Cell<Option<u32>>,
    submitting: Cell<bool>,
    submitting_seen: Cell<bool>,
}

impl FakeView {
    fn filled(name: &str, email: &str, message: &str) -> Self {
        let view = FakeView::default();
        view.type_into(Field::Name, name);
        view.type_into(Field::Email, email);
        view.type_into(Field::Message, message);
        view
    }

    fn type_into(&self, field: Field, text: &str) {
        self.values.borrow_mut().insert(field, text.to_string());
    }

    fn error(&self, field: Field) -> String {
        self.errors.borrow().get(&field).cloned().unwrap_or_default()
    }

    fn status(&self) -> Option<(String, StatusKind)> {
        self.status.borrow().clone()
    }
}

impl FormView for FakeView {
    fn field_value(&self, field: Field) -> String {
        self.values.borrow().get(&field).cloned().unwrap_or_default()
    }

    fn set_field_error(&self, field: Field, message: &str) {
        self.errors.borrow_mut().insert(field, message.to_string());
    }

    fn show_status(&self, message: &str, kind: StatusKind) {
        self.status_history.borrow_mut().push(message.to_string());
        *self.status.borrow_mut() = Some((message.to_string(), kind));
    }

    fn hide_status(&self) {
        *self.status.borrow_mut() = None;
    }

    fn hide_status_after(&self, delay_ms: u32) {
        self.hide_after.set(Some(delay_ms));
    }

    fn set_submitting(&self, submitting: bool) {
        if submitting {
            self.submitting_seen.set(true);
        }
        self.submitting.set(submitting);
    }

    fn reset_fields(&self) {
        self.values.borrow_mut().clear();
    }
}

enum Script {
    Status(u16),
    Fail,
    Hang,
}

struct FakeRelay {
    script: Script,
    calls: Cell<usize>,
    sent: RefCell<Vec<TemplateParams>>,
}

impl FakeRelay {
    fn new(script: Script) -> Self {
        Self {
            script,
            calls: Cell::new(0),
            sent: RefCell::new(Vec::new()),
        }
    }
}

impl EmailRelay for FakeRelay {
    fn init(&self, _public_key: &str) -> Result<(), RelayError> {
        Ok(())
    }

    async fn send_form(
        &self,
        _config: &RelayConfig,
        params: &TemplateParams,
    ) -> Result<RelayResponse, RelayError> {
        self.calls.set(self.calls.get() + 1);
        self.sent.borrow_mut().push(params.clone());
        match self.script {
            Script::Status(status) => Ok(RelayResponse {
                status,
                text: "scripted".to_string(),
            }),
            Script::Fail => Err(RelayError::Transport("network down".to_string())),
            Script::Hang => std::future::pending().await,
        }
    }
}

fn configured() -> RelayConfig {
    RelayConfig::new("service_abc", "template_def", "public_ghi")
}

fn valid_view() -> FakeView {
    FakeView::filled("Ann", "ann@example.com", "This is long enough.")
}

#[test]
fn invalid_form_shows_every_error_and_never_calls_relay() {
    let form = ContactForm::new(
        FakeView::filled("", "a@b", "short"),
        FakeRelay::new(Script::Status(200)),
        configured(),
    );

    let outcome = block_on(form.submit());

    assert_eq!(outcome, SubmitOutcome::Invalid);
    assert_eq!(form.view().error(Field::Name), "Name is required");
    assert_eq!(form.view().error(Field::Email), "Please enter a valid email address");
    assert_eq!(
        form.view().error(Field::Message),
        "Message must be at least 10 characters long"
    );
    assert_eq!(
        form.view().status(),
        Some((STATUS_FIX_ERRORS.to_string(), StatusKind::Error))
    );
    assert_eq!(form.relay().calls.get(), 0);
    assert!(!form.view().submitting_seen.get());
}

#[test]
fn placeholder_credentials_block_sending() {
    let form = ContactForm::new(
        valid_view(),
        FakeRelay::new(Script::Status(200)),
        RelayConfig::default(),
    );

    let outcome = block_on(form.submit());

    assert_eq!(outcome, SubmitOutcome::NotConfigured);
    assert_eq!(form.relay().calls.get(), 0);
    assert_eq!(
        form.view().status(),
        Some((STATUS_NOT_CONFIGURED.to_string(), StatusKind::Error))
    );
    assert_eq!(form.status(), SubmissionStatus::Error);
    assert!(!form.view().submitting.get());
}

#[test]
fn delivered_message_clears_form_and_schedules_hide() {
    let form = ContactForm::new(valid_view(), FakeRelay::new(Script::Status(200)), configured());

    let outcome = block_on(form.submit());

    assert_eq!(outcome, SubmitOutcome::Sent);
    assert_eq!(form.status(), SubmissionStatus::Success);
    assert_eq!(
        form.view().status(),
        Some((STATUS_SENT.to_string(), StatusKind::Success))
    );
    assert_eq!(
        *form.view().status_history.borrow(),
        vec![STATUS_SENDING.to_string(), STATUS_SENT.to_string()]
    );
    assert_eq!(form.view().field_value(Field::Name), "");
    assert_eq!(form.view().field_value(Field::Message), "");
    assert_eq!(form.view().error(Field::Email), "");
    assert_eq!(form.view().hide_after.get(), Some(STATUS_HIDE_DELAY_MS));
    assert!(form.view().submitting_seen.get());
    assert!(!form.view().submitting.get());

    let sent = form.relay().sent.borrow();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].from_email, "ann@example.com");
}

#[test]
fn rejected_message_keeps_form_and_reenables_submit() {
    let form = ContactForm::new(valid_view(), FakeRelay::new(Script::Status(500)), configured());

    let outcome = block_on(form.submit());

    assert!(matches!(
        outcome,
        SubmitOutcome::Failed(RelayError::Rejected { status: 500, .. })
    ));
    assert_eq!(
        form.view().status(),
        Some((STATUS_FAILED.to_string(), StatusKind::Error))
    );
    assert_eq!(form.view().field_value(Field::Name), "Ann");
    assert_eq!(form.view().hide_after.get(), None);
    assert!(form.view().submitting_seen.get());
    assert!(!form.view().submitting.get());
    assert_eq!(form.status(), SubmissionStatus::Error);
}

#[test]
fn failing_relay_call_still_reenables_submit() {
    let form = ContactForm::new(valid_view(), FakeRelay::new(Script::Fail), configured());

    let outcome = block_on(form.submit());

    assert_eq!(
        outcome,
        SubmitOutcome::Failed(RelayError::Transport("network down".to_string()))
    );
    assert_eq!(form.view().field_value(Field::Message), "This is long enough.");
    assert!(!form.view().submitting.get());
}

#[test]
fn second_submit_while_sending_is_ignored() {
    let form = ContactForm::new(valid_view(), FakeRelay::new(Script::Hang), configured());

    let mut first = Box::pin(form.submit());
    assert!((&mut first).now_or_never().is_none());
    assert_eq!(form.status(), SubmissionStatus::Sending);
    assert!(form.view().submitting.get());

    assert_eq!(block_on(form.submit()), SubmitOutcome::Busy);
    assert_eq!(form.relay().calls.get(), 1);

    drop(first);
    assert!(!form.view().submitting.get());
    assert_eq!(form.status(), SubmissionStatus::Idle);
}

#[test]
fn blur_validates_one_field_and_input_clears_it() {
    let form = ContactForm::new(
        FakeView::filled("Ann", "not-an-email", ""),
        FakeRelay::new(Script::Status(200)),
        configured(),
    );

    form.on_blur(Field::Email);
    assert_eq!(form.view().error(Field::Email), "Please enter a valid email address");
    assert_eq!(form.view().error(Field::Message), "");

    form.on_blur(Field::Message);
    assert_eq!(form.view().error(Field::Message), "Message is required");

    form.on_input(Field::Email);
    assert_eq!(form.view().error(Field::Email), "");
    assert_eq!(form.view().error(Field::Message), "Message is required");

    form.view().type_into(Field::Message, "Now this is a proper message");
    form.on_blur(Field::Message);
    assert_eq!(form.view().error(Field::Message), "");
}
