//! Contact form validation and submission.
//!
//! [`validate`] is pure: it checks every field and reports all problems at
//! once. [`ContactForm`] runs the submission protocol against a [`FormView`]
//! (the DOM in production) and an [`EmailRelay`](crate::relay::EmailRelay).

mod controller;
mod validation;

pub use controller::{
    ContactForm, FormView, StatusKind, SubmissionStatus, SubmitOutcome, STATUS_FAILED,
    STATUS_FIX_ERRORS, STATUS_HIDE_DELAY_MS, STATUS_NOT_CONFIGURED, STATUS_SENDING, STATUS_SENT,
};
pub use validation::{
    is_email, validate, validate_field, Field, FormValues, ValidationReport, EMAIL_INVALID,
    EMAIL_REQUIRED, MESSAGE_MIN_CHARS, MESSAGE_REQUIRED, MESSAGE_TOO_SHORT, NAME_REQUIRED,
};
