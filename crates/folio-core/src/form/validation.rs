use nom::{
    bytes::complete::take_till1,
    character::complete::char,
    combinator::{all_consuming, verify},
    sequence::separated_pair,
    IResult,
};

use crate::relay::TemplateParams;

/// Minimum trimmed message length, in characters.
pub const MESSAGE_MIN_CHARS: usize = 10;

/// Error for an empty name.
pub const NAME_REQUIRED: &str = "Name is required";
/// Error for an empty email.
pub const EMAIL_REQUIRED: &str = "Email is required";
/// Error for an email that is not `local@domain.tld` shaped.
pub const EMAIL_INVALID: &str = "Please enter a valid email address";
/// Error for an empty message.
pub const MESSAGE_REQUIRED: &str = "Message is required";
/// Error for a message under [`MESSAGE_MIN_CHARS`].
pub const MESSAGE_TOO_SHORT: &str = "Message must be at least 10 characters long";

/// A contact form field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    /// Sender name.
    Name,
    /// Sender email.
    Email,
    /// Message body.
    Message,
}

impl Field {
    /// All fields in display order.
    pub const ALL: [Field; 3] = [Field::Name, Field::Email, Field::Message];

    /// Element id of the input.
    pub fn id(self) -> &'static str {
        match self {
            Field::Name => "name",
            Field::Email => "email",
            Field::Message => "message",
        }
    }

    /// Element id of the inline error text.
    pub fn error_id(self) -> &'static str {
        match self {
            Field::Name => "name-error",
            Field::Email => "email-error",
            Field::Message => "message-error",
        }
    }

    /// Field for an input element id.
    pub fn from_id(id: &str) -> Option<Field> {
        Field::ALL.into_iter().find(|field| field.id() == id)
    }

    fn index(self) -> usize {
        match self {
            Field::Name => 0,
            Field::Email => 1,
            Field::Message => 2,
        }
    }
}

/// Raw values captured from the three inputs.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormValues {
    /// Name input.
    pub name: String,
    /// Email input.
    pub email: String,
    /// Message textarea.
    pub message: String,
}

impl FormValues {
    /// Values from raw input text.
    pub fn new(
        name: impl Into<String>,
        email: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
            message: message.into(),
        }
    }

    /// Raw value of `field`.
    pub fn get(&self, field: Field) -> &str {
        match field {
            Field::Name => &self.name,
            Field::Email => &self.email,
            Field::Message => &self.message,
        }
    }

    /// Trimmed values as relay template variables.
    pub fn to_template_params(&self) -> TemplateParams {
        TemplateParams {
            from_name: self.name.trim().to_string(),
            from_email: self.email.trim().to_string(),
            message: self.message.trim().to_string(),
        }
    }
}

/// Per-field outcome of one validation pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationReport {
    errors: [Option<&'static str>; 3],
}

impl ValidationReport {
    /// Whether every field passed.
    pub fn is_valid(&self) -> bool {
        self.errors.iter().all(Option::is_none)
    }

    /// Error message for `field`, if it failed.
    pub fn error(&self, field: Field) -> Option<&'static str> {
        self.errors[field.index()]
    }

    /// Failed fields with their messages, in display order.
    pub fn errors(&self) -> impl Iterator<Item = (Field, &'static str)> + '_ {
        Field::ALL
            .into_iter()
            .filter_map(|field| self.error(field).map(|message| (field, message)))
    }
}

/// Validate every field; never stops at the first failure.
pub fn validate(values: &FormValues) -> ValidationReport {
    let mut report = ValidationReport::default();
    for field in Field::ALL {
        report.errors[field.index()] = validate_field(field, values.get(field));
    }
    report
}

/// Validate one raw field value.
pub fn validate_field(field: Field, raw: &str) -> Option<&'static str> {
    let value = raw.trim();
    match field {
        Field::Name if value.is_empty() => Some(NAME_REQUIRED),
        Field::Email if value.is_empty() => Some(EMAIL_REQUIRED),
        Field::Email if !is_email(value) => Some(EMAIL_INVALID),
        Field::Message if value.is_empty() => Some(MESSAGE_REQUIRED),
        Field::Message if value.chars().count() < MESSAGE_MIN_CHARS => Some(MESSAGE_TOO_SHORT),
        _ => None,
    }
}

/// Whether `input` looks like `local@domain.tld`.
///
/// Neither part may contain whitespace or `@`, and the domain needs a dot
/// with at least one character on each side.
pub fn is_email(input: &str) -> bool {
    all_consuming(email)(input).is_ok()
}

fn email_part(input: &str) -> IResult<&str, &str> {
    take_till1(|c: char| c == '@' || c.is_whitespace())(input)
}

fn email(input: &str) -> IResult<&str, (&str, &str)> {
    separated_pair(email_part, char('@'), verify(email_part, has_inner_dot))(input)
}

fn has_inner_dot(domain: &str) -> bool {
    let last = domain.len() - 1;
    domain
        .char_indices()
        .any(|(index, c)| c == '.' && index > 0 && index < last)
}
