//! Contact form model: field values, validation, and submission status.
//!
//! Submission is simulated: the app runtime waits [`SUBMIT_LATENCY`], reports
//! success, and the status falls back to idle after [`STATUS_RESET`].

use std::collections::BTreeMap;
use std::sync::LazyLock;
use std::time::Duration;

use regex::Regex;
use thiserror::Error;

pub const SUBMIT_LATENCY: Duration = Duration::from_millis(1500);
pub const STATUS_RESET: Duration = Duration::from_secs(5);
pub const MIN_MESSAGE_LEN: usize = 10;

static EMAIL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\S+@\S+\.\S+$").expect("email regex should compile"));

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Field {
    Name,
    Email,
    Subject,
    Message,
}

impl Field {
    pub const ALL: &[Field] = &[Field::Name, Field::Email, Field::Subject, Field::Message];

    pub fn label(self) -> &'static str {
        match self {
            Field::Name => "Name",
            Field::Email => "Email",
            Field::Subject => "Subject",
            Field::Message => "Message",
        }
    }

    pub fn placeholder(self) -> &'static str {
        match self {
            Field::Name => "Your name",
            Field::Email => "Your email",
            Field::Subject => "Subject of your message",
            Field::Message => "Your message",
        }
    }

    pub fn is_multiline(self) -> bool {
        self == Field::Message
    }
}

/// Validation failure for a single field.  The message is user-facing.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum FieldError {
    #[error("Name is required")]
    NameRequired,
    #[error("Email is required")]
    EmailRequired,
    #[error("Invalid email format")]
    InvalidEmail,
    #[error("Subject is required")]
    SubjectRequired,
    #[error("Message is required")]
    MessageRequired,
    #[error("Message is too short")]
    MessageTooShort,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SubmitStatus {
    #[default]
    Idle,
    Submitting,
    Success,
    Error,
}

/// Values and outstanding errors of the contact form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContactForm {
    pub name: String,
    pub email: String,
    pub subject: String,
    pub message: String,
    errors: BTreeMap<Field, FieldError>,
}

impl ContactForm {
    pub fn value(&self, field: Field) -> &str {
        match field {
            Field::Name => &self.name,
            Field::Email => &self.email,
            Field::Subject => &self.subject,
            Field::Message => &self.message,
        }
    }

    fn value_mut(&mut self, field: Field) -> &mut String {
        match field {
            Field::Name => &mut self.name,
            Field::Email => &mut self.email,
            Field::Subject => &mut self.subject,
            Field::Message => &mut self.message,
        }
    }

    /// Editing a field clears its error.
    pub fn push_char(&mut self, field: Field, c: char) {
        self.value_mut(field).push(c);
        self.errors.remove(&field);
    }

    pub fn backspace(&mut self, field: Field) {
        self.value_mut(field).pop();
        self.errors.remove(&field);
    }

    pub fn set(&mut self, field: Field, value: &str) {
        *self.value_mut(field) = value.to_string();
        self.errors.remove(&field);
    }

    pub fn error(&self, field: Field) -> Option<FieldError> {
        self.errors.get(&field).copied()
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    /// Check every field, replacing the previous error set.  Returns `true`
    /// when the form can be submitted.
    pub fn validate(&mut self) -> bool {
        self.errors = Field::ALL
            .iter()
            .filter_map(|&field| check_field(field, self.value(field)).err().map(|e| (field, e)))
            .collect();
        self.errors.is_empty()
    }

    /// Empty every field (after a successful submission).
    pub fn clear(&mut self) {
        *self = Self::default();
    }
}

fn check_field(field: Field, value: &str) -> Result<(), FieldError> {
    let trimmed = value.trim();
    match field {
        Field::Name if trimmed.is_empty() => Err(FieldError::NameRequired),
        Field::Email if trimmed.is_empty() => Err(FieldError::EmailRequired),
        Field::Email if !EMAIL_RE.is_match(value) => Err(FieldError::InvalidEmail),
        Field::Subject if trimmed.is_empty() => Err(FieldError::SubjectRequired),
        Field::Message if trimmed.is_empty() => Err(FieldError::MessageRequired),
        Field::Message if trimmed.chars().count() < MIN_MESSAGE_LEN => {
            Err(FieldError::MessageTooShort)
        }
        _ => Ok(()),
    }
}
