//! Field validation for contact drafts.
//!
//! Every field is checked on each call so the form can show all problems at
//! once. Only `name`, `phone` and `email` are validated; `company` and `tag`
//! are always accepted.

use crate::models::ContactDraft;
use once_cell::sync::Lazy;
use regex::Regex;
use std::fmt;

static NON_DIGIT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[^0-9]").expect("Failed to compile non-digit regex"));

/// Required length of a phone number, in characters.
pub const PHONE_LENGTH: usize = 10;

/// A validated form field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    Name,
    Phone,
    Email,
}

impl Field {
    pub const ALL: [Field; 3] = [Field::Name, Field::Phone, Field::Email];

    pub fn label(self) -> &'static str {
        match self {
            Field::Name => "Name",
            Field::Phone => "Phone",
            Field::Email => "Email",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// The reason a single field was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldError {
    /// Empty after trimming whitespace.
    Required,
    /// Phone is not exactly [`PHONE_LENGTH`] characters long.
    WrongLength,
    /// Phone contains something other than `0-9`.
    NonDigit,
    /// Email has no `@`.
    MissingAt,
}

impl FieldError {
    /// Human-readable message for this error on the given field.
    pub fn message(self, field: Field) -> String {
        match self {
            FieldError::Required => format!("{} is required.", field.label()),
            FieldError::WrongLength => {
                format!("{} must be exactly {} digits.", field.label(), PHONE_LENGTH)
            }
            FieldError::NonDigit => format!("{} may only contain digits.", field.label()),
            FieldError::MissingAt => format!("{} must contain @.", field.label()),
        }
    }
}

/// Per-field validation outcome for a draft.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldErrors {
    name: Option<FieldError>,
    phone: Option<FieldError>,
    email: Option<FieldError>,
}

impl FieldErrors {
    pub fn get(&self, field: Field) -> Option<FieldError> {
        match field {
            Field::Name => self.name,
            Field::Phone => self.phone,
            Field::Email => self.email,
        }
    }

    /// Message for `field`, if it failed.
    pub fn message(&self, field: Field) -> Option<String> {
        self.get(field).map(|err| err.message(field))
    }

    pub fn is_valid(&self) -> bool {
        self.len() == 0
    }

    /// Number of fields with an error.
    pub fn len(&self) -> usize {
        self.iter().count()
    }

    pub fn is_empty(&self) -> bool {
        self.is_valid()
    }

    /// Failed fields in form order (name, phone, email).
    pub fn iter(&self) -> impl Iterator<Item = (Field, FieldError)> + '_ {
        Field::ALL
            .into_iter()
            .filter_map(move |field| self.get(field).map(|err| (field, err)))
    }
}

/// Validate a draft. Pure and deterministic.
pub fn validate(draft: &ContactDraft) -> FieldErrors {
    FieldErrors {
        name: validate_name(&draft.name),
        phone: validate_phone(&draft.phone),
        email: validate_email(&draft.email),
    }
}

fn validate_name(name: &str) -> Option<FieldError> {
    if name.trim().is_empty() {
        return Some(FieldError::Required);
    }
    None
}

/// Checks run in priority order; only the first failure is reported.
/// Length is measured on the raw input, not the trimmed one.
fn validate_phone(phone: &str) -> Option<FieldError> {
    if phone.trim().is_empty() {
        Some(FieldError::Required)
    } else if phone.chars().count() != PHONE_LENGTH {
        Some(FieldError::WrongLength)
    } else if NON_DIGIT.is_match(phone) {
        Some(FieldError::NonDigit)
    } else {
        None
    }
}

fn validate_email(email: &str) -> Option<FieldError> {
    if email.trim().is_empty() {
        Some(FieldError::Required)
    } else if !email.contains('@') {
        Some(FieldError::MissingAt)
    } else {
        None
    }
}
