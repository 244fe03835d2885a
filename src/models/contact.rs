//! Contact model representing a person in the agenda.

use crate::domain::ContactId;
use serde::{Deserialize, Serialize};

/// A persisted contact as stored by the backend.
///
/// Field names on the wire follow the backend collection
/// (`nombre`, `telefono`, `correo`, `etiqueta`, `empresa`).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Contact {
    /// Identifier assigned by the backend
    pub id: ContactId,

    /// Full name
    #[serde(rename = "nombre", default)]
    pub name: String,

    /// Phone number, ten digits once validated
    #[serde(rename = "telefono", default)]
    pub phone: String,

    /// Email address
    #[serde(rename = "correo", default)]
    pub email: String,

    /// Free-form tag (e.g. "Trabajo")
    #[serde(rename = "etiqueta", default, skip_serializing_if = "is_blank")]
    pub tag: Option<String>,

    /// Company or organization
    #[serde(rename = "empresa", default, skip_serializing_if = "is_blank")]
    pub company: Option<String>,
}

impl Contact {
    /// Create a contact with the required fields and no tag or company.
    pub fn new(
        id: ContactId,
        name: impl Into<String>,
        phone: impl Into<String>,
        email: impl Into<String>,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            phone: phone.into(),
            email: email.into(),
            tag: None,
            company: None,
        }
    }

    /// Build a contact from a draft and the identifier the backend assigned.
    pub fn from_draft(id: ContactId, draft: &ContactDraft) -> Self {
        Self {
            id,
            name: draft.name.clone(),
            phone: draft.phone.clone(),
            email: draft.email.clone(),
            tag: non_empty(&draft.tag),
            company: non_empty(&draft.company),
        }
    }

    /// Tag as a string slice, empty when absent.
    pub fn tag(&self) -> &str {
        self.tag.as_deref().unwrap_or("")
    }

    /// Company as a string slice, empty when absent.
    pub fn company(&self) -> &str {
        self.company.as_deref().unwrap_or("")
    }
}

/// Editable form state for a contact that has not been validated yet.
///
/// All fields are plain text exactly as typed; validation happens in
/// [`crate::validation::validate`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContactDraft {
    pub name: String,
    pub phone: String,
    pub email: String,
    pub company: String,
    pub tag: String,
}

impl ContactDraft {
    pub fn new(
        name: impl Into<String>,
        phone: impl Into<String>,
        email: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            phone: phone.into(),
            email: email.into(),
            ..Default::default()
        }
    }

    pub fn with_company(mut self, company: impl Into<String>) -> Self {
        self.company = company.into();
        self
    }

    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tag = tag.into();
        self
    }
}

impl From<&Contact> for ContactDraft {
    fn from(contact: &Contact) -> Self {
        Self {
            name: contact.name.clone(),
            phone: contact.phone.clone(),
            email: contact.email.clone(),
            company: contact.company().to_string(),
            tag: contact.tag().to_string(),
        }
    }
}

/// Request body for creating a contact. The backend assigns the id.
#[derive(Debug, Clone, Serialize)]
pub struct CreateContactRequest<'a> {
    #[serde(rename = "nombre")]
    name: &'a str,
    #[serde(rename = "telefono")]
    phone: &'a str,
    #[serde(rename = "correo")]
    email: &'a str,
    #[serde(rename = "etiqueta", skip_serializing_if = "Option::is_none")]
    tag: Option<&'a str>,
    #[serde(rename = "empresa", skip_serializing_if = "Option::is_none")]
    company: Option<&'a str>,
}

impl<'a> From<&'a ContactDraft> for CreateContactRequest<'a> {
    fn from(draft: &'a ContactDraft) -> Self {
        Self {
            name: &draft.name,
            phone: &draft.phone,
            email: &draft.email,
            tag: non_empty_str(&draft.tag),
            company: non_empty_str(&draft.company),
        }
    }
}

/// Request body for a full-record replace of an existing contact.
#[derive(Debug, Clone, Serialize)]
pub struct UpdateContactRequest<'a> {
    id: &'a ContactId,
    #[serde(flatten)]
    fields: CreateContactRequest<'a>,
}

impl<'a> UpdateContactRequest<'a> {
    pub fn new(id: &'a ContactId, draft: &'a ContactDraft) -> Self {
        Self {
            id,
            fields: CreateContactRequest::from(draft),
        }
    }
}

/// Helper function for serde skip_serializing_if
fn is_blank(value: &Option<String>) -> bool {
    value.as_deref().map_or(true, str::is_empty)
}

fn non_empty(value: &str) -> Option<String> {
    non_empty_str(value).map(str::to_string)
}

fn non_empty_str(value: &str) -> Option<&str> {
    if value.is_empty() {
        None
    } else {
        Some(value)
    }
}
