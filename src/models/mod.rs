//! Data models for agenda contacts.
//!
//! This module contains the persisted contact record, the editable draft used
//! by forms, and the request payloads sent to the backend.

pub mod contact;

pub use contact::{Contact, ContactDraft, CreateContactRequest, UpdateContactRequest};
