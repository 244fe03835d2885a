//! Domain value objects.
//!
//! Type-safe wrappers for identifiers handed out by the contacts backend.

pub mod contact_id;
pub mod errors;

pub use contact_id::ContactId;
pub use errors::ValidationError;
