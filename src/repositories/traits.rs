use crate::domain::ContactId;
use crate::error::ApiResult;
use crate::models::{Contact, ContactDraft};
use async_trait::async_trait;

/// Repository for managing contacts.
///
/// Abstracts the storage collaborator so the controller can run against the
/// REST backend or an in-memory double.
#[async_trait]
pub trait ContactRepository: Send + Sync {
    /// Retrieve the full collection.
    async fn list(&self) -> ApiResult<Vec<Contact>>;

    /// Persist a new contact; the store assigns its identifier.
    async fn create(&self, draft: &ContactDraft) -> ApiResult<Contact>;

    /// Replace an existing contact with the draft's fields.
    async fn update(&self, id: &ContactId, draft: &ContactDraft) -> ApiResult<Contact>;

    /// Delete a contact.
    async fn delete(&self, id: &ContactId) -> ApiResult<()>;
}
