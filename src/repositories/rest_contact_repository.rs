use crate::client::AsyncAgendaClient;
use crate::domain::ContactId;
use crate::error::ApiResult;
use crate::models::{Contact, ContactDraft};
use crate::repositories::traits::ContactRepository;
use async_trait::async_trait;
use std::sync::Arc;

/// Contact repository backed by the REST collection.
///
/// Delegates every operation to the [`AsyncAgendaClient`].
pub struct RestContactRepository {
    client: Arc<dyn AsyncAgendaClient>,
}

impl RestContactRepository {
    pub fn new(client: Arc<dyn AsyncAgendaClient>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl ContactRepository for RestContactRepository {
    async fn list(&self) -> ApiResult<Vec<Contact>> {
        self.client.list_contacts().await
    }

    async fn create(&self, draft: &ContactDraft) -> ApiResult<Contact> {
        self.client.create_contact(draft).await
    }

    async fn update(&self, id: &ContactId, draft: &ContactDraft) -> ApiResult<Contact> {
        self.client.update_contact(id, draft).await
    }

    async fn delete(&self, id: &ContactId) -> ApiResult<()> {
        self.client.delete_contact(id).await
    }
}
