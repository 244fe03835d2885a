//! Async wrapper around the synchronous AgendaClient.
//!
//! This module provides an async interface to the synchronous AgendaClient by using
//! `tokio::task::spawn_blocking` to run HTTP operations on a dedicated thread pool,
//! preventing blocking of the async runtime.

use crate::client::AgendaClient;
use crate::domain::ContactId;
use crate::error::{ApiError, ApiResult};
use crate::models::{Contact, ContactDraft};
use async_trait::async_trait;
use std::sync::Arc;

/// Async versions of the four contact storage calls.
#[async_trait]
pub trait AsyncAgendaClient: Send + Sync {
    async fn list_contacts(&self) -> ApiResult<Vec<Contact>>;
    async fn create_contact(&self, draft: &ContactDraft) -> ApiResult<Contact>;
    async fn update_contact(&self, id: &ContactId, draft: &ContactDraft) -> ApiResult<Contact>;
    async fn delete_contact(&self, id: &ContactId) -> ApiResult<()>;
}

/// Runs [`AgendaClient`] calls on tokio's blocking pool.
#[derive(Clone)]
pub struct AsyncAgendaClientImpl {
    client: Arc<AgendaClient>,
}

impl AsyncAgendaClientImpl {
    pub fn new(client: AgendaClient) -> Self {
        Self {
            client: Arc::new(client),
        }
    }
}

fn join_error(e: tokio::task::JoinError) -> ApiError {
    ApiError::HttpError(format!("Task join error: {}", e))
}

#[async_trait]
impl AsyncAgendaClient for AsyncAgendaClientImpl {
    async fn list_contacts(&self) -> ApiResult<Vec<Contact>> {
        let client = self.client.clone();

        tokio::task::spawn_blocking(move || client.list_contacts())
            .await
            .map_err(join_error)?
    }

    async fn create_contact(&self, draft: &ContactDraft) -> ApiResult<Contact> {
        let client = self.client.clone();
        let draft = draft.clone();

        tokio::task::spawn_blocking(move || client.create_contact(&draft))
            .await
            .map_err(join_error)?
    }

    async fn update_contact(&self, id: &ContactId, draft: &ContactDraft) -> ApiResult<Contact> {
        let client = self.client.clone();
        let id = id.clone();
        let draft = draft.clone();

        tokio::task::spawn_blocking(move || client.update_contact(&id, &draft))
            .await
            .map_err(join_error)?
    }

    async fn delete_contact(&self, id: &ContactId) -> ApiResult<()> {
        let client = self.client.clone();
        let id = id.clone();

        tokio::task::spawn_blocking(move || client.delete_contact(&id))
            .await
            .map_err(join_error)?
    }
}
