//! HTTP client for the contacts REST backend.
//!
//! This module provides a synchronous HTTP client that can be used from async contexts
//! via `tokio::task::spawn_blocking`. The backend exposes a single JSON collection
//! resource; the client's base URL points at that collection.

mod async_wrapper;
pub use async_wrapper::{AsyncAgendaClient, AsyncAgendaClientImpl};

use crate::config::Config;
use crate::domain::ContactId;
use crate::error::{ApiError, ApiResult};
use crate::metrics::{Metrics, Operation, RequestTimer};
use crate::models::{Contact, ContactDraft, CreateContactRequest, UpdateContactRequest};
use serde::de::DeserializeOwned;
use std::sync::Arc;
use std::time::Duration;

/// HTTP client for the contacts collection.
///
/// This client uses `ureq` for synchronous HTTP requests and can be called
/// from async contexts using `tokio::task::spawn_blocking`.
#[derive(Clone)]
pub struct AgendaClient {
    /// URL of the contacts collection
    base_url: String,

    /// HTTP client agent
    agent: Arc<ureq::Agent>,

    /// Metrics collector
    metrics: Metrics,
}

impl AgendaClient {
    /// Create a new AgendaClient from configuration.
    pub fn new(config: &Config) -> Self {
        Self::build(
            config.api_base_url.clone(),
            Duration::from_secs(config.request_timeout),
        )
    }

    /// Create an AgendaClient with a custom base URL (useful for testing).
    #[doc(hidden)]
    pub fn with_base_url(base_url: String) -> Self {
        Self::build(base_url, Duration::from_secs(10))
    }

    fn build(base_url: String, timeout: Duration) -> Self {
        let agent = ureq::AgentBuilder::new().timeout(timeout).build();

        Self {
            base_url,
            agent: Arc::new(agent),
            metrics: Metrics::new(),
        }
    }

    /// Get a reference to the metrics collector.
    pub fn metrics(&self) -> &Metrics {
        &self.metrics
    }

    fn collection_url(&self) -> String {
        self.base_url.trim_end_matches('/').to_string()
    }

    fn item_url(&self, id: &ContactId) -> String {
        format!(
            "{}/{}",
            self.collection_url(),
            urlencoding::encode(id.as_str())
        )
    }

    /// Send a request, timing it and mapping failures.
    fn send(
        &self,
        op: Operation,
        request: ureq::Request,
        body: Option<serde_json::Value>,
    ) -> ApiResult<ureq::Response> {
        let timer = RequestTimer::start(&self.metrics, op);
        tracing::debug!("{} {}", request.method(), request.url());

        let request = request.set("Accept", "application/json");
        let result = match body {
            Some(body) => request.send_json(body),
            None => request.call(),
        }
        .map_err(|e| self.map_error(e));

        timer.finish(result.is_err());
        if let Err(e) = &result {
            tracing::error!("{} request failed: {}", op, e);
        }
        result
    }

    fn read_json<T: DeserializeOwned>(response: ureq::Response) -> ApiResult<T> {
        let body = response
            .into_string()
            .map_err(|e| ApiError::HttpError(e.to_string()))?;
        serde_json::from_str(&body).map_err(ApiError::JsonError)
    }

    /// Map a ureq error to an ApiError.
    fn map_error(&self, error: ureq::Error) -> ApiError {
        match error {
            ureq::Error::Status(code, response) => {
                let message = response
                    .into_string()
                    .unwrap_or_else(|_| "Unknown error".to_string());

                match code {
                    404 => ApiError::NotFound(message),
                    _ => ApiError::ApiError {
                        status: code,
                        message,
                    },
                }
            }
            ureq::Error::Transport(transport) => {
                if transport.kind() == ureq::ErrorKind::ConnectionFailed {
                    ApiError::HttpError("Connection failed".to_string())
                } else if transport.kind() == ureq::ErrorKind::Io {
                    ApiError::Timeout
                } else {
                    ApiError::HttpError(transport.to_string())
                }
            }
        }
    }

    /// Fetch the whole contact collection.
    pub fn list_contacts(&self) -> ApiResult<Vec<Contact>> {
        let request = self.agent.get(&self.collection_url());
        let response = self.send(Operation::List, request, None)?;
        let contacts: Vec<Contact> = Self::read_json(response)?;

        self.metrics.record_contacts_fetched(contacts.len());
        Ok(contacts)
    }

    /// Create a contact; the backend assigns its id.
    pub fn create_contact(&self, draft: &ContactDraft) -> ApiResult<Contact> {
        let body = serde_json::to_value(CreateContactRequest::from(draft))?;
        let request = self
            .agent
            .post(&self.collection_url())
            .set("Content-Type", "application/json");

        let response = self.send(Operation::Create, request, Some(body))?;
        let contact: Contact = Self::read_json(response)?;
        tracing::info!("Contact created with id {}", contact.id);
        Ok(contact)
    }

    /// Replace the contact `id` with the fields of `draft`.
    pub fn update_contact(&self, id: &ContactId, draft: &ContactDraft) -> ApiResult<Contact> {
        let body = serde_json::to_value(UpdateContactRequest::new(id, draft))?;
        let request = self
            .agent
            .put(&self.item_url(id))
            .set("Content-Type", "application/json");

        let response = self.send(Operation::Update, request, Some(body))?;
        Self::read_json(response)
    }

    /// Delete the contact `id`.
    pub fn delete_contact(&self, id: &ContactId) -> ApiResult<()> {
        let request = self.agent.delete(&self.item_url(id));
        self.send(Operation::Delete, request, None)?;
        Ok(())
    }
}
