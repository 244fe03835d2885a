use async_trait::async_trait;
use contact_agenda::domain::ContactId;
use contact_agenda::error::{ApiError, ApiResult};
use contact_agenda::models::{Contact, ContactDraft};
use contact_agenda::repositories::ContactRepository;
use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// Mock contact repository for testing.
///
/// Keeps contacts in insertion order, hands out sequential ids, tracks method
/// calls and can be told to fail or stall specific operations.
#[allow(dead_code)]
#[derive(Clone, Default)]
pub struct MockContactRepository {
    contacts: Arc<Mutex<Vec<Contact>>>,
    next_id: Arc<Mutex<u64>>,
    call_counts: Arc<Mutex<HashMap<String, usize>>>,
    failing: Arc<Mutex<HashSet<String>>>,
    latency: Arc<Mutex<Option<Duration>>>,
}

#[allow(dead_code)]
impl MockContactRepository {
    /// Create a new empty MockContactRepository.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a contact directly, bypassing call tracking.
    pub fn add_contact(&self, contact: Contact) {
        self.contacts.lock().unwrap().push(contact);
    }

    /// Seed contacts with ids "1".."n" named after `names`.
    pub fn with_names(names: &[&str]) -> Self {
        let repo = Self::new();
        for name in names {
            let draft = ContactDraft::new(*name, "3001234567", format!("{}@x.co", name));
            let id = repo.allocate_id();
            repo.add_contact(Contact::from_draft(id, &draft));
        }
        repo
    }

    /// Make every call of `method` fail with a 500.
    pub fn fail_on(&self, method: &str) {
        self.failing.lock().unwrap().insert(method.to_string());
    }

    /// Stop failing any method.
    pub fn clear_failures(&self) {
        self.failing.lock().unwrap().clear();
    }

    /// Delay every call by `latency` (tokio time).
    pub fn set_latency(&self, latency: Duration) {
        *self.latency.lock().unwrap() = Some(latency);
    }

    /// Get the number of times a method was called.
    pub fn get_call_count(&self, method: &str) -> usize {
        let counts = self.call_counts.lock().unwrap();
        *counts.get(method).unwrap_or(&0)
    }

    /// Current stored contacts.
    pub fn stored(&self) -> Vec<Contact> {
        self.contacts.lock().unwrap().clone()
    }

    fn allocate_id(&self) -> ContactId {
        let mut next = self.next_id.lock().unwrap();
        *next += 1;
        ContactId::new(next.to_string()).unwrap()
    }

    async fn enter(&self, method: &str) -> ApiResult<()> {
        *self
            .call_counts
            .lock()
            .unwrap()
            .entry(method.to_string())
            .or_insert(0) += 1;

        let latency = *self.latency.lock().unwrap();
        if let Some(latency) = latency {
            tokio::time::sleep(latency).await;
        }

        if self.failing.lock().unwrap().contains(method) {
            return Err(ApiError::ApiError {
                status: 500,
                message: format!("{} failed", method),
            });
        }
        Ok(())
    }
}

#[async_trait]
impl ContactRepository for MockContactRepository {
    async fn list(&self) -> ApiResult<Vec<Contact>> {
        self.enter("list").await?;
        Ok(self.stored())
    }

    async fn create(&self, draft: &ContactDraft) -> ApiResult<Contact> {
        self.enter("create").await?;

        let contact = Contact::from_draft(self.allocate_id(), draft);
        self.contacts.lock().unwrap().push(contact.clone());
        Ok(contact)
    }

    async fn update(&self, id: &ContactId, draft: &ContactDraft) -> ApiResult<Contact> {
        self.enter("update").await?;

        let mut contacts = self.contacts.lock().unwrap();
        let slot = contacts
            .iter_mut()
            .find(|c| &c.id == id)
            .ok_or_else(|| ApiError::NotFound(format!("Contact {} not found", id)))?;
        *slot = Contact::from_draft(id.clone(), draft);
        Ok(slot.clone())
    }

    async fn delete(&self, id: &ContactId) -> ApiResult<()> {
        self.enter("delete").await?;

        let mut contacts = self.contacts.lock().unwrap();
        let before = contacts.len();
        contacts.retain(|c| &c.id != id);
        if contacts.len() == before {
            return Err(ApiError::NotFound(format!("Contact {} not found", id)));
        }
        Ok(())
    }
}
