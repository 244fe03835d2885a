//! Agenda controller.
//!
//! Owns the shared [`AgendaState`] and is the only place storage calls are
//! made. Every call is awaited before the matching reducer action is applied,
//! so the in-memory collection always mirrors what the backend accepted.

use crate::config::Config;
use crate::domain::ContactId;
use crate::error::{AgendaError, SubmitError};
use crate::models::{Contact, ContactDraft};
use crate::repositories::ContactRepository;
use crate::services::{apply, BannerTimer};
use crate::state::{Action, AgendaState, BannerKind, ViewMode};
use crate::validation::validate;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;
use tracing::{debug, error, info, warn};

/// User-facing banner and page messages.
pub mod messages {
    pub const CREATED: &str = "Contact added successfully.";
    pub const UPDATED: &str = "Contact updated successfully.";
    pub const DELETED: &str = "Contact deleted successfully.";
    pub const LOAD_FAILED: &str =
        "Could not load contacts. Check that the server is running and try again.";
    pub const CREATE_FAILED: &str =
        "Could not save the contact. Check your connection or the server and try again.";
    pub const UPDATE_FAILED: &str = "Could not update the contact. Try again or check the server.";
    pub const DELETE_FAILED: &str = "Could not delete the contact. Try again or check the server.";
}

/// Marks a mutation as in flight; cleared on drop.
struct InFlight<'a>(&'a AtomicBool);

impl<'a> InFlight<'a> {
    fn acquire(flag: &'a AtomicBool) -> Option<Self> {
        flag.compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| Self(flag))
    }
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

/// Drives the agenda: loads, validates, mutates and tracks the view.
pub struct AgendaController {
    repo: Arc<dyn ContactRepository>,
    state: Arc<RwLock<AgendaState>>,
    banners: BannerTimer,
    in_flight: AtomicBool,
}

impl AgendaController {
    /// Create a controller using the page size and banner timeout from `config`.
    pub fn new(repo: Arc<dyn ContactRepository>, config: &Config) -> Self {
        Self::with_settings(repo, config.page_size, config.banner_timeout())
    }

    pub fn with_settings(
        repo: Arc<dyn ContactRepository>,
        page_size: usize,
        banner_timeout: Duration,
    ) -> Self {
        Self {
            repo,
            state: Arc::new(RwLock::new(AgendaState::new(page_size))),
            banners: BannerTimer::new(banner_timeout),
            in_flight: AtomicBool::new(false),
        }
    }

    /// Snapshot of the current state.
    pub async fn state(&self) -> AgendaState {
        self.state.read().await.clone()
    }

    /// Visible page of contacts, owned.
    pub async fn visible_contacts(&self) -> Vec<Contact> {
        self.state.read().await.view().to_owned_items()
    }

    /// Whether a create, update or delete is currently pending.
    pub fn is_busy(&self) -> bool {
        self.in_flight.load(Ordering::Acquire)
    }

    /// Fetch the full collection from the backend.
    ///
    /// On failure a persistent page-level error is set and the collection is
    /// left as it was.
    pub async fn load(&self) -> Result<(), AgendaError> {
        apply(&self.state, Action::LoadStarted).await;

        match self.repo.list().await {
            Ok(contacts) => {
                info!("Loaded {} contacts", contacts.len());
                apply(&self.state, Action::Loaded(contacts)).await;
                Ok(())
            }
            Err(e) => {
                error!("Failed to load contacts: {}", e);
                apply(&self.state, Action::LoadFailed(messages::LOAD_FAILED.to_string())).await;
                Err(e.into())
            }
        }
    }

    /// Validate and save the form.
    ///
    /// Creates a new contact, or replaces the one being edited. Invalid drafts
    /// never reach the backend. On a backend failure an error banner is shown
    /// and the error is returned so the caller can keep the user's input.
    pub async fn submit(&self, draft: &ContactDraft) -> Result<Contact, SubmitError> {
        let errors = validate(draft);
        if !errors.is_valid() {
            debug!("Draft rejected with {} field error(s)", errors.len());
            return Err(SubmitError::Invalid(errors));
        }

        let _guard = InFlight::acquire(&self.in_flight).ok_or_else(|| {
            warn!("Submit ignored: another change is in flight");
            SubmitError::Busy
        })?;

        let editing = self.state.read().await.editing.clone();
        match editing {
            Some(id) => self.update(&id, draft).await,
            None => self.create(draft).await,
        }
    }

    async fn create(&self, draft: &ContactDraft) -> Result<Contact, SubmitError> {
        match self.repo.create(draft).await {
            Ok(contact) => {
                info!("Created contact {}", contact.id);
                apply(&self.state, Action::Created(contact.clone())).await;
                self.show_banner(BannerKind::Success, messages::CREATED).await;
                Ok(contact)
            }
            Err(e) => {
                error!("Failed to create contact: {}", e);
                self.show_banner(BannerKind::Error, messages::CREATE_FAILED).await;
                Err(e.into())
            }
        }
    }

    async fn update(&self, id: &ContactId, draft: &ContactDraft) -> Result<Contact, SubmitError> {
        match self.repo.update(id, draft).await {
            Ok(contact) => {
                info!("Updated contact {}", contact.id);
                apply(&self.state, Action::Updated(contact.clone())).await;
                self.show_banner(BannerKind::Success, messages::UPDATED).await;
                Ok(contact)
            }
            Err(e) => {
                error!("Failed to update contact {}: {}", id, e);
                self.show_banner(BannerKind::Error, messages::UPDATE_FAILED).await;
                Err(e.into())
            }
        }
    }

    /// Delete a contact from the backend and then from the collection.
    ///
    /// On failure the collection is unchanged and an error banner is shown.
    pub async fn delete(&self, id: &ContactId) -> Result<(), AgendaError> {
        if self.state.read().await.find(id).is_none() {
            return Err(AgendaError::UnknownContact(id.clone()));
        }

        let _guard = InFlight::acquire(&self.in_flight).ok_or(AgendaError::Busy)?;

        match self.repo.delete(id).await {
            Ok(()) => {
                info!("Deleted contact {}", id);
                apply(&self.state, Action::Deleted(id.clone())).await;
                self.show_banner(BannerKind::Success, messages::DELETED).await;
                Ok(())
            }
            Err(e) => {
                error!("Failed to delete contact {}: {}", id, e);
                self.show_banner(BannerKind::Error, messages::DELETE_FAILED).await;
                Err(e.into())
            }
        }
    }

    /// Load `id` into the form for editing.
    pub async fn start_edit(&self, id: &ContactId) -> Result<ContactDraft, AgendaError> {
        let state = apply(&self.state, Action::EditStarted(id.clone())).await;
        if state.editing.as_ref() != Some(id) {
            return Err(AgendaError::UnknownContact(id.clone()));
        }
        Ok(state.form_draft())
    }

    pub async fn cancel_edit(&self) {
        apply(&self.state, Action::EditCancelled).await;
    }

    pub async fn set_mode(&self, mode: ViewMode) {
        apply(&self.state, Action::ModeChanged(mode)).await;
    }

    /// Change the search term; always returns to page 1.
    pub async fn search(&self, term: impl Into<String>) {
        apply(&self.state, Action::SearchChanged(term.into())).await;
    }

    pub async fn toggle_sort(&self) {
        apply(&self.state, Action::SortToggled).await;
    }

    /// Jump to `page`, clamped to the available pages. Returns the page shown.
    pub async fn go_to_page(&self, page: usize) -> usize {
        apply(&self.state, Action::PageChanged(page))
            .await
            .selection
            .page
    }

    pub async fn next_page(&self) -> usize {
        apply(&self.state, Action::NextPage).await.selection.page
    }

    pub async fn previous_page(&self) -> usize {
        apply(&self.state, Action::PreviousPage).await.selection.page
    }

    async fn show_banner(&self, kind: BannerKind, message: &str) {
        let generation = apply(
            &self.state,
            Action::BannerShown {
                kind,
                message: message.to_string(),
            },
        )
        .await
        .banner_generation();

        self.banners.schedule(generation, self.state.clone());
    }
}
