//! Agenda view state and its reducer.
//!
//! The whole UI state lives in one [`AgendaState`] value. Every change is an
//! [`Action`] applied by [`reduce`], which consumes the old state and returns
//! the next one without touching anything else.

use crate::domain::ContactId;
use crate::models::{Contact, ContactDraft};
use crate::view::{compute_view, ContactView, ViewSelection};

/// Which half of the agenda is showing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ViewMode {
    /// The contact form (new contact, or the one being edited).
    Create,
    /// The searchable, paginated list.
    #[default]
    List,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BannerKind {
    Success,
    Error,
}

/// A transient message shown after a mutating action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Banner {
    pub kind: BannerKind,
    pub message: String,
    /// Increases with every banner shown; used to ignore stale expiries.
    pub generation: u64,
}

/// Complete agenda UI state.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AgendaState {
    /// Canonical collection, in backend order plus local appends.
    pub contacts: Vec<Contact>,
    pub selection: ViewSelection,
    pub mode: ViewMode,
    /// Contact currently loaded in the form for editing.
    pub editing: Option<ContactId>,
    pub loading: bool,
    /// Persistent page-level error from the last failed load.
    pub load_error: Option<String>,
    pub banner: Option<Banner>,
    banner_generation: u64,
}

impl AgendaState {
    pub fn new(page_size: usize) -> Self {
        Self {
            selection: ViewSelection::with_page_size(page_size),
            ..Default::default()
        }
    }

    /// The current page of the list.
    pub fn view(&self) -> ContactView<'_> {
        compute_view(&self.contacts, &self.selection)
    }

    pub fn find(&self, id: &ContactId) -> Option<&Contact> {
        self.contacts.iter().find(|c| &c.id == id)
    }

    /// Contact loaded in the form, if editing.
    pub fn editing_contact(&self) -> Option<&Contact> {
        self.editing.as_ref().and_then(|id| self.find(id))
    }

    /// Draft the form should start from: the edited contact, or blank.
    pub fn form_draft(&self) -> ContactDraft {
        self.editing_contact()
            .map(ContactDraft::from)
            .unwrap_or_default()
    }

    /// Generation of the most recently shown banner.
    pub fn banner_generation(&self) -> u64 {
        self.banner_generation
    }

    fn clamp_page(&mut self) {
        let total_pages = self.view().total_pages;
        self.selection.clamp_page(total_pages);
    }
}

/// Everything that can happen to the agenda state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    LoadStarted,
    Loaded(Vec<Contact>),
    LoadFailed(String),
    Created(Contact),
    Updated(Contact),
    Deleted(ContactId),
    SearchChanged(String),
    SortToggled,
    PageChanged(usize),
    NextPage,
    PreviousPage,
    EditStarted(ContactId),
    EditCancelled,
    ModeChanged(ViewMode),
    BannerShown { kind: BannerKind, message: String },
    BannerExpired(u64),
}

/// Apply `action` to `state`, returning the next state.
///
/// After every transition the current page is clamped into
/// `[1, total_pages]` (page 1 when the list is empty).
pub fn reduce(state: AgendaState, action: Action) -> AgendaState {
    let mut next = state;

    match action {
        Action::LoadStarted => {
            next.loading = true;
            next.load_error = None;
        }
        Action::Loaded(contacts) => {
            next.contacts = contacts;
            next.loading = false;
            next.load_error = None;
            if next.editing_contact().is_none() {
                next.editing = None;
            }
        }
        Action::LoadFailed(message) => {
            next.loading = false;
            next.load_error = Some(message);
        }
        Action::Created(contact) => {
            next.contacts.push(contact);
            next.load_error = None;
        }
        Action::Updated(contact) => {
            if let Some(slot) = next.contacts.iter_mut().find(|c| c.id == contact.id) {
                *slot = contact;
            }
            next.editing = None;
            next.load_error = None;
        }
        Action::Deleted(id) => {
            next.contacts.retain(|c| c.id != id);
            next.load_error = None;
            if next.editing.as_ref() == Some(&id) {
                next.editing = None;
            }
        }
        Action::SearchChanged(search) => {
            next.selection.search = search;
            next.selection.page = 1;
        }
        Action::SortToggled => {
            next.selection.ascending = !next.selection.ascending;
        }
        Action::PageChanged(page) => {
            next.selection.page = page;
        }
        Action::NextPage => {
            next.selection.page = next.selection.page.saturating_add(1);
        }
        Action::PreviousPage => {
            next.selection.page = next.selection.page.saturating_sub(1);
        }
        Action::EditStarted(id) => {
            if next.find(&id).is_some() {
                next.editing = Some(id);
                next.mode = ViewMode::Create;
            }
        }
        Action::EditCancelled => {
            next.editing = None;
        }
        Action::ModeChanged(mode) => {
            if next.mode != mode {
                next.mode = mode;
                next.editing = None;
            }
        }
        Action::BannerShown { kind, message } => {
            next.banner_generation += 1;
            next.banner = Some(Banner {
                kind,
                message,
                generation: next.banner_generation,
            });
        }
        Action::BannerExpired(generation) => {
            if next.banner.as_ref().map(|b| b.generation) == Some(generation) {
                next.banner = None;
            }
        }
    }

    next.clamp_page();
    next
}

#[cfg(test)]
mod tests {
    use super::*;

    fn contact(id: &str, name: &str) -> Contact {
        Contact::new(ContactId::new(id).unwrap(), name, "3001234567", "x@x.co")
    }

    fn id(raw: &str) -> ContactId {
        ContactId::new(raw).unwrap()
    }

    fn loaded(n: usize) -> AgendaState {
        let contacts = (1..=n)
            .map(|i| contact(&i.to_string(), &format!("c{:02}", i)))
            .collect();
        reduce(AgendaState::new(3), Action::Loaded(contacts))
    }

    fn apply(state: AgendaState, actions: Vec<Action>) -> AgendaState {
        actions.into_iter().fold(state, reduce)
    }

    #[test]
    fn test_load_lifecycle() {
        let state = reduce(AgendaState::new(3), Action::LoadStarted);
        assert!(state.loading);

        let state = reduce(state, Action::LoadFailed("down".to_string()));
        assert!(!state.loading);
        assert_eq!(state.load_error.as_deref(), Some("down"));

        let state = reduce(state, Action::LoadStarted);
        assert_eq!(state.load_error, None);

        let state = reduce(state, Action::Loaded(vec![contact("1", "Ana")]));
        assert!(!state.loading);
        assert_eq!(state.contacts.len(), 1);
    }

    #[test]
    fn test_load_failure_keeps_collection() {
        let state = loaded(2);
        let state = reduce(state, Action::LoadFailed("down".to_string()));
        assert_eq!(state.contacts.len(), 2);
    }

    #[test]
    fn test_successful_mutation_clears_load_error() {
        let state = reduce(loaded(2), Action::LoadFailed("down".to_string()));
        let state = reduce(state, Action::Created(contact("3", "Ana")));
        assert_eq!(state.load_error, None);

        let state = reduce(state, Action::LoadFailed("down".to_string()));
        let state = reduce(state, Action::Deleted(id("3")));
        assert_eq!(state.load_error, None);

        let state = reduce(state, Action::LoadFailed("down".to_string()));
        let state = reduce(state, Action::Updated(contact("1", "Alberto")));
        assert_eq!(state.load_error, None);

        // Navigation alone keeps the error visible.
        let state = reduce(state, Action::LoadFailed("down".to_string()));
        let state = reduce(state, Action::SortToggled);
        assert_eq!(state.load_error.as_deref(), Some("down"));
    }

    #[test]
    fn test_search_resets_page() {
        let state = apply(loaded(7), vec![Action::PageChanged(3)]);
        assert_eq!(state.selection.page, 3);

        let state = reduce(state, Action::SearchChanged("c0".to_string()));
        assert_eq!(state.selection.page, 1);
        assert_eq!(state.selection.search, "c0");
    }

    #[test]
    fn test_page_changes_are_clamped() {
        let state = reduce(loaded(7), Action::PageChanged(99));
        assert_eq!(state.selection.page, 3);

        let state = reduce(state, Action::NextPage);
        assert_eq!(state.selection.page, 3);

        let state = apply(state, vec![Action::PageChanged(1), Action::PreviousPage]);
        assert_eq!(state.selection.page, 1);

        let state = reduce(state, Action::NextPage);
        assert_eq!(state.selection.page, 2);
    }

    #[test]
    fn test_delete_clamps_page_when_pages_shrink() {
        let state = reduce(loaded(4), Action::PageChanged(2));
        assert_eq!(state.selection.page, 2);

        let state = reduce(state, Action::Deleted(id("4")));
        assert_eq!(state.contacts.len(), 3);
        assert_eq!(state.selection.page, 1);
    }

    #[test]
    fn test_empty_list_stays_on_page_one() {
        let state = reduce(AgendaState::new(3), Action::PageChanged(4));
        assert_eq!(state.selection.page, 1);
    }

    #[test]
    fn test_created_appends() {
        let state = reduce(loaded(2), Action::Created(contact("9", "Zoe")));
        assert_eq!(state.contacts.last().unwrap().id, id("9"));
        assert_eq!(state.contacts.len(), 3);
    }

    #[test]
    fn test_updated_replaces_in_place_and_ends_edit() {
        let state = apply(loaded(3), vec![Action::EditStarted(id("2"))]);
        assert_eq!(state.editing, Some(id("2")));

        let state = reduce(state, Action::Updated(contact("2", "Renamed")));
        assert_eq!(state.contacts[1].name, "Renamed");
        assert_eq!(state.contacts.len(), 3);
        assert_eq!(state.editing, None);
    }

    #[test]
    fn test_delete_clears_edit_only_for_same_contact() {
        let state = apply(loaded(3), vec![Action::EditStarted(id("2"))]);

        let state = reduce(state, Action::Deleted(id("3")));
        assert_eq!(state.editing, Some(id("2")));

        let state = reduce(state, Action::Deleted(id("2")));
        assert_eq!(state.editing, None);
    }

    #[test]
    fn test_edit_unknown_contact_is_ignored() {
        let before = loaded(2);
        let after = reduce(before.clone(), Action::EditStarted(id("77")));
        assert_eq!(before, after);
    }

    #[test]
    fn test_mode_change_clears_edit() {
        let state = apply(loaded(2), vec![Action::EditStarted(id("1"))]);
        assert_eq!(state.mode, ViewMode::Create);

        // Same mode keeps the edit.
        let state = reduce(state, Action::ModeChanged(ViewMode::Create));
        assert_eq!(state.editing, Some(id("1")));

        let state = reduce(state, Action::ModeChanged(ViewMode::List));
        assert_eq!(state.mode, ViewMode::List);
        assert_eq!(state.editing, None);
    }

    #[test]
    fn test_switching_edited_record() {
        let state = apply(
            loaded(3),
            vec![Action::EditStarted(id("1")), Action::EditStarted(id("3"))],
        );
        assert_eq!(state.editing, Some(id("3")));
        assert_eq!(state.form_draft().name, "c03");
    }

    #[test]
    fn test_form_draft_blank_when_not_editing() {
        assert_eq!(loaded(1).form_draft(), ContactDraft::default());
    }

    #[test]
    fn test_stale_banner_expiry_is_ignored() {
        let state = reduce(
            AgendaState::new(3),
            Action::BannerShown {
                kind: BannerKind::Success,
                message: "first".to_string(),
            },
        );
        let first = state.banner_generation();

        let state = reduce(
            state,
            Action::BannerShown {
                kind: BannerKind::Error,
                message: "second".to_string(),
            },
        );
        let second = state.banner_generation();
        assert!(second > first);

        let state = reduce(state, Action::BannerExpired(first));
        assert_eq!(state.banner.as_ref().unwrap().message, "second");

        let state = reduce(state, Action::BannerExpired(second));
        assert_eq!(state.banner, None);
    }

    #[test]
    fn test_sort_toggle() {
        let state = reduce(loaded(3), Action::SortToggled);
        assert!(!state.selection.ascending);
        assert_eq!(state.view().items[0].name, "c03");
    }
}
