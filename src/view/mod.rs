//! List view pipeline: filter, sort and paginate contacts.
//!
//! [`compute_view`] is a pure function of the collection and the
//! [`ViewSelection`]; it is recomputed from scratch on every call and holds no
//! state, so callers may memoize it freely.

use crate::models::Contact;
use std::cmp::Ordering;

/// Page size used by the agenda unless configured otherwise.
pub const DEFAULT_PAGE_SIZE: usize = 3;

/// What the user is currently looking at.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewSelection {
    /// Search term, matched case-insensitively against name, email and tag.
    pub search: String,
    /// `true` for A-Z, `false` for Z-A.
    pub ascending: bool,
    /// 1-based page number.
    pub page: usize,
    /// Contacts per page, at least 1.
    pub page_size: usize,
}

impl Default for ViewSelection {
    fn default() -> Self {
        Self::with_page_size(DEFAULT_PAGE_SIZE)
    }
}

impl ViewSelection {
    pub fn with_page_size(page_size: usize) -> Self {
        Self {
            search: String::new(),
            ascending: true,
            page: 1,
            page_size: page_size.max(1),
        }
    }

    /// Bring `page` back into `[1, total_pages]`; page 1 when there are no pages.
    pub fn clamp_page(&mut self, total_pages: usize) {
        self.page = self.page.clamp(1, total_pages.max(1));
    }
}

/// One rendered page of the contact list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactView<'a> {
    /// Contacts on the requested page, in display order.
    pub items: Vec<&'a Contact>,
    /// Number of contacts matching the search, across all pages.
    pub filtered_count: usize,
    /// `ceil(filtered_count / page_size)`, 0 when nothing matched.
    pub total_pages: usize,
    /// Page this view was computed for.
    pub page: usize,
    page_size: usize,
}

impl<'a> ContactView<'a> {
    /// 1-based inclusive range shown on this page, for
    /// "Showing a–b of n results". `None` when nothing is on this page.
    pub fn showing_range(&self) -> Option<(usize, usize)> {
        if self.items.is_empty() {
            return None;
        }
        let start = page_start(self.page, self.page_size);
        let end = (start + self.page_size).min(self.filtered_count);
        Some((start + 1, end))
    }

    /// Page numbers for the navigation bar.
    pub fn page_numbers(&self) -> impl Iterator<Item = usize> {
        1..=self.total_pages
    }

    pub fn has_previous(&self) -> bool {
        self.page > 1
    }

    pub fn has_next(&self) -> bool {
        self.page < self.total_pages
    }

    /// Clone the visible contacts into owned values.
    pub fn to_owned_items(&self) -> Vec<Contact> {
        self.items.iter().map(|c| (*c).clone()).collect()
    }
}

/// Filter, sort and paginate `contacts` according to `selection`.
///
/// Pages outside `[1, total_pages]` produce an empty `items` list.
pub fn compute_view<'a>(contacts: &'a [Contact], selection: &ViewSelection) -> ContactView<'a> {
    let page_size = selection.page_size.max(1);

    let mut matched = filter_contacts(contacts, &selection.search);
    sort_by_name(&mut matched, selection.ascending);

    let filtered_count = matched.len();
    let total_pages = total_pages(filtered_count, page_size);
    let items = paginate(&matched, selection.page, page_size).to_vec();

    ContactView {
        items,
        filtered_count,
        total_pages,
        page: selection.page,
        page_size,
    }
}

/// Contacts whose name, email or tag contains `search`, ignoring case.
/// An empty term keeps everything. Collection order is preserved.
pub fn filter_contacts<'a>(contacts: &'a [Contact], search: &str) -> Vec<&'a Contact> {
    let term = search.to_lowercase();
    contacts
        .iter()
        .filter(|contact| matches_term(contact, &term))
        .collect()
}

fn matches_term(contact: &Contact, term: &str) -> bool {
    if term.is_empty() {
        return true;
    }
    contact.name.to_lowercase().contains(term)
        || contact.email.to_lowercase().contains(term)
        || contact.tag().to_lowercase().contains(term)
}

/// Stable sort by lowercased name, in either direction.
///
/// Equal names keep their relative order whether ascending or descending.
pub fn sort_by_name(contacts: &mut Vec<&Contact>, ascending: bool) {
    let mut keyed: Vec<(String, &Contact)> = contacts
        .iter()
        .map(|c| (c.name.to_lowercase(), *c))
        .collect();

    keyed.sort_by(|(a, _), (b, _)| {
        let ord: Ordering = a.cmp(b);
        if ascending {
            ord
        } else {
            ord.reverse()
        }
    });

    *contacts = keyed.into_iter().map(|(_, c)| c).collect();
}

/// Number of pages needed for `count` items.
pub fn total_pages(count: usize, page_size: usize) -> usize {
    count.div_ceil(page_size.max(1))
}

/// Half-open slice `[(page-1)*size, page*size)` clipped to `items`.
pub fn paginate<T>(items: &[T], page: usize, page_size: usize) -> &[T] {
    if page == 0 {
        return &[];
    }
    let start = page_start(page, page_size).min(items.len());
    let end = start.saturating_add(page_size).min(items.len());
    &items[start..end]
}

fn page_start(page: usize, page_size: usize) -> usize {
    page.saturating_sub(1).saturating_mul(page_size)
}
