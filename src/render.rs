//! Plain-text rendering of the agenda for the terminal front-end.

use crate::models::Contact;
use crate::state::{AgendaState, BannerKind, ViewMode};
use crate::validation::FieldErrors;
use std::fmt::Write;

/// Render banner, page error and the current mode's content.
pub fn render_state(state: &AgendaState) -> String {
    let mut out = String::new();

    if let Some(banner) = &state.banner {
        let marker = match banner.kind {
            BannerKind::Success => "[ok]",
            BannerKind::Error => "[error]",
        };
        let _ = writeln!(out, "{} {}", marker, banner.message);
    }
    if let Some(err) = &state.load_error {
        let _ = writeln!(out, "[error] {}", err);
    }

    if state.loading {
        out.push_str("Loading contacts...\n");
        return out;
    }

    match state.mode {
        ViewMode::Create => match state.editing_contact() {
            Some(contact) => {
                let _ = writeln!(out, "Editing contact #{} ({})", contact.id, contact.name);
                out.push_str("Use `edit <id>` to change fields or `cancel` to stop editing.\n");
            }
            None => out.push_str("New contact: use `add` to fill in the form.\n"),
        },
        ViewMode::List => render_list(state, &mut out),
    }

    out
}

fn render_list(state: &AgendaState, out: &mut String) {
    let view = state.view();
    let order = if state.selection.ascending { "A-Z" } else { "Z-A" };

    if !state.selection.search.is_empty() {
        let _ = writeln!(out, "Search: \"{}\"", state.selection.search);
    }
    let _ = writeln!(out, "Order: {}", order);

    if view.items.is_empty() {
        out.push_str("No contacts match the search.\n");
    } else {
        for contact in &view.items {
            out.push_str(&render_card(contact));
        }
    }

    if let Some((first, last)) = view.showing_range() {
        let _ = writeln!(
            out,
            "Showing {}–{} of {} results",
            first, last, view.filtered_count
        );
    }

    if view.total_pages > 0 {
        let pages: Vec<String> = view
            .page_numbers()
            .map(|n| {
                if n == view.page {
                    format!("[{}]", n)
                } else {
                    n.to_string()
                }
            })
            .collect();
        let prev = if view.has_previous() { "<" } else { " " };
        let next = if view.has_next() { ">" } else { " " };
        let _ = writeln!(out, "{} {} {}", prev, pages.join(" "), next);
    }
}

/// One contact as a short card.
pub fn render_card(contact: &Contact) -> String {
    let mut card = format!("#{} {}\n", contact.id, contact.name);
    let _ = writeln!(card, "    phone: {}", contact.phone);
    let _ = writeln!(card, "    email: {}", contact.email);
    if !contact.company().is_empty() {
        let _ = writeln!(card, "    company: {}", contact.company());
    }
    if !contact.tag().is_empty() {
        let _ = writeln!(card, "    tag: {}", contact.tag());
    }
    card
}

/// Field errors, one per line.
pub fn render_field_errors(errors: &FieldErrors) -> String {
    errors
        .iter()
        .map(|(field, err)| format!("  - {}\n", err.message(field)))
        .collect()
}
