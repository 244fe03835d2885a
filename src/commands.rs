//! Commands accepted by the terminal front-end.

use crate::domain::ContactId;
use crate::models::ContactDraft;
use crate::state::ViewMode;
use std::str::FromStr;

pub const HELP: &str = "\
Commands:
  list                 show the contact list
  reload               fetch the contacts again
  add                  create a contact
  edit <id>            edit a contact
  cancel               stop editing
  delete <id>          delete a contact
  search [term]        filter by name, email or tag (empty clears)
  sort                 toggle A-Z / Z-A
  page <n> | next | prev
  mode create|list     switch view
  help                 show this help
  quit                 exit";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    List,
    Reload,
    Add,
    Edit(ContactId),
    Cancel,
    Delete(ContactId),
    Search(String),
    Sort,
    Page(usize),
    Next,
    Previous,
    Mode(ViewMode),
    Help,
    Quit,
}

impl FromStr for Command {
    type Err = String;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let line = line.trim();
        let (word, rest) = match line.split_once(char::is_whitespace) {
            Some((word, rest)) => (word, rest.trim()),
            None => (line, ""),
        };

        let id = |rest: &str| {
            ContactId::new(rest).map_err(|_| format!("`{}` needs a contact id", word))
        };

        match word.to_lowercase().as_str() {
            "list" | "ls" => Ok(Command::List),
            "reload" | "refresh" => Ok(Command::Reload),
            "add" | "new" => Ok(Command::Add),
            "edit" => id(rest).map(Command::Edit),
            "cancel" => Ok(Command::Cancel),
            "delete" | "rm" => id(rest).map(Command::Delete),
            "search" | "find" => Ok(Command::Search(rest.to_string())),
            "sort" => Ok(Command::Sort),
            "page" => rest
                .parse()
                .map(Command::Page)
                .map_err(|_| "`page` needs a page number".to_string()),
            "next" => Ok(Command::Next),
            "prev" | "previous" => Ok(Command::Previous),
            "mode" => match rest {
                "create" => Ok(Command::Mode(ViewMode::Create)),
                "list" => Ok(Command::Mode(ViewMode::List)),
                _ => Err("`mode` takes `create` or `list`".to_string()),
            },
            "help" | "?" => Ok(Command::Help),
            "quit" | "exit" => Ok(Command::Quit),
            "" => Err("Type `help` for commands".to_string()),
            other => Err(format!("Unknown command `{}`; type `help`", other)),
        }
    }
}

/// Form input the backend rejected, kept so it can be submitted again.
///
/// Remembers which contact was being edited so the input is only ever
/// resumed for that same contact, or for a new one when it came from `add`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnsavedDraft {
    editing: Option<ContactId>,
    draft: ContactDraft,
}

impl UnsavedDraft {
    pub fn new(editing: Option<ContactId>, draft: ContactDraft) -> Self {
        Self { editing, draft }
    }

    pub fn editing(&self) -> Option<&ContactId> {
        self.editing.as_ref()
    }

    /// Take the kept draft if it was for a new contact.
    pub fn resume_create(slot: &mut Option<Self>) -> Option<ContactDraft> {
        Self::take_if(slot, |kept| kept.editing.is_none())
    }

    /// Take the kept draft if it was for contact `id`.
    pub fn resume_edit(slot: &mut Option<Self>, id: &ContactId) -> Option<ContactDraft> {
        Self::take_if(slot, |kept| kept.editing.as_ref() == Some(id))
    }

    fn take_if(slot: &mut Option<Self>, matches: impl FnOnce(&Self) -> bool) -> Option<ContactDraft> {
        if slot.as_ref().is_some_and(matches) {
            slot.take().map(|kept| kept.draft)
        } else {
            None
        }
    }
}
