//! Contact agenda - terminal front-end.
//!
//! Reads commands from stdin, drives the [`AgendaController`] and prints the
//! current view after each one. Logs go to stderr.

use anyhow::Result;
use contact_agenda::client::{AgendaClient, AsyncAgendaClient, AsyncAgendaClientImpl};
use contact_agenda::commands::{Command, UnsavedDraft, HELP};
use contact_agenda::models::ContactDraft;
use contact_agenda::render::{render_field_errors, render_state};
use contact_agenda::repositories::{ContactRepository, RestContactRepository};
use contact_agenda::state::ViewMode;
use contact_agenda::{AgendaController, Config, ContactId, SubmitError};
use std::io::Write;
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, BufReader, Lines, Stdin};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

type Input = Lines<BufReader<Stdin>>;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let config = match Config::from_env() {
        Ok(cfg) => cfg,
        Err(e) => {
            eprintln!("Failed to load configuration: {}", e);
            return Err(e.into());
        }
    };

    // RUST_LOG wins over LOG_LEVEL
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.log_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    info!("Starting contact agenda against {}", config.api_base_url);

    let client = Arc::new(AsyncAgendaClientImpl::new(AgendaClient::new(&config)))
        as Arc<dyn AsyncAgendaClient>;
    let repo = Arc::new(RestContactRepository::new(client)) as Arc<dyn ContactRepository>;
    let controller = AgendaController::new(repo, &config);

    // A failed load is shown as a page error; the session continues.
    if let Err(e) = controller.load().await {
        error!("Initial load failed: {}", e);
    }
    print!("{}", render_state(&controller.state().await));

    let mut input = BufReader::new(tokio::io::stdin()).lines();
    let mut unsaved: Option<UnsavedDraft> = None;

    while let Some(line) = read_line(&mut input, "> ").await? {
        let command = match line.parse::<Command>() {
            Ok(command) => command,
            Err(msg) => {
                println!("{}", msg);
                continue;
            }
        };

        match command {
            Command::Quit => break,
            Command::Help => {
                println!("{}", HELP);
                continue;
            }
            Command::List => controller.set_mode(ViewMode::List).await,
            Command::Reload => {
                if let Err(e) = controller.load().await {
                    error!("Reload failed: {}", e);
                }
            }
            Command::Mode(mode) => controller.set_mode(mode).await,
            Command::Add => {
                controller.cancel_edit().await;
                controller.set_mode(ViewMode::Create).await;
                let start = UnsavedDraft::resume_create(&mut unsaved).unwrap_or_default();
                if let Some(kept) = fill_and_submit(&controller, &mut input, None, start).await? {
                    unsaved = Some(kept);
                }
            }
            Command::Edit(id) => {
                let started = controller.start_edit(&id).await;
                match started {
                    Ok(stored) => {
                        let start = UnsavedDraft::resume_edit(&mut unsaved, &id).unwrap_or(stored);
                        let kept =
                            fill_and_submit(&controller, &mut input, Some(id), start).await?;
                        if let Some(kept) = kept {
                            unsaved = Some(kept);
                        }
                    }
                    Err(e) => println!("{}", e),
                }
            }
            Command::Cancel => controller.cancel_edit().await,
            Command::Delete(id) => {
                if let Err(e) = controller.delete(&id).await {
                    println!("{}", e);
                }
            }
            Command::Search(term) => controller.search(term).await,
            Command::Sort => controller.toggle_sort().await,
            Command::Page(n) => {
                controller.go_to_page(n).await;
            }
            Command::Next => {
                controller.next_page().await;
            }
            Command::Previous => {
                controller.previous_page().await;
            }
        }

        print!("{}", render_state(&controller.state().await));
    }

    info!("Contact agenda shutdown complete");
    Ok(())
}

/// Prompt for every field, re-prompting until the draft validates.
///
/// Returns the draft when the backend rejected it so the next `add`, or
/// `edit` of the same contact, can start from what the user typed.
async fn fill_and_submit(
    controller: &AgendaController,
    input: &mut Input,
    editing: Option<ContactId>,
    mut draft: ContactDraft,
) -> Result<Option<UnsavedDraft>> {
    loop {
        draft = match prompt_draft(input, draft).await? {
            Some(draft) => draft,
            None => return Ok(None),
        };

        match controller.submit(&draft).await {
            Ok(contact) => {
                controller.set_mode(ViewMode::List).await;
                println!("Saved #{} {}", contact.id, contact.name);
                return Ok(None);
            }
            Err(SubmitError::Invalid(errors)) => {
                println!("Please fix:\n{}", render_field_errors(&errors));
            }
            Err(e) => {
                println!("{}", e);
                return Ok(Some(UnsavedDraft::new(editing, draft)));
            }
        }
    }
}

/// Ask for each field. Empty input keeps the shown value, `-` clears it.
async fn prompt_draft(input: &mut Input, current: ContactDraft) -> Result<Option<ContactDraft>> {
    let mut draft = current;
    let fields: [(&str, &mut String); 5] = [
        ("Name", &mut draft.name),
        ("Phone", &mut draft.phone),
        ("Email", &mut draft.email),
        ("Company (optional)", &mut draft.company),
        ("Tag (optional)", &mut draft.tag),
    ];

    for (label, value) in fields {
        let prompt = format!("{} [{}]: ", label, value);
        let Some(line) = read_line(input, &prompt).await? else {
            return Ok(None);
        };
        if line == "-" {
            value.clear();
        } else if !line.is_empty() {
            *value = line;
        }
    }

    Ok(Some(draft))
}

async fn read_line(input: &mut Input, prompt: &str) -> Result<Option<String>> {
    print!("{}", prompt);
    std::io::stdout().flush()?;
    Ok(input.next_line().await?)
}
