//! Contact Agenda - a client for a REST-backed contact list.
//!
//! The crate validates contact forms, derives the searchable, sorted and
//! paginated list view, and keeps an in-memory copy of the collection in step
//! with the backend.
//!
//! # Architecture
//!
//! - **validation**: Field validation for contact drafts
//! - **view**: Pure filter / sort / paginate pipeline
//! - **state**: Agenda state and its reducer
//! - **services**: Async controller, banner timer
//! - **repositories**: Storage abstraction over the REST client
//! - **client**: Blocking HTTP client and its async wrapper
//! - **models** / **domain**: Contact records and identifiers
//! - **config**, **error**, **metrics**: Ambient plumbing
//! - **commands** / **render**: Terminal front-end helpers

pub mod client;
pub mod commands;
pub mod config;
pub mod domain;
pub mod error;
pub mod metrics;
pub mod models;
pub mod render;
pub mod repositories;
pub mod services;
pub mod state;
pub mod validation;
pub mod view;

pub use client::AgendaClient;
pub use config::Config;
pub use domain::ContactId;
pub use error::{AgendaError, ApiError, ConfigError, SubmitError};
pub use metrics::{Metrics, MetricsSummary};
pub use models::{Contact, ContactDraft};
pub use services::AgendaController;
pub use state::{reduce, Action, AgendaState, ViewMode};
pub use validation::{validate, Field, FieldError, FieldErrors};
pub use view::{compute_view, ContactView, ViewSelection};
