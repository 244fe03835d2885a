//! Application service layer.
//!
//! The agenda controller sequences storage calls, reducer transitions and
//! self-clearing banners. It is the only writer of the shared
//! [`AgendaState`](crate::state::AgendaState).

mod agenda_controller;
mod banner;

pub use agenda_controller::{messages, AgendaController};
pub use banner::BannerTimer;

use crate::state::{reduce, Action, AgendaState};
use tokio::sync::{RwLock, RwLockWriteGuard};

/// Replace the shared state with `reduce(state, action)`.
///
/// Returns the write guard so the caller can read the new state atomically.
pub(crate) async fn apply(
    state: &RwLock<AgendaState>,
    action: Action,
) -> RwLockWriteGuard<'_, AgendaState> {
    let mut guard = state.write().await;
    let current = std::mem::take(&mut *guard);
    *guard = reduce(current, action);
    guard
}
