//! Self-clearing banner timer.

use crate::services::apply;
use crate::state::{Action, AgendaState};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::sync::RwLock;
use tokio::task::JoinHandle;

/// Clears the banner after a fixed delay.
///
/// At most one expiry is pending. Scheduling a new one aborts the previous
/// task, and the reducer ignores expiries for any generation but the current
/// one.
#[derive(Debug)]
pub struct BannerTimer {
    timeout: Duration,
    pending: Mutex<Option<JoinHandle<()>>>,
}

impl BannerTimer {
    pub fn new(timeout: Duration) -> Self {
        Self {
            timeout,
            pending: Mutex::new(None),
        }
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Expire banner `generation` after the timeout, cancelling any earlier expiry.
    ///
    /// Must be called from within a tokio runtime.
    pub fn schedule(&self, generation: u64, state: Arc<RwLock<AgendaState>>) {
        let timeout = self.timeout;
        let handle = tokio::spawn(async move {
            tokio::time::sleep(timeout).await;
            tracing::debug!("Banner {} expired", generation);
            apply(&state, Action::BannerExpired(generation)).await;
        });

        match self.pending.lock() {
            Ok(mut pending) => {
                if let Some(previous) = pending.replace(handle) {
                    previous.abort();
                }
            }
            Err(_) => tracing::warn!(
                "Banner timer lock poisoned; earlier expiry for banner {} not aborted",
                generation
            ),
        }
    }

    /// Abort the pending expiry, if any.
    pub fn cancel(&self) {
        if let Ok(mut pending) = self.pending.lock() {
            if let Some(previous) = pending.take() {
                previous.abort();
            }
        }
    }
}

impl Drop for BannerTimer {
    fn drop(&mut self) {
        self.cancel();
    }
}
