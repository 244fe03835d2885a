//! Request counters for the contacts client.
//!
//! Counts requests, failures and latency per storage operation.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

/// The four storage operations the agenda performs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    List,
    Create,
    Update,
    Delete,
}

impl Operation {
    const COUNT: usize = 4;

    fn index(self) -> usize {
        match self {
            Operation::List => 0,
            Operation::Create => 1,
            Operation::Update => 2,
            Operation::Delete => 3,
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Operation::List => "list",
            Operation::Create => "create",
            Operation::Update => "update",
            Operation::Delete => "delete",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Default)]
struct Counters {
    requests: [AtomicU64; Operation::COUNT],
    errors: [AtomicU64; Operation::COUNT],
    duration_ms: AtomicU64,
    contacts_fetched: AtomicU64,
}

/// Cheaply cloneable metrics collector shared by client clones.
#[derive(Debug, Clone, Default)]
pub struct Metrics {
    inner: Arc<Counters>,
}

impl Metrics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a finished request.
    pub fn record_request(&self, op: Operation, duration: Duration, failed: bool) {
        self.inner.requests[op.index()].fetch_add(1, Ordering::Relaxed);
        if failed {
            self.inner.errors[op.index()].fetch_add(1, Ordering::Relaxed);
        }
        self.inner
            .duration_ms
            .fetch_add(duration.as_millis() as u64, Ordering::Relaxed);
    }

    pub fn record_contacts_fetched(&self, count: usize) {
        self.inner
            .contacts_fetched
            .fetch_add(count as u64, Ordering::Relaxed);
    }

    pub fn requests(&self, op: Operation) -> u64 {
        self.inner.requests[op.index()].load(Ordering::Relaxed)
    }

    pub fn errors(&self, op: Operation) -> u64 {
        self.inner.errors[op.index()].load(Ordering::Relaxed)
    }

    /// Snapshot of all counters.
    pub fn summary(&self) -> MetricsSummary {
        let sum = |counters: &[AtomicU64; Operation::COUNT]| -> u64 {
            counters.iter().map(|c| c.load(Ordering::Relaxed)).sum()
        };
        let requests_total = sum(&self.inner.requests);
        let duration_total_ms = self.inner.duration_ms.load(Ordering::Relaxed);

        MetricsSummary {
            requests_total,
            errors_total: sum(&self.inner.errors),
            duration_total_ms,
            duration_avg_ms: if requests_total == 0 {
                0.0
            } else {
                duration_total_ms as f64 / requests_total as f64
            },
            contacts_fetched_total: self.inner.contacts_fetched.load(Ordering::Relaxed),
        }
    }
}

/// A snapshot of metrics values.
#[derive(Debug, Clone, PartialEq)]
pub struct MetricsSummary {
    pub requests_total: u64,
    pub errors_total: u64,
    pub duration_total_ms: u64,
    pub duration_avg_ms: f64,
    pub contacts_fetched_total: u64,
}

/// Times one request and records it on completion.
pub struct RequestTimer {
    op: Operation,
    start: Instant,
    metrics: Metrics,
}

impl RequestTimer {
    pub fn start(metrics: &Metrics, op: Operation) -> Self {
        Self {
            op,
            start: Instant::now(),
            metrics: metrics.clone(),
        }
    }

    /// Record the request, counting it as an error when `failed`.
    pub fn finish(self, failed: bool) {
        self.metrics
            .record_request(self.op, self.start.elapsed(), failed);
    }
}
