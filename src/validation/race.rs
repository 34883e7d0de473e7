//! Deadline racing for individual checks.
//!
//! A check future and its deadline start together; whichever finishes
//! first decides the outcome. The losing check future is dropped, which
//! aborts its in-flight request.

use std::future::Future;
use std::time::Duration;
use tokio::time::{Instant, timeout_at};

use crate::core::error::CheckFailure;
use crate::core::types::CheckKind;

/// Per-check timeout plus an optional deadline for the whole run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Deadline {
    per_check: Duration,
    run: Option<Instant>,
}

impl Deadline {
    pub fn new(per_check: Duration) -> Self {
        Self {
            per_check,
            run: None,
        }
    }

    /// Bound the whole run to end at `run`.
    pub fn with_run_deadline(mut self, run: Instant) -> Self {
        self.run = Some(run);
        self
    }

    pub fn run_expired(&self) -> bool {
        self.run.is_some_and(|run| Instant::now() >= run)
    }

    /// When a check started now runs out of time.
    pub fn expiry(&self) -> Instant {
        Instant::now() + self.per_check
    }

    /// Whole seconds, as shown in timeout messages.
    pub fn seconds(&self) -> u64 {
        self.per_check.as_secs()
    }
}

/// Race `check` against its per-check timer, which fires at `expires`,
/// and the run deadline.
///
/// Yields exactly one outcome: the check's own, a
/// [`CheckFailure::Timeout`] when the per-check timer fires first, or
/// [`CheckFailure::Cancelled`] when the run deadline comes first.
pub async fn race<F>(
    deadline: &Deadline,
    kind: CheckKind,
    expires: Instant,
    check: F,
) -> Result<(), CheckFailure>
where
    F: Future<Output = Result<(), CheckFailure>>,
{
    match deadline.run {
        Some(run) if run < expires => timeout_at(run, check)
            .await
            .unwrap_or(Err(CheckFailure::Cancelled)),
        _ => timeout_at(expires, check)
            .await
            .unwrap_or(Err(CheckFailure::Timeout {
                kind,
                seconds: deadline.seconds(),
            })),
    }
}
