//! Request admission: bounded concurrency plus a sliding one-second window
//!
//! This module handles:
//! - Capping in-flight requests via a semaphore
//! - Capping the rate at which new requests start via a timestamp window
//!
//! Together they bound both burstiness and throughput to roughly `rate_limit`
//! requests per second.

use std::collections::VecDeque;
use std::sync::{Mutex, PoisonError};
use std::time::Duration;
use tokio::sync::{Semaphore, SemaphorePermit};
use tokio::time::Instant;

/// Length of the sliding window
pub const WINDOW_SPAN: Duration = Duration::from_secs(1);

/// Start times of the requests admitted within the trailing window
#[derive(Debug)]
pub struct RateWindow {
    /// Maximum number of request starts per span
    limit: usize,

    /// Window length
    span: Duration,

    /// Admission timestamps, oldest first
    requests: VecDeque<Instant>,
}

impl RateWindow {
    /// Creates an empty one-second window admitting `limit` requests
    pub fn new(limit: usize) -> Self {
        Self {
            limit,
            span: WINDOW_SPAN,
            requests: VecDeque::with_capacity(limit),
        }
    }

    /// Drops timestamps that have left the window
    fn prune(&mut self, now: Instant) {
        while let Some(&oldest) = self.requests.front() {
            if now.saturating_duration_since(oldest) >= self.span {
                self.requests.pop_front();
            } else {
                break;
            }
        }
    }

    /// Tries to admit a request starting at `now`
    ///
    /// # Returns
    ///
    /// * `Ok(())` - Admitted; `now` has been recorded
    /// * `Err(Duration)` - Window is full; retry after this long
    pub fn try_admit(&mut self, now: Instant) -> Result<(), Duration> {
        self.prune(now);

        match self.requests.front() {
            Some(&oldest) if self.requests.len() >= self.limit => {
                Err(self.span - now.saturating_duration_since(oldest))
            }
            _ => {
                self.requests.push_back(now);
                Ok(())
            }
        }
    }

    /// Number of requests currently in the window
    pub fn len(&self) -> usize {
        self.requests.len()
    }

    /// Returns whether the window holds no requests
    pub fn is_empty(&self) -> bool {
        self.requests.is_empty()
    }
}

/// Permission to issue one request
///
/// The concurrency slot is released when this is dropped, on every exit path.
pub struct RequestSlot<'a> {
    _permit: SemaphorePermit<'a>,

    /// Time spent waiting for the window to open
    pub waited: Duration,
}

/// Scheduler gating every network request
///
/// The window is only touched while holding a concurrency slot, and only
/// inside a short lock with no await point, so dropping a pending
/// [`Scheduler::acquire`] never leaves it half-updated.
pub struct Scheduler {
    /// Limits concurrent in-flight requests
    semaphore: Semaphore,

    /// Sliding window of request start times
    window: Mutex<RateWindow>,
}

impl Scheduler {
    /// Creates a scheduler allowing `rate_limit` concurrent requests and
    /// `rate_limit` request starts per second
    pub fn new(rate_limit: usize) -> Self {
        Self {
            semaphore: Semaphore::new(rate_limit),
            window: Mutex::new(RateWindow::new(rate_limit)),
        }
    }

    /// Waits until a request may be issued
    ///
    /// Returns `None` only if the semaphore has been closed.
    pub async fn acquire(&self) -> Option<RequestSlot<'_>> {
        let permit = self.semaphore.acquire().await.ok()?;
        let mut waited = Duration::ZERO;

        loop {
            let verdict = self
                .window
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .try_admit(Instant::now());

            match verdict {
                Ok(()) => break,
                Err(wait) => {
                    tracing::trace!("Rate window full, waiting {:?}", wait);
                    waited += wait;
                    tokio::time::sleep(wait).await;
                }
            }
        }

        Some(RequestSlot {
            _permit: permit,
            waited,
        })
    }

    /// Number of concurrency slots currently free
    pub fn available_slots(&self) -> usize {
        self.semaphore.available_permits()
    }
}
