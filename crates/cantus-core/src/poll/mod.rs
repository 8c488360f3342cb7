//! Waiting for asynchronous generation jobs to settle.
//!
//! A generation call only creates a job. [`wait_for`] turns that into a
//! result by re-fetching the job's status until every tracked item is in
//! the terminal set, every item has failed, or the timeout runs out.
//!
//! Convergence is all-or-nothing over the batch. A batch where some items
//! failed while others are still pending keeps polling; a partial failure
//! does not end the wait early.

mod options;
mod sleep;

use std::future::Future;

use tokio::time::Instant;
use tracing::{debug, warn};

use crate::Result;
use crate::status::Status;
use crate::types::{Clip, Lyrics};

pub use options::{DEFAULT_WAIT_TIMEOUT, PollOptions};
pub use sleep::SleepRange;

/// Something whose progress can be read off status fields.
///
/// A single record reports one status; a batch reports one per item.
pub trait Pollable {
    fn statuses(&self) -> Vec<Status>;
}

impl Pollable for Clip {
    fn statuses(&self) -> Vec<Status> {
        vec![self.status]
    }
}

impl Pollable for Lyrics {
    fn statuses(&self) -> Vec<Status> {
        vec![self.status]
    }
}

impl<T: Pollable> Pollable for Vec<T> {
    fn statuses(&self) -> Vec<Status> {
        self.iter().flat_map(Pollable::statuses).collect()
    }
}

/// Where a batch stands relative to a terminal set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Convergence {
    /// Every item is in the terminal set.
    Complete,
    /// Every item is in the error state.
    Failed,
    /// Anything else, including mixed batches.
    Pending,
}

/// Classify a result against the terminal set.
pub fn assess<T: Pollable>(result: &T, terminal: &[Status]) -> Convergence {
    let statuses = result.statuses();
    if statuses.iter().all(|s| terminal.contains(s)) {
        Convergence::Complete
    } else if statuses.iter().all(|s| *s == Status::Error) {
        Convergence::Failed
    } else {
        Convergence::Pending
    }
}

/// Poll `check` until the result converges or `options.wait_timeout` elapses.
///
/// With `options.wait` unset, `seed` comes back untouched and `check` is
/// never called. Otherwise the first check happens after one jittered
/// sleep, and checks run strictly one after another.
///
/// Running out of time is not an error: the last fetched result is
/// returned as is, or `seed` if the timeout ran out before the first check.
/// Errors from `check` end the wait and are returned unchanged.
pub async fn wait_for<T, F, Fut>(options: &PollOptions, seed: T, mut check: F) -> Result<T>
where
    T: Pollable,
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T>>,
{
    if !options.wait {
        debug!("Not waiting, returning creation result");
        return Ok(seed);
    }

    let started = Instant::now();
    let mut last = None;
    let mut checks = 0u32;

    options.wait_sleep_range.sleep().await;

    while started.elapsed() < options.wait_timeout {
        let result = check().await?;
        checks += 1;

        match assess(&result, &options.wait_statuses) {
            Convergence::Complete => {
                debug!(checks, "Generation reached a terminal status");
                return Ok(result);
            }
            Convergence::Failed => {
                debug!(checks, "Generation failed for every item");
                return Ok(result);
            }
            Convergence::Pending => {}
        }

        last = Some(result);
        options.wait_sleep_range.sleep().await;
    }

    warn!(
        checks,
        timeout_ms = options.wait_timeout.as_millis() as u64,
        "Timed out waiting for generation, returning last result"
    );
    Ok(last.unwrap_or(seed))
}
