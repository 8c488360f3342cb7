//! Poll configuration.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::sleep::SleepRange;
use crate::status::Status;

/// Default upper bound on how long a poll keeps checking.
pub const DEFAULT_WAIT_TIMEOUT: Duration = Duration::from_millis(600_000);

/// Options controlling how a generation call waits for its result.
///
/// The defaults match the generic fallback: wait for every item to reach
/// `streaming` or `complete`, for at most ten minutes, sleeping 10 to 20
/// seconds between checks. Each operation has its own constructor with
/// its own terminal set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PollOptions {
    /// When false the call returns as soon as the job is created.
    pub wait: bool,
    /// Statuses that count as done.
    pub wait_statuses: Vec<Status>,
    /// Upper bound on the whole wait, measured from the start of the call.
    #[serde(with = "millis")]
    pub wait_timeout: Duration,
    /// Seconds to sleep before the first check and between checks.
    pub wait_sleep_range: SleepRange,
}

impl Default for PollOptions {
    fn default() -> Self {
        Self {
            wait: true,
            wait_statuses: vec![Status::Streaming, Status::Complete],
            wait_timeout: DEFAULT_WAIT_TIMEOUT,
            wait_sleep_range: SleepRange::new(10, 20),
        }
    }
}

impl PollOptions {
    /// Defaults for creating a batch of clips.
    pub fn for_clips() -> Self {
        Self::default().with_statuses([Status::Complete])
    }

    /// Defaults for extending a clip.
    pub fn for_extend() -> Self {
        Self::default().with_statuses([Status::Streaming, Status::Complete])
    }

    /// Defaults for generating lyrics.
    pub fn for_lyrics() -> Self {
        Self::default()
            .with_statuses([Status::Complete])
            .with_sleep_range(SleepRange::new(2, 5))
    }

    /// Do not wait; return the creation result as is.
    pub fn no_wait(mut self) -> Self {
        self.wait = false;
        self
    }

    pub fn with_wait(mut self, wait: bool) -> Self {
        self.wait = wait;
        self
    }

    pub fn with_statuses(mut self, statuses: impl IntoIterator<Item = Status>) -> Self {
        self.wait_statuses = statuses.into_iter().collect();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.wait_timeout = timeout;
        self
    }

    pub fn with_sleep_range(mut self, range: SleepRange) -> Self {
        self.wait_sleep_range = range;
        self
    }

    /// Returns true if `status` is in the terminal set.
    pub fn is_terminal(&self, status: Status) -> bool {
        self.wait_statuses.contains(&status)
    }
}

mod millis {
    use std::time::Duration;

    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u64(value.as_millis() as u64)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Duration, D::Error> {
        u64::deserialize(deserializer).map(Duration::from_millis)
    }
}
