//! Jittered sleeping between status checks.

use std::time::Duration;

use rand::Rng;
use serde::{Deserialize, Serialize};

/// An inclusive range of whole seconds to sleep for.
///
/// Serialized as a two-element `[min, max]` array. Bounds given in either
/// order are normalized so that `min <= max`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "(u64, u64)", into = "(u64, u64)")]
pub struct SleepRange {
    min: u64,
    max: u64,
}

impl SleepRange {
    pub fn new(a: u64, b: u64) -> Self {
        Self {
            min: a.min(b),
            max: a.max(b),
        }
    }

    /// A range that always yields `secs`.
    pub fn fixed(secs: u64) -> Self {
        Self::new(secs, secs)
    }

    pub fn min(&self) -> u64 {
        self.min
    }

    pub fn max(&self) -> u64 {
        self.max
    }

    /// Draw a whole number of seconds uniformly from the range.
    pub fn sample(&self) -> u64 {
        self.sample_with(&mut rand::thread_rng())
    }

    /// Draw from the range using the given RNG.
    pub fn sample_with<R: Rng + ?Sized>(&self, rng: &mut R) -> u64 {
        if self.min == self.max {
            return self.min;
        }
        rng.gen_range(self.min..=self.max)
    }

    /// Suspend the current task for a randomly drawn duration.
    pub async fn sleep(&self) {
        let secs = self.sample();
        if secs == 0 {
            tokio::task::yield_now().await;
            return;
        }
        tokio::time::sleep(Duration::from_secs(secs)).await;
    }
}

impl From<(u64, u64)> for SleepRange {
    fn from((a, b): (u64, u64)) -> Self {
        Self::new(a, b)
    }
}

impl From<SleepRange> for (u64, u64) {
    fn from(range: SleepRange) -> Self {
        (range.min, range.max)
    }
}
