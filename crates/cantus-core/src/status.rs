//! Generation status codes.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Lifecycle status of a generated clip or lyrics job.
///
/// Shared between wire replies and the poller's terminal sets. Values the
/// service adds later decode as [`Status::Unknown`] and never count as
/// terminal unless a caller asks for them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    Submitted,
    Queued,
    Streaming,
    Complete,
    Error,
    #[serde(other)]
    Unknown,
}

impl Status {
    /// Returns the wire string for this status.
    pub fn as_str(&self) -> &'static str {
        match self {
            Status::Submitted => "submitted",
            Status::Queued => "queued",
            Status::Streaming => "streaming",
            Status::Complete => "complete",
            Status::Error => "error",
            Status::Unknown => "unknown",
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
