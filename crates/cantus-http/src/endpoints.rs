//! Application endpoint paths and private wire shapes.

use serde::{Deserialize, Serialize};

use cantus_core::Clip;

/// Create clips, or extend one when the payload carries a continuation.
pub const GENERATE: &str = "/generate/v2/";

/// Stitch an extended clip into a whole song.
pub const CONCAT: &str = "/generate/concat/v2/";

/// Start a lyrics job.
pub const GENERATE_LYRICS: &str = "/generate/lyrics/";

/// Clip feed, optionally filtered by comma-separated ids.
pub const FEED: &str = "/feed/v2";

/// Account credits and plan.
pub const BILLING_INFO: &str = "/billing/info/";

/// Single clip by id.
pub fn clip(id: &str) -> String {
    format!("/clip/{id}")
}

/// Lyrics job by id.
pub fn lyrics(id: &str) -> String {
    format!("/generate/lyrics/{id}")
}

/// Request body for concatenation.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConcatRequest<'a> {
    pub clip_id: &'a str,
}

/// Query for the feed endpoint.
#[derive(Debug, Serialize)]
pub struct FeedQuery {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ids: Option<String>,
}

/// The feed has been seen both as a bare list and wrapped in `clips`.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum ClipList {
    Bare(Vec<Clip>),
    Wrapped { clips: Vec<Clip> },
}

impl ClipList {
    pub fn into_clips(self) -> Vec<Clip> {
        match self {
            ClipList::Bare(clips) | ClipList::Wrapped { clips } => clips,
        }
    }
}

/// A single-clip reply, possibly wrapped like a creation reply.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum SingleClip {
    Wrapped { clips: Vec<Clip> },
    Bare(Box<Clip>),
}
