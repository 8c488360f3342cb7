//! Lyrics records.

use serde::{Deserialize, Serialize};

use super::nullable::null_as_default;
use crate::status::Status;

/// Text used for the placeholder returned when a lyrics job is not awaited.
pub const LYRICS_PLACEHOLDER_TEXT: &str = "Can not generate lyrics";

/// Generated lyrics.
///
/// The service leaves `id` out of the lyrics body, so the client fills it in
/// from the id it asked for. `text` and `title` read as empty when the
/// service sends them as null.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Lyrics {
    #[serde(default, deserialize_with = "null_as_default")]
    pub id: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub text: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub title: String,
    pub status: Status,
}

impl Lyrics {
    /// The record handed back for a lyrics job that was started but not awaited.
    pub fn placeholder(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            text: LYRICS_PLACEHOLDER_TEXT.to_string(),
            title: String::new(),
            status: Status::Error,
        }
    }
}

/// Reply body of the lyrics creation endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct LyricsJob {
    pub id: String,
}
