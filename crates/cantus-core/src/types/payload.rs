//! Request payloads for the generation endpoints.

use serde::{Deserialize, Serialize};

/// Payload for creating a batch of clips.
///
/// When both `tags` and `title` are set the prompt is treated as custom
/// lyrics; otherwise it is also sent as a description for the service to
/// write lyrics from.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateClipPayload {
    pub prompt: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub make_instrumental: Option<bool>,
    /// Model version, e.g. `chirp-v3-5`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mv: Option<String>,
}

impl GenerateClipPayload {
    pub fn new(prompt: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
            ..Self::default()
        }
    }

    pub fn with_tags(mut self, tags: impl Into<String>) -> Self {
        self.tags = Some(tags.into());
        self
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn with_model(mut self, mv: impl Into<String>) -> Self {
        self.mv = Some(mv.into());
        self
    }

    pub fn instrumental(mut self, make_instrumental: bool) -> Self {
        self.make_instrumental = Some(make_instrumental);
        self
    }

    /// True when the caller supplied custom lyrics (both tags and title).
    pub fn is_custom(&self) -> bool {
        self.tags.is_some() && self.title.is_some()
    }
}

/// Payload for extending an existing clip.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtendClipPayload {
    #[serde(flatten)]
    pub base: GenerateClipPayload,
    /// The clip to continue.
    pub continue_clip_id: String,
    /// Position to continue from as `mm:ss`; the end of the clip when unset.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub continue_at: Option<String>,
}

impl ExtendClipPayload {
    pub fn new(continue_clip_id: impl Into<String>, base: GenerateClipPayload) -> Self {
        Self {
            base,
            continue_clip_id: continue_clip_id.into(),
            continue_at: None,
        }
    }

    pub fn at(mut self, continue_at: impl Into<String>) -> Self {
        self.continue_at = Some(continue_at.into());
        self
    }
}

/// Payload for generating lyrics from a description.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateLyricsPayload {
    pub prompt: String,
}

impl GenerateLyricsPayload {
    pub fn new(prompt: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
        }
    }
}
