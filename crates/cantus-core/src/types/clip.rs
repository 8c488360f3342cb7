//! Generated clip records.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::nullable::null_as_default;
use crate::status::Status;

/// A generated audio clip as returned by the feed and clip endpoints.
///
/// Only `id` and `status` are guaranteed; everything else may be missing
/// or null while a clip is still being produced.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Clip {
    pub id: String,
    pub status: Status,
    pub title: Option<String>,
    pub audio_url: Option<String>,
    pub video_url: Option<String>,
    pub image_url: Option<String>,
    pub image_large_url: Option<String>,
    pub is_video_pending: Option<bool>,
    pub major_model_version: Option<String>,
    pub model_name: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub metadata: ClipMetadata,
    pub is_liked: Option<bool>,
    pub user_id: Option<String>,
    pub display_name: Option<String>,
    pub handle: Option<String>,
    pub is_handle_updated: Option<bool>,
    pub avatar_image_url: Option<String>,
    pub is_trashed: Option<bool>,
    pub reaction: Option<Reaction>,
    pub created_at: Option<DateTime<Utc>>,
    pub play_count: Option<u64>,
    pub upvote_count: Option<u64>,
    pub is_public: Option<bool>,
}

/// Generation parameters echoed back on a clip.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClipMetadata {
    pub tags: Option<String>,
    pub prompt: Option<String>,
    pub gpt_description_prompt: Option<String>,
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub duration: Option<f64>,
    pub refund_credits: Option<bool>,
    pub stream: Option<bool>,
    pub error_type: Option<String>,
    pub error_message: Option<String>,
}

/// The current user's reaction to a clip.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Reaction {
    pub play_count: Option<u64>,
    pub skip_count: Option<u64>,
    pub flagged: Option<bool>,
    pub clip: Option<String>,
    pub updated_at: Option<DateTime<Utc>>,
}

/// Reply body of the create endpoint.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatedClips {
    pub clips: Vec<Clip>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn decodes_sparse_clip() {
        let clip: Clip = serde_json::from_value(json!({
            "id": "c1",
            "status": "submitted",
            "audioUrl": null
        }))
        .unwrap();

        assert_eq!(clip.id, "c1");
        assert_eq!(clip.status, Status::Submitted);
        assert!(clip.audio_url.is_none());
        assert_eq!(clip.metadata, ClipMetadata::default());
    }

    #[test]
    fn null_metadata_reads_as_default() {
        let clip: Clip = serde_json::from_value(json!({
            "id": "c1",
            "status": "queued",
            "metadata": null
        }))
        .unwrap();

        assert_eq!(clip.status, Status::Queued);
        assert_eq!(clip.metadata, ClipMetadata::default());
    }

    #[test]
    fn decodes_full_clip() {
        let clip: Clip = serde_json::from_value(json!({
            "id": "c2",
            "status": "complete",
            "title": "Night Drive",
            "audioUrl": "https://cdn1.suno.ai/c2.mp3",
            "metadata": { "tags": "synthwave", "type": "gen", "duration": 120.5 },
            "reaction": { "playCount": 2, "updatedAt": "2024-05-06T12:34:56.789Z" },
            "createdAt": "2024-05-06T12:30:00.000Z",
            "playCount": 10
        }))
        .unwrap();

        assert_eq!(clip.title.as_deref(), Some("Night Drive"));
        assert_eq!(clip.metadata.kind.as_deref(), Some("gen"));
        assert_eq!(clip.metadata.duration, Some(120.5));
        assert_eq!(clip.reaction.unwrap().play_count, Some(2));
        assert!(clip.created_at.is_some());
    }
}
