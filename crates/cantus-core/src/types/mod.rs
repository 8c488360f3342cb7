//! Payload and result types for the generation service.

mod base_url;
mod clip;
mod lyrics;
mod nullable;
mod payload;

pub use base_url::BaseUrl;
pub use clip::{Clip, ClipMetadata, CreatedClips, Reaction};
pub use lyrics::{LYRICS_PLACEHOLDER_TEXT, Lyrics, LyricsJob};
pub use payload::{ExtendClipPayload, GenerateClipPayload, GenerateLyricsPayload};
