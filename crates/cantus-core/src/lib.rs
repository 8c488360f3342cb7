//! cantus-core - Core types and the generation polling engine.
//!
//! Everything here is independent of the HTTP stack: the status codes and
//! payload shapes of the generation service, the key-casing bridge between
//! the wire and the public types, and [`poll::wait_for`], which turns a
//! "job created" reply into a settled result.

pub mod casing;
pub mod credentials;
pub mod error;
pub mod poll;
pub mod reflow;
pub mod status;
pub mod tokens;
pub mod traits;
pub mod types;

pub use credentials::Cookie;
pub use error::Error;
pub use poll::{PollOptions, Pollable, SleepRange};
pub use status::Status;
pub use tokens::{BearerToken, SessionId};
pub use traits::Authenticator;
pub use types::{
    BaseUrl, Clip, ClipMetadata, ExtendClipPayload, GenerateClipPayload, GenerateLyricsPayload,
    Lyrics,
};

/// Result type alias using the crate's Error type.
pub type Result<T> = std::result::Result<T, Error>;
