//! Subcommand implementations.

pub mod billing;
pub mod clip;
pub mod concat;
pub mod extend;
pub mod feed;
pub mod generate;
pub mod get_lyrics;
pub mod lyrics;

use std::time::Duration;

use anyhow::{Context, Result};
use clap::Args;
use tracing::debug;

use cantus_core::{Cookie, GenerateClipPayload, PollOptions, SleepRange};
use cantus_http::{ClientConfig, GenerationClient};

use crate::cli::{Commands, ConnectionArgs};

pub async fn handle(cmd: Commands, connection: &ConnectionArgs) -> Result<()> {
    let client = connect(connection)?;

    match cmd {
        Commands::Generate(args) => generate::run(&client, args).await,
        Commands::Extend(args) => extend::run(&client, args).await,
        Commands::Concat(args) => concat::run(&client, args).await,
        Commands::Lyrics(args) => lyrics::run(&client, args).await,
        Commands::GetLyrics(args) => get_lyrics::run(&client, args).await,
        Commands::Feed(args) => feed::run(&client, args).await,
        Commands::Clip(args) => clip::run(&client, args).await,
        Commands::Billing(args) => billing::run(&client, args).await,
    }
}

/// Build a client from the connection flags.
pub fn connect(connection: &ConnectionArgs) -> Result<GenerationClient> {
    let cookie = connection
        .cookie
        .as_deref()
        .filter(|c| !c.trim().is_empty())
        .context("No session cookie. Pass --cookie or set SUNO_COOKIE.")?;

    let mut config = ClientConfig::default();
    if let Some(url) = &connection.api_url {
        config = config.with_api_base_url(url).context("Invalid API URL")?;
    }
    if let Some(url) = &connection.clerk_url {
        config = config
            .with_clerk_base_url(url)
            .context("Invalid identity provider URL")?;
    }

    debug!(
        api = %config.api_base_url,
        clerk = %config.clerk_base_url,
        "Connecting"
    );
    GenerationClient::with_config(Cookie::new(cookie), config).context("Failed to create client")
}

/// Polling flags shared by the commands that wait for a job.
#[derive(Args, Debug, Default)]
pub struct WaitArgs {
    /// Return as soon as the job is created
    #[arg(long)]
    pub no_wait: bool,

    /// Stop waiting after this many seconds and print the last result
    #[arg(long)]
    pub timeout_secs: Option<u64>,

    /// Shortest pause between status checks, in seconds
    #[arg(long)]
    pub sleep_min: Option<u64>,

    /// Longest pause between status checks, in seconds
    #[arg(long)]
    pub sleep_max: Option<u64>,
}

impl WaitArgs {
    /// Overlay the flags onto an operation's default poll options.
    pub fn apply(&self, mut options: PollOptions) -> PollOptions {
        if self.no_wait {
            options = options.no_wait();
        }
        if let Some(secs) = self.timeout_secs {
            options = options.with_timeout(Duration::from_secs(secs));
        }
        if self.sleep_min.is_some() || self.sleep_max.is_some() {
            let current = options.wait_sleep_range;
            let range = SleepRange::new(
                self.sleep_min.unwrap_or(current.min()),
                self.sleep_max.unwrap_or(current.max()),
            );
            options = options.with_sleep_range(range);
        }
        options
    }
}

/// Style flags shared by `generate` and `extend`.
#[derive(Args, Debug, Default)]
pub struct StyleArgs {
    /// Style tags, e.g. "folk, acoustic"; with --title, the prompt is used as lyrics
    #[arg(long)]
    pub tags: Option<String>,

    /// Song title; with --tags, the prompt is used as lyrics
    #[arg(long)]
    pub title: Option<String>,

    /// Model version, e.g. chirp-v3-5
    #[arg(long)]
    pub model: Option<String>,

    /// Generate without vocals
    #[arg(long)]
    pub instrumental: bool,
}

impl StyleArgs {
    pub fn apply(self, mut payload: GenerateClipPayload) -> GenerateClipPayload {
        if let Some(tags) = self.tags {
            payload = payload.with_tags(tags);
        }
        if let Some(title) = self.title {
            payload = payload.with_title(title);
        }
        if let Some(model) = self.model {
            payload = payload.with_model(model);
        }
        if self.instrumental {
            payload = payload.instrumental(true);
        }
        payload
    }
}
