//! Extend command implementation.

use anyhow::{Context, Result};
use clap::Args;

use cantus_core::{ExtendClipPayload, GenerateClipPayload, PollOptions};
use cantus_http::GenerationClient;

use super::{StyleArgs, WaitArgs};
use crate::output;

#[derive(Args, Debug)]
pub struct ExtendArgs {
    /// Clip to continue
    pub clip_id: String,

    /// Lyrics for the continuation
    #[arg(long, default_value = "")]
    pub prompt: String,

    /// Where to continue from, e.g. "00:30" or seconds
    #[arg(long)]
    pub at: Option<String>,

    #[command(flatten)]
    pub style: StyleArgs,

    #[command(flatten)]
    pub wait: WaitArgs,
}

pub async fn run(client: &GenerationClient, args: ExtendArgs) -> Result<()> {
    let options = args.wait.apply(PollOptions::for_extend());
    let base = args.style.apply(GenerateClipPayload::new(args.prompt));
    let mut payload = ExtendClipPayload::new(args.clip_id, base);
    if let Some(at) = args.at {
        payload = payload.at(at);
    }

    if options.wait {
        output::progress("Extending clip...");
    }

    let clip = client
        .extend_clip(&payload, &options)
        .await
        .context("Failed to extend clip")?;

    output::success(&format!("Extension {} is {}", clip.id, clip.status));
    output::json_pretty(&clip)?;

    Ok(())
}
