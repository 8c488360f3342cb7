//! Generate command implementation.

use anyhow::{Context, Result};
use clap::Args;

use cantus_core::{GenerateClipPayload, PollOptions};
use cantus_http::GenerationClient;

use super::{StyleArgs, WaitArgs};
use crate::output;

#[derive(Args, Debug)]
pub struct GenerateArgs {
    /// Description of the song, or its lyrics when --tags and --title are set
    pub prompt: String,

    #[command(flatten)]
    pub style: StyleArgs,

    #[command(flatten)]
    pub wait: WaitArgs,
}

pub async fn run(client: &GenerationClient, args: GenerateArgs) -> Result<()> {
    let options = args.wait.apply(PollOptions::for_clips());
    let payload = args.style.apply(GenerateClipPayload::new(args.prompt));

    if options.wait {
        output::progress("Generating clips, this can take a few minutes...");
    }

    let clips = client
        .generate_clips(&payload, &options)
        .await
        .context("Failed to generate clips")?;

    output::success(&format!("{} clip(s) returned", clips.len()));
    output::json_pretty(&clips)?;

    Ok(())
}
