//! Lyrics command implementation.

use anyhow::{Context, Result};
use clap::Args;

use cantus_core::{GenerateLyricsPayload, PollOptions, Status};
use cantus_http::GenerationClient;

use super::WaitArgs;
use crate::output;

#[derive(Args, Debug)]
pub struct LyricsArgs {
    /// What the lyrics should be about
    pub prompt: String,

    #[command(flatten)]
    pub wait: WaitArgs,
}

pub async fn run(client: &GenerationClient, args: LyricsArgs) -> Result<()> {
    let options = args.wait.apply(PollOptions::for_lyrics());

    if options.wait {
        output::progress("Writing lyrics...");
    }

    let lyrics = client
        .generate_lyrics(&GenerateLyricsPayload::new(args.prompt), &options)
        .await
        .context("Failed to generate lyrics")?;

    if !options.wait {
        output::progress(&format!(
            "Not waiting. Run 'cantus get-lyrics {}' to fetch the result.",
            lyrics.id
        ));
    } else if lyrics.status == Status::Complete {
        output::success(&format!("Lyrics {} are ready", lyrics.id));
    } else {
        tracing::warn!(id = %lyrics.id, status = %lyrics.status, "Lyrics did not complete");
    }
    output::json_pretty(&lyrics)?;

    Ok(())
}
