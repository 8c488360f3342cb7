//! Get lyrics command implementation.

use anyhow::{Context, Result};
use clap::Args;

use cantus_http::GenerationClient;

use crate::output;

#[derive(Args, Debug)]
pub struct GetLyricsArgs {
    /// Lyrics job id
    pub id: String,
}

pub async fn run(client: &GenerationClient, args: GetLyricsArgs) -> Result<()> {
    let lyrics = client
        .get_lyrics(&args.id)
        .await
        .context("Failed to get lyrics")?;

    output::json_pretty(&lyrics)?;

    Ok(())
}
