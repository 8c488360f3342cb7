//! Concat command implementation.

use anyhow::{Context, Result};
use clap::Args;

use cantus_http::GenerationClient;

use crate::output;

#[derive(Args, Debug)]
pub struct ConcatArgs {
    /// Extended clip to stitch into the whole song
    pub clip_id: String,
}

pub async fn run(client: &GenerationClient, args: ConcatArgs) -> Result<()> {
    let clip = client
        .concatenate(&args.clip_id)
        .await
        .context("Failed to concatenate clip")?;

    output::success(&format!("Full song {} is {}", clip.id, clip.status));
    output::json_pretty(&clip)?;

    Ok(())
}
