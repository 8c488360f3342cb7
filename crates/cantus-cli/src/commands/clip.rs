//! Clip command implementation.

use anyhow::{Context, Result};
use clap::Args;

use cantus_http::GenerationClient;

use crate::output;

#[derive(Args, Debug)]
pub struct ClipArgs {
    /// Clip id
    pub id: String,
}

pub async fn run(client: &GenerationClient, args: ClipArgs) -> Result<()> {
    let clip = client
        .get_clip(&args.id)
        .await
        .context("Failed to get clip")?;

    output::json_pretty(&clip)?;

    Ok(())
}
