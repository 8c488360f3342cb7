//! Feed command implementation.

use anyhow::{Context, Result};
use clap::Args;

use cantus_http::GenerationClient;

use crate::output;

#[derive(Args, Debug)]
pub struct FeedArgs {
    /// Clip ids to fetch (whole feed when omitted)
    pub ids: Vec<String>,
}

pub async fn run(client: &GenerationClient, args: FeedArgs) -> Result<()> {
    let clips = client
        .get_feed(&args.ids)
        .await
        .context("Failed to get feed")?;

    output::json_pretty(&clips)?;

    Ok(())
}
