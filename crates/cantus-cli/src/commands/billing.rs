//! Billing command implementation.

use anyhow::{Context, Result};
use clap::Args;

use cantus_http::GenerationClient;

use crate::output;

#[derive(Args, Debug)]
pub struct BillingArgs {}

pub async fn run(client: &GenerationClient, _args: BillingArgs) -> Result<()> {
    let billing = client
        .get_billing_info()
        .await
        .context("Failed to get billing info")?;

    output::json_pretty(&billing)?;

    Ok(())
}
