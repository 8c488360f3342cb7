//! CLI argument definitions.

use clap::{Args, Parser, Subcommand};

use crate::commands::{billing, clip, concat, extend, feed, generate, get_lyrics, lyrics};

/// Generate songs and lyrics with a browser session cookie.
#[derive(Parser, Debug)]
#[command(name = "cantus")]
#[command(author, version = env!("CANTUS_VERSION"), about, long_about = None)]
pub struct Cli {
    #[command(flatten)]
    pub connection: ConnectionArgs,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Output logs as JSON
    #[arg(long, global = true)]
    pub json_logs: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Where to connect and as whom.
#[derive(Args, Debug)]
pub struct ConnectionArgs {
    /// Session cookie copied from a signed-in browser
    #[arg(long, env = "SUNO_COOKIE", hide_env_values = true, global = true)]
    pub cookie: Option<String>,

    /// Application API base URL
    #[arg(long, env = "CANTUS_API_URL", global = true)]
    pub api_url: Option<String>,

    /// Identity provider client URL
    #[arg(long, env = "CANTUS_CLERK_URL", global = true)]
    pub clerk_url: Option<String>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Create clips from a description or custom lyrics
    Generate(generate::GenerateArgs),

    /// Continue an existing clip
    Extend(extend::ExtendArgs),

    /// Stitch an extended clip into the whole song
    Concat(concat::ConcatArgs),

    /// Generate lyrics from a prompt
    Lyrics(lyrics::LyricsArgs),

    /// Fetch a lyrics job
    GetLyrics(get_lyrics::GetLyricsArgs),

    /// List clips from the feed
    Feed(feed::FeedArgs),

    /// Fetch a single clip
    Clip(clip::ClipArgs),

    /// Show credits and plan information
    Billing(billing::BillingArgs),
}
