//! Output formatting helpers.
//!
//! Results go to stdout; status lines go to stderr so output can be piped.

use anyhow::Result;
use colored::Colorize;
use serde::Serialize;

/// Print a progress line.
pub fn progress(msg: &str) {
    eprintln!("{}", msg.dimmed());
}

/// Print a success message.
pub fn success(msg: &str) {
    eprintln!("{} {}", "✓".green(), msg);
}

/// Print a value as pretty-printed JSON.
pub fn json_pretty<T: Serialize>(value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value)?;
    println!("{}", json);
    Ok(())
}
