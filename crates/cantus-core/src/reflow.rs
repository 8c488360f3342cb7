//! Lyrics text reflow.

/// Normalize raw lyrics text: drop blank lines and join the rest with `\n`.
///
/// Lines keep their own indentation and trailing text; only lines that are
/// empty after trimming are removed. Windows line endings are folded too.
pub fn reflow_lyrics(raw: &str) -> String {
    raw.split('\n')
        .map(|line| line.strip_suffix('\r').unwrap_or(line))
        .filter(|line| !line.trim().is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}
