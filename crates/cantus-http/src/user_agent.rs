//! Synthetic browser user agents.

use rand::Rng;
use rand::seq::SliceRandom;

const PLATFORMS: &[&str] = &[
    "Windows NT 10.0; Win64; x64",
    "Macintosh; Intel Mac OS X 10_15_7",
    "X11; Linux x86_64",
];

const CHROME_MAJOR: (u32, u32) = (120, 131);

/// Build a random desktop Chrome user agent string.
///
/// Called once per client so every request from that client looks like the
/// same browser.
pub fn random_chrome_user_agent() -> String {
    let mut rng = rand::thread_rng();
    let platform = PLATFORMS.choose(&mut rng).copied().unwrap_or(PLATFORMS[0]);
    let major = rng.gen_range(CHROME_MAJOR.0..=CHROME_MAJOR.1);
    let build = rng.gen_range(6000..=6800);
    let patch = rng.gen_range(0..=200);

    format!(
        "Mozilla/5.0 ({platform}) AppleWebKit/537.36 (KHTML, like Gecko) \
         Chrome/{major}.0.{build}.{patch} Safari/537.36"
    )
}
