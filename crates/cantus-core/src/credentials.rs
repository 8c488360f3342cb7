//! Durable credential type.

use std::fmt;

/// The long-lived cookie used to obtain sessions from the identity provider.
///
/// The cookie is supplied once when a client is built and never changes for
/// the lifetime of that client.
///
/// # Security
///
/// The value is never exposed in Debug output to prevent accidental logging.
///
/// # Example
///
/// ```
/// use cantus_core::Cookie;
///
/// let cookie = Cookie::new("__client=abc; __session=def");
/// assert!(!format!("{:?}", cookie).contains("abc"));
/// ```
#[derive(Clone)]
pub struct Cookie(String);

impl Cookie {
    /// Wrap a raw cookie header value.
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Returns the raw header value.
    ///
    /// # Security
    ///
    /// Use this only when building the identity provider request headers.
    pub fn expose(&self) -> &str {
        &self.0
    }

    /// Returns true if the cookie carries no content.
    pub fn is_empty(&self) -> bool {
        self.0.trim().is_empty()
    }
}

impl fmt::Debug for Cookie {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Cookie").field(&"[REDACTED]").finish()
    }
}
