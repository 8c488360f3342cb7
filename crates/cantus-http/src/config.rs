//! Client configuration.

use std::time::Duration;

use cantus_core::{BaseUrl, Result};

/// Application API base URL.
pub const DEFAULT_API_BASE_URL: &str = "https://studio-api.suno.ai/api";

/// Identity provider client endpoint.
pub const DEFAULT_CLERK_BASE_URL: &str = "https://clerk.suno.com/v1/client";

/// Identity provider JS version the session endpoints expect.
pub const DEFAULT_CLERK_JS_VERSION: &str = "4.73.2";

/// Model used when a payload does not name one.
pub const DEFAULT_MODEL: &str = "chirp-v3-5";

/// Per-request HTTP timeout.
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Settings for a [`crate::GenerationClient`].
///
/// # Example
///
/// ```
/// use std::time::Duration;
/// use cantus_http::ClientConfig;
///
/// let config = ClientConfig::default()
///     .with_api_base_url("http://localhost:3000/api")
///     .unwrap()
///     .with_request_timeout(Duration::from_secs(30));
/// assert_eq!(config.api_base_url.as_str(), "http://localhost:3000/api");
/// ```
#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub api_base_url: BaseUrl,
    pub clerk_base_url: BaseUrl,
    pub clerk_js_version: String,
    pub default_model: String,
    pub request_timeout: Duration,
    /// Overrides the per-client synthetic user agent.
    pub user_agent: Option<String>,
    /// Sleep 1-2 seconds after each authentication, like a browser would.
    pub emulate_auth_delay: bool,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_base_url: BaseUrl::new(DEFAULT_API_BASE_URL).expect("default API URL is valid"),
            clerk_base_url: BaseUrl::new(DEFAULT_CLERK_BASE_URL)
                .expect("default identity URL is valid"),
            clerk_js_version: DEFAULT_CLERK_JS_VERSION.to_string(),
            default_model: DEFAULT_MODEL.to_string(),
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
            user_agent: None,
            emulate_auth_delay: false,
        }
    }
}

impl ClientConfig {
    pub fn with_api_base_url(mut self, url: &str) -> Result<Self> {
        self.api_base_url = BaseUrl::new(url)?;
        Ok(self)
    }

    pub fn with_clerk_base_url(mut self, url: &str) -> Result<Self> {
        self.clerk_base_url = BaseUrl::new(url)?;
        Ok(self)
    }

    pub fn with_clerk_js_version(mut self, version: impl Into<String>) -> Self {
        self.clerk_js_version = version.into();
        self
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.default_model = model.into();
        self
    }

    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    pub fn with_emulated_auth_delay(mut self, enabled: bool) -> Self {
        self.emulate_auth_delay = enabled;
        self
    }
}
