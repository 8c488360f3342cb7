//! Cookie-to-token session exchange against the identity provider.

use async_trait::async_trait;
use reqwest::header::{COOKIE, HeaderValue};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use tokio::sync::RwLock;
use tracing::{debug, info, instrument};

use cantus_core::casing;
use cantus_core::error::{AuthError, InvalidInputError};
use cantus_core::{Authenticator, BaseUrl, BearerToken, Cookie, Result, SessionId, SleepRange};

use crate::config::ClientConfig;
use crate::transport::{WireResponse, http_error, transport_error};

/// Current-client descriptor returned by the identity provider.
#[derive(Debug, Deserialize)]
struct ClientDescriptor {
    response: Option<ClientState>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ClientState {
    last_active_session_id: Option<String>,
}

/// Reply of the token renewal call.
#[derive(Debug, Deserialize)]
struct TokenReply {
    jwt: Option<String>,
}

#[derive(Debug)]
struct SessionState {
    id: SessionId,
    token: BearerToken,
}

/// Session obtained by exchanging a durable cookie with the identity
/// provider.
///
/// Starts empty. Each [`Authenticator::authenticate`] call looks up the
/// cookie's active session, renews a token for it and replaces whatever
/// session was held before. Nothing here is persisted.
pub struct ClerkSession {
    http: reqwest::Client,
    base: BaseUrl,
    js_version: String,
    cookie: HeaderValue,
    emulate_delay: bool,
    state: RwLock<Option<SessionState>>,
}

impl ClerkSession {
    /// Create an unauthenticated session for `cookie`.
    ///
    /// `http` should carry the client's user agent and timeout.
    pub fn new(http: reqwest::Client, cookie: &Cookie, config: &ClientConfig) -> Result<Self> {
        if cookie.is_empty() {
            return Err(InvalidInputError::Other {
                message: "cookie must not be empty".to_string(),
            }
            .into());
        }
        let mut cookie =
            HeaderValue::from_str(cookie.expose()).map_err(|_| InvalidInputError::Cookie)?;
        cookie.set_sensitive(true);

        Ok(Self {
            http,
            base: config.clerk_base_url.clone(),
            js_version: config.clerk_js_version.clone(),
            cookie,
            emulate_delay: config.emulate_auth_delay,
            state: RwLock::new(None),
        })
    }

    /// Returns the current session identifier, if authenticated.
    pub async fn session_id(&self) -> Option<SessionId> {
        self.state.read().await.as_ref().map(|s| s.id.clone())
    }

    /// Look up the cookie's active session.
    #[instrument(skip(self))]
    async fn fetch_session_id(&self) -> Result<SessionId> {
        debug!("Fetching session descriptor");

        let request = self
            .http
            .get(self.base.as_str())
            .query(&[("_clerk_js_version", self.js_version.as_str())]);
        let descriptor: ClientDescriptor = self.read(request).await?;

        descriptor
            .response
            .and_then(|state| state.last_active_session_id)
            .map(SessionId::new)
            .ok_or_else(|| AuthError::NoActiveSession.into())
    }

    /// Renew a bearer token scoped to `id`.
    #[instrument(skip(self, id))]
    async fn renew_token(&self, id: &SessionId) -> Result<BearerToken> {
        debug!("Renewing session token");

        let url = self.base.join(&format!("/sessions/{}/tokens", id.as_str()));
        let request = self
            .http
            .post(url)
            .query(&[("_clerk_js_version", self.js_version.as_str())]);
        let reply: TokenReply = self.read(request).await?;

        reply
            .jwt
            .filter(|jwt| !jwt.is_empty())
            .map(BearerToken::new)
            .ok_or_else(|| AuthError::MissingToken.into())
    }

    async fn read<R: DeserializeOwned>(&self, request: reqwest::RequestBuilder) -> Result<R> {
        let response = request
            .header(COOKIE, self.cookie.clone())
            .send()
            .await
            .map_err(transport_error)?;

        let status = response.status();
        let body = response.text().await.map_err(transport_error)?;
        let reply = WireResponse::new(status.as_u16(), body);

        if !status.is_success() {
            return Err(http_error(&reply).into());
        }

        let value = casing::to_caller(&reply.json()?);
        Ok(serde_json::from_value(value)?)
    }
}

#[async_trait]
impl Authenticator for ClerkSession {
    #[instrument(skip(self))]
    async fn authenticate(&self) -> Result<()> {
        info!("Authenticating with cookie");

        let id = self.fetch_session_id().await?;
        let token = self.renew_token(&id).await?;

        *self.state.write().await = Some(SessionState { id, token });
        info!("Session established");

        if self.emulate_delay {
            SleepRange::new(1, 2).sleep().await;
        }
        Ok(())
    }

    async fn token(&self) -> Option<BearerToken> {
        self.state.read().await.as_ref().map(|s| s.token.clone())
    }
}

impl std::fmt::Debug for ClerkSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClerkSession")
            .field("base", &self.base)
            .field("js_version", &self.js_version)
            .field("cookie", &"[REDACTED]")
            .field("session", &"[REDACTED]")
            .finish()
    }
}
