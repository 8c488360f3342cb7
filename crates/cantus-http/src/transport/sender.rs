//! Putting a prepared request on the wire.

use async_trait::async_trait;
use reqwest::Method;
use serde_json::Value;
use tracing::{debug, trace};

use cantus_core::error::{Error, TransportError};
use cantus_core::{BaseUrl, BearerToken, Result};

/// A request after the pipeline's request stages have run.
#[derive(Debug, Clone, PartialEq)]
pub struct WireRequest {
    pub method: Method,
    /// Path relative to the API base, starting with `/`.
    pub path: String,
    /// Query parameters as a flat JSON object.
    pub query: Option<Value>,
    pub body: Option<Value>,
}

impl WireRequest {
    pub fn get(path: impl Into<String>) -> Self {
        Self {
            method: Method::GET,
            path: path.into(),
            query: None,
            body: None,
        }
    }

    pub fn post(path: impl Into<String>) -> Self {
        Self {
            method: Method::POST,
            path: path.into(),
            query: None,
            body: None,
        }
    }

    pub fn with_query(mut self, query: Value) -> Self {
        self.query = Some(query);
        self
    }

    pub fn with_body(mut self, body: Value) -> Self {
        self.body = Some(body);
        self
    }

    /// Query parameters as string pairs, in object order.
    pub fn query_pairs(&self) -> Vec<(String, String)> {
        match &self.query {
            Some(Value::Object(map)) => map
                .iter()
                .filter(|(_, v)| !v.is_null())
                .map(|(k, v)| {
                    let value = match v {
                        Value::String(s) => s.clone(),
                        other => other.to_string(),
                    };
                    (k.clone(), value)
                })
                .collect(),
            _ => Vec::new(),
        }
    }
}

/// A raw reply: status code and body text.
#[derive(Debug, Clone, PartialEq)]
pub struct WireResponse {
    pub status: u16,
    pub body: String,
}

impl WireResponse {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    pub fn is_unauthorized(&self) -> bool {
        self.status == 401
    }

    /// Parse the body as JSON; an empty body reads as `null`.
    pub fn json(&self) -> Result<Value> {
        if self.body.trim().is_empty() {
            return Ok(Value::Null);
        }
        Ok(serde_json::from_str(&self.body)?)
    }
}

/// Sends one prepared request with whatever token is current.
///
/// The transport's retry policy calls this once, or twice when the first
/// attempt comes back 401.
#[async_trait]
pub trait Sender: Send + Sync {
    async fn send(&self, request: &WireRequest, token: Option<&BearerToken>)
    -> Result<WireResponse>;
}

/// [`Sender`] backed by a shared `reqwest` client.
#[derive(Debug, Clone)]
pub struct ReqwestSender {
    client: reqwest::Client,
    base: BaseUrl,
}

impl ReqwestSender {
    pub fn new(client: reqwest::Client, base: BaseUrl) -> Self {
        Self { client, base }
    }

    pub fn base(&self) -> &BaseUrl {
        &self.base
    }
}

#[async_trait]
impl Sender for ReqwestSender {
    async fn send(
        &self,
        request: &WireRequest,
        token: Option<&BearerToken>,
    ) -> Result<WireResponse> {
        let url = self.base.join(&request.path);
        debug!(method = %request.method, %url, authed = token.is_some(), "Sending request");

        let mut builder = self.client.request(request.method.clone(), &url);

        let query = request.query_pairs();
        if !query.is_empty() {
            builder = builder.query(&query);
        }
        if let Some(body) = &request.body {
            builder = builder.json(body);
        }
        if let Some(token) = token {
            builder = builder.bearer_auth(token.as_str());
        }

        let response = builder.send().await.map_err(transport_error)?;
        let status = response.status().as_u16();
        let body = response.text().await.map_err(transport_error)?;
        trace!(status, "Received response");

        Ok(WireResponse { status, body })
    }
}

/// Map a `reqwest` failure onto the transport error variants.
pub(crate) fn transport_error(err: reqwest::Error) -> Error {
    let message = err.to_string();
    let err = if err.is_timeout() {
        TransportError::Timeout { message }
    } else if err.is_connect() {
        TransportError::Connection { message }
    } else {
        TransportError::Other { message }
    };
    Error::Transport(err)
}
