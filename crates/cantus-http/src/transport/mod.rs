//! Authenticated transport.
//!
//! A request flows through three explicit steps: the pipeline's request
//! stages (key casing), the replay policy (send, and on 401 re-authenticate
//! and send once more), then the status check and response stages.

mod pipeline;
mod replay;
mod sender;

use std::fmt;
use std::sync::Arc;

use reqwest::StatusCode;
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, instrument};

use cantus_core::error::HttpError;
use cantus_core::{Authenticator, Result};

pub use pipeline::{CallerKeys, Pipeline, RequestStage, ResponseStage, WireKeys};
pub use replay::ReplayOnUnauthorized;
pub use sender::{ReqwestSender, Sender, WireRequest, WireResponse};
pub(crate) use sender::transport_error;

/// Sends requests to the application API on behalf of a session.
///
/// Cheap to clone; clones share the sender and the authenticator, so a
/// re-authentication by one is seen by all.
#[derive(Clone)]
pub struct Transport {
    sender: Arc<dyn Sender>,
    auth: Arc<dyn Authenticator>,
    pipeline: Pipeline,
    policy: ReplayOnUnauthorized,
}

impl Transport {
    /// A transport with the standard key-casing pipeline.
    pub fn new(sender: Arc<dyn Sender>, auth: Arc<dyn Authenticator>) -> Self {
        Self::with_pipeline(sender, auth, Pipeline::standard())
    }

    pub fn with_pipeline(
        sender: Arc<dyn Sender>,
        auth: Arc<dyn Authenticator>,
        pipeline: Pipeline,
    ) -> Self {
        Self {
            sender,
            auth,
            pipeline,
            policy: ReplayOnUnauthorized,
        }
    }

    /// The authenticator this transport renews sessions with.
    pub fn authenticator(&self) -> &Arc<dyn Authenticator> {
        &self.auth
    }

    /// Run a request through the pipeline and return the caller-cased body.
    #[instrument(skip(self, request), fields(method = %request.method, path = %request.path))]
    pub async fn execute(&self, request: WireRequest) -> Result<Value> {
        let request = self.pipeline.prepare(request);
        let response = self
            .policy
            .execute(self.sender.as_ref(), self.auth.as_ref(), &request)
            .await?;

        if response.status != StatusCode::OK.as_u16() {
            debug!(status = response.status, "Request failed");
            return Err(http_error(&response).into());
        }

        Ok(self.pipeline.finish(response.json()?))
    }

    /// GET `path` and decode the reply.
    pub async fn get<R: DeserializeOwned>(&self, path: &str, query: Option<Value>) -> Result<R> {
        let mut request = WireRequest::get(path);
        request.query = query;
        let body = self.execute(request).await?;
        Ok(serde_json::from_value(body)?)
    }

    /// POST `body` to `path` and decode the reply.
    pub async fn post<B, R>(&self, path: &str, body: &B) -> Result<R>
    where
        B: Serialize + ?Sized,
        R: DeserializeOwned,
    {
        let request = WireRequest::post(path).with_body(serde_json::to_value(body)?);
        let body = self.execute(request).await?;
        Ok(serde_json::from_value(body)?)
    }
}

impl fmt::Debug for Transport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Transport")
            .field("pipeline", &self.pipeline)
            .field("policy", &self.policy)
            .finish_non_exhaustive()
    }
}

/// Build an [`HttpError`] from a failed reply, preferring the body text.
pub(crate) fn http_error(response: &WireResponse) -> HttpError {
    let body = response.body.trim();
    let message = if body.is_empty() {
        StatusCode::from_u16(response.status)
            .ok()
            .and_then(|s| s.canonical_reason())
            .unwrap_or_default()
            .to_string()
    } else {
        body.to_string()
    };
    HttpError::new(response.status, message)
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use cantus_core::BearerToken;
    use cantus_core::error::Error;
    use serde_json::json;
    use std::sync::Mutex;

    /// Echoes the prepared request back as the reply body.
    struct EchoSender {
        status: u16,
        last: Mutex<Option<WireRequest>>,
    }

    #[async_trait]
    impl Sender for EchoSender {
        async fn send(
            &self,
            request: &WireRequest,
            _token: Option<&BearerToken>,
        ) -> Result<WireResponse> {
            *self.last.lock().unwrap() = Some(request.clone());
            let body = if self.status == 200 {
                json!({ "echo_body": request.body }).to_string()
            } else {
                String::new()
            };
            Ok(WireResponse::new(self.status, body))
        }
    }

    struct NoAuth;

    #[async_trait]
    impl Authenticator for NoAuth {
        async fn authenticate(&self) -> Result<()> {
            Ok(())
        }

        async fn token(&self) -> Option<BearerToken> {
            None
        }
    }

    fn transport(status: u16) -> (Transport, Arc<EchoSender>) {
        let sender = Arc::new(EchoSender {
            status,
            last: Mutex::new(None),
        });
        (Transport::new(sender.clone(), Arc::new(NoAuth)), sender)
    }

    #[tokio::test]
    async fn cases_keys_both_ways() {
        let (transport, sender) = transport(200);

        let body = transport
            .execute(WireRequest::post("/generate/v2/").with_body(json!({ "makeInstrumental": true })))
            .await
            .unwrap();

        let sent = sender.last.lock().unwrap().clone().unwrap();
        assert_eq!(sent.body, Some(json!({ "make_instrumental": true })));
        assert_eq!(body, json!({ "echoBody": { "makeInstrumental": true } }));
    }

    #[tokio::test]
    async fn non_ok_status_is_http_error() {
        let (transport, _) = transport(404);

        let err = transport
            .execute(WireRequest::get("/clip/missing"))
            .await
            .unwrap_err();

        match err {
            Error::Http(e) => {
                assert_eq!(e.status, 404);
                assert_eq!(e.message, "Not Found");
            }
            other => panic!("expected http error, got {other:?}"),
        }
    }

    #[test]
    fn http_error_prefers_body() {
        let err = http_error(&WireResponse::new(500, " upstream exploded \n"));
        assert_eq!(err.message, "upstream exploded");
    }
}
