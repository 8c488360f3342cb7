//! Ordered request and response transforms.

use std::fmt;
use std::sync::Arc;

use serde_json::Value;

use cantus_core::casing::{self, KeyCase};

use super::sender::WireRequest;

/// A pure rewrite applied to every outgoing request.
pub trait RequestStage: Send + Sync {
    fn name(&self) -> &'static str;
    fn apply(&self, request: WireRequest) -> WireRequest;
}

/// A pure rewrite applied to every successful reply body.
pub trait ResponseStage: Send + Sync {
    fn name(&self) -> &'static str;
    fn apply(&self, body: Value) -> Value;
}

/// Rewrites body and query keys into the wire convention.
#[derive(Debug, Clone, Copy)]
pub struct WireKeys;

impl RequestStage for WireKeys {
    fn name(&self) -> &'static str {
        "wire-keys"
    }

    fn apply(&self, mut request: WireRequest) -> WireRequest {
        request.body = request.body.map(|b| casing::transcode_keys(&b, KeyCase::Snake));
        request.query = request.query.map(|q| casing::transcode_keys(&q, KeyCase::Snake));
        request
    }
}

/// Rewrites reply keys into the caller convention.
#[derive(Debug, Clone, Copy)]
pub struct CallerKeys;

impl ResponseStage for CallerKeys {
    fn name(&self) -> &'static str {
        "caller-keys"
    }

    fn apply(&self, body: Value) -> Value {
        casing::transcode_keys(&body, KeyCase::Camel)
    }
}

/// The request and response stages a transport runs, in order.
#[derive(Clone, Default)]
pub struct Pipeline {
    request_stages: Vec<Arc<dyn RequestStage>>,
    response_stages: Vec<Arc<dyn ResponseStage>>,
}

impl Pipeline {
    /// An empty pipeline that passes everything through.
    pub fn new() -> Self {
        Self::default()
    }

    /// Key casing in both directions.
    pub fn standard() -> Self {
        Self::new()
            .with_request_stage(WireKeys)
            .with_response_stage(CallerKeys)
    }

    pub fn with_request_stage(mut self, stage: impl RequestStage + 'static) -> Self {
        self.request_stages.push(Arc::new(stage));
        self
    }

    pub fn with_response_stage(mut self, stage: impl ResponseStage + 'static) -> Self {
        self.response_stages.push(Arc::new(stage));
        self
    }

    /// Run every request stage in order.
    pub fn prepare(&self, request: WireRequest) -> WireRequest {
        self.request_stages
            .iter()
            .fold(request, |req, stage| stage.apply(req))
    }

    /// Run every response stage in order.
    pub fn finish(&self, body: Value) -> Value {
        self.response_stages
            .iter()
            .fold(body, |body, stage| stage.apply(body))
    }
}

impl fmt::Debug for Pipeline {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Pipeline")
            .field(
                "request_stages",
                &self.request_stages.iter().map(|s| s.name()).collect::<Vec<_>>(),
            )
            .field(
                "response_stages",
                &self.response_stages.iter().map(|s| s.name()).collect::<Vec<_>>(),
            )
            .finish()
    }
}
