//! cantus-http - reqwest-backed client for the generation service.
//!
//! [`GenerationClient`] is the entry point. Underneath it, [`ClerkSession`]
//! exchanges the caller's cookie for a bearer token and [`Transport`] sends
//! requests through the key-casing [`Pipeline`] and the
//! [`ReplayOnUnauthorized`] policy.

mod clerk;
mod client;
mod config;
mod endpoints;
mod transport;
mod user_agent;

pub use clerk::ClerkSession;
pub use client::GenerationClient;
pub use config::{
    ClientConfig, DEFAULT_API_BASE_URL, DEFAULT_CLERK_BASE_URL, DEFAULT_CLERK_JS_VERSION,
    DEFAULT_MODEL, DEFAULT_REQUEST_TIMEOUT,
};
pub use transport::{
    CallerKeys, Pipeline, ReplayOnUnauthorized, RequestStage, ReqwestSender, ResponseStage,
    Sender, Transport, WireKeys, WireRequest, WireResponse,
};
pub use user_agent::random_chrome_user_agent;
