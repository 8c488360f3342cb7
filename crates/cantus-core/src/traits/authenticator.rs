//! Session authenticator trait.

use async_trait::async_trait;

use crate::Result;
use crate::tokens::BearerToken;

/// Holds the session derived from a durable credential and renews it on
/// demand.
///
/// The transport reads [`Authenticator::token`] immediately before every
/// request and calls [`Authenticator::authenticate`] when the service
/// answers 401. Each successful `authenticate` fully replaces the session.
/// Implementations do not retry internally.
#[async_trait]
pub trait Authenticator: Send + Sync {
    /// Exchange the credential for a fresh session and store its token.
    async fn authenticate(&self) -> Result<()>;

    /// Returns the current bearer token, if a session has been established.
    async fn token(&self) -> Option<BearerToken>;
}
