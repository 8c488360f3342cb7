//! Re-authenticate and replay once on 401.

use tracing::{info, instrument, warn};

use cantus_core::error::Error;
use cantus_core::{Authenticator, Result};

use super::sender::{Sender, WireRequest, WireResponse};

/// Retry policy for authorization failures.
///
/// A 401 triggers one call to [`Authenticator::authenticate`] followed by
/// exactly one replay of the same request with the new token. Whatever the
/// replay returns is final, including a second 401. A failed
/// re-authentication surfaces as [`Error::Reauth`].
#[derive(Debug, Clone, Copy, Default)]
pub struct ReplayOnUnauthorized;

impl ReplayOnUnauthorized {
    #[instrument(skip_all, fields(method = %request.method, path = %request.path))]
    pub async fn execute(
        &self,
        sender: &dyn Sender,
        auth: &dyn Authenticator,
        request: &WireRequest,
    ) -> Result<WireResponse> {
        let response = send_with_current_token(sender, auth, request).await?;
        if !response.is_unauthorized() {
            return Ok(response);
        }

        warn!("Request unauthorized, re-authenticating");
        auth.authenticate().await.map_err(Error::reauth)?;
        info!("Re-authenticated, replaying request");

        send_with_current_token(sender, auth, request).await
    }
}

async fn send_with_current_token(
    sender: &dyn Sender,
    auth: &dyn Authenticator,
    request: &WireRequest,
) -> Result<WireResponse> {
    // Read the token right before sending so a concurrent re-authentication
    // is picked up.
    let token = auth.token().await;
    sender.send(request, token.as_ref()).await
}
