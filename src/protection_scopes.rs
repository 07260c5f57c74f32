//! Protection scope lookup.
//!
//! POST `{purview}/me/dataSecurityAndGovernance/protectionScopes/compute`
//! returns the policies that apply to the signed-in user. The response
//! `etag` identifies that scope version and is later sent back as
//! `If-None-Match` on `processContent`.
//!
//! Permission: `ProtectionScopes.Compute.User` (delegated).

use serde_json::Value;

use crate::client::GraphClient;
use crate::error::Result;

pub(crate) const COMPUTE_PATH: &str = "me/dataSecurityAndGovernance/protectionScopes/compute";

/// Parsed protection scope body plus its version tag.
#[derive(Debug, Clone, PartialEq)]
pub struct ProtectionScope {
    /// The JSON body as returned by Graph.
    pub body: Value,
    /// The `etag` response header. `None` when the service omits it; the
    /// caller decides whether that is acceptable downstream.
    pub etag: Option<String>,
}

impl ProtectionScope {
    /// The etag, or an empty string when absent.
    pub fn etag_or_empty(&self) -> &str {
        self.etag.as_deref().unwrap_or_default()
    }
}

/// Computes the protection scopes for the token's user.
///
/// Sends an empty JSON object as the request body.
///
/// # Errors
///
/// - `PurviewError::Config`: the Purview base URL is not configured.
///   Returned before any request is sent.
/// - `PurviewError::Api`: non-success status, with the body preserved.
/// - `PurviewError::Parse`: the success body was not valid JSON.
/// - `PurviewError::Network`: transport-level failure.
pub async fn compute_protection_scope(
    client: &GraphClient,
    access_token: &str,
) -> Result<ProtectionScope> {
    let url = client.purview_url(COMPUTE_PATH)?;
    let response = client
        .post_json(access_token, &url, &serde_json::json!({}), &[])
        .await?;

    let body: Value = serde_json::from_str(&response.body).map_err(|e| {
        tracing::error!(url = %url, error = %e, "protection scope body is not valid JSON");
        e
    })?;
    let etag = response.headers.etag().map(str::to_owned);
    if etag.is_none() {
        tracing::debug!(url = %url, "protection scope response carried no etag");
    }

    Ok(ProtectionScope { body, etag })
}
