//! Content submission for compliance evaluation.
//!
//! POST `{purview}/me/dataSecurityAndGovernance/processContent` with a
//! [`ProcessContentRequest`] body. The etag from
//! [`compute_protection_scope`](crate::protection_scopes::compute_protection_scope)
//! is sent back as `If-None-Match` so the service can tell whether the
//! caller's protection scope is stale.
//!
//! Permission: `Content.Process.User` (delegated).

use serde::{Deserialize, Serialize};

use crate::client::{GraphClient, ResponseHeaders};
use crate::error::Result;
use crate::payload::ProcessContentRequest;

pub(crate) const PROCESS_CONTENT_PATH: &str = "me/dataSecurityAndGovernance/processContent";

/// Raw outcome of a `processContent` call.
///
/// The headers are kept whole because the service reports decisions in
/// them as well as in the body.
#[derive(Debug, Clone)]
pub struct ProcessContentResult {
    /// Raw response body.
    pub body: String,
    /// All response headers.
    pub headers: ResponseHeaders,
}

impl ProcessContentResult {
    /// Decodes the body into a [`ProcessContentResponse`].
    pub fn decode(&self) -> Result<ProcessContentResponse> {
        Ok(serde_json::from_str(&self.body)?)
    }
}

// ── Response types ─────────────────────────────────────────────────────

/// Reference: <https://learn.microsoft.com/en-us/graph/api/resources/processcontentresponse>
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProcessContentResponse {
    /// `"notModified"` when the caller's cached scope is current, or
    /// `"modified"` when scopes must be recomputed.
    #[serde(default)]
    pub protection_scope_state: Option<String>,

    /// Actions the caller must enforce on the content.
    #[serde(default)]
    pub policy_actions: Vec<PolicyAction>,

    /// Per-entry failures reported by the service.
    #[serde(default)]
    pub processing_errors: Vec<ProcessingError>,
}

impl ProcessContentResponse {
    /// True when the service reports that the submitted etag is stale.
    pub fn scope_modified(&self) -> bool {
        self.protection_scope_state.as_deref() == Some("modified")
    }
}

/// A policy decision returned for the submitted content.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PolicyAction {
    /// Concrete action type, e.g. `microsoft.graph.restrictAccessAction`.
    #[serde(rename = "@odata.type", default)]
    pub odata_type: Option<String>,

    /// e.g. `"restrictAccess"`, `"browserRestriction"`.
    #[serde(default)]
    pub action: Option<String>,

    /// e.g. `"block"`, `"warn"`.
    #[serde(default)]
    pub restriction_action: Option<String>,
}

/// An error raised while evaluating content.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProcessingError {
    /// Service error code.
    #[serde(default)]
    pub error_code: Option<String>,

    /// Human-readable detail.
    #[serde(default)]
    pub message: Option<String>,
}

// ── Endpoint function ──────────────────────────────────────────────────

/// Submits content for evaluation.
///
/// `If-None-Match` is always sent; with no etag it carries an empty value
/// rather than being omitted.
///
/// # Errors
///
/// - `PurviewError::Config`: the Purview base URL is not configured.
/// - `PurviewError::Api`: non-success status, with the body preserved.
/// - `PurviewError::Network`: transport-level failure.
pub async fn process_content(
    client: &GraphClient,
    access_token: &str,
    etag: Option<&str>,
    request: &ProcessContentRequest,
) -> Result<ProcessContentResult> {
    let url = client.purview_url(PROCESS_CONTENT_PATH)?;
    let etag = etag.unwrap_or_default();
    let response = client
        .post_json(access_token, &url, request, &[("If-None-Match", etag)])
        .await?;

    Ok(ProcessContentResult {
        body: response.body,
        headers: response.headers,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_block_decision() {
        let result = ProcessContentResult {
            body: r#"{
                "protectionScopeState": "modified",
                "policyActions": [
                    {
                        "@odata.type": "microsoft.graph.restrictAccessAction",
                        "action": "restrictAccess",
                        "restrictionAction": "block"
                    }
                ],
                "processingErrors": []
            }"#
            .to_string(),
            headers: ResponseHeaders::default(),
        };
        let decoded = result.decode().unwrap();
        assert!(decoded.scope_modified());
        assert_eq!(decoded.policy_actions.len(), 1);
        assert_eq!(
            decoded.policy_actions[0].restriction_action.as_deref(),
            Some("block")
        );
        assert!(decoded.processing_errors.is_empty());
    }

    #[test]
    fn decodes_sparse_response() {
        let result = ProcessContentResult {
            body: r#"{"protectionScopeState":"notModified"}"#.to_string(),
            headers: ResponseHeaders::default(),
        };
        let decoded = result.decode().unwrap();
        assert!(!decoded.scope_modified());
        assert!(decoded.policy_actions.is_empty());
    }

    #[test]
    fn decode_fails_on_empty_body() {
        let result = ProcessContentResult {
            body: String::new(),
            headers: ResponseHeaders::default(),
        };
        assert!(result.decode().is_err());
    }
}
