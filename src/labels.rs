//! Sensitivity label retrieval for the Graph security API.
//!
//! This module covers the "sensitivityLabels" endpoint family:
//!
//! | Function | API Path |
//! |----------|----------|
//! | [`fetch_sensitivity_labels`] | GET `/security/dataSecurityAndGovernance/sensitivityLabels?$expand=rights,sublabels` |
//! | [`fetch_sublabel_rights`] | GET `.../sensitivityLabels/{labelId}/rights` |
//! | [`compute_label_inheritance`] | GET `.../sensitivityLabels/computeInheritance(...)` |
//!
//! All three return the raw body text. Label schemas change often, so
//! decoding is a separate, fallible step: [`decode_sensitivity_labels`],
//! [`decode_label_rights`] and [`decode_inherited_label`].
//!
//! ## Label id encoding
//!
//! Label ids are percent-encoded before they are placed in a URL. GUID ids
//! contain only unreserved characters and are emitted unchanged, so the
//! inheritance call still renders `labelIds=["id-1","id-2"]`.
//!
//! Encoding keeps the URL well-formed; it does not validate ids. Graph
//! decodes the path before parsing the function call, so an id containing
//! `"` or `]` still reaches it as a malformed list and comes back as a 400.

use serde::{Deserialize, Serialize};

use crate::client::GraphClient;
use crate::error::Result;

pub(crate) const SENSITIVITY_LABELS_PATH: &str =
    "security/dataSecurityAndGovernance/sensitivityLabels";

/// Locale requested from `computeInheritance`.
pub const INHERITANCE_LOCALE: &str = "en-US";

// ── Response types ─────────────────────────────────────────────────────

/// A sensitivity label as returned by Graph.
///
/// Only `id` is guaranteed; everything else defaults when the tenant or
/// the label type omits it. `sublabels` and `rights` are populated only
/// when requested via `$expand`.
///
/// Reference: <https://learn.microsoft.com/en-us/graph/api/resources/security-sensitivitylabel>
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SensitivityLabel {
    /// Label GUID.
    pub id: String,

    /// Internal label name.
    #[serde(default)]
    pub name: Option<String>,

    /// Name shown to users.
    #[serde(default)]
    pub display_name: Option<String>,

    /// Admin-facing description.
    #[serde(default)]
    pub description: Option<String>,

    /// Hover text shown in Office clients.
    #[serde(default)]
    pub tool_tip: Option<String>,

    /// Hex colour, e.g. `"#FF0000"`.
    #[serde(default)]
    pub color: Option<String>,

    /// Relative sensitivity; higher is more sensitive.
    #[serde(default)]
    pub sensitivity: Option<i32>,

    /// Whether the label can currently be applied.
    #[serde(default)]
    pub is_enabled: Option<bool>,

    /// Whether this is the tenant default label.
    #[serde(default)]
    pub is_default: Option<bool>,

    /// Whether the label applies encryption.
    #[serde(default)]
    pub has_protection: Option<bool>,

    /// Whether the label is published only to specific users.
    #[serde(default)]
    pub is_scoped_to_user: Option<bool>,

    /// Formats the label can be applied to (e.g. `"file"`, `"email"`).
    #[serde(default)]
    pub content_formats: Vec<String>,

    /// Child labels.
    #[serde(default)]
    pub sublabels: Vec<SensitivityLabel>,

    /// The caller's rights on content carrying this label.
    #[serde(default)]
    pub rights: Option<UsageRightsIncluded>,
}

/// Usage rights granted to the caller on protected content.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UsageRightsIncluded {
    /// Owner of the protected content.
    #[serde(default)]
    pub owner_email: Option<String>,

    /// User the rights were evaluated for.
    #[serde(default)]
    pub user_email: Option<String>,

    /// Comma-separated right flags, e.g. `"view, edit"`.
    #[serde(default)]
    pub value: Option<String>,
}

/// OData collection envelope `{ "value": [...] }`.
#[derive(Debug, Deserialize)]
pub struct ODataList<T> {
    /// Items in this page.
    pub value: Vec<T>,
}

// ── Path builders ──────────────────────────────────────────────────────

fn sensitivity_labels_path() -> String {
    format!("{SENSITIVITY_LABELS_PATH}?$expand=rights,sublabels")
}

fn sublabel_rights_path(label_id: &str) -> String {
    format!(
        "{SENSITIVITY_LABELS_PATH}/{}/rights",
        urlencoding::encode(label_id)
    )
}

/// Renders the `computeInheritance` function call with each id quoted.
fn label_inheritance_path<S: AsRef<str>>(label_ids: &[S]) -> String {
    let ids = label_ids
        .iter()
        .map(|id| format!("\"{}\"", urlencoding::encode(id.as_ref())))
        .collect::<Vec<_>>()
        .join(",");
    format!(
        "{SENSITIVITY_LABELS_PATH}/computeInheritance(labelIds=[{ids}],locale='{INHERITANCE_LOCALE}',contentFormats=[\"File\"])"
    )
}

// ── Endpoint functions ─────────────────────────────────────────────────

/// Lists the sensitivity labels available to the caller, with rights and
/// sublabels expanded.
///
/// # Errors
///
/// - `PurviewError::Api`: non-success status (e.g. 403 for a missing
///   `SensitivityLabels.Read` consent).
/// - `PurviewError::Network`: transport-level failure.
pub async fn fetch_sensitivity_labels(
    client: &GraphClient,
    access_token: &str,
) -> Result<String> {
    let url = client.graph_url(&sensitivity_labels_path());
    Ok(client.get_text(access_token, &url).await?.body)
}

/// Retrieves the caller's usage rights for one label.
///
/// # Errors
///
/// - `PurviewError::Api`: non-success status; 404 for an unknown label.
/// - `PurviewError::Network`: transport-level failure.
pub async fn fetch_sublabel_rights(
    client: &GraphClient,
    access_token: &str,
    label_id: &str,
) -> Result<String> {
    let url = client.graph_url(&sublabel_rights_path(label_id));
    Ok(client.get_text(access_token, &url).await?.body)
}

/// Computes the label a file should inherit from the given source labels.
///
/// # Errors
///
/// - `PurviewError::Api`: non-success status (e.g. 400 for an empty or
///   malformed id list).
/// - `PurviewError::Network`: transport-level failure.
pub async fn compute_label_inheritance<S: AsRef<str>>(
    client: &GraphClient,
    access_token: &str,
    label_ids: &[S],
) -> Result<String> {
    let url = client.graph_url(&label_inheritance_path(label_ids));
    Ok(client.get_text(access_token, &url).await?.body)
}

// ── Decoding ───────────────────────────────────────────────────────────

/// Decodes the body of [`fetch_sensitivity_labels`].
pub fn decode_sensitivity_labels(body: &str) -> Result<Vec<SensitivityLabel>> {
    let list: ODataList<SensitivityLabel> = serde_json::from_str(body)?;
    Ok(list.value)
}

/// Decodes the body of [`fetch_sublabel_rights`].
pub fn decode_label_rights(body: &str) -> Result<UsageRightsIncluded> {
    Ok(serde_json::from_str(body)?)
}

/// Decodes the body of [`compute_label_inheritance`].
pub fn decode_inherited_label(body: &str) -> Result<SensitivityLabel> {
    Ok(serde_json::from_str(body)?)
}
