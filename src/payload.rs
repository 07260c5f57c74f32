//! Request body for the `processContent` endpoint.
//!
//! The wire shape is fixed by Graph: field names are camelCase and the
//! content entry, its content and the application location each carry an
//! `@odata.type` discriminator. Every value is built, serialized, sent and
//! dropped within a single call.
//!
//! Reference: <https://learn.microsoft.com/en-us/graph/api/userdatasecurityandgovernance-processcontent>

use chrono::{SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

use crate::identifier::generate_entry_id;

/// Activity tag for prompt text sent by the user.
pub const UPLOAD_TEXT: &str = "uploadText";

/// Activity tag for response text returned to the user.
pub const DOWNLOAD_TEXT: &str = "downloadText";

/// Version reported for both the protected and the integrated app.
pub const APP_VERSION: &str = "1.0";

/// Platform reported in `deviceMetadata`.
pub const DEVICE_PLATFORM: &str = "Windows 11";

/// OS version reported in `deviceMetadata`.
pub const DEVICE_OS_VERSION: &str = "10.0";

const CONVERSATION_METADATA_TYPE: &str = "microsoft.graph.processConversationMetadata";
const TEXT_CONTENT_TYPE: &str = "microsoft.graph.textContent";
const APPLICATION_LOCATION_TYPE: &str = "microsoft.graph.policyLocationApplication";

// ── Wire types ─────────────────────────────────────────────────────────

/// Top-level `processContent` body.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProcessContentRequest {
    /// The content and the context it was produced in.
    pub content_to_process: ContentToProcess,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentToProcess {
    /// Always a single entry when built by [`build_process_content_request`].
    pub content_entries: Vec<ContentEntry>,
    /// Whether the text is going up to the app or coming back from it.
    pub activity_metadata: ActivityMetadata,
    /// Fixed device description.
    pub device_metadata: DeviceMetadata,
    /// The app whose content is protected.
    pub protected_app_metadata: ProtectedAppMetadata,
    /// The app integrating with Purview.
    pub integrated_app_metadata: IntegratedAppMetadata,
}

/// One unit of text (prompt or response) submitted for evaluation.
///
/// `sequence_number` orders entries within a conversation; the caller
/// supplies and increments it. `created_date_time` and
/// `modified_date_time` are identical ISO 8601 UTC stamps.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentEntry {
    /// Always `microsoft.graph.processConversationMetadata`.
    #[serde(rename = "@odata.type")]
    pub odata_type: String,
    /// Fresh v4 UUID per entry.
    pub identifier: String,
    /// The text itself.
    pub content: TextContent,
    /// Application name.
    pub name: String,
    /// Session id shared by a prompt and its response.
    pub correlation_id: String,
    /// Position within the conversation.
    pub sequence_number: i64,
    /// Always `false`; text is never cut.
    pub is_truncated: bool,
    /// Creation stamp.
    pub created_date_time: String,
    /// Same value as `created_date_time`.
    pub modified_date_time: String,
}

/// Plain-text content.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextContent {
    /// Always `microsoft.graph.textContent`.
    #[serde(rename = "@odata.type")]
    pub odata_type: String,
    /// The prompt or response text.
    pub data: String,
}

/// Direction of the text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActivityMetadata {
    /// [`UPLOAD_TEXT`] or [`DOWNLOAD_TEXT`].
    pub activity: String,
}

/// Device the content was produced on.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeviceMetadata {
    /// Reported operating system.
    pub operating_system_specifications: OperatingSystemSpecifications,
}

/// Operating system name and version.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OperatingSystemSpecifications {
    /// e.g. [`DEVICE_PLATFORM`].
    pub operating_system_platform: String,
    /// e.g. [`DEVICE_OS_VERSION`].
    pub operating_system_version: String,
}

/// The protected application and where its policies apply.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProtectedAppMetadata {
    /// Application name.
    pub name: String,
    /// Always [`APP_VERSION`].
    pub version: String,
    /// Entra application reference.
    pub application_location: ApplicationLocation,
}

/// The integrating application. Carries no location.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IntegratedAppMetadata {
    /// Application name.
    pub name: String,
    /// Always [`APP_VERSION`].
    pub version: String,
}

/// Points the policy engine at the Entra application that owns the content.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApplicationLocation {
    /// Always `microsoft.graph.policyLocationApplication`.
    #[serde(rename = "@odata.type")]
    pub odata_type: String,
    /// Entra application (client) id.
    pub value: String,
}

// ── Builder ────────────────────────────────────────────────────────────

/// Builds a single-entry `processContent` request.
///
/// Total over its inputs: `activity` is normally [`UPLOAD_TEXT`] or
/// [`DOWNLOAD_TEXT`] but is passed through as given, and no string or
/// sequence number is validated.
pub fn build_process_content_request(
    content_data: &str,
    name: &str,
    sequence_no: i64,
    correlation_id: &str,
    activity: &str,
    application_id: &str,
) -> ProcessContentRequest {
    let now = Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true);

    let entry = ContentEntry {
        odata_type: CONVERSATION_METADATA_TYPE.to_string(),
        identifier: generate_entry_id(),
        content: TextContent {
            odata_type: TEXT_CONTENT_TYPE.to_string(),
            data: content_data.to_string(),
        },
        name: name.to_string(),
        correlation_id: correlation_id.to_string(),
        sequence_number: sequence_no,
        is_truncated: false,
        created_date_time: now.clone(),
        modified_date_time: now,
    };

    ProcessContentRequest {
        content_to_process: ContentToProcess {
            content_entries: vec![entry],
            activity_metadata: ActivityMetadata {
                activity: activity.to_string(),
            },
            device_metadata: DeviceMetadata {
                operating_system_specifications: OperatingSystemSpecifications {
                    operating_system_platform: DEVICE_PLATFORM.to_string(),
                    operating_system_version: DEVICE_OS_VERSION.to_string(),
                },
            },
            protected_app_metadata: ProtectedAppMetadata {
                name: name.to_string(),
                version: APP_VERSION.to_string(),
                application_location: ApplicationLocation {
                    odata_type: APPLICATION_LOCATION_TYPE.to_string(),
                    value: application_id.to_string(),
                },
            },
            integrated_app_metadata: IntegratedAppMetadata {
                name: name.to_string(),
                version: APP_VERSION.to_string(),
            },
        },
    }
}
