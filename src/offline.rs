//! Offline evaluation of a prompt/response pair.
//!
//! Each text slot carries a mode flag. A slot set to [`EVALUATE_OFFLINE`]
//! is submitted through [`process_content`]; any other value skips it.
//! The prompt goes out first as `uploadText` at `sequence_no`, then the
//! response as `downloadText` at `sequence_no + 1`. The response always
//! takes `sequence_no + 1`, even when the prompt slot was skipped.
//!
//! Submissions run strictly in order and the first failure aborts the
//! rest. A submitted prompt cannot be rolled back if the response fails.

use crate::client::GraphClient;
use crate::error::Result;
use crate::payload::{DOWNLOAD_TEXT, UPLOAD_TEXT, build_process_content_request};
use crate::process_content::process_content;

/// Mode value that selects a slot for offline evaluation.
pub const EVALUATE_OFFLINE: &str = "evaluateOffline";

/// Returned once every selected slot has been accepted.
pub const OFFLINE_TASKS_ACCEPTED: &str = "OK";

/// Inputs for [`enqueue_offline_tasks`].
#[derive(Debug, Clone)]
pub struct OfflineTaskRequest<'a> {
    /// Etag from the protection scope lookup, shared by both submissions.
    pub etag: Option<&'a str>,
    /// Application name reported in the entry and app metadata.
    pub name: &'a str,
    /// Entra application id used as the policy location.
    pub application_id: &'a str,
    /// [`EVALUATE_OFFLINE`] to submit the prompt.
    pub upload_text_mode: &'a str,
    /// [`EVALUATE_OFFLINE`] to submit the response.
    pub download_text_mode: &'a str,
    /// Text sent as `uploadText`.
    pub prompt: &'a str,
    /// Text sent as `downloadText`.
    pub response: &'a str,
    /// Correlation id grouping the prompt and the response.
    pub session_id: &'a str,
    /// Sequence number of the prompt; the response uses the next one.
    pub sequence_no: i64,
}

/// Submits the selected slots for offline evaluation.
///
/// Makes no request at all when neither mode is [`EVALUATE_OFFLINE`].
///
/// # Errors
///
/// Any error from [`process_content`]. A failed prompt submission means
/// the response is never sent.
pub async fn enqueue_offline_tasks(
    client: &GraphClient,
    access_token: &str,
    request: &OfflineTaskRequest<'_>,
) -> Result<&'static str> {
    if request.upload_text_mode == EVALUATE_OFFLINE {
        let body = build_process_content_request(
            request.prompt,
            request.name,
            request.sequence_no,
            request.session_id,
            UPLOAD_TEXT,
            request.application_id,
        );
        tracing::info!(
            session_id = request.session_id,
            sequence_no = request.sequence_no,
            "submitting prompt for offline evaluation"
        );
        process_content(client, access_token, request.etag, &body).await?;
    }

    if request.download_text_mode == EVALUATE_OFFLINE {
        let sequence_no = request.sequence_no.saturating_add(1);
        let body = build_process_content_request(
            request.response,
            request.name,
            sequence_no,
            request.session_id,
            DOWNLOAD_TEXT,
            request.application_id,
        );
        tracing::info!(
            session_id = request.session_id,
            sequence_no,
            "submitting response for offline evaluation"
        );
        process_content(client, access_token, request.etag, &body).await?;
    }

    Ok(OFFLINE_TASKS_ACCEPTED)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::PurviewConfig;
    use crate::error::PurviewError;

    fn request(upload: &'static str, download: &'static str) -> OfflineTaskRequest<'static> {
        OfflineTaskRequest {
            etag: None,
            name: "app",
            application_id: "app-id",
            upload_text_mode: upload,
            download_text_mode: download,
            prompt: "p",
            response: "r",
            session_id: "s",
            sequence_no: 0,
        }
    }

    #[tokio::test]
    async fn no_selected_slot_makes_no_request() {
        // No Purview base URL: any attempted submission would fail with a
        // config error, so success proves nothing was sent.
        let client = GraphClient::new(PurviewConfig::default()).unwrap();
        let outcome = enqueue_offline_tasks(&client, "tok", &request("skip", "evaluateInline"))
            .await
            .unwrap();
        assert_eq!(outcome, "OK");
    }

    #[tokio::test]
    async fn selected_slot_without_base_url_is_config_error() {
        let client = GraphClient::new(PurviewConfig::default()).unwrap();
        let err = enqueue_offline_tasks(&client, "tok", &request("skip", EVALUATE_OFFLINE))
            .await
            .unwrap_err();
        assert!(matches!(err, PurviewError::Config(_)));
    }
}
