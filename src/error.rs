//! Typed error hierarchy for the purview-dsg crate.
//!
//! Every variant maps to a real failure boundary:
//! - `Config` covers missing base-URL configuration. It is raised before any
//!   request is built, so it never carries transport context.
//! - `Api` covers non-success responses from Graph. The raw body is kept
//!   because Graph error payloads carry the diagnostic `code` and `message`.
//! - `Network` wraps `reqwest::Error` for transport failures (DNS, TCP, TLS)
//!   that never produced a status code.
//! - `Parse` wraps `serde_json::Error` for the optional decode steps.

use reqwest::StatusCode;

/// Unified error type for all purview-dsg operations.
#[derive(Debug, thiserror::Error)]
pub enum PurviewError {
    /// Required configuration (e.g. the Purview base URL) is missing.
    #[error("configuration error: {0}")]
    Config(String),

    /// Graph returned a non-success HTTP status code.
    #[error("API error {status}: {body}")]
    Api {
        /// The HTTP status code returned by Graph.
        status: StatusCode,
        /// The raw response body text, or an empty string if none was sent.
        body: String,
    },

    /// A response body could not be decoded into the expected shape.
    #[error("failed to parse response: {0}")]
    Parse(#[from] serde_json::Error),

    /// A network-level failure occurred before a response was received.
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),
}

impl PurviewError {
    /// Returns the HTTP status for `Api` errors, `None` otherwise.
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            PurviewError::Api { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// Convenience alias used throughout the library.
pub type Result<T> = std::result::Result<T, PurviewError>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error;

    #[test]
    fn config_error_displays_message() {
        let err = PurviewError::Config("PURVIEW_BASE_URL is not set".to_string());
        let msg = err.to_string();
        assert!(msg.contains("configuration error"));
        assert!(msg.contains("PURVIEW_BASE_URL"));
        assert!(err.status().is_none());
    }

    #[test]
    fn api_error_preserves_status_and_body() {
        let err = PurviewError::Api {
            status: StatusCode::FORBIDDEN,
            body: r#"{"error":{"code":"Forbidden","message":"Missing scope"}}"#.to_string(),
        };
        let msg = err.to_string();
        assert!(msg.contains("403"), "display should include status code");
        assert!(
            msg.contains("Missing scope"),
            "display should include response body"
        );
        assert_eq!(err.status(), Some(StatusCode::FORBIDDEN));
    }

    #[test]
    fn parse_error_wraps_serde_json() {
        let json_err: serde_json::Error =
            serde_json::from_str::<String>("{{bad json}}").unwrap_err();
        let err = PurviewError::Parse(json_err);
        assert!(err.to_string().contains("failed to parse response"));
        assert!(
            err.source().is_some(),
            "Parse variant should chain to serde_json::Error"
        );
    }

    #[test]
    fn error_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<PurviewError>();
    }
}
