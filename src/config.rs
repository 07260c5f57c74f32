//! Base-URL configuration for the Graph and Purview endpoints.
//!
//! The library never reads the environment on its own: callers build a
//! [`PurviewConfig`] and hand it to [`GraphClient`](crate::client::GraphClient).
//! [`PurviewConfig::from_env`] is the thin boundary adapter used by the CLI.
//!
//! The Purview base URL is optional at construction time so that the label
//! endpoints (which only need the Graph base URL) stay usable without it.
//! Operations that require it call [`PurviewConfig::purview_base_url`], which
//! fails with [`PurviewError::Config`] before any request is sent.

use crate::error::{PurviewError, Result};

/// Public Graph v1.0 endpoint, used when `GRAPH_BASE_URL` is not set.
pub const DEFAULT_GRAPH_BASE_URL: &str = "https://graph.microsoft.com/v1.0";

/// Environment variable holding the Purview (Graph `/me`) base URL.
pub const PURVIEW_BASE_URL_VAR: &str = "PURVIEW_BASE_URL";

/// Environment variable overriding the Graph base URL for label calls.
pub const GRAPH_BASE_URL_VAR: &str = "GRAPH_BASE_URL";

/// Base URLs for the Purview and Graph endpoints.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PurviewConfig {
    purview_base_url: Option<String>,
    graph_base_url: String,
}

impl PurviewConfig {
    /// Creates a config with the given Purview base URL and the default
    /// Graph base URL.
    pub fn new(purview_base_url: &str) -> Self {
        PurviewConfig {
            purview_base_url: normalize(Some(purview_base_url)),
            graph_base_url: DEFAULT_GRAPH_BASE_URL.to_string(),
        }
    }

    /// Overrides the Graph base URL used by the label endpoints.
    /// A blank value keeps the default.
    pub fn with_graph_base_url(mut self, graph_base_url: &str) -> Self {
        if let Some(url) = normalize(Some(graph_base_url)) {
            self.graph_base_url = url;
        }
        self
    }

    /// Builds a config from raw optional values. Blank strings are treated
    /// the same as unset ones.
    pub fn from_values(purview_base_url: Option<&str>, graph_base_url: Option<&str>) -> Self {
        PurviewConfig {
            purview_base_url: normalize(purview_base_url),
            graph_base_url: normalize(graph_base_url)
                .unwrap_or_else(|| DEFAULT_GRAPH_BASE_URL.to_string()),
        }
    }

    /// Reads `PURVIEW_BASE_URL` and `GRAPH_BASE_URL` from the process
    /// environment.
    ///
    /// A missing Purview base URL is not an error here; it surfaces as
    /// [`PurviewError::Config`] when an operation that needs it is called.
    pub fn from_env() -> Self {
        let purview = std::env::var(PURVIEW_BASE_URL_VAR).ok();
        let graph = std::env::var(GRAPH_BASE_URL_VAR).ok();
        Self::from_values(purview.as_deref(), graph.as_deref())
    }

    /// Returns the Purview base URL, or a configuration error if unset.
    pub fn purview_base_url(&self) -> Result<&str> {
        self.purview_base_url.as_deref().ok_or_else(|| {
            PurviewError::Config(format!("{PURVIEW_BASE_URL_VAR} is required but not set"))
        })
    }

    /// Returns the Graph base URL (never empty).
    pub fn graph_base_url(&self) -> &str {
        &self.graph_base_url
    }
}

impl Default for PurviewConfig {
    fn default() -> Self {
        Self::from_values(None, None)
    }
}

/// Trims whitespace and trailing slashes; blank input becomes `None`.
fn normalize(value: Option<&str>) -> Option<String> {
    let trimmed = value?.trim().trim_end_matches('/');
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn graph_base_url_defaults_to_public_v1() {
        let config = PurviewConfig::from_values(Some("https://purview.example"), None);
        assert_eq!(config.graph_base_url(), "https://graph.microsoft.com/v1.0");
    }

    #[test]
    fn missing_purview_base_url_is_config_error() {
        let config = PurviewConfig::from_values(None, None);
        let err = config.purview_base_url().unwrap_err();
        assert!(matches!(err, PurviewError::Config(_)));
        assert!(err.to_string().contains("PURVIEW_BASE_URL"));
    }

    #[test]
    fn blank_values_are_treated_as_unset() {
        let config = PurviewConfig::from_values(Some("   "), Some(""));
        assert!(config.purview_base_url().is_err());
        assert_eq!(config.graph_base_url(), DEFAULT_GRAPH_BASE_URL);
    }

    #[test]
    fn trailing_slashes_are_trimmed() {
        let config = PurviewConfig::new("https://graph.microsoft.com/beta/")
            .with_graph_base_url("http://localhost:8080/");
        assert_eq!(
            config.purview_base_url().unwrap(),
            "https://graph.microsoft.com/beta"
        );
        assert_eq!(config.graph_base_url(), "http://localhost:8080");
    }

    #[test]
    fn blank_graph_override_keeps_default() {
        let config = PurviewConfig::new("https://p").with_graph_base_url(" ");
        assert_eq!(config.graph_base_url(), DEFAULT_GRAPH_BASE_URL);
    }
}
