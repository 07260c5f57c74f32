//! Bearer-authenticated HTTP wrapper for the Graph data security and
//! governance endpoints.
//!
//! `GraphClient` wraps a `reqwest::Client` and a [`PurviewConfig`]. Unlike a
//! token-owning client, it never acquires or caches credentials: every call
//! takes the caller's access token and attaches it as `Authorization: Bearer`.
//!
//! Request lifecycle:
//! - The response body is always read as text before the status is checked,
//!   so a non-success status surfaces as [`PurviewError::Api`] with Graph's
//!   diagnostic body intact (`error_for_status()` would discard it).
//! - Transport failures propagate unchanged as [`PurviewError::Network`].
//! - No retry, backoff or timeout is applied here; those belong to the
//!   transport the caller configures via [`GraphClient::with_http_client`].

use std::collections::BTreeMap;

use reqwest::header::HeaderMap;
use reqwest::{Client, Method, RequestBuilder};
use serde::Serialize;

use crate::config::PurviewConfig;
use crate::error::{PurviewError, Result};

/// Response headers keyed by lower-cased header name.
///
/// Repeated headers are joined with `", "`, the same folding HTTP allows for
/// list-valued fields. Keys are kept sorted so output is stable.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ResponseHeaders(BTreeMap<String, String>);

impl ResponseHeaders {
    /// Case-insensitive header lookup.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.0.get(&name.to_ascii_lowercase()).map(String::as_str)
    }

    /// The `etag` header, if the service sent one.
    pub fn etag(&self) -> Option<&str> {
        self.get("etag")
    }

    /// Number of distinct header names.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// True when the response carried no headers.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<&HeaderMap> for ResponseHeaders {
    fn from(map: &HeaderMap) -> Self {
        let mut headers: BTreeMap<String, String> = BTreeMap::new();
        for (name, value) in map {
            let value = String::from_utf8_lossy(value.as_bytes()).into_owned();
            headers
                .entry(name.as_str().to_ascii_lowercase())
                .and_modify(|existing| {
                    existing.push_str(", ");
                    existing.push_str(&value);
                })
                .or_insert(value);
        }
        ResponseHeaders(headers)
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for ResponseHeaders {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        ResponseHeaders(
            iter.into_iter()
                .map(|(k, v)| (k.into().to_ascii_lowercase(), v.into()))
                .collect(),
        )
    }
}

/// A successful response: headers and the raw body text.
#[derive(Debug, Clone)]
pub struct ApiResponse {
    /// Response headers.
    pub headers: ResponseHeaders,
    /// Body as text, unparsed.
    pub body: String,
}

/// Authenticated HTTP client for the Graph / Purview REST API.
///
/// Cheap to clone: `reqwest::Client` is reference-counted internally.
#[derive(Debug, Clone)]
pub struct GraphClient {
    client: Client,
    config: PurviewConfig,
}

impl GraphClient {
    /// Builds a client with a default `reqwest::Client`.
    pub fn new(config: PurviewConfig) -> Result<Self> {
        let client = Client::builder()
            .user_agent(concat!("purview-dsg/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(GraphClient { client, config })
    }

    /// Builds a client around a caller-configured `reqwest::Client`
    /// (timeouts, proxies, retry middleware are the caller's concern).
    pub fn with_http_client(config: PurviewConfig, client: Client) -> Self {
        GraphClient { client, config }
    }

    /// Joins `path` onto the Purview base URL.
    ///
    /// Fails with [`PurviewError::Config`] when the base URL is not
    /// configured, before any request is built.
    pub fn purview_url(&self, path: &str) -> Result<String> {
        let base = self.config.purview_base_url()?;
        Ok(format!("{base}/{}", path.trim_start_matches('/')))
    }

    /// Joins `path` onto the Graph base URL.
    pub fn graph_url(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.config.graph_base_url(),
            path.trim_start_matches('/')
        )
    }

    /// Sends an authenticated GET and returns the body as text.
    pub async fn get_text(&self, token: &str, url: &str) -> Result<ApiResponse> {
        let req = self.client.get(url).bearer_auth(token);
        self.send(req, Method::GET, url).await
    }

    /// Sends an authenticated POST with a JSON body.
    ///
    /// `extra_headers` are attached verbatim, including empty values.
    pub async fn post_json<B: Serialize + ?Sized>(
        &self,
        token: &str,
        url: &str,
        body: &B,
        extra_headers: &[(&str, &str)],
    ) -> Result<ApiResponse> {
        let mut req = self.client.post(url).bearer_auth(token).json(body);
        for (name, value) in extra_headers {
            req = req.header(*name, *value);
        }
        self.send(req, Method::POST, url).await
    }

    /// Executes the request, logging at each boundary.
    ///
    /// Errors are logged where they occur and returned unchanged.
    async fn send(&self, req: RequestBuilder, method: Method, url: &str) -> Result<ApiResponse> {
        tracing::debug!(%method, url, "sending request");

        let resp = req.send().await.map_err(|e| {
            tracing::error!(%method, url, error = %e, "request failed before a response");
            PurviewError::Network(e)
        })?;

        let status = resp.status();
        let headers = ResponseHeaders::from(resp.headers());
        let body = resp.text().await.map_err(|e| {
            tracing::error!(%method, url, %status, error = %e, "failed to read response body");
            PurviewError::Network(e)
        })?;

        if !status.is_success() {
            tracing::error!(%method, url, %status, body = %body, "API returned an error status");
            return Err(PurviewError::Api { status, body });
        }

        tracing::debug!(%method, url, %status, body_len = body.len(), "received response");
        Ok(ApiResponse { headers, body })
    }
}
