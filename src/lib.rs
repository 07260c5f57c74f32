//! Async Rust client helpers for the Microsoft Graph data security and
//! governance (Purview) APIs.
//!
//! Covers protection scope lookup, sensitivity label retrieval, label
//! inheritance, and content submission for compliance evaluation. The
//! crate is stateless: callers supply the access token on every call and
//! own its acquisition and refresh.
//!
//! # Modules
//!
//! - [`client`]: Bearer-authenticated HTTP wrapper and response headers.
//! - [`config`]: Base-URL configuration and its environment adapter.
//! - [`error`]: Typed error hierarchy (`PurviewError`).
//! - [`identifier`]: Random content-entry identifiers.
//! - [`labels`]: Sensitivity labels, rights and label inheritance.
//! - [`offline`]: Offline evaluation of prompt/response pairs.
//! - [`payload`]: `processContent` request body and its builder.
//! - [`process_content`]: Content submission with etag precondition.
//! - [`protection_scopes`]: Protection scope computation.
//!
//! # Quick Start
//!
//! ```ignore
//! use purview_dsg::client::GraphClient;
//! use purview_dsg::config::PurviewConfig;
//! use purview_dsg::offline::{OfflineTaskRequest, enqueue_offline_tasks};
//! use purview_dsg::protection_scopes::compute_protection_scope;
//!
//! let client = GraphClient::new(PurviewConfig::new("https://graph.microsoft.com/v1.0"))?;
//! let scope = compute_protection_scope(&client, &token).await?;
//! let request = OfflineTaskRequest { etag: scope.etag.as_deref(), /* ... */ };
//! enqueue_offline_tasks(&client, &token, &request).await?;
//! ```

#![warn(missing_docs)]

pub mod client;
pub mod config;
pub mod error;
pub mod identifier;
pub mod labels;
pub mod offline;
pub mod payload;
pub mod process_content;
pub mod protection_scopes;
