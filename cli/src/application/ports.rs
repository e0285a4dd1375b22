//! Port trait definitions for the Application layer.
//!
//! Ports are the interfaces (contracts) that infrastructure must fulfill.
//! This file imports only from `crate::domain`, never from `crate::infra`,
//! `crate::commands`, or `crate::output`.

use std::path::PathBuf;

use anyhow::Result;

use crate::domain::{ClientError, ModelhubConfig, RequestDescriptor, TemplateId};

// ── Value Types ───────────────────────────────────────────────────────────────

/// What came back from one HTTP exchange, before any classification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    /// Status code; `None` when the transport could not report one.
    pub status: Option<u16>,
    /// Reason phrase sent with the status line (may be empty).
    pub status_text: String,
    pub body: String,
}

impl HttpResponse {
    #[must_use]
    pub fn new(status: u16, status_text: &str, body: &str) -> Self {
        Self {
            status: Some(status),
            status_text: status_text.to_string(),
            body: body.to_string(),
        }
    }
}

// ── Transport Port ────────────────────────────────────────────────────────────

/// Performs one network exchange.
#[allow(async_fn_in_trait)]
pub trait HttpTransport {
    /// Send `request` to the absolute `url`.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Connection`] for DNS, connect, TLS and other
    /// failures that happen before a status line is received. Any status
    /// code, including 4xx/5xx, is a successful exchange.
    async fn send(&self, url: &str, request: &RequestDescriptor)
    -> Result<HttpResponse, ClientError>;
}

// ── Template Port ─────────────────────────────────────────────────────────────

/// Supplies raw template text.
pub trait TemplateSource {
    /// Load the text of template `id`.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::TemplateLoad`] if the template cannot be read.
    fn load(&self, id: TemplateId) -> Result<String, ClientError>;
}

// ── Model Collaborator Ports ──────────────────────────────────────────────────

/// Opens model connections on server-held working copies.
#[allow(async_fn_in_trait)]
pub trait ModelServer {
    type Model: ModelConnection;

    /// Open the working copy `working_copy_id`.
    async fn open_working_copy(&self, working_copy_id: &str) -> Result<Self::Model, ClientError>;
}

/// An open model connection on one working copy.
#[allow(async_fn_in_trait)]
pub trait ModelConnection {
    /// Close the connection. Must complete before the working copy is
    /// committed.
    async fn close_connection(&self) -> Result<(), ClientError>;
}

// ── Progress Reporting Port ───────────────────────────────────────────────────

/// Abstracts progress reporting so services can emit events without
/// depending on the Presentation layer. Sync trait, no async needed.
pub trait ProgressReporter {
    /// Emit an in-progress step message.
    fn step(&self, message: &str);
    /// Emit a success message.
    fn success(&self, message: &str);
    /// Emit a warning message.
    fn warn(&self, message: &str);
}

// ── Configuration Port ────────────────────────────────────────────────────────

/// Abstracts configuration persistence.
pub trait ConfigStore {
    /// Load the configuration, falling back to defaults when none exists.
    fn load(&self) -> Result<ModelhubConfig>;
    /// Persist the configuration.
    fn save(&self, config: &ModelhubConfig) -> Result<()>;
    /// Location of the configuration file.
    fn path(&self) -> Result<PathBuf>;
}
