//! Typed client error enum.
//!
//! This module has zero imports from `crate::infra`, `crate::commands`,
//! `crate::application`, `tokio`, or `reqwest`. Every failure the client can
//! report is one variant of [`ClientError`]; its `Display` output is the
//! final message shown to the user, and [`ClientError::kind`] is the stable
//! code used by `--json` output.

use thiserror::Error;

/// Appended to messages for failures the user cannot fix locally.
pub const SUPPORT_HINT: &str =
    "If the problem persists, consult the job service support documentation.";

/// Errors surfaced by the job service client.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ClientError {
    // ── Raised before any network I/O ────────────────────────────────────────
    #[error("{0}")]
    Configuration(String),

    #[error("{0}")]
    Validation(String),

    #[error("Failed to load template {template}: {detail}")]
    TemplateLoad { template: String, detail: String },

    // ── Transport and response classification ───────────────────────────────
    #[error("Connection error: {0}")]
    Connection(String),

    #[error("Invalid response error: {0}. {support}", support = SUPPORT_HINT)]
    InvalidResponse(String),

    #[error("Response parsing error: {0}. {support}", support = SUPPORT_HINT)]
    Parse(String),

    #[error("Empty response error: {0}. {support}", support = SUPPORT_HINT)]
    EmptyResult(String),

    #[error("{context}: {fault}")]
    ServiceFault { context: String, fault: String },

    #[error(
        "Unexpected HTTP response code: {code} {message}. Please retry after a few minutes. {support}",
        support = SUPPORT_HINT
    )]
    UnexpectedStatus { code: u16, message: String },

    // ── Job outcome ─────────────────────────────────────────────────────────
    /// The job reached `Failed`; carries the service's message verbatim.
    #[error("{0}")]
    JobFailed(String),

    #[error("Job {job_id} did not finish after {attempts} status requests")]
    PollLimitExceeded { job_id: String, attempts: u32 },

    // ── Model collaborator ──────────────────────────────────────────────────
    #[error("Model server error: {0}")]
    ModelServer(String),
}

// ── Config errors ─────────────────────────────────────────────────────────────

/// Errors related to configuration key/value validation.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Unknown setting: {key}\n\nValid settings: {valid}")]
    UnknownKey { key: String, valid: String },

    #[error("Invalid value for {key}: {value}\n\nValid values: {valid}")]
    InvalidValue {
        key: String,
        value: String,
        valid: String,
    },
}

/// Stable, machine-readable classification of a [`ClientError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Configuration,
    Validation,
    TemplateLoad,
    Connection,
    InvalidResponse,
    Parse,
    EmptyResult,
    ServiceFault,
    UnexpectedStatus,
    JobFailed,
    PollLimitExceeded,
    ModelServer,
}

impl ErrorKind {
    /// Snake-case code used in JSON error objects.
    #[must_use]
    pub fn code(self) -> &'static str {
        match self {
            Self::Configuration => "configuration_error",
            Self::Validation => "validation_error",
            Self::TemplateLoad => "template_load_error",
            Self::Connection => "connection_error",
            Self::InvalidResponse => "invalid_response_error",
            Self::Parse => "parse_error",
            Self::EmptyResult => "empty_result_error",
            Self::ServiceFault => "service_fault",
            Self::UnexpectedStatus => "unexpected_status_error",
            Self::JobFailed => "job_failed_error",
            Self::PollLimitExceeded => "poll_limit_exceeded",
            Self::ModelServer => "model_server_error",
        }
    }
}

impl ClientError {
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Configuration(_) => ErrorKind::Configuration,
            Self::Validation(_) => ErrorKind::Validation,
            Self::TemplateLoad { .. } => ErrorKind::TemplateLoad,
            Self::Connection(_) => ErrorKind::Connection,
            Self::InvalidResponse(_) => ErrorKind::InvalidResponse,
            Self::Parse(_) => ErrorKind::Parse,
            Self::EmptyResult(_) => ErrorKind::EmptyResult,
            Self::ServiceFault { .. } => ErrorKind::ServiceFault,
            Self::UnexpectedStatus { .. } => ErrorKind::UnexpectedStatus,
            Self::JobFailed(_) => ErrorKind::JobFailed,
            Self::PollLimitExceeded { .. } => ErrorKind::PollLimitExceeded,
            Self::ModelServer(_) => ErrorKind::ModelServer,
        }
    }

    /// Returns `true` for errors raised locally, before any request was sent.
    #[must_use]
    pub fn is_local(&self) -> bool {
        matches!(
            self,
            Self::Configuration(_) | Self::Validation(_) | Self::TemplateLoad { .. }
        )
    }
}
