use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Opaque identifier the job service hands back when a job is submitted.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct JobId(String);

impl JobId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for JobId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for JobId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for JobId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// Server-side state of an asynchronous job.
///
/// `Running` is the initial state; `Completed` and `Failed` are terminal.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum JobState {
    Running,
    Completed,
    Failed,
}

impl JobState {
    /// Returns `true` once no further transition is possible.
    #[must_use]
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Completed | Self::Failed)
    }
}

impl fmt::Display for JobState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Running => "Running",
            Self::Completed => "Completed",
            Self::Failed => "Failed",
        };
        f.write_str(s)
    }
}

/// The `State` text of a status response was not one of the known states.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown job state '{0}'")]
pub struct ParseJobStateError(pub String);

impl FromStr for JobState {
    type Err = ParseJobStateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "Running" => Ok(Self::Running),
            "Completed" => Ok(Self::Completed),
            "Failed" => Ok(Self::Failed),
            other => Err(ParseJobStateError(other.to_string())),
        }
    }
}

/// One snapshot of a job as reported by a status response.
///
/// `result` is only ever set for a `Completed` job and `error_message` only
/// for a `Failed` one; [`JobResult::new`] drops whichever does not apply.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "RawJobResult")]
pub struct JobResult {
    pub job_id: Option<JobId>,
    pub start_time: Option<String>,
    pub end_time: Option<String>,
    pub state: JobState,
    #[serde(skip_serializing_if = "Option::is_none")]
    result: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error_message: Option<String>,
}

#[derive(Deserialize)]
struct RawJobResult {
    job_id: Option<JobId>,
    start_time: Option<String>,
    end_time: Option<String>,
    state: JobState,
    #[serde(default)]
    result: Option<String>,
    #[serde(default)]
    error_message: Option<String>,
}

impl From<RawJobResult> for JobResult {
    fn from(raw: RawJobResult) -> Self {
        Self::new(
            raw.job_id,
            raw.start_time,
            raw.end_time,
            raw.state,
            raw.result,
            raw.error_message,
        )
    }
}

impl JobResult {
    #[must_use]
    pub fn new(
        job_id: Option<JobId>,
        start_time: Option<String>,
        end_time: Option<String>,
        state: JobState,
        result: Option<String>,
        error_message: Option<String>,
    ) -> Self {
        Self {
            job_id,
            start_time,
            end_time,
            state,
            result: result.filter(|_| state == JobState::Completed),
            error_message: error_message.filter(|_| state == JobState::Failed),
        }
    }

    /// Return value of a completed job.
    #[must_use]
    pub fn result(&self) -> Option<&str> {
        self.result.as_deref()
    }

    /// Failure text of a failed job.
    #[must_use]
    pub fn error_message(&self) -> Option<&str> {
        self.error_message.as_deref()
    }
}
