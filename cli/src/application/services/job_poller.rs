//! Job status polling.
//!
//! Imports only from `crate::domain`, `crate::application::ports` and the
//! pipeline.

use std::time::Duration;

use modelhub_common::{JobId, JobResult, JobState};

use crate::application::pipeline::Pipeline;
use crate::application::ports::{HttpTransport, ProgressReporter, TemplateSource};
use crate::application::services::render::{TemplateRenderer, build_request};
use crate::domain::{Bindings, ClientError, Credentials, TemplateId};

/// Fixed delay before every status request. No backoff, no jitter.
pub const POLL_INTERVAL: Duration = Duration::from_millis(1000);

/// Where a polling loop stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PollState {
    /// Submitted, no status fetched yet.
    Pending,
    /// At least one status fetched, job still running.
    Polling,
    Completed,
    Failed,
}

impl From<JobState> for PollState {
    fn from(state: JobState) -> Self {
        match state {
            JobState::Running => Self::Polling,
            JobState::Completed => Self::Completed,
            JobState::Failed => Self::Failed,
        }
    }
}

/// Everything one status request needs.
pub struct StatusClient<'a, T, S> {
    pub transport: &'a T,
    pub renderer: &'a TemplateRenderer<S>,
    pub base_url: &'a str,
    pub credentials: &'a Credentials,
    /// Prefix for service faults raised while fetching status.
    pub context: &'a str,
}

impl<T: HttpTransport, S: TemplateSource> StatusClient<'_, T, S> {
    /// Issue exactly one RetrieveJobStatus request.
    ///
    /// # Errors
    ///
    /// Returns any template, transport or classification error.
    pub async fn fetch(&self, job_id: &JobId) -> Result<JobResult, ClientError> {
        let mut bindings = Bindings::new().with("JobId", job_id.as_str());
        self.credentials.bind(&mut bindings);
        let request = build_request(self.renderer, TemplateId::RetrieveJobStatus, &bindings)?;

        Pipeline::job_status(self.context)
            .dispatch(self.transport, self.base_url, &request)
            .await?
            .into_job()
    }
}

/// Poll `job_id` until it completes or fails.
///
/// Waits [`POLL_INTERVAL`] before each request; request N+1 is only sent
/// once response N has been seen. With `max_attempts` unset the loop has no
/// upper bound.
///
/// # Errors
///
/// - [`ClientError::JobFailed`] with the job's own message when it fails
/// - [`ClientError::EmptyResult`] when a completed job carries no result
/// - [`ClientError::PollLimitExceeded`] when `max_attempts` runs out
/// - any pipeline error, which ends the loop immediately
pub async fn poll_job<T: HttpTransport, S: TemplateSource>(
    client: &StatusClient<'_, T, S>,
    reporter: &impl ProgressReporter,
    job_id: &JobId,
    max_attempts: Option<u32>,
) -> Result<String, ClientError> {
    let mut state = PollState::Pending;
    let mut attempts: u32 = 0;

    loop {
        if max_attempts.is_some_and(|max| attempts >= max) {
            return Err(ClientError::PollLimitExceeded {
                job_id: job_id.to_string(),
                attempts,
            });
        }

        tokio::time::sleep(POLL_INTERVAL).await;
        attempts += 1;
        let status = client.fetch(job_id).await?;
        tracing::debug!(job = %job_id, attempt = attempts, state = %status.state, "job status");

        let next = PollState::from(status.state);
        if state == PollState::Pending && next == PollState::Polling {
            reporter.step(&format!("Job {job_id} is running"));
        }
        state = next;

        match state {
            PollState::Pending | PollState::Polling => {}
            PollState::Completed => {
                return status.result().map(str::to_string).ok_or_else(|| {
                    ClientError::EmptyResult(format!("job {job_id} completed without a result"))
                });
            }
            PollState::Failed => {
                let message = status
                    .error_message()
                    .map_or_else(|| format!("Job {job_id} failed"), str::to_string);
                return Err(ClientError::JobFailed(message));
            }
        }
    }
}
