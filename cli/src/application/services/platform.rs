//! Application service: app, working copy and commit use-cases.
//!
//! Imports only from `crate::domain` and `crate::application::ports`.
//! All I/O is routed through injected port traits. Each operation submits
//! one job, polls it to a terminal state, and maps the job's result into a
//! domain handle.

use modelhub_common::{JobId, JobResult};

use crate::application::pipeline::Pipeline;
use crate::application::ports::{
    HttpTransport, ModelConnection, ModelServer, ProgressReporter, TemplateSource,
};
use crate::application::services::job_poller::{StatusClient, poll_job};
use crate::application::services::render::{TemplateRenderer, build_request};
use crate::domain::handles::is_valid_base_revision;
use crate::domain::{
    Bindings, Branch, ClientError, Credentials, ModelhubConfig, OnlineWorkingCopy, Project,
    Revision, TemplateId,
};

pub const CREATE_APP_CONTEXT: &str = "Failed to create new app";
pub const CREATE_WORKING_COPY_CONTEXT: &str = "Failed to create online working copy";
pub const COMMIT_CONTEXT: &str = "Failed to commit to team server";
pub const JOB_STATUS_CONTEXT: &str = "Failed to retrieve job status";

// ── Settings ──────────────────────────────────────────────────────────────────

/// Read-only client settings, fixed at construction.
#[derive(Debug, Clone)]
pub struct ClientSettings {
    pub service_url: String,
    pub credentials: Credentials,
    pub max_poll_attempts: Option<u32>,
}

impl ClientSettings {
    /// Validate the configuration into settings.
    ///
    /// Credentials are checked first, so an incomplete credential set is
    /// reported even when the endpoint is also missing.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Configuration`] for incomplete credentials or a
    /// missing service URL.
    pub fn from_config(config: &ModelhubConfig) -> Result<Self, ClientError> {
        let credentials = config.credentials()?;
        let service_url = config.service_url()?.to_string();
        Ok(Self {
            service_url,
            credentials,
            max_poll_attempts: config.polling.max_attempts,
        })
    }
}

// ── Client ────────────────────────────────────────────────────────────────────

/// Drives the job service on behalf of one caller.
///
/// Holds no mutable state; any number of operations may run at once, each
/// with its own request and polling loop.
pub struct PlatformClient<'a, T, S, R> {
    settings: ClientSettings,
    transport: &'a T,
    renderer: &'a TemplateRenderer<S>,
    reporter: &'a R,
}

impl<'a, T, S, R> PlatformClient<'a, T, S, R>
where
    T: HttpTransport,
    S: TemplateSource,
    R: ProgressReporter,
{
    pub fn new(
        settings: ClientSettings,
        transport: &'a T,
        renderer: &'a TemplateRenderer<S>,
        reporter: &'a R,
    ) -> Self {
        Self {
            settings,
            transport,
            renderer,
            reporter,
        }
    }

    #[must_use]
    pub fn settings(&self) -> &ClientSettings {
        &self.settings
    }

    /// Create a new app project and return its handle.
    ///
    /// # Errors
    ///
    /// Returns any submission, polling or job failure.
    pub async fn create_new_app(&self, name: &str, summary: &str) -> Result<Project, ClientError> {
        self.reporter.step(&format!("Creating app '{name}'"));
        let bindings = Bindings::new()
            .with("ProjectName", name)
            .with("ProjectSummary", summary);

        let project_id = self
            .run_job(TemplateId::CreateNewApp, bindings, CREATE_APP_CONTEXT)
            .await?;

        self.reporter
            .success(&format!("Created app '{name}' ({project_id})"));
        Ok(Project::new(project_id, name))
    }

    /// Create a working copy of `revision` on the server and open a model
    /// connection on it.
    ///
    /// # Errors
    ///
    /// Returns any submission, polling or job failure, or the model server's
    /// error when the working copy cannot be opened.
    pub async fn create_online_working_copy<M: ModelServer>(
        &self,
        model_server: &M,
        project: &Project,
        revision: &Revision,
    ) -> Result<OnlineWorkingCopy<M::Model>, ClientError> {
        self.reporter.step(&format!(
            "Creating working copy of {} (branch '{}', revision {})",
            project.id, revision.branch.name, revision.number
        ));
        let bindings = Bindings::new()
            .with("ProjectId", project.id.as_str())
            .with("Branch", revision.branch.name.as_str())
            .with("Revision", revision.number);

        let working_copy_id = self
            .run_job(
                TemplateId::CreateOnlineWorkingCopy,
                bindings,
                CREATE_WORKING_COPY_CONTEXT,
            )
            .await?;

        let model = model_server.open_working_copy(&working_copy_id).await?;
        self.reporter
            .success(&format!("Working copy {working_copy_id} is open"));

        Ok(OnlineWorkingCopy {
            id: working_copy_id,
            project: project.clone(),
            source_revision: revision.clone(),
            model,
        })
    }

    /// Commit an open working copy back to the team server.
    ///
    /// The model connection is closed first and the commit is only sent once
    /// the close has succeeded. `branch` defaults to the branch the working
    /// copy was created from.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Validation`] for a base revision below -1
    /// (without any network call), the model server's error if the close
    /// fails, or any submission, polling or job failure.
    ///
    /// A completed commit job whose result is not a revision number is
    /// reported as [`ClientError::Parse`], even though the server has
    /// already recorded the commit.
    pub async fn commit_to_server<M: ModelConnection>(
        &self,
        working_copy: &OnlineWorkingCopy<M>,
        branch: Option<&str>,
        base_revision: i64,
    ) -> Result<Revision, ClientError> {
        validate_base_revision(base_revision)?;

        self.reporter.step("Closing model connection");
        working_copy.model.close_connection().await?;

        let branch = branch.unwrap_or(&working_copy.source_revision.branch.name);
        self.commit_working_copy_by_id(
            &working_copy.project.id,
            &working_copy.id,
            branch,
            base_revision,
        )
        .await
    }

    /// Commit a working copy the caller holds no model connection for.
    ///
    /// # Errors
    ///
    /// Same as [`PlatformClient::commit_to_server`], minus the close step.
    pub async fn commit_working_copy_by_id(
        &self,
        project_id: &str,
        working_copy_id: &str,
        branch: &str,
        base_revision: i64,
    ) -> Result<Revision, ClientError> {
        validate_base_revision(base_revision)?;

        self.reporter.step(&format!(
            "Committing working copy {working_copy_id} to branch '{branch}'"
        ));
        let bindings = Bindings::new()
            .with("ProjectId", project_id)
            .with("WorkingCopyId", working_copy_id)
            .with("Branch", branch)
            .with("Revision", base_revision);

        let result = self
            .run_job(TemplateId::CommitWorkingCopyChanges, bindings, COMMIT_CONTEXT)
            .await?;
        let number = result.trim().parse::<i64>().map_err(|_| {
            ClientError::Parse(format!("commit returned '{result}', expected a revision number"))
        })?;

        self.reporter
            .success(&format!("Committed revision {number} on branch '{branch}'"));
        Ok(Branch {
            project_id: project_id.to_string(),
            name: branch.to_string(),
        }
        .revision(number))
    }

    /// Fetch the current status of `job_id` with a single request.
    ///
    /// # Errors
    ///
    /// Returns any template, transport or classification error.
    pub async fn job_status(&self, job_id: &JobId) -> Result<JobResult, ClientError> {
        self.status_client(JOB_STATUS_CONTEXT).fetch(job_id).await
    }

    // ── Internals ─────────────────────────────────────────────────────────────

    fn status_client<'c>(&'c self, context: &'c str) -> StatusClient<'c, T, S> {
        StatusClient {
            transport: self.transport,
            renderer: self.renderer,
            base_url: &self.settings.service_url,
            credentials: &self.settings.credentials,
            context,
        }
    }

    async fn submit(
        &self,
        template: TemplateId,
        mut bindings: Bindings,
        context: &str,
    ) -> Result<JobId, ClientError> {
        self.settings.credentials.bind(&mut bindings);
        let request = build_request(self.renderer, template, &bindings)?;

        let job_id = Pipeline::submission(context)
            .dispatch(self.transport, &self.settings.service_url, &request)
            .await?
            .into_value()?;
        Ok(JobId::from(job_id))
    }

    async fn run_job(
        &self,
        template: TemplateId,
        bindings: Bindings,
        context: &str,
    ) -> Result<String, ClientError> {
        let job_id = self.submit(template, bindings, context).await?;
        tracing::debug!(job = %job_id, template = %template, "job submitted");

        poll_job(
            &self.status_client(context),
            self.reporter,
            &job_id,
            self.settings.max_poll_attempts,
        )
        .await
    }
}

/// Reject base revisions below -1 before anything is sent.
///
/// # Errors
///
/// Returns [`ClientError::Validation`] (`"Invalid base revision {n}"`).
pub fn validate_base_revision(base_revision: i64) -> Result<(), ClientError> {
    if is_valid_base_revision(base_revision) {
        Ok(())
    } else {
        Err(ClientError::Validation(format!(
            "Invalid base revision {base_revision}"
        )))
    }
}
