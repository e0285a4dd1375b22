//! `modelhub job-status`: fetch one status snapshot of a job.

use anyhow::Result;
use clap::Args;
use modelhub_common::JobId;

use crate::app::AppContext;
use crate::commands::finish;
use crate::output::TerminalReporter;

/// Arguments for the job-status command.
#[derive(Args)]
pub struct JobStatusArgs {
    /// Job id
    pub job_id: String,
}

/// Run the job-status command. Issues exactly one status request.
///
/// # Errors
///
/// Returns an error if the configuration is incomplete or the request fails.
pub async fn run(app: &AppContext, args: &JobStatusArgs) -> Result<()> {
    let services = app.job_services()?;
    let reporter = TerminalReporter::new(&app.output);
    let client = services.client(&reporter);

    let outcome = client.job_status(&JobId::from(args.job_id.as_str())).await;
    let status = finish(&reporter, "Could not retrieve job status", outcome)?;
    app.renderer().render_job_status(&status)
}
