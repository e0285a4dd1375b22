//! `modelhub working-copy`: create and open an online working copy.

use anyhow::Result;
use clap::Args;

use crate::app::AppContext;
use crate::commands::finish;
use crate::domain::Project;
use crate::domain::handles::{DEFAULT_BRANCH, LATEST_REVISION};
use crate::output::TerminalReporter;

/// Arguments for the working-copy command.
#[derive(Args)]
pub struct WorkingCopyArgs {
    /// Project id returned by `create-app`
    #[arg(long)]
    pub project: String,

    /// Branch to copy
    #[arg(long, default_value = DEFAULT_BRANCH)]
    pub branch: String,

    /// Revision to copy; -1 selects the latest
    #[arg(long, default_value_t = LATEST_REVISION, allow_negative_numbers = true)]
    pub revision: i64,
}

/// Run the working-copy command.
///
/// # Errors
///
/// Returns an error if the configuration is incomplete, the job fails or the
/// model server cannot open the copy.
pub async fn run(app: &AppContext, args: &WorkingCopyArgs) -> Result<()> {
    let services = app.job_services()?;
    let reporter = TerminalReporter::new(&app.output);
    let client = services.client(&reporter);

    let project = Project::new(&args.project, &args.project);
    let revision = project.branch(&args.branch).revision(args.revision);
    let outcome = client
        .create_online_working_copy(&services.model_server, &project, &revision)
        .await;
    let working_copy = finish(&reporter, "Could not create working copy", outcome)?;
    app.renderer().render_working_copy(&working_copy)
}
