//! `modelhub commit`: commit a working copy back to the team server.

use anyhow::Result;
use clap::Args;

use crate::app::AppContext;
use crate::application::services::platform::validate_base_revision;
use crate::commands::finish;
use crate::domain::handles::DEFAULT_BRANCH;
use crate::output::TerminalReporter;

/// Arguments for the commit command.
#[derive(Args)]
pub struct CommitArgs {
    /// Project id
    #[arg(long)]
    pub project: String,

    /// Working copy id returned by `working-copy`
    #[arg(long)]
    pub working_copy: String,

    /// Branch to commit to
    #[arg(long, default_value = DEFAULT_BRANCH)]
    pub branch: String,

    /// Revision the changes are based on; -1 selects the latest
    #[arg(long, allow_negative_numbers = true)]
    pub base_revision: i64,
}

/// Run the commit command.
///
/// The base revision is checked before the configuration is read.
///
/// # Errors
///
/// Returns an error for an invalid base revision, incomplete configuration
/// or a failed job.
pub async fn run(app: &AppContext, args: &CommitArgs) -> Result<()> {
    validate_base_revision(args.base_revision)?;

    let services = app.job_services()?;
    let reporter = TerminalReporter::new(&app.output);
    let client = services.client(&reporter);

    let outcome = client
        .commit_working_copy_by_id(
            &args.project,
            &args.working_copy,
            &args.branch,
            args.base_revision,
        )
        .await;
    let revision = finish(&reporter, "Commit failed", outcome)?;
    app.renderer().render_revision(&revision)
}
