//! `modelhub create-app`: create a new app project.

use anyhow::Result;
use clap::Args;

use crate::app::AppContext;
use crate::commands::finish;
use crate::output::TerminalReporter;

/// Arguments for the create-app command.
#[derive(Args)]
pub struct CreateAppArgs {
    /// Project name
    #[arg(long)]
    pub name: String,

    /// Short project description
    #[arg(long, default_value = "")]
    pub summary: String,
}

/// Run the create-app command.
///
/// # Errors
///
/// Returns an error if the configuration is incomplete or the job fails.
pub async fn run(app: &AppContext, args: &CreateAppArgs) -> Result<()> {
    let services = app.job_services()?;
    let reporter = TerminalReporter::new(&app.output);
    let client = services.client(&reporter);

    let outcome = client.create_new_app(&args.name, &args.summary).await;
    let project = finish(&reporter, "Could not create app", outcome)?;
    app.renderer().render_project(&project)
}
