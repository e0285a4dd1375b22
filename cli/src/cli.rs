//! CLI argument parsing with clap derive

use anyhow::Result;
use clap::{Parser, Subcommand};

use crate::app::{AppContext, AppFlags};
use crate::commands;

/// Drive the asynchronous model job service from the command line
#[derive(Parser)]
#[command(
    name = "modelhub",
    version,
    propagate_version = true,
    subcommand_required = true,
    arg_required_else_help = true
)]
pub struct Cli {
    /// Output in JSON format
    #[arg(long, global = true)]
    pub json: bool,

    /// Suppress non-error output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Create a new app project
    CreateApp(commands::create_app::CreateAppArgs),

    /// Create an online working copy of a project revision
    WorkingCopy(commands::working_copy::WorkingCopyArgs),

    /// Commit a working copy to the team server
    Commit(commands::commit::CommitArgs),

    /// Show the status of a job
    JobStatus(commands::job_status::JobStatusArgs),

    /// Manage configuration
    #[command(subcommand)]
    Config(commands::config::ConfigCommand),

    /// Show version
    Version,
}

impl Cli {
    /// Execute the CLI command.
    ///
    /// # Errors
    ///
    /// Returns an error if the command fails.
    pub async fn run(self) -> Result<()> {
        let Cli {
            no_color,
            quiet,
            json,
            command,
        } = self;
        let app = AppContext::new(&AppFlags {
            no_color,
            quiet,
            json,
        });
        match command {
            Command::CreateApp(args) => commands::create_app::run(&app, &args).await,
            Command::WorkingCopy(args) => commands::working_copy::run(&app, &args).await,
            Command::Commit(args) => commands::commit::run(&app, &args).await,
            Command::JobStatus(args) => commands::job_status::run(&app, &args).await,
            Command::Config(cmd) => commands::config::run(&app, cmd),
            Command::Version => commands::version::run(&app),
        }
    }
}
