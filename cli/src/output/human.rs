//! Human-readable terminal renderer.

use std::path::Path;

use modelhub_common::JobResult;
use owo_colors::OwoColorize as _;

use crate::application::services::config_service::{API_KEY_ENV, PASSWORD_ENV};
use crate::domain::config::{CONFIG_PATH_ENV, ModelhubConfig, VALID_CONFIG_KEYS};
use crate::domain::{OnlineWorkingCopy, Project, Revision};
use crate::output::OutputContext;

/// Renders domain types as human-readable terminal output using `OutputContext`.
pub struct HumanRenderer<'a> {
    ctx: &'a OutputContext,
}

impl<'a> HumanRenderer<'a> {
    /// Create a new `HumanRenderer` wrapping the given output context.
    #[must_use]
    pub fn new(ctx: &'a OutputContext) -> Self {
        Self { ctx }
    }

    /// Render the CLI version information.
    pub fn render_version(&self, version: &str) {
        if self.ctx.quiet {
            return;
        }
        println!("modelhub {version}");
    }

    pub fn render_project(&self, project: &Project) {
        self.ctx.kv("Project:", &project.id);
        self.ctx.kv("Name:   ", &project.name);
    }

    pub fn render_working_copy<M>(&self, working_copy: &OnlineWorkingCopy<M>) {
        self.ctx.kv("Working copy:", &working_copy.id);
        self.ctx.kv("Project:     ", &working_copy.project.id);
        self.ctx.kv("Branch:      ", &working_copy.source_revision.branch.name);
        self.ctx
            .kv("Revision:    ", &working_copy.source_revision.number.to_string());
    }

    pub fn render_revision(&self, revision: &Revision) {
        self.ctx.kv("Project: ", &revision.branch.project_id);
        self.ctx.kv("Branch:  ", &revision.branch.name);
        self.ctx.kv("Revision:", &revision.number.to_string());
    }

    /// Render one job status snapshot.
    pub fn render_job_status(&self, status: &JobResult) {
        if let Some(id) = &status.job_id {
            self.ctx.kv("Job:     ", id.as_str());
        }
        self.ctx.kv("State:   ", &status.state.to_string());
        self.ctx
            .kv("Started: ", status.start_time.as_deref().unwrap_or("-"));
        self.ctx
            .kv("Ended:   ", status.end_time.as_deref().unwrap_or("-"));
        if let Some(result) = status.result() {
            self.ctx.kv("Result:  ", result);
        }
        if let Some(message) = status.error_message() {
            self.ctx.kv("Error:   ", message);
        }
    }

    /// Render the current modelhub configuration with secrets masked.
    pub fn render_config(&self, config: &ModelhubConfig, path: &Path) {
        println!();
        println!(
            "  {}",
            format!("Configuration ({})", path.display()).style(self.ctx.styles.header)
        );
        println!();
        for key in VALID_CONFIG_KEYS {
            println!("  {:<30} {}", format!("{key}:"), config.display_value(key));
        }
        println!();
        println!("  {}", "Environment:".style(self.ctx.styles.bold));
        for var in [CONFIG_PATH_ENV, API_KEY_ENV, PASSWORD_ENV, "RUST_LOG"] {
            println!("    {:<20} {}", format!("{var}:"), env_display(var));
        }
        println!();
    }
}

/// Secrets in the environment are reported as set or not, never shown.
fn env_display(var: &str) -> String {
    match std::env::var(var) {
        Ok(_) if var == API_KEY_ENV || var == PASSWORD_ENV => "(set)".to_string(),
        Ok(value) => value,
        Err(_) => "(not set)".to_string(),
    }
}
