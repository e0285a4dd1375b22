//! Output formatting module

pub mod human;
pub mod json;
pub mod progress;
pub mod reporter;
pub mod styles;

use std::path::Path;

use anyhow::Result;
use console::Term;
use modelhub_common::JobResult;
use owo_colors::OwoColorize as _;
pub use human::HumanRenderer;
pub use reporter::TerminalReporter;
pub use styles::Styles;

use crate::domain::config::{ModelhubConfig, VALID_CONFIG_KEYS};
use crate::domain::{OnlineWorkingCopy, Project, Revision};

/// Output context carrying styling and terminal state.
pub struct OutputContext {
    /// Stylesheet for colored output.
    pub styles: Styles,
    /// Whether stdout is a TTY.
    pub is_tty: bool,
    /// Whether to suppress non-error output.
    pub quiet: bool,
}

impl OutputContext {
    /// Create output context based on CLI flags and environment.
    #[must_use]
    pub fn new(no_color: bool, quiet: bool) -> Self {
        let is_tty = Term::stdout().is_term();
        let use_colors = !no_color && is_tty && std::env::var("NO_COLOR").is_err();

        let mut styles = Styles::default();
        if use_colors {
            styles.colorize();
        }

        Self {
            styles,
            is_tty,
            quiet,
        }
    }

    /// Check if progress indicators should be shown.
    #[must_use]
    pub fn show_progress(&self) -> bool {
        self.is_tty && !self.quiet
    }

    /// Print a success message prefixed with `✓`. Suppressed when `quiet`.
    pub fn success(&self, msg: &str) {
        if !self.quiet {
            println!("  {} {msg}", "✓".style(self.styles.success));
        }
    }

    /// Print a warning message prefixed with `⚠`. Suppressed when `quiet`.
    pub fn warn(&self, msg: &str) {
        if !self.quiet {
            println!("  {} {msg}", "⚠".style(self.styles.warning));
        }
    }

    /// Print a key-value pair with the key dimmed. Suppressed when `quiet`.
    pub fn kv(&self, key: &str, value: &str) {
        if !self.quiet {
            println!("  {}  {value}", key.style(self.styles.dim));
        }
    }
}

/// Writes command results as JSON documents on stdout.
pub struct JsonRenderer;

impl JsonRenderer {
    fn print(value: &serde_json::Value) -> Result<()> {
        println!("{}", json::format_value(value)?);
        Ok(())
    }
}

/// Picks human or JSON output for one command invocation.
pub enum Renderer<'a> {
    Human(HumanRenderer<'a>),
    Json(JsonRenderer),
}

impl Renderer<'_> {
    /// # Errors
    ///
    /// Returns an error if JSON serialization fails.
    pub fn render_version(&self, version: &str) -> Result<()> {
        match self {
            Self::Human(r) => {
                r.render_version(version);
                Ok(())
            }
            Self::Json(_) => JsonRenderer::print(&serde_json::json!({ "version": version })),
        }
    }

    /// # Errors
    ///
    /// Returns an error if JSON serialization fails.
    pub fn render_project(&self, project: &Project) -> Result<()> {
        match self {
            Self::Human(r) => {
                r.render_project(project);
                Ok(())
            }
            Self::Json(_) => JsonRenderer::print(&serde_json::json!({
                "project_id": project.id,
                "name": project.name,
            })),
        }
    }

    /// # Errors
    ///
    /// Returns an error if JSON serialization fails.
    pub fn render_working_copy<M>(&self, working_copy: &OnlineWorkingCopy<M>) -> Result<()> {
        match self {
            Self::Human(r) => {
                r.render_working_copy(working_copy);
                Ok(())
            }
            Self::Json(_) => JsonRenderer::print(&serde_json::json!({
                "working_copy_id": working_copy.id,
                "project_id": working_copy.project.id,
                "branch": working_copy.source_revision.branch.name,
                "revision": working_copy.source_revision.number,
            })),
        }
    }

    /// # Errors
    ///
    /// Returns an error if JSON serialization fails.
    pub fn render_revision(&self, revision: &Revision) -> Result<()> {
        match self {
            Self::Human(r) => {
                r.render_revision(revision);
                Ok(())
            }
            Self::Json(_) => JsonRenderer::print(&serde_json::json!({
                "project_id": revision.branch.project_id,
                "branch": revision.branch.name,
                "revision": revision.number,
            })),
        }
    }

    /// # Errors
    ///
    /// Returns an error if JSON serialization fails.
    pub fn render_job_status(&self, status: &JobResult) -> Result<()> {
        match self {
            Self::Human(r) => {
                r.render_job_status(status);
                Ok(())
            }
            Self::Json(_) => JsonRenderer::print(&serde_json::to_value(status)?),
        }
    }

    /// # Errors
    ///
    /// Returns an error if JSON serialization fails.
    pub fn render_config(&self, config: &ModelhubConfig, path: &Path) -> Result<()> {
        match self {
            Self::Human(r) => {
                r.render_config(config, path);
                Ok(())
            }
            Self::Json(_) => {
                let values: serde_json::Map<String, serde_json::Value> = VALID_CONFIG_KEYS
                    .iter()
                    .map(|key| ((*key).to_string(), config.display_value(key).into()))
                    .collect();
                JsonRenderer::print(&serde_json::json!({
                    "path": path.display().to_string(),
                    "values": values,
                }))
            }
        }
    }
}
