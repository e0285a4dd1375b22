//! Application context: unified state passed to every command handler.
//!
//! `AppContext` carries the output settings and the config store. Commands
//! that talk to the job service build a [`JobServices`] from it, which owns
//! the transport and template cache for the lifetime of the command.

use anyhow::Result;

use crate::application::ports::ProgressReporter;
use crate::application::services::config_service;
use crate::application::services::platform::{ClientSettings, PlatformClient};
use crate::application::services::render::TemplateRenderer;
use crate::infra::config::YamlConfigStore;
use crate::infra::http::ReqwestTransport;
use crate::infra::model::DetachedModelServer;
use crate::infra::templates::EmbeddedTemplates;
use crate::output::{HumanRenderer, JsonRenderer, OutputContext, Renderer};

/// Output rendering mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    /// Human-readable terminal output (default).
    Human,
    /// Machine-readable JSON output.
    Json,
}

/// Flags passed from the top-level CLI to `AppContext::new`.
pub struct AppFlags {
    /// Disable ANSI color output.
    pub no_color: bool,
    /// Suppress non-error output.
    pub quiet: bool,
    /// Enable JSON output mode.
    pub json: bool,
}

/// Unified application context passed to every command handler.
pub struct AppContext {
    /// Terminal output context (colors, quiet mode).
    pub output: OutputContext,
    /// Output rendering mode (human vs JSON).
    pub mode: OutputMode,
    /// Configuration file store.
    pub config_store: YamlConfigStore,
}

impl AppContext {
    /// Construct an `AppContext` from top-level CLI flags.
    ///
    /// JSON mode implies quiet so that progress lines never mix with the
    /// JSON document on stdout.
    #[must_use]
    pub fn new(flags: &AppFlags) -> Self {
        let mode = if flags.json {
            OutputMode::Json
        } else {
            OutputMode::Human
        };

        Self {
            output: OutputContext::new(flags.no_color, flags.quiet || flags.json),
            mode,
            config_store: YamlConfigStore::new(),
        }
    }

    /// Returns `true` when JSON output mode is active.
    #[must_use]
    pub fn is_json(&self) -> bool {
        self.mode == OutputMode::Json
    }

    /// Returns the appropriate `Renderer` variant for the current output mode.
    #[must_use]
    pub fn renderer(&self) -> Renderer<'_> {
        match self.mode {
            OutputMode::Human => Renderer::Human(HumanRenderer::new(&self.output)),
            OutputMode::Json => Renderer::Json(JsonRenderer),
        }
    }

    /// Load and validate the configuration, then build the job service
    /// collaborators.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file cannot be read, the credentials
    /// or endpoint are incomplete, or the HTTP client cannot be built.
    pub fn job_services(&self) -> Result<JobServices> {
        let mut config = config_service::load_config(&self.config_store)?;
        config_service::apply_env_overrides(&mut config, |var| std::env::var(var).ok());
        let settings = ClientSettings::from_config(&config)?;
        Ok(JobServices {
            settings,
            transport: ReqwestTransport::new()?,
            templates: TemplateRenderer::new(EmbeddedTemplates),
            model_server: DetachedModelServer::new(config.endpoints.model_url),
        })
    }
}

/// Collaborators for one command that talks to the job service.
pub struct JobServices {
    settings: ClientSettings,
    transport: ReqwestTransport,
    templates: TemplateRenderer<EmbeddedTemplates>,
    pub model_server: DetachedModelServer,
}

impl JobServices {
    /// A client reporting progress through `reporter`.
    pub fn client<'a, R: ProgressReporter>(
        &'a self,
        reporter: &'a R,
    ) -> PlatformClient<'a, ReqwestTransport, EmbeddedTemplates, R> {
        PlatformClient::new(
            self.settings.clone(),
            &self.transport,
            &self.templates,
            reporter,
        )
    }
}
