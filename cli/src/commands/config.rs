//! `modelhub config`: show and set configuration values.

use anyhow::Result;
use clap::Subcommand;

use crate::app::AppContext;
use crate::application::ports::ConfigStore;
use crate::application::services::config_service;

/// Config subcommands.
#[derive(Subcommand)]
pub enum ConfigCommand {
    /// Show current configuration
    Show,
    /// Set configuration value (use `none` to clear)
    Set {
        /// Configuration key
        key: String,
        /// Configuration value
        value: String,
    },
}

/// Run the config command.
///
/// # Errors
///
/// Returns an error if the config file cannot be read or written, or the
/// key or value is rejected.
pub fn run(app: &AppContext, cmd: ConfigCommand) -> Result<()> {
    match cmd {
        ConfigCommand::Show => show_config(app),
        ConfigCommand::Set { key, value } => set_config(app, &key, &value),
    }
}

fn show_config(app: &AppContext) -> Result<()> {
    let mut config = config_service::load_config(&app.config_store)?;
    let path = app.config_store.path()?;
    app.renderer().render_config(&config, &path)?;

    config_service::apply_env_overrides(&mut config, |var| std::env::var(var).ok());
    if let Some(err) = config_service::settings_error(&config) {
        app.output.warn(&format!("Job commands will fail: {err}"));
    }
    Ok(())
}

fn set_config(app: &AppContext, key: &str, value: &str) -> Result<()> {
    let config = config_service::set_value(&app.config_store, key, value)?;
    app.output
        .success(&format!("Set {key} = {}", config.display_value(key)));
    Ok(())
}
