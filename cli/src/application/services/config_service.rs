//! Application service: configuration use-cases.

use anyhow::Result;

use crate::application::ports::ConfigStore;
use crate::application::services::platform::ClientSettings;
use crate::domain::ClientError;
use crate::domain::config::ModelhubConfig;

/// Environment variable overriding `credentials.api_key`.
pub const API_KEY_ENV: &str = "MODELHUB_API_KEY";
/// Environment variable overriding `credentials.password`.
pub const PASSWORD_ENV: &str = "MODELHUB_PASSWORD";

/// Load configuration.
pub fn load_config(store: &impl ConfigStore) -> Result<ModelhubConfig> {
    store.load()
}

/// Validate and persist one `key = value` setting.
pub fn set_value(store: &impl ConfigStore, key: &str, value: &str) -> Result<ModelhubConfig> {
    let mut config = store.load()?;
    config.apply(key, value)?;
    store.save(&config)?;
    Ok(config)
}

/// Replace secrets with values from the environment, when set.
///
/// Applied to the in-memory config only; overrides are never saved.
pub fn apply_env_overrides(config: &mut ModelhubConfig, lookup: impl Fn(&str) -> Option<String>) {
    if let Some(key) = lookup(API_KEY_ENV).filter(|v| !v.is_empty()) {
        config.credentials.api_key = Some(key);
    }
    if let Some(password) = lookup(PASSWORD_ENV).filter(|v| !v.is_empty()) {
        config.credentials.password = Some(password);
    }
}

/// The configuration error that would stop a job command, if any.
#[must_use]
pub fn settings_error(config: &ModelhubConfig) -> Option<ClientError> {
    ClientSettings::from_config(config).err()
}
