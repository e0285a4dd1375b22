//! Domain types and validators for modelhub configuration.
//!
//! Pure functions only: no I/O, no async, no filesystem access.

use anyhow::Result;
use serde::{Deserialize, Serialize};

use crate::domain::credentials::Credentials;
use crate::domain::error::{ClientError, ConfigError};

// ── Constants ────────────────────────────────────────────────────────────────

pub const VALID_CONFIG_KEYS: &[&str] = &[
    "endpoints.service_url",
    "endpoints.model_url",
    "credentials.username",
    "credentials.api_key",
    "credentials.password",
    "credentials.openid_provider",
    "polling.max_attempts",
];

/// Keys whose values are masked by `config show`.
pub const SECRET_CONFIG_KEYS: &[&str] = &["credentials.api_key", "credentials.password"];

/// Value that clears an optional setting.
pub const UNSET_VALUE: &str = "none";

/// Environment variable pointing at an alternative config file.
pub const CONFIG_PATH_ENV: &str = "MODELHUB_CONFIG";

// ── Config schema ────────────────────────────────────────────────────────────

/// Top-level configuration stored in `~/.modelhub/config.yaml`.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(default)]
pub struct ModelhubConfig {
    pub endpoints: EndpointsConfig,
    pub credentials: CredentialsConfig,
    pub polling: PollingConfig,
}

/// The two service endpoints.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(default)]
pub struct EndpointsConfig {
    /// Base URL of the SOAP job service.
    pub service_url: Option<String>,
    /// Base URL handed to the model collaborator.
    pub model_url: Option<String>,
}

/// Raw credential fields; validated into [`Credentials`] on use.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(default)]
pub struct CredentialsConfig {
    pub username: Option<String>,
    pub api_key: Option<String>,
    pub password: Option<String>,
    pub openid_provider: Option<String>,
}

/// Job status polling.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(default)]
pub struct PollingConfig {
    /// Give up after this many status requests. Unset polls until the job
    /// finishes.
    pub max_attempts: Option<u32>,
}

impl ModelhubConfig {
    /// Validated credentials.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Configuration`] (`"Incomplete credentials"`)
    /// unless exactly one credential shape is configured.
    pub fn credentials(&self) -> Result<Credentials, ClientError> {
        let c = &self.credentials;
        Credentials::from_parts(
            c.username.as_deref(),
            c.api_key.as_deref(),
            c.password.as_deref(),
            c.openid_provider.as_deref(),
        )
    }

    /// The job service base URL.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Configuration`] when no URL is configured.
    pub fn service_url(&self) -> Result<&str, ClientError> {
        self.endpoints
            .service_url
            .as_deref()
            .filter(|s| !s.trim().is_empty())
            .ok_or_else(|| {
                ClientError::Configuration(
                    "No job service endpoint configured. Run: modelhub config set endpoints.service_url <url>"
                        .to_string(),
                )
            })
    }

    /// Current value of `key` as shown by `config show`; secrets are masked.
    #[must_use]
    pub fn display_value(&self, key: &str) -> String {
        let raw = match key {
            "endpoints.service_url" => self.endpoints.service_url.clone(),
            "endpoints.model_url" => self.endpoints.model_url.clone(),
            "credentials.username" => self.credentials.username.clone(),
            "credentials.api_key" => self.credentials.api_key.clone(),
            "credentials.password" => self.credentials.password.clone(),
            "credentials.openid_provider" => self.credentials.openid_provider.clone(),
            "polling.max_attempts" => self.polling.max_attempts.map(|n| n.to_string()),
            _ => None,
        };
        match raw {
            Some(_) if SECRET_CONFIG_KEYS.contains(&key) => "********".to_string(),
            Some(v) => v,
            None => "(not set)".to_string(),
        }
    }

    /// Apply an already validated `key = value`. `none` clears the setting.
    ///
    /// # Errors
    ///
    /// Returns an error if the key is unknown or the value does not parse.
    pub fn apply(&mut self, key: &str, value: &str) -> Result<()> {
        validate_config_key(key)?;
        validate_config_value(key, value)?;

        let text = (value != UNSET_VALUE).then(|| value.to_string());
        match key {
            "endpoints.service_url" => self.endpoints.service_url = text,
            "endpoints.model_url" => self.endpoints.model_url = text,
            "credentials.username" => self.credentials.username = text,
            "credentials.api_key" => self.credentials.api_key = text,
            "credentials.password" => self.credentials.password = text,
            "credentials.openid_provider" => self.credentials.openid_provider = text,
            "polling.max_attempts" => {
                self.polling.max_attempts = text.map(|v| v.parse()).transpose()?;
            }
            _ => anyhow::bail!("Unknown setting: {key}"),
        }
        Ok(())
    }
}

// ── Validators ───────────────────────────────────────────────────────────────

/// Validates a configuration key against the whitelist.
///
/// # Errors
///
/// Returns an error if the key is not in the allowed list.
pub fn validate_config_key(key: &str) -> Result<()> {
    if !VALID_CONFIG_KEYS.contains(&key) {
        return Err(ConfigError::UnknownKey {
            key: key.to_string(),
            valid: VALID_CONFIG_KEYS.join(", "),
        }
        .into());
    }
    Ok(())
}

/// Validates a configuration value for the given key.
///
/// # Errors
///
/// Returns an error if the value is not valid for the key.
pub fn validate_config_value(key: &str, value: &str) -> Result<()> {
    if value == UNSET_VALUE {
        return Ok(());
    }
    match key {
        "endpoints.service_url" | "endpoints.model_url"
            if !(value.starts_with("http://") || value.starts_with("https://")) =>
        {
            Err(ConfigError::InvalidValue {
                key: key.to_string(),
                value: value.to_string(),
                valid: format!("an http:// or https:// URL, or '{UNSET_VALUE}'"),
            }
            .into())
        }
        "polling.max_attempts" if !value.parse::<u32>().is_ok_and(|n| n > 0) => {
            Err(ConfigError::InvalidValue {
                key: key.to_string(),
                value: value.to_string(),
                valid: format!("a positive integer, or '{UNSET_VALUE}'"),
            }
            .into())
        }
        _ => Ok(()),
    }
}

// ── Unit tests ───────────────────────────────────────────────────────────────
