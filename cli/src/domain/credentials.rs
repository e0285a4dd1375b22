//! Job service credentials.
//!
//! Pure functions only: no I/O, no async, no filesystem access.

use std::fmt;

use crate::domain::error::ClientError;
use crate::domain::template::Bindings;

pub const INCOMPLETE_CREDENTIALS: &str = "Incomplete credentials";

/// Credentials sent with every job service request.
///
/// Exactly one of the two shapes is ever held; [`Credentials::from_parts`]
/// rejects everything else.
#[derive(Clone, PartialEq, Eq)]
pub enum Credentials {
    ApiKey {
        username: String,
        api_key: String,
    },
    Password {
        username: String,
        password: String,
        openid_provider: String,
    },
}

impl Credentials {
    /// Build credentials from optional configuration fields.
    ///
    /// Accepts `{username, api_key}` or `{username, password,
    /// openid_provider}`. Blank strings count as missing.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Configuration`] with the message
    /// `"Incomplete credentials"` for any other combination.
    pub fn from_parts(
        username: Option<&str>,
        api_key: Option<&str>,
        password: Option<&str>,
        openid_provider: Option<&str>,
    ) -> Result<Self, ClientError> {
        let incomplete = || ClientError::Configuration(INCOMPLETE_CREDENTIALS.to_string());
        let username = present(username).ok_or_else(incomplete)?;

        match (
            present(api_key),
            present(password),
            present(openid_provider),
        ) {
            (Some(api_key), None, None) => Ok(Self::ApiKey {
                username: username.to_string(),
                api_key: api_key.to_string(),
            }),
            (None, Some(password), Some(openid_provider)) => Ok(Self::Password {
                username: username.to_string(),
                password: password.to_string(),
                openid_provider: openid_provider.to_string(),
            }),
            _ => Err(incomplete()),
        }
    }

    #[must_use]
    pub fn username(&self) -> &str {
        match self {
            Self::ApiKey { username, .. } | Self::Password { username, .. } => username,
        }
    }

    /// Add the `User` / `ApiKey` / `Password` / `OpenIdProvider` placeholders.
    ///
    /// Fields of the other shape are bound as absent so templates render
    /// them empty.
    pub fn bind(&self, bindings: &mut Bindings) {
        bindings.set("User", self.username());
        match self {
            Self::ApiKey { api_key, .. } => {
                bindings.set("ApiKey", api_key.as_str());
                bindings.set_absent("Password");
                bindings.set_absent("OpenIdProvider");
            }
            Self::Password {
                password,
                openid_provider,
                ..
            } => {
                bindings.set_absent("ApiKey");
                bindings.set("Password", password.as_str());
                bindings.set("OpenIdProvider", openid_provider.as_str());
            }
        }
    }
}

// Secrets never reach logs through `{:?}`.
impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ApiKey { username, .. } => f
                .debug_struct("ApiKey")
                .field("username", username)
                .field("api_key", &"***")
                .finish(),
            Self::Password {
                username,
                openid_provider,
                ..
            } => f
                .debug_struct("Password")
                .field("username", username)
                .field("password", &"***")
                .field("openid_provider", openid_provider)
                .finish(),
        }
    }
}

fn present(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|s| !s.is_empty())
}
