//! Connection settings for the remote Deck instance.

use std::{env, fmt};

use miette::Diagnostic;
use thiserror::Error;

pub const URL_VAR: &str = "NEXTCLOUD_URL";
pub const USERNAME_VAR: &str = "NEXTCLOUD_USERNAME";
pub const PASSWORD_VAR: &str = "NEXTCLOUD_PASSWORD";

#[derive(Error, Diagnostic, Debug, PartialEq)]
pub enum ConfigError {
    #[error("Missing configuration value: {name}")]
    #[diagnostic(
        code(deck_mcp::config::missing),
        help("Pass it on the command line or set the {name} environment variable.")
    )]
    Missing { name: &'static str },
}

/// Nextcloud base URL plus the static credential forwarded on every call.
#[derive(Clone, PartialEq)]
pub struct DeckConfig {
    pub url: String,
    pub username: String,
    pub password: String,
}

impl fmt::Debug for DeckConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DeckConfig")
            .field("url", &self.url)
            .field("username", &self.username)
            .field("password", &"***")
            .finish()
    }
}

impl DeckConfig {
    /// Resolve the configuration.
    ///
    /// Priority for each value:
    /// 1. Explicit argument (CLI flag)
    /// 2. Environment variable
    /// 3. Error: there are no defaults for the instance or the credential
    pub fn resolve(
        url: Option<String>,
        username: Option<String>,
        password: Option<String>,
    ) -> Result<Self, ConfigError> {
        let url = pick(url, URL_VAR)?;
        Ok(Self {
            url: url.trim_end_matches('/').to_string(),
            username: pick(username, USERNAME_VAR)?,
            password: pick(password, PASSWORD_VAR)?,
        })
    }

    /// Resolve purely from the environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::resolve(None, None, None)
    }
}

fn pick(explicit: Option<String>, name: &'static str) -> Result<String, ConfigError> {
    explicit
        .or_else(|| env::var(name).ok())
        .filter(|value| !value.is_empty())
        .ok_or(ConfigError::Missing { name })
}
