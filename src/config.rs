//! Server configuration.

use std::path::PathBuf;

use serde::Deserialize;

fn default_server_name() -> String {
    "irc.kestrel.example".to_string()
}

/// Top-level server configuration.
///
/// Every field has a default so a partial (or empty) TOML document is a
/// valid configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Server name, used as the source of numeric replies and in the
    /// NAMES line budget.
    pub name: String,

    /// Path to the SQLite database holding persistent channels. `None`
    /// disables durable storage.
    pub database: Option<PathBuf>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            name: default_server_name(),
            database: None,
        }
    }
}

impl ServerConfig {
    pub fn from_toml_str(s: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(s)
    }
}
