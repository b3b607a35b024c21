//! Environment bundle handed to every request.
//!
//! Values are resolved from, lowest to highest precedence: built-in defaults,
//! an optional `postboard.toml` file, then environment variables.
use serde_derive::{Deserialize, Serialize};
use std::env;
use std::fs::read_to_string;
use std::path::Path;

/// Name of the config file looked up in the working directory.
pub const DEFAULT_CONFIG_FILE: &str = "postboard.toml";
/// Database used when nothing else is configured.
pub const DEFAULT_DATABASE_URL: &str = "sqlite://postboard.sqlite3?mode=rwc";
/// Message shown on the home page when nothing else is configured.
pub const DEFAULT_MESSAGE: &str = "Hello from postboard";

/// Environment variable overriding the database url.
pub const DATABASE_URL_VAR: &str = "DATABASE_URL";
/// Environment variable overriding the home page message.
pub const MESSAGE_VAR: &str = "POSTBOARD_MESSAGE";

/// Structure of `postboard.toml`.
#[derive(Default, Deserialize, Serialize, Debug)]
pub struct Config {
    /// Database section.
    pub database: Option<Database>,
    /// Free-form values exposed to the page.
    pub vars: Option<Vars>,
}

/// `[database]` section.
#[derive(Default, Deserialize, Serialize, Debug)]
pub struct Database {
    /// sqlx connection url, e.g. `sqlite://posts.sqlite3?mode=rwc`.
    pub url: Option<String>,
}

/// `[vars]` section.
#[derive(Default, Deserialize, Serialize, Debug)]
pub struct Vars {
    /// Message rendered at the top of the home page.
    pub message: Option<String>,
}

/// Resolved environment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Env {
    /// Where the posts live.
    pub database_url: String,
    /// Message rendered at the top of the home page.
    pub message: String,
}

impl Default for Env {
    fn default() -> Self {
        Self {
            database_url: DEFAULT_DATABASE_URL.to_owned(),
            message: DEFAULT_MESSAGE.to_owned(),
        }
    }
}

impl Config {
    /// Parse a config file.
    ///
    /// # Errors
    /// Will error if the file cannot be read or is not valid TOML.
    pub fn from_file(path: &Path) -> anyhow::Result<Self> {
        let config_str = read_to_string(path)?;
        let conf: Self = toml::from_str(&config_str)?;
        Ok(conf)
    }
}

impl Env {
    /// Resolve the environment.
    ///
    /// An explicit `config_path` must exist. Without one, `postboard.toml` in
    /// the working directory is used if present.
    ///
    /// # Errors
    /// Will error if the explicit config file is missing, or if any config
    /// file is not valid TOML.
    pub fn load(config_path: Option<&Path>) -> anyhow::Result<Self> {
        let config = match config_path {
            Some(path) => Config::from_file(path)?,
            None => {
                let path = Path::new(DEFAULT_CONFIG_FILE);
                if path.exists() {
                    Config::from_file(path)?
                } else {
                    Config::default()
                }
            }
        };
        let mut resolved = Self::from_config(config);
        resolved.apply_overrides(|key| env::var(key).ok());
        Ok(resolved)
    }

    /// Build an environment from a parsed config file, falling back to defaults.
    #[must_use]
    pub fn from_config(config: Config) -> Self {
        let defaults = Self::default();
        Self {
            database_url: config
                .database
                .and_then(|db| db.url)
                .unwrap_or(defaults.database_url),
            message: config
                .vars
                .and_then(|vars| vars.message)
                .unwrap_or(defaults.message),
        }
    }

    /// Overwrite values with whatever `lookup` finds for the known variables.
    pub fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(url) = lookup(DATABASE_URL_VAR) {
            self.database_url = url;
        }
        if let Some(message) = lookup(MESSAGE_VAR) {
            self.message = message;
        }
    }
}
