//! Configuration management for vigil.
//!
//! Loads configuration from ${VIGIL_HOME}/config.toml with sensible defaults.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use vigil_types::pagination::DEFAULT_PAGE_SIZE;

pub mod paths {
    //! Path resolution for vigil configuration and data directories.
    //!
    //! VIGIL_HOME resolution order:
    //! 1. VIGIL_HOME environment variable (if set)
    //! 2. ~/.config/vigil (default)

    use std::path::PathBuf;

    /// Returns the vigil home directory.
    ///
    /// Checks VIGIL_HOME env var first, falls back to ~/.config/vigil
    pub fn vigil_home() -> PathBuf {
        if let Ok(home) = std::env::var("VIGIL_HOME") {
            return PathBuf::from(home);
        }

        std::env::var_os("HOME")
            .map(|h| PathBuf::from(h).join(".config").join("vigil"))
            .expect("Could not determine home directory")
    }

    /// Returns the path to the config.toml file.
    pub fn config_path() -> PathBuf {
        vigil_home().join("config.toml")
    }

    /// Returns the directory log files are written to.
    pub fn logs_dir() -> PathBuf {
        vigil_home().join("logs")
    }
}

/// Main configuration structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Base URL of the GraphQL API (without the /graphql suffix)
    pub server_url: Option<String>,

    /// Bearer token sent with every request
    pub access_token: Option<String>,

    /// Default account (user id) to inspect
    pub user: Option<String>,

    /// Sessions requested per page
    pub page_size: u32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server_url: None,
            access_token: None,
            user: None,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

impl Config {
    /// Loads configuration from the default config path.
    pub fn load() -> Result<Self> {
        Self::load_from(&paths::config_path())
    }

    /// Loads configuration from a specific path.
    /// Returns defaults if file doesn't exist.
    pub fn load_from(path: &Path) -> Result<Self> {
        if path.exists() {
            let contents = fs::read_to_string(path)
                .with_context(|| format!("Failed to read config from {}", path.display()))?;
            toml::from_str(&contents)
                .with_context(|| format!("Failed to parse config from {}", path.display()))
        } else {
            Ok(Config::default())
        }
    }

    /// Writes the commented template to `path`.
    ///
    /// Fails if a config already exists there.
    pub fn init_at(path: &Path) -> Result<()> {
        if path.exists() {
            anyhow::bail!("Config already exists at {}", path.display());
        }
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }
        fs::write(path, default_config_template())
            .with_context(|| format!("Failed to write config to {}", path.display()))?;
        Ok(())
    }
}

/// Template written by `vigil config init`.
pub fn default_config_template() -> &'static str {
    r#"# vigil configuration

# Base URL of the GraphQL API (without the /graphql suffix).
# server_url = "https://auth.example.com"

# Bearer token sent with every request.
# access_token = ""

# Default account (user id) to inspect.
# user = "user:01ABCDEF"

# Sessions requested per page.
page_size = 10
"#
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load_from(&dir.path().join("config.toml")).unwrap();
        assert_eq!(config.server_url, None);
        assert_eq!(config.page_size, DEFAULT_PAGE_SIZE);
    }

    #[test]
    fn partial_file_fills_in_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "server_url = \"https://auth.example.com\"\n").unwrap();
        let config = Config::load_from(&path).unwrap();
        assert_eq!(
            config.server_url.as_deref(),
            Some("https://auth.example.com")
        );
        assert_eq!(config.page_size, DEFAULT_PAGE_SIZE);
    }

    #[test]
    fn invalid_toml_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "page_size = \"ten\"\n").unwrap();
        assert!(Config::load_from(&path).is_err());
    }

    #[test]
    fn template_parses_as_valid_config() {
        let config: Config = toml::from_str(default_config_template()).unwrap();
        assert_eq!(config.page_size, DEFAULT_PAGE_SIZE);
    }

    #[test]
    fn init_creates_once() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        Config::init_at(&path).unwrap();
        let err = Config::init_at(&path).unwrap_err();
        assert!(err.to_string().contains("already exists"));
        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.page_size, DEFAULT_PAGE_SIZE);
    }
}
