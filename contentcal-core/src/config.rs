//! Global contentcal configuration.

use std::path::{Path, PathBuf};
use std::time::Duration;

use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};

use crate::constants::DEFAULT_FEEDBACK_URL;
use crate::error::{ContentCalError, ContentCalResult};
use crate::source::Source;

static DEFAULT_SOURCE: &str = "~/content-calendar/posts";

fn default_source() -> String {
    DEFAULT_SOURCE.to_string()
}

fn is_default_source(s: &String) -> bool {
    s == DEFAULT_SOURCE
}

fn default_feedback_url() -> String {
    DEFAULT_FEEDBACK_URL.to_string()
}

fn is_default_feedback_url(s: &String) -> bool {
    s == DEFAULT_FEEDBACK_URL
}

/// Configuration at ~/.config/contentcal/config.toml
///
/// Every key can be overridden with a `CONTENTCAL_` environment variable,
/// e.g. `CONTENTCAL_SOURCE=https://example.com/posts`.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct ContentCalConfig {
    /// Base URL or directory holding `<client>/<month>.json` documents.
    #[serde(default = "default_source", skip_serializing_if = "is_default_source")]
    pub source: String,

    /// Client shown when none is given on the command line.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_client: Option<String>,

    /// Messaging deep link that feedback messages are appended to.
    #[serde(
        default = "default_feedback_url",
        skip_serializing_if = "is_default_feedback_url"
    )]
    pub feedback_url: String,

    /// Per-request timeout for HTTP sources. No timeout when unset.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timeout_secs: Option<u64>,
}

impl Default for ContentCalConfig {
    fn default() -> Self {
        ContentCalConfig {
            source: default_source(),
            default_client: None,
            feedback_url: default_feedback_url(),
            timeout_secs: None,
        }
    }
}

impl ContentCalConfig {
    pub fn config_path() -> ContentCalResult<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| ContentCalError::Config("Could not determine config directory".into()))?
            .join("contentcal");

        Ok(config_dir.join("config.toml"))
    }

    /// Load from the default location, creating a commented file on first run.
    pub fn load() -> ContentCalResult<Self> {
        let config_path = Self::config_path()?;

        if !config_path.exists() {
            Self::create_default_config(&config_path)?;
        }

        Self::load_from(&config_path)
    }

    pub fn load_from(path: &Path) -> ContentCalResult<Self> {
        Config::builder()
            .add_source(File::from(path).required(false))
            .add_source(Environment::with_prefix("CONTENTCAL"))
            .build()
            .map_err(|e| ContentCalError::Config(e.to_string()))?
            .try_deserialize()
            .map_err(|e| ContentCalError::Config(e.to_string()))
    }

    pub fn save_to(&self, path: &Path) -> ContentCalResult<()> {
        let content =
            toml::to_string_pretty(self).map_err(|e| ContentCalError::Config(e.to_string()))?;

        std::fs::write(path, content)
            .map_err(|e| ContentCalError::Config(format!("Could not write config file: {e}")))?;

        Ok(())
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }

    /// The post source this config points at.
    pub fn post_source(&self) -> ContentCalResult<Source> {
        Source::from_location(&self.source, self.timeout())
    }

    /// Create a default config file with all options commented out.
    pub fn create_default_config(path: &Path) -> ContentCalResult<()> {
        let contents = format!(
            "\
# contentcal configuration

# Where month documents live, as <source>/<client>/<month>.json.
# Either a directory or an http(s) base URL:
# source = \"{}\"

# Client to show when none is given:
# default_client = \"acme\"

# Where \"send feedback\" links point:
# feedback_url = \"{}\"

# HTTP request timeout in seconds (no timeout by default):
# timeout_secs = 10
",
            DEFAULT_SOURCE, DEFAULT_FEEDBACK_URL
        );

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| {
                ContentCalError::Config(format!("Could not create config directory: {e}"))
            })?;
        }

        std::fs::write(path, contents)
            .map_err(|e| ContentCalError::Config(format!("Could not write config file: {e}")))?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn commented_default_file_loads_as_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("contentcal/config.toml");

        ContentCalConfig::create_default_config(&path).unwrap();
        let config = ContentCalConfig::load_from(&path).unwrap();

        assert_eq!(config.source, DEFAULT_SOURCE);
        assert_eq!(config.feedback_url, DEFAULT_FEEDBACK_URL);
        assert_eq!(config.default_client, None);
        assert_eq!(config.timeout(), None);
    }

    #[test]
    fn saved_config_round_trips_and_omits_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");

        let config = ContentCalConfig {
            source: "https://cdn.example.com/posts".into(),
            default_client: Some("acme".into()),
            timeout_secs: Some(5),
            ..Default::default()
        };
        config.save_to(&path).unwrap();

        let written = std::fs::read_to_string(&path).unwrap();
        assert!(!written.contains("feedback_url"));

        let loaded = ContentCalConfig::load_from(&path).unwrap();
        assert_eq!(loaded, config);
        assert_eq!(loaded.timeout(), Some(Duration::from_secs(5)));
        assert!(matches!(loaded.post_source().unwrap(), Source::Http(_)));
    }
}
