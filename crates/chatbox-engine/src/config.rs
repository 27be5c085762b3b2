//! Configuration types for the chatbox engine.
//!
//! Every field has a default, so an empty JSON object is a valid config and
//! a missing config file simply means "use the defaults".

use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

use crate::answering::DEFAULT_ENDPOINT;
use crate::message::DEFAULT_GREETING;

/// Directory holding the config file and the TUI log.
pub const CHATBOX_DIR: &str = ".chatbox";

/// Config file name inside [`CHATBOX_DIR`].
pub const CONFIG_FILE: &str = "config.json";

/// Main configuration for chatbox.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// URL of the answering service.
    #[serde(default = "default_endpoint")]
    pub endpoint: String,

    /// Minimum time the typing indicator stays up, in milliseconds.
    #[serde(default = "default_min_reply_delay_ms")]
    pub min_reply_delay_ms: u64,

    /// Greeting seeded into the conversation.
    #[serde(default = "default_greeting")]
    pub greeting: String,

    /// Path or `http(s)://` URL of the intents document.
    #[serde(default = "default_intents")]
    pub intents: Option<String>,

    /// Optional request timeout in seconds. Unset means the transport default.
    #[serde(default)]
    pub request_timeout_secs: Option<u64>,

    /// Answer from the intents document's patterns instead of the service.
    #[serde(default)]
    pub offline: bool,
}

fn default_endpoint() -> String {
    DEFAULT_ENDPOINT.into()
}

fn default_min_reply_delay_ms() -> u64 {
    3000
}

fn default_greeting() -> String {
    DEFAULT_GREETING.into()
}

#[allow(clippy::unnecessary_wraps)]
fn default_intents() -> Option<String> {
    Some("intents.json".into())
}

impl Default for Config {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            min_reply_delay_ms: default_min_reply_delay_ms(),
            greeting: default_greeting(),
            intents: default_intents(),
            request_timeout_secs: None,
            offline: false,
        }
    }
}

impl Config {
    /// Load configuration from a file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(ConfigError::Io)?;
        serde_json::from_str(&content).map_err(ConfigError::Parse)
    }

    /// Load configuration, falling back to defaults if the file is absent.
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        if path.exists() {
            Self::load(path)
        } else {
            Ok(Self::default())
        }
    }

    /// Save configuration to a file.
    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        let content = serde_json::to_string_pretty(self).map_err(ConfigError::Serialize)?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(ConfigError::Io)?;
        }
        std::fs::write(path, content).map_err(ConfigError::Io)
    }

    /// Default config file location relative to the working directory.
    pub fn default_path() -> std::path::PathBuf {
        Path::new(CHATBOX_DIR).join(CONFIG_FILE)
    }

    pub fn min_reply_delay(&self) -> Duration {
        Duration::from_millis(self.min_reply_delay_ms)
    }

    pub fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout_secs.map(Duration::from_secs)
    }
}

/// Errors that can occur when working with configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// I/O error reading or writing config.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Error parsing config JSON.
    #[error("Parse error: {0}")]
    Parse(#[source] serde_json::Error),

    /// Error serializing config to JSON.
    #[error("Serialize error: {0}")]
    Serialize(#[source] serde_json::Error),
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.endpoint, "http://127.0.0.1:5000/predict");
        assert_eq!(config.min_reply_delay(), Duration::from_millis(3000));
        assert_eq!(config.greeting, "Hello! How can I be of Assistance today?");
        assert_eq!(config.intents.as_deref(), Some("intents.json"));
        assert!(config.request_timeout().is_none());
        assert!(!config.offline);
    }

    #[test]
    fn test_empty_object_uses_defaults() {
        let config: Config = serde_json::from_str("{}").unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_partial_config_overrides() {
        let config: Config =
            serde_json::from_str(r#"{"endpoint":"http://example.test/predict","request_timeout_secs":10}"#)
                .unwrap();
        assert_eq!(config.endpoint, "http://example.test/predict");
        assert_eq!(config.request_timeout(), Some(Duration::from_secs(10)));
        assert_eq!(config.min_reply_delay_ms, 3000);
    }

    #[test]
    fn test_save_and_load() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("config.json");

        let config = Config {
            min_reply_delay_ms: 500,
            ..Config::default()
        };
        config.save(&path).unwrap();

        let loaded = Config::load(&path).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_load_or_default_missing_file() {
        let dir = TempDir::new().unwrap();
        let config = Config::load_or_default(&dir.path().join("absent.json")).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_load_invalid_json() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, "not json").unwrap();

        assert!(matches!(Config::load(&path), Err(ConfigError::Parse(_))));
    }
}
