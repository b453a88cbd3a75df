//! Configuration for the campus agent.
//!
//! Lookup order: explicit `--config` path, `$CAMPUS_CONFIG`, then
//! /etc/campus-assistant/config.toml, otherwise built-in defaults.
//! Every field has a default so partial files work.

use anyhow::{bail, Context, Result};
use campus_shared::ClassifierTuning;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{info, warn};

/// System-wide config file path
pub const CONFIG_PATH: &str = "/etc/campus-assistant/config.toml";

/// Environment variable naming a config file
pub const CONFIG_ENV: &str = "CAMPUS_CONFIG";

/// Campus REST backend
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Per-request timeout; a timeout sends the call to the fixture tier
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_base_url() -> String {
    "http://127.0.0.1:3000/api".to_string()
}

fn default_timeout_secs() -> u64 {
    5
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl ApiConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Turns kept per session before the oldest is evicted
    #[serde(default = "default_history_capacity")]
    pub history_capacity: usize,

    /// Sessions held at once; the least recently used is dropped past this
    #[serde(default = "default_max_sessions")]
    pub max_sessions: usize,
}

fn default_history_capacity() -> usize {
    campus_shared::DEFAULT_HISTORY_CAPACITY
}

fn default_max_sessions() -> usize {
    campus_shared::DEFAULT_MAX_SESSIONS
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            history_capacity: default_history_capacity(),
            max_sessions: default_max_sessions(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AgentConfig {
    #[serde(default = "default_max_input_chars")]
    pub max_input_chars: usize,

    /// Skip the live backend and answer from fixtures
    #[serde(default)]
    pub offline: bool,
}

fn default_max_input_chars() -> usize {
    2000
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            max_input_chars: default_max_input_chars(),
            offline: false,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct KnowledgeConfig {
    /// JSON file of `{key, answer}` entries merged over the built-in table
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extra_entries: Option<PathBuf>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub api: ApiConfig,

    #[serde(default)]
    pub classifier: ClassifierTuning,

    #[serde(default)]
    pub session: SessionConfig,

    #[serde(default)]
    pub agent: AgentConfig,

    #[serde(default)]
    pub knowledge: KnowledgeConfig,
}

impl Config {
    /// Resolve and load the config. An explicit path or `$CAMPUS_CONFIG`
    /// must exist; the system path is optional.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit {
            return Self::load_from_path(path);
        }
        if let Ok(path) = std::env::var(CONFIG_ENV) {
            return Self::load_from_path(Path::new(&path));
        }
        let system = Path::new(CONFIG_PATH);
        if system.exists() {
            return Self::load_from_path(system);
        }
        warn!("Config not found at {}, using defaults", CONFIG_PATH);
        Ok(Config::default())
    }

    /// Load and validate config from a specific path
    pub fn load_from_path(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config {}", path.display()))?;
        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config {}", path.display()))?;
        config.validate()?;
        info!("Loaded config from {}", path.display());
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        self.classifier.validate()?;
        if !(self.api.base_url.starts_with("http://") || self.api.base_url.starts_with("https://")) {
            bail!("api.base_url must be an http(s) URL, got {:?}", self.api.base_url);
        }
        if self.api.timeout_secs == 0 {
            bail!("api.timeout_secs must be at least 1");
        }
        if self.session.history_capacity == 0 {
            bail!("session.history_capacity must be at least 1");
        }
        if self.session.max_sessions == 0 {
            bail!("session.max_sessions must be at least 1");
        }
        if self.agent.max_input_chars == 0 {
            bail!("agent.max_input_chars must be at least 1");
        }
        Ok(())
    }

    /// Effective config as TOML
    pub fn to_toml(&self) -> Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_config(content: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.api.base_url, "http://127.0.0.1:3000/api");
        assert_eq!(config.api.timeout(), Duration::from_secs(5));
        assert_eq!(config.classifier.acceptance_threshold, 2.0);
        assert_eq!(config.classifier.topic_weights.menus, 1.3);
        assert_eq!(config.session.history_capacity, 50);
        assert_eq!(config.session.max_sessions, 1024);
        assert_eq!(config.agent.max_input_chars, 2000);
        assert!(!config.agent.offline);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let file = write_config(
            r#"
[agent]
offline = true

[classifier.topic_weights]
faqs = 0.5
"#,
        );
        let config = Config::load(Some(file.path())).unwrap();
        assert!(config.agent.offline);
        assert_eq!(config.agent.max_input_chars, 2000);
        assert_eq!(config.classifier.topic_weights.faqs, 0.5);
        assert_eq!(config.classifier.topic_weights.buses, 1.2);
        assert_eq!(config.api.timeout_secs, 5);
    }

    #[test]
    fn test_invalid_values_rejected() {
        let file = write_config("[classifier]\nacceptance_threshold = -1.0\n");
        assert!(Config::load_from_path(file.path()).is_err());

        let file = write_config("[api]\nbase_url = \"ftp://example.org\"\n");
        assert!(Config::load_from_path(file.path()).is_err());

        let file = write_config("[session]\nhistory_capacity = 0\n");
        assert!(Config::load_from_path(file.path()).is_err());

        let file = write_config("[session]\nmax_sessions = 0\n");
        assert!(Config::load_from_path(file.path()).is_err());
    }

    #[test]
    fn test_explicit_missing_path_is_error() {
        let dir = tempfile::tempdir().unwrap();
        assert!(Config::load(Some(&dir.path().join("missing.toml"))).is_err());
    }

    #[test]
    fn test_toml_output_parses_back() {
        let mut config = Config::default();
        config.knowledge.extra_entries = Some(PathBuf::from("/srv/campus/knowledge.json"));
        let text = config.to_toml().unwrap();
        let parsed: Config = toml::from_str(&text).unwrap();
        assert_eq!(parsed, config);
    }
}
