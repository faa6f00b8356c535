use scrub_core::JsonSettings;
use scrub_security::RedactionSpec;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Configuration for scrub
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub redaction: RedactionConfig,

    #[serde(default)]
    pub json: JsonConfig,

    #[serde(default)]
    pub log: LogConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RedactionConfig {
    /// JSON member names whose string values are replaced
    #[serde(default = "default_fields")]
    pub fields: Vec<String>,

    /// Also look inside objects nested in arrays
    #[serde(default)]
    pub traverse_arrays: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonConfig {
    #[serde(default = "default_true")]
    pub omit_nulls: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogConfig {
    /// Default `tracing` filter when `RUST_LOG` is unset
    #[serde(default = "default_filter")]
    pub filter: String,
}

impl Default for RedactionConfig {
    fn default() -> Self {
        Self {
            fields: default_fields(),
            traverse_arrays: false,
        }
    }
}

impl Default for JsonConfig {
    fn default() -> Self {
        Self {
            omit_nulls: default_true(),
        }
    }
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            filter: default_filter(),
        }
    }
}

fn default_fields() -> Vec<String> {
    vec!["picture".to_string()]
}

fn default_true() -> bool {
    true
}

fn default_filter() -> String {
    "info".to_string()
}

impl RedactionConfig {
    pub fn spec(&self) -> RedactionSpec {
        RedactionSpec::new(&self.fields).with_array_traversal(self.traverse_arrays)
    }
}

impl JsonConfig {
    pub fn settings(&self) -> JsonSettings {
        JsonSettings {
            omit_nulls: self.omit_nulls,
        }
    }
}

impl Config {
    /// Load config from default location or create default if not found
    pub fn load() -> anyhow::Result<Self> {
        let path = Self::config_path();

        if path.exists() {
            Self::load_from(&path)
        } else {
            // Create default config file
            let config = Config::default();
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent)?;
            }
            let content = toml::to_string_pretty(&config)?;
            std::fs::write(&path, content)?;
            Ok(config)
        }
    }

    /// Load config from an explicit file
    pub fn load_from(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }

    /// Get config file path
    pub fn config_path() -> PathBuf {
        if let Some(dirs) = directories::ProjectDirs::from("com", "scrub", "scrub") {
            dirs.config_dir().join("config.toml")
        } else {
            PathBuf::from("~/.scrub/config.toml")
        }
    }
}
