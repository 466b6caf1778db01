//! Application configuration record, file loading and validation

pub mod loader;
pub mod validator;

pub use loader::ConfigLoader;
pub use validator::{ConfigValidator, ValidationResult, ValidationRule};

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;

/// Top-level configuration file contents
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub app: AppMetadata,
    pub output: OutputConfig,
    pub plugins: PluginConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppMetadata {
    pub name: String,
    pub version: String,
    pub description: String,
    pub author: String,
}

impl Default for AppMetadata {
    fn default() -> Self {
        Self {
            name: "Laret".to_string(),
            version: "1.0.0".to_string(),
            description: String::new(),
            author: String::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// One of plain, json, yaml, toml
    pub format: String,
    pub colorized: bool,
    pub verbose: bool,
    pub prettify: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: "plain".to_string(),
            colorized: true,
            verbose: false,
            prettify: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct PluginConfig {
    pub enabled: Vec<String>,
    pub disabled: Vec<String>,
    /// Search paths for external plugins; recorded but not loaded
    pub paths: Vec<String>,
    pub auto_load: bool,
}

impl Default for PluginConfig {
    fn default() -> Self {
        Self {
            enabled: Vec::new(),
            disabled: Vec::new(),
            paths: Vec::new(),
            auto_load: true,
        }
    }
}

impl PluginConfig {
    /// Listed in `enabled` and not listed in `disabled`
    pub fn is_enabled(&self, name: &str) -> bool {
        self.enabled.iter().any(|n| n == name) && !self.disabled.iter().any(|n| n == name)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct LoggingConfig {
    pub level: String,
    /// Log file path; empty means stderr
    pub file: String,
    pub format: String,
    pub max_size: String,
    pub max_history: u32,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "INFO".to_string(),
            file: String::new(),
            format: "{timestamp} [{level}] {target} - {message}".to_string(),
            max_size: "10MB".to_string(),
            max_history: 10,
        }
    }
}

/// On-disk configuration syntax
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    Yaml,
    Toml,
    Json,
}

impl ConfigFormat {
    /// Detect the format from a file extension (case-insensitive)
    pub fn from_path(path: &Path) -> Option<Self> {
        let extension = path.extension()?.to_str()?.to_lowercase();
        match extension.as_str() {
            "yml" | "yaml" => Some(ConfigFormat::Yaml),
            "toml" => Some(ConfigFormat::Toml),
            "json" => Some(ConfigFormat::Json),
            _ => None,
        }
    }
}

impl fmt::Display for ConfigFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigFormat::Yaml => write!(f, "YAML"),
            ConfigFormat::Toml => write!(f, "TOML"),
            ConfigFormat::Json => write!(f, "JSON"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();
        assert_eq!(config.app.name, "Laret");
        assert_eq!(config.output.format, "plain");
        assert!(config.output.colorized);
        assert!(config.plugins.auto_load);
        assert_eq!(config.logging.level, "INFO");
        assert_eq!(config.logging.max_history, 10);
    }

    #[test]
    fn test_format_detection() {
        assert_eq!(ConfigFormat::from_path(Path::new("a.yml")), Some(ConfigFormat::Yaml));
        assert_eq!(ConfigFormat::from_path(Path::new("a.YAML")), Some(ConfigFormat::Yaml));
        assert_eq!(ConfigFormat::from_path(Path::new("a.toml")), Some(ConfigFormat::Toml));
        assert_eq!(ConfigFormat::from_path(Path::new("a.json")), Some(ConfigFormat::Json));
        assert_eq!(ConfigFormat::from_path(Path::new("a.ini")), None);
        assert_eq!(ConfigFormat::from_path(Path::new("noext")), None);
    }

    #[test]
    fn test_plugin_enablement() {
        let plugins = PluginConfig {
            enabled: vec!["LoggingPlugin".to_string(), "Audit".to_string()],
            disabled: vec!["Audit".to_string()],
            ..PluginConfig::default()
        };
        assert!(plugins.is_enabled("LoggingPlugin"));
        assert!(!plugins.is_enabled("Audit"));
        assert!(!plugins.is_enabled("Other"));
    }

    #[test]
    fn test_kebab_case_keys() {
        let yaml = "plugins:\n  auto-load: false\nlogging:\n  max-size: 5MB\n  max-history: 3\n";
        let config: AppConfig = serde_yml::from_str(yaml).unwrap();
        assert!(!config.plugins.auto_load);
        assert_eq!(config.logging.max_size, "5MB");
        assert_eq!(config.logging.max_history, 3);
        assert_eq!(config.output, OutputConfig::default());
    }
}
