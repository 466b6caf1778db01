//! Output strategies - render serializable data as plain text, JSON, YAML or TOML

pub mod json;
pub mod plain;
pub mod toml;
pub mod yaml;

pub use self::json::JsonOutput;
pub use self::plain::PlainOutput;
pub use self::toml::TomlOutput;
pub use self::yaml::YamlOutput;

use serde::Serialize;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum OutputError {
    #[error("Failed to convert data: {0}")]
    Convert(#[from] serde_json::Error),

    #[error("YAML serialization failed: {0}")]
    Yaml(#[from] serde_yml::Error),

    #[error("TOML serialization failed: {0}")]
    Toml(#[from] ::toml::ser::Error),

    #[error("TOML output requires a table at the root, got {0}")]
    TomlRoot(&'static str),

    #[error("Unknown output format '{0}' (expected plain, json, yaml or toml)")]
    UnknownFormat(String),
}

/// A pluggable renderer for command results
pub trait OutputStrategy {
    fn name(&self) -> &str;

    fn render(&self, data: &serde_json::Value) -> Result<String, OutputError>;
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputFormat {
    #[default]
    Plain,
    Json,
    Yaml,
    Toml,
}

impl OutputFormat {
    /// Renderer for this format; `prettify` only affects JSON
    pub fn strategy(&self, prettify: bool) -> Box<dyn OutputStrategy> {
        match self {
            OutputFormat::Plain => Box::new(PlainOutput),
            OutputFormat::Json if prettify => Box::new(JsonOutput::pretty()),
            OutputFormat::Json => Box::new(JsonOutput::compact()),
            OutputFormat::Yaml => Box::new(YamlOutput),
            OutputFormat::Toml => Box::new(TomlOutput),
        }
    }

    /// Serialize `data` and render it with this format's strategy
    pub fn render<T: Serialize + ?Sized>(
        &self,
        data: &T,
        prettify: bool,
    ) -> Result<String, OutputError> {
        let value = serde_json::to_value(data)?;
        self.strategy(prettify).render(&value)
    }
}

impl FromStr for OutputFormat {
    type Err = OutputError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "plain" => Ok(OutputFormat::Plain),
            "json" => Ok(OutputFormat::Json),
            "yaml" | "yml" => Ok(OutputFormat::Yaml),
            "toml" => Ok(OutputFormat::Toml),
            _ => Err(OutputError::UnknownFormat(s.to_string())),
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            OutputFormat::Plain => "plain",
            OutputFormat::Json => "json",
            OutputFormat::Yaml => "yaml",
            OutputFormat::Toml => "toml",
        };
        write!(f, "{}", name)
    }
}
