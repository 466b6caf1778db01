//! Rule-based configuration validation

use super::AppConfig;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationResult {
    pub valid: bool,
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
}

impl ValidationResult {
    pub fn ok() -> Self {
        Self {
            valid: true,
            errors: Vec::new(),
            warnings: Vec::new(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            valid: false,
            errors: vec![message.into()],
            warnings: Vec::new(),
        }
    }

    /// Valid only when both are valid; messages concatenate
    pub fn merge(mut self, other: ValidationResult) -> Self {
        self.valid = self.valid && other.valid;
        self.errors.extend(other.errors);
        self.warnings.extend(other.warnings);
        self
    }
}

pub trait ValidationRule {
    fn validate(&self, config: &AppConfig) -> ValidationResult;
}

impl<F> ValidationRule for F
where
    F: Fn(&AppConfig) -> ValidationResult,
{
    fn validate(&self, config: &AppConfig) -> ValidationResult {
        self(config)
    }
}

const VALID_FORMATS: &[&str] = &["json", "yaml", "toml", "plain"];
const VALID_LEVELS: &[&str] = &["TRACE", "DEBUG", "INFO", "WARN", "ERROR"];

fn app_name(config: &AppConfig) -> ValidationResult {
    let name = &config.app.name;
    if !name.trim().is_empty() && name.chars().count() <= 100 {
        ValidationResult::ok()
    } else {
        ValidationResult::error("App name must be non-empty and max 100 characters")
    }
}

fn output_format(config: &AppConfig) -> ValidationResult {
    if VALID_FORMATS.contains(&config.output.format.as_str()) {
        ValidationResult::ok()
    } else {
        ValidationResult::error(format!(
            "Invalid output format: {}. Valid: {}",
            config.output.format,
            VALID_FORMATS.join(", ")
        ))
    }
}

fn logging_level(config: &AppConfig) -> ValidationResult {
    let level = config.logging.level.to_uppercase();
    if VALID_LEVELS.contains(&level.as_str()) {
        ValidationResult::ok()
    } else {
        ValidationResult::error(format!(
            "Invalid log level: {}. Valid: {}",
            config.logging.level,
            VALID_LEVELS.join(", ")
        ))
    }
}

fn plugin_paths(config: &AppConfig) -> ValidationResult {
    if config.plugins.paths.iter().any(|p| p.trim().is_empty()) {
        ValidationResult::error("Plugin paths cannot be empty")
    } else {
        ValidationResult::ok()
    }
}

/// Ordered rule list, seeded with the built-in rules
pub struct ConfigValidator {
    rules: Vec<Box<dyn ValidationRule>>,
}

impl ConfigValidator {
    pub fn new() -> Self {
        let mut validator = Self { rules: Vec::new() };
        validator
            .add_rule(app_name)
            .add_rule(output_format)
            .add_rule(logging_level)
            .add_rule(plugin_paths);
        validator
    }

    pub fn add_rule(&mut self, rule: impl ValidationRule + 'static) -> &mut Self {
        self.rules.push(Box::new(rule));
        self
    }

    pub fn validate(&self, config: &AppConfig) -> ValidationResult {
        self.rules
            .iter()
            .fold(ValidationResult::ok(), |result, rule| {
                result.merge(rule.validate(config))
            })
    }
}

impl Default for ConfigValidator {
    fn default() -> Self {
        Self::new()
    }
}
