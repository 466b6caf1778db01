use serde_json::Value;

use super::{OutputError, OutputStrategy};

pub struct TomlOutput;

impl OutputStrategy for TomlOutput {
    fn name(&self) -> &str {
        "toml"
    }

    /// TOML documents must be tables, so only objects render
    fn render(&self, data: &Value) -> Result<String, OutputError> {
        let kind = match data {
            Value::Object(_) => return Ok(::toml::to_string_pretty(data)?),
            Value::Null => "null",
            Value::Bool(_) => "a boolean",
            Value::Number(_) => "a number",
            Value::String(_) => "a string",
            Value::Array(_) => "an array",
        };
        Err(OutputError::TomlRoot(kind))
    }
}
