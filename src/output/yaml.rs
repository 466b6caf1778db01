use serde_json::Value;

use super::{OutputError, OutputStrategy};

pub struct YamlOutput;

impl OutputStrategy for YamlOutput {
    fn name(&self) -> &str {
        "yaml"
    }

    fn render(&self, data: &Value) -> Result<String, OutputError> {
        Ok(serde_yml::to_string(data)?)
    }
}
