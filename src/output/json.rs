use serde_json::Value;

use super::{OutputError, OutputStrategy};

pub struct JsonOutput {
    pretty: bool,
}

impl JsonOutput {
    pub fn compact() -> Self {
        Self { pretty: false }
    }

    pub fn pretty() -> Self {
        Self { pretty: true }
    }
}

impl OutputStrategy for JsonOutput {
    fn name(&self) -> &str {
        "json"
    }

    fn render(&self, data: &Value) -> Result<String, OutputError> {
        let rendered = if self.pretty {
            serde_json::to_string_pretty(data)?
        } else {
            serde_json::to_string(data)?
        };
        Ok(rendered)
    }
}
