use serde_json::Value;

use super::{OutputError, OutputStrategy};

/// Human-readable rendering: `{key=value, items=[a, b]}`, strings unquoted
pub struct PlainOutput;

impl OutputStrategy for PlainOutput {
    fn name(&self) -> &str {
        "plain"
    }

    fn render(&self, data: &Value) -> Result<String, OutputError> {
        Ok(plain(data))
    }
}

fn plain(value: &Value) -> String {
    match value {
        Value::Null => "null".to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        Value::String(s) => s.clone(),
        Value::Array(items) => {
            let items: Vec<String> = items.iter().map(plain).collect();
            format!("[{}]", items.join(", "))
        }
        Value::Object(map) => {
            let entries: Vec<String> = map
                .iter()
                .map(|(key, value)| format!("{}={}", key, plain(value)))
                .collect();
            format!("{{{}}}", entries.join(", "))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_scalars() {
        assert_eq!(PlainOutput.render(&json!("hello")).unwrap(), "hello");
        assert_eq!(PlainOutput.render(&json!(42)).unwrap(), "42");
        assert_eq!(PlainOutput.render(&json!(null)).unwrap(), "null");
        assert_eq!(PlainOutput.render(&json!(true)).unwrap(), "true");
    }

    #[test]
    fn test_collections() {
        assert_eq!(
            PlainOutput.render(&json!(["a", "b", 3])).unwrap(),
            "[a, b, 3]"
        );
        assert_eq!(
            PlainOutput
                .render(&json!({"name": "laret", "tags": ["cli"]}))
                .unwrap(),
            "{name=laret, tags=[cli]}"
        );
        assert_eq!(PlainOutput.render(&json!({})).unwrap(), "{}");
    }
}
