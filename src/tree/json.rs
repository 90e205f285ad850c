// JSON adapter - `serde_json::Value` as an OFX tree
//
// Convention:
// - aggregate tag → object
// - leaf tag → string (numbers and booleans are rendered as text)
// - repeated tag → array of objects
// - null → absent

use super::OfxNode;
use serde_json::Value;

impl OfxNode for Value {
    fn child_text(&self, name: &str) -> String {
        match self.get(name) {
            Some(Value::Array(items)) => items.first().map(scalar_text).unwrap_or_default(),
            Some(value) => scalar_text(value),
            None => String::new(),
        }
    }

    fn has_child(&self, name: &str) -> bool {
        self.get(name).is_some_and(|v| !v.is_null())
    }

    fn children(&self, name: &str) -> Vec<&Self> {
        match self.get(name) {
            Some(Value::Array(items)) => items.iter().filter(|v| !v.is_null()).collect(),
            Some(Value::Null) | None => Vec::new(),
            Some(value) => vec![value],
        }
    }
}

fn scalar_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        _ => String::new(),
    }
}
