//! Lenient accessors for provider JSON.

use serde_json::Value;

/// Render a scalar as a string. Objects, arrays and null yield `None`.
pub(crate) fn scalar_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Null | Value::Array(_) | Value::Object(_) => None,
    }
}

/// Read a number, accepting numeric strings.
pub(crate) fn number(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

/// Look up `key` in an object and render it as a string.
pub(crate) fn string_field(value: &Value, key: &str) -> Option<String> {
    value.get(key).and_then(scalar_string)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_scalar_string() {
        assert_eq!(scalar_string(&json!("a")), Some("a".to_string()));
        assert_eq!(scalar_string(&json!(2023)), Some("2023".to_string()));
        assert_eq!(scalar_string(&json!(null)), None);
        assert_eq!(scalar_string(&json!({"a": 1})), None);
    }

    #[test]
    fn test_number() {
        assert_eq!(number(&json!(21.4)), Some(21.4));
        assert_eq!(number(&json!(" 3.5 ")), Some(3.5));
        assert_eq!(number(&json!("n/a")), None);
        assert_eq!(number(&json!(null)), None);
    }
}
