//! Structured-data parsing for the `yml` directive.

use anyhow::Result;
use serde_json::Value;

/// Parse YAML text into a JSON value.
///
/// JSON is a subset of YAML, so JSON text parses too.
pub fn parse_yaml(text: &str) -> Result<Value> {
    Ok(serde_yaml::from_str(text)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_mapping() {
        let value = parse_yaml("title: Hello\ntags: [a, b]\n").unwrap();
        assert_eq!(value, json!({"title": "Hello", "tags": ["a", "b"]}));
    }

    #[test]
    fn test_parse_json_text() {
        assert_eq!(parse_yaml("{\"x\": 1}").unwrap(), json!({"x": 1}));
    }

    #[test]
    fn test_parse_error_is_yaml_error() {
        let err = parse_yaml("a: [1, 2").unwrap_err();
        assert!(err.downcast_ref::<serde_yaml::Error>().is_some());
    }
}
