//! Output modes, and the reduction of operation results.
//!
//! The `out` directive picks how the `data` values of a resource's operations are
//! merged into the resource output:
//!
//! | argument | reduction |
//! |---|---|
//! | `raw`, `string`, `""`, null | concatenate as text |
//! | `first_serve` | first value |
//! | `object` | concatenate, then parse as JSON |
//! | `property` | concatenate the text of property `_as` of every value |

use serde_json::Value;

use crate::core::RcError;

/// How a resource's results are reduced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    Raw,
    FirstServe,
    Object,
    Property,
}

impl OutputMode {
    /// Parse the argument of an `out` directive.
    pub fn from_argument(argument: Option<&Value>) -> Result<Self, RcError> {
        match argument {
            None | Some(Value::Null) => Ok(OutputMode::Raw),
            Some(Value::String(mode)) => match mode.as_str() {
                "raw" | "string" | "" => Ok(OutputMode::Raw),
                "first_serve" => Ok(OutputMode::FirstServe),
                "object" => Ok(OutputMode::Object),
                "property" => Ok(OutputMode::Property),
                other => Err(RcError::UnsupportedOutputMode {
                    mode: other.to_string(),
                }),
            },
            Some(other) => Err(RcError::UnsupportedOutputMode {
                mode: other.to_string(),
            }),
        }
    }
}

/// Text representation used by every concatenating reduction.
///
/// Strings are taken verbatim, null is empty, everything else is its JSON text.
#[must_use]
pub fn value_to_text(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

fn concat(values: &[Value]) -> String {
    values.iter().map(value_to_text).collect()
}

/// Reduce collected `data` values according to `mode`.
///
/// `property_key` is only consulted for [`OutputMode::Property`]. Without a key every
/// value contributes empty text.
pub fn reduce(
    mode: OutputMode,
    values: &[Value],
    property_key: Option<&Value>,
) -> Result<Value, RcError> {
    match mode {
        OutputMode::Raw => Ok(Value::String(concat(values))),
        OutputMode::FirstServe => Ok(values.first().cloned().unwrap_or(Value::Null)),
        OutputMode::Object => {
            let text = concat(values);
            serde_json::from_str(&text).map_err(|e| RcError::MalformedObjectOutput {
                reason: e.to_string(),
            })
        }
        OutputMode::Property => {
            let Some(key) = property_key.map(value_to_text) else {
                return Ok(Value::String(String::new()));
            };
            let text = values
                .iter()
                .map(|value| value.get(key.as_str()).map(value_to_text).unwrap_or_default())
                .collect();
            Ok(Value::String(text))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn abc() -> Vec<Value> {
        vec![json!("a"), json!("b"), json!("c")]
    }

    #[test]
    fn test_output_mode_from_argument() {
        assert_eq!(OutputMode::from_argument(None).unwrap(), OutputMode::Raw);
        assert_eq!(OutputMode::from_argument(Some(&Value::Null)).unwrap(), OutputMode::Raw);
        for raw in ["raw", "string", ""] {
            assert_eq!(OutputMode::from_argument(Some(&json!(raw))).unwrap(), OutputMode::Raw);
        }
        assert_eq!(
            OutputMode::from_argument(Some(&json!("first_serve"))).unwrap(),
            OutputMode::FirstServe
        );
        assert_eq!(OutputMode::from_argument(Some(&json!("object"))).unwrap(), OutputMode::Object);
        assert_eq!(
            OutputMode::from_argument(Some(&json!("property"))).unwrap(),
            OutputMode::Property
        );
    }

    #[test]
    fn test_output_mode_unsupported() {
        let err = OutputMode::from_argument(Some(&json!("xml"))).unwrap_err();
        assert_eq!(
            err,
            RcError::UnsupportedOutputMode {
                mode: "xml".to_string()
            }
        );

        let err = OutputMode::from_argument(Some(&json!(3))).unwrap_err();
        assert!(matches!(err, RcError::UnsupportedOutputMode { .. }));
    }

    #[test]
    fn test_reduce_raw_and_first_serve() {
        assert_eq!(reduce(OutputMode::Raw, &abc(), None).unwrap(), json!("abc"));
        assert_eq!(reduce(OutputMode::FirstServe, &abc(), None).unwrap(), json!("a"));
        assert_eq!(reduce(OutputMode::FirstServe, &[], None).unwrap(), Value::Null);
        assert_eq!(reduce(OutputMode::Raw, &[], None).unwrap(), json!(""));
    }

    #[test]
    fn test_reduce_raw_mixed_values() {
        let values = vec![json!("n="), json!(1), Value::Null, json!({"k": true})];
        assert_eq!(reduce(OutputMode::Raw, &values, None).unwrap(), json!("n=1{\"k\":true}"));
    }

    #[test]
    fn test_reduce_object() {
        let values = vec![json!("{\"x\":1"), json!("}")];
        assert_eq!(reduce(OutputMode::Object, &values, None).unwrap(), json!({"x": 1}));

        let err = reduce(OutputMode::Object, &[json!("{\"x\":")], None).unwrap_err();
        assert!(matches!(err, RcError::MalformedObjectOutput { .. }));
    }

    #[test]
    fn test_reduce_property() {
        let values = vec![json!({"x": "foo"}), json!({"y": "bar"})];
        let key = json!("x");
        assert_eq!(reduce(OutputMode::Property, &values, Some(&key)).unwrap(), json!("foo"));
    }

    #[test]
    fn test_reduce_property_without_key() {
        let values = vec![json!({"": "empty-name"}), json!({"x": "foo"})];
        assert_eq!(reduce(OutputMode::Property, &values, None).unwrap(), json!(""));
    }

    #[test]
    fn test_reduce_property_non_string_values() {
        let values = vec![json!({"x": 1}), json!("plain"), json!({"x": [1, 2]})];
        let key = json!("x");
        assert_eq!(reduce(OutputMode::Property, &values, Some(&key)).unwrap(), json!("1[1,2]"));
    }
}
