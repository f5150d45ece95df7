//! Operation records
//!
//! An operation is a mapping from directive name to argument, plus the fields the engine
//! computes while processing it. Computed fields are explicit optional members rather
//! than extra keys, so they can never be mistaken for directives.
//!
//! In a resource definition (YAML or JSON) an operation looks like:
//!
//! ```yaml
//! - file: { path: "pages", name: "intro.md" }
//! - md: ~
//!   with:
//!     - file: { path: "pages", name: "body.md" }
//! - out: raw
//! ```

use std::collections::BTreeMap;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::core::{PrimaryDirective, RcError};

/// One step of a resource.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Operation {
    /// Directive name to argument, in key order.
    #[serde(flatten)]
    pub directives: BTreeMap<String, Value>,

    /// Result of the primary directive. May also be given statically in a definition.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,

    /// Output of the nested resource built from the `with` directive.
    #[serde(rename = "_with", default, skip_serializing_if = "Option::is_none")]
    pub with_value: Option<Value>,

    /// Property-selector key captured by the `as` directive.
    #[serde(rename = "_as", default, skip_serializing_if = "Option::is_none")]
    pub as_value: Option<Value>,

    /// Set once the primary directive has started executing.
    #[serde(skip)]
    pub primary_executed: bool,
}

impl Operation {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style helper adding one directive.
    #[must_use]
    pub fn with_directive(mut self, name: impl Into<String>, argument: impl Into<Value>) -> Self {
        self.directives.insert(name.into(), argument.into());
        self
    }

    /// The operation synthesized when a resource declares no input directive.
    #[must_use]
    pub fn default_input() -> Self {
        Self::new().with_directive("in", "raw")
    }

    /// The operation synthesized when a resource declares no output directive.
    #[must_use]
    pub fn default_output() -> Self {
        Self::new().with_directive("out", "raw")
    }

    #[must_use]
    pub fn argument(&self, directive: &str) -> Option<&Value> {
        self.directives.get(directive)
    }

    /// Interpret a `with` argument as an operation list.
    ///
    /// A single mapping is accepted as a one-element list.
    pub fn parse_list(directive: &str, argument: &Value) -> Result<Vec<Operation>, RcError> {
        let operations = match argument {
            Value::Array(_) => serde_json::from_value(argument.clone()),
            Value::Object(_) => serde_json::from_value(argument.clone()).map(|op| vec![op]),
            other => {
                return Err(RcError::InvalidArgument {
                    directive: directive.to_string(),
                    reason: format!("expected an operation list, found {}", value_kind(other)),
                });
            }
        };

        operations.map_err(|e| RcError::InvalidArgument {
            directive: directive.to_string(),
            reason: e.to_string(),
        })
    }
}

/// A `{path, name}` argument, as taken by `file`, `njk` and `custom`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileRef {
    /// Directory relative to the content root
    #[serde(default)]
    pub path: PathBuf,
    /// File (or handler) name inside `path`
    pub name: String,
}

impl FileRef {
    /// Read a `{path, name}` argument of `directive` from an operation.
    pub fn from_operation(
        directive: PrimaryDirective,
        operation: &Operation,
    ) -> Result<Self, RcError> {
        let argument = operation.argument(directive.name()).ok_or_else(|| {
            RcError::InvalidArgument {
                directive: directive.name().to_string(),
                reason: "missing argument".to_string(),
            }
        })?;

        serde_json::from_value(argument.clone()).map_err(|e| RcError::InvalidArgument {
            directive: directive.name().to_string(),
            reason: e.to_string(),
        })
    }

    /// Registry key for custom handlers: `path/name` with forward slashes.
    #[must_use]
    pub fn key(&self) -> String {
        let path = self.path.to_string_lossy().replace('\\', "/");
        let path = path.trim_matches('/');
        if path.is_empty() {
            self.name.clone()
        } else {
            format!("{}/{}", path, self.name)
        }
    }
}

pub(crate) fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "a list",
        Value::Object(_) => "a mapping",
    }
}
