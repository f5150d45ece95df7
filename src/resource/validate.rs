//! Static checks over a resource definition, without executing anything.

use super::context::classify_operations;
use super::operation::{FileRef, Operation};
use super::output::OutputMode;
use crate::core::{Directive, RcError, SecondaryDirective};

/// Check an operation list and every nested `with` list below it.
///
/// Reports the first problem found: unknown directives, operations with two primary
/// directives, unsupported `out` modes, malformed `with` lists and malformed
/// `{path, name}` arguments.
pub fn validate_operations(resource: &str, operations: &[Operation]) -> Result<(), RcError> {
    let queues = classify_operations(resource, operations)?;

    for queued in &queues.output {
        OutputMode::from_argument(operations[queued.index].argument("out"))?;
    }
    for queued in &queues.primary {
        let Directive::Primary(primary) = queued.directive else {
            continue;
        };
        let operation = &operations[queued.index];
        if primary.takes_file_ref() {
            FileRef::from_operation(primary, operation)?;
        }
        if primary.reads_with()
            && operation.argument(SecondaryDirective::With.name()).is_none()
            && operation.with_value.is_none()
        {
            return Err(RcError::MissingInput {
                directive: primary.name().to_string(),
            });
        }
    }
    for queued in &queues.secondary {
        if queued.directive == Directive::Secondary(SecondaryDirective::With) {
            let name = SecondaryDirective::With.name();
            let argument = operations[queued.index].argument(name).cloned().unwrap_or_default();
            let nested = Operation::parse_list(name, &argument)?;
            validate_operations(resource, &nested)?;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn ops(value: serde_json::Value) -> Vec<Operation> {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_valid_definition() {
        let definition = ops(json!([
            {"in": "raw"},
            {"md": null, "with": [{"file": {"path": "p", "name": "a.md"}}]},
            {"out": "raw"}
        ]));
        assert!(validate_operations("page", &definition).is_ok());
    }

    #[test]
    fn test_nested_unknown_directive() {
        let definition = ops(json!([{"md": null, "with": [{"bogus": 1}]}]));
        let err = validate_operations("page", &definition).unwrap_err();
        assert!(matches!(err, RcError::UnknownDirective { directive, .. } if directive == "bogus"));
    }

    #[test]
    fn test_bad_modes() {
        let err = validate_operations("page", &ops(json!([{"out": "xml"}]))).unwrap_err();
        assert!(matches!(err, RcError::UnsupportedOutputMode { .. }));

        // `in` takes any argument
        validate_operations("page", &ops(json!([{"in": "cooked"}, {"raw": "a"}]))).unwrap();
    }

    #[test]
    fn test_file_ref_shape() {
        let err = validate_operations("page", &ops(json!([{"njk": "page.njk"}]))).unwrap_err();
        assert!(matches!(err, RcError::InvalidArgument { directive, .. } if directive == "njk"));
    }

    #[test]
    fn test_markup_without_with() {
        let err = validate_operations("page", &ops(json!([{"md": null}]))).unwrap_err();
        assert_eq!(
            err,
            RcError::MissingInput {
                directive: "md".to_string()
            }
        );

        assert!(validate_operations("page", &ops(json!([{"md": null, "_with": "# hi"}]))).is_ok());
    }
}
