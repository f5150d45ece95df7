//! Directive handlers.
//!
//! Each handler reads the context and its operation through shared references and
//! returns the value it computed. [`ResourceContext`] wraps the value in an
//! [`Outcome`] and writes it back after the phase has settled.

use std::sync::Arc;

use anyhow::Result;
use serde_json::Value;

use super::context::{ResourceContext, process_nested};
use super::operation::{FileRef, Operation, value_kind};
use super::output::{OutputMode, reduce};
use crate::app::CustomCall;
use crate::core::{PrimaryDirective, RcError, SecondaryDirective};

/// A handler result, addressed to the field it will be written to.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Outcome {
    Input(Value),
    With { index: usize, value: Value },
    As { index: usize, value: Value },
    Data { index: usize, value: Value },
    Output(Value),
}

/// `in`: the effective input is the seed data, whatever the argument says.
pub(crate) fn input(context: &ResourceContext) -> Value {
    context.in_data().clone()
}

/// `with`: evaluate the argument as a nested resource seeded with this resource's input.
pub(crate) async fn with(context: &ResourceContext, operation: &Operation) -> Result<Value> {
    let directive = SecondaryDirective::With.name();
    let argument = operation.argument(directive).unwrap_or(&Value::Null);
    let operations = Operation::parse_list(directive, argument)?;

    let seed = context.input().cloned().unwrap_or(Value::Null);
    let mut nested = ResourceContext::nested(context, seed).with_operations(operations);
    tracing::trace!(
        "'{}' depth {}: evaluating nested resource {}",
        context.name(),
        context.depth(),
        nested.id().index()
    );
    process_nested(&mut nested).await
}

/// `as`: capture this resource's input as the property-selector key.
pub(crate) fn as_key(context: &ResourceContext) -> Value {
    context.input().cloned().unwrap_or(Value::Null)
}

/// Run the primary directive of an operation.
pub(crate) async fn primary(
    context: &ResourceContext,
    directive: PrimaryDirective,
    operation: &Operation,
) -> Result<Value> {
    let app = context.app();

    let data = match directive {
        PrimaryDirective::File => {
            let target = FileRef::from_operation(directive, operation)?;
            let dir = app.content_path(&target.path);
            Value::String(app.files().get_file(&dir, &target.name).await?)
        }
        PrimaryDirective::Scss => {
            let source = with_text(directive, operation)?;
            Value::String(app.compile_scss(source)?)
        }
        PrimaryDirective::Md => {
            let source = with_text(directive, operation)?;
            Value::String(app.render_markdown(source))
        }
        PrimaryDirective::Njk => {
            let target = FileRef::from_operation(directive, operation)?;
            let dir = app.content_path(&target.path);
            let html = app
                .render_template(&dir, &target.name, operation.with_value.as_ref())
                .await?;
            Value::String(html)
        }
        PrimaryDirective::Raw => operation.argument(directive.name()).cloned().unwrap_or(Value::Null),
        PrimaryDirective::Yml => {
            let source = with_text(directive, operation)?;
            app.parse_yaml(source)?
        }
        PrimaryDirective::Custom => custom(context, operation).await?,
    };

    tracing::trace!(
        "'{}' depth {}: {} produced {}",
        context.name(),
        context.depth(),
        directive,
        value_kind(&data)
    );
    Ok(data)
}

async fn custom(context: &ResourceContext, operation: &Operation) -> Result<Value> {
    let target = FileRef::from_operation(PrimaryDirective::Custom, operation)?;
    let key = target.key();
    let handler = context
        .app()
        .custom()
        .get(&key)
        .cloned()
        .ok_or_else(|| RcError::CustomHandlerNotFound {
            key: key.clone(),
        })?;

    tracing::debug!("Invoking custom handler '{}' from '{}'", key, context.name());
    let call = CustomCall {
        app: Arc::clone(context.app()),
        resource: context.name().to_string(),
        depth: context.depth(),
        input: context.input().cloned().unwrap_or(Value::Null),
        operation: operation.clone(),
        target,
    };
    (handler.as_ref())(call).await
}

/// `out`: reduce the `data` of every operation that has one.
pub(crate) fn output(context: &ResourceContext, operation: &Operation) -> Result<Value, RcError> {
    let mode = OutputMode::from_argument(operation.argument("out"))?;
    let values: Vec<Value> =
        context.operations().iter().filter_map(|op| op.data.clone()).collect();

    let key = match mode {
        OutputMode::Property => property_key(context, operation),
        _ => None,
    };
    reduce(mode, &values, key)
}

/// The `_as` of the output operation, else of the first operation that has one.
fn property_key<'a>(context: &'a ResourceContext, operation: &'a Operation) -> Option<&'a Value> {
    operation
        .as_value
        .as_ref()
        .or_else(|| context.operations().iter().find_map(|op| op.as_value.as_ref()))
}

fn with_text(directive: PrimaryDirective, operation: &Operation) -> Result<&str, RcError> {
    match &operation.with_value {
        Some(Value::String(text)) => Ok(text),
        Some(other) => Err(RcError::InvalidArgument {
            directive: directive.name().to_string(),
            reason: format!("expected text from 'with', found {}", value_kind(other)),
        }),
        None => Err(RcError::MissingInput {
            directive: directive.name().to_string(),
        }),
    }
}
