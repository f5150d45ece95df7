//! Resource context: one evaluation of a resource.
//!
//! `process()` runs in four phases:
//!
//! 1. **Classification** - every directive key of every operation is classified and
//!    queued as a deferred action on one of four queues (`in`, secondary, primary,
//!    `out`). Unknown keys and operations with two primary directives fail here,
//!    before anything executes.
//! 2. **Default injection** - a resource without an input directive gets `{in: raw}`
//!    prepended; a resource without an output directive gets `{out: raw}` appended.
//!    The input default is inserted first so the output default's index is final.
//! 3. **Execution** - input, secondary, primary and output actions run phase by phase.
//!    Actions of one phase run concurrently on the current task; the next phase starts
//!    only when all of them have settled. Each action computes an outcome from shared
//!    access to the context, and outcomes are written back once the phase completes.
//! 4. **Return** - the reduced output value.
//!
//! A `with` directive evaluates its operation list in a nested context that shares the
//! application and the [`ContextTree`] of the root.

use std::sync::Arc;

use anyhow::Result;
use futures::FutureExt;
use futures::future::{LocalBoxFuture, try_join_all};
use serde_json::Value;

use super::handlers::{self, Outcome};
use super::lock::PrimaryLock;
use super::operation::Operation;
use super::tree::{ContextId, ContextTree};
use crate::app::App;
use crate::core::{Directive, DirectiveKind, PrimaryDirective, RcError, SecondaryDirective};

/// A deferred action: run `directive` against operation `index`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QueuedDirective {
    pub index: usize,
    pub directive: Directive,
}

/// The four per-class action queues of a context.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DirectiveQueues {
    pub input: Vec<QueuedDirective>,
    pub secondary: Vec<QueuedDirective>,
    pub primary: Vec<QueuedDirective>,
    pub output: Vec<QueuedDirective>,
}

impl DirectiveQueues {
    fn push(&mut self, queued: QueuedDirective) {
        match queued.directive {
            Directive::Input => self.input.push(queued),
            Directive::Secondary(_) => self.secondary.push(queued),
            Directive::Primary(_) => self.primary.push(queued),
            Directive::Output => self.output.push(queued),
        }
    }

    fn iter_mut(&mut self) -> impl Iterator<Item = &mut QueuedDirective> {
        self.input
            .iter_mut()
            .chain(self.secondary.iter_mut())
            .chain(self.primary.iter_mut())
            .chain(self.output.iter_mut())
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.input.len() + self.secondary.len() + self.primary.len() + self.output.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Classify the directives of an operation list into queues.
///
/// Operations are visited in list order and directive keys in key order. Auxiliary keys
/// are skipped.
///
/// # Errors
///
/// - [`RcError::UnknownDirective`] for a key outside the directive table
/// - [`RcError::DuplicatePrimary`] for an operation with two primary directives
pub fn classify_operations(
    resource: &str,
    operations: &[Operation],
) -> Result<DirectiveQueues, RcError> {
    let mut queues = DirectiveQueues::default();

    for (index, operation) in operations.iter().enumerate() {
        let mut primary: Option<PrimaryDirective> = None;

        for key in operation.directives.keys() {
            let kind = DirectiveKind::classify(key);
            let directive = match kind.directive() {
                Some(directive) => directive,
                None if kind == DirectiveKind::Auxiliary => continue,
                None => {
                    return Err(RcError::UnknownDirective {
                        resource: resource.to_string(),
                        operation: index,
                        directive: key.clone(),
                    });
                }
            };

            if let Directive::Primary(current) = directive {
                if primary.is_some() {
                    return Err(RcError::DuplicatePrimary {
                        resource: resource.to_string(),
                        operation: index,
                        directive: current.name().to_string(),
                    });
                }
                primary = Some(current);
            }

            tracing::trace!("Queued '{}' for operation {} of '{}'", directive, index, resource);
            queues.push(QueuedDirective {
                index,
                directive,
            });
        }
    }

    Ok(queues)
}

/// Runtime state of one resource evaluation.
pub struct ResourceContext {
    app: Arc<App>,
    tree: Arc<ContextTree>,
    id: ContextId,
    depth: usize,
    name: String,
    in_data: Value,
    operations: Vec<Operation>,
    queues: DirectiveQueues,
    primary_lock: PrimaryLock,
    input: Option<Value>,
    out: Option<Value>,
}

impl ResourceContext {
    /// Create a root context for the resource `name`.
    ///
    /// The operation list is a private clone of the stored definition.
    ///
    /// # Errors
    ///
    /// Returns [`RcError::ResourceNotFound`] if the store has no such resource.
    pub fn new(app: Arc<App>, name: impl Into<String>, in_data: Value) -> Result<Self> {
        let name = name.into();
        let operations = app.resources().get(&name)?.main.clone();
        let tree = Arc::new(ContextTree::new(name.clone()));

        Ok(Self {
            app,
            tree,
            id: ContextId::ROOT,
            depth: 0,
            name,
            in_data,
            operations,
            queues: DirectiveQueues::default(),
            primary_lock: PrimaryLock::new(),
            input: None,
            out: None,
        })
    }

    /// Create a nested context below `parent`, registered in the parent's tree.
    ///
    /// The operation list starts empty; assign it with [`with_operations`](Self::with_operations).
    #[must_use]
    pub fn nested(parent: &ResourceContext, in_data: Value) -> Self {
        let id = parent.tree.push_child(parent.id, parent.name.clone());

        Self {
            app: Arc::clone(&parent.app),
            tree: Arc::clone(&parent.tree),
            id,
            depth: parent.depth + 1,
            name: parent.name.clone(),
            in_data,
            operations: Vec::new(),
            queues: DirectiveQueues::default(),
            primary_lock: PrimaryLock::new(),
            input: None,
            out: None,
        }
    }

    #[must_use]
    pub fn with_operations(mut self, operations: Vec<Operation>) -> Self {
        self.operations = operations;
        self
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn depth(&self) -> usize {
        self.depth
    }

    #[must_use]
    pub fn id(&self) -> ContextId {
        self.id
    }

    /// The root of this context's tree.
    #[must_use]
    pub fn root(&self) -> ContextId {
        ContextId::ROOT
    }

    #[must_use]
    pub fn tree(&self) -> &Arc<ContextTree> {
        &self.tree
    }

    #[must_use]
    pub fn app(&self) -> &Arc<App> {
        &self.app
    }

    /// Seed data supplied by the caller or the parent context.
    #[must_use]
    pub fn in_data(&self) -> &Value {
        &self.in_data
    }

    /// Effective input, set by the input phase.
    #[must_use]
    pub fn input(&self) -> Option<&Value> {
        self.input.as_ref()
    }

    /// Output value, set by the output phase.
    #[must_use]
    pub fn out(&self) -> Option<&Value> {
        self.out.as_ref()
    }

    #[must_use]
    pub fn operations(&self) -> &[Operation] {
        &self.operations
    }

    #[must_use]
    pub fn queues(&self) -> &DirectiveQueues {
        &self.queues
    }

    /// Run classification and default injection without executing anything.
    pub fn prepare(&mut self) -> Result<&DirectiveQueues, RcError> {
        self.queues = classify_operations(&self.name, &self.operations)?;
        self.inject_defaults();
        Ok(&self.queues)
    }

    /// Evaluate the resource and return its output.
    ///
    /// The context is spent afterwards: a second call fails with
    /// [`RcError::DuplicatePrimary`] on the first operation with a primary directive.
    pub async fn process(&mut self) -> Result<Value> {
        self.prepare()?;
        let queues = self.queues.clone();

        tracing::debug!(
            "Processing '{}' at depth {}: {} input, {} secondary, {} primary, {} output",
            self.name,
            self.depth,
            queues.input.len(),
            queues.secondary.len(),
            queues.primary.len(),
            queues.output.len()
        );

        for (phase, queue) in [
            ("input", &queues.input),
            ("secondary", &queues.secondary),
            ("primary", &queues.primary),
            ("output", &queues.output),
        ] {
            tracing::trace!("'{}' depth {}: {} phase", self.name, self.depth, phase);
            let outcomes = self.run_phase(queue).await?;
            self.apply(outcomes);
        }

        let out = self.out.clone().unwrap_or(Value::Null);
        self.tree.record_out(self.id, &out);
        Ok(out)
    }

    fn inject_defaults(&mut self) {
        if self.queues.input.is_empty() {
            self.operations.insert(0, Operation::default_input());
            for queued in self.queues.iter_mut() {
                queued.index += 1;
            }
            self.queues.input.push(QueuedDirective {
                index: 0,
                directive: Directive::Input,
            });
        }

        if self.queues.output.is_empty() {
            self.operations.push(Operation::default_output());
            self.queues.output.push(QueuedDirective {
                index: self.operations.len() - 1,
                directive: Directive::Output,
            });
        }
    }

    async fn run_phase(&self, queue: &[QueuedDirective]) -> Result<Vec<Outcome>> {
        try_join_all(queue.iter().map(|queued| self.dispatch(*queued))).await
    }

    async fn dispatch(&self, queued: QueuedDirective) -> Result<Outcome> {
        let index = queued.index;
        let operation = &self.operations[index];

        match queued.directive {
            Directive::Input => Ok(Outcome::Input(handlers::input(self))),
            Directive::Secondary(SecondaryDirective::With) => Ok(Outcome::With {
                index,
                value: handlers::with(self, operation).await?,
            }),
            Directive::Secondary(SecondaryDirective::As) => Ok(Outcome::As {
                index,
                value: handlers::as_key(self),
            }),
            Directive::Primary(primary) => {
                self.mark_primary(index, primary)?;
                Ok(Outcome::Data {
                    index,
                    value: handlers::primary(self, primary, operation).await?,
                })
            }
            Directive::Output => Ok(Outcome::Output(handlers::output(self, operation)?)),
        }
    }

    /// Check-and-set of the primary marker. The lock is released before the handler
    /// starts.
    fn mark_primary(&self, index: usize, directive: PrimaryDirective) -> Result<(), RcError> {
        if self.operations[index].primary_executed || !self.primary_lock.try_mark(index) {
            return Err(RcError::DuplicatePrimary {
                resource: self.name.clone(),
                operation: index,
                directive: directive.name().to_string(),
            });
        }
        Ok(())
    }

    fn apply(&mut self, outcomes: Vec<Outcome>) {
        for outcome in outcomes {
            match outcome {
                Outcome::Input(value) => self.input = Some(value),
                Outcome::With {
                    index,
                    value,
                } => self.operations[index].with_value = Some(value),
                Outcome::As {
                    index,
                    value,
                } => self.operations[index].as_value = Some(value),
                Outcome::Data {
                    index,
                    value,
                } => {
                    let operation = &mut self.operations[index];
                    operation.primary_executed = true;
                    operation.data = Some(value);
                }
                Outcome::Output(value) => self.out = Some(value),
            }
        }
    }
}

/// Process a nested context behind a boxed future, which breaks the recursion
/// `process -> with -> process`.
pub(super) fn process_nested(context: &mut ResourceContext) -> LocalBoxFuture<'_, Result<Value>> {
    context.process().boxed_local()
}

impl std::fmt::Debug for ResourceContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ResourceContext")
            .field("id", &self.id)
            .field("depth", &self.depth)
            .field("name", &self.name)
            .field("in_data", &self.in_data)
            .field("operations", &self.operations)
            .field("queues", &self.queues)
            .field("input", &self.input)
            .field("out", &self.out)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
#[path = "context_tests.rs"]
mod tests;
