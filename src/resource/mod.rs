//! The resource engine.
//!
//! A resource is a named list of [`Operation`]s. [`ResourceContext`] evaluates one
//! resource: it classifies each operation's directives, injects the default `in` and
//! `out` directives, runs the directive handlers phase by phase and reduces the
//! collected `data` into a single output value.
//!
//! ```rust,no_run
//! use rcengine::app::{App, ResourceDefinition};
//! use rcengine::resource::{Operation, ResourceContext};
//! use serde_json::Value;
//! use std::sync::Arc;
//!
//! # async fn example() -> anyhow::Result<()> {
//! let app = App::builder(".")
//!     .resource(
//!         "greeting",
//!         ResourceDefinition::new(vec![
//!             Operation::new().with_directive("raw", "hello, "),
//!             Operation::new().with_directive("raw", "world"),
//!         ]),
//!     )
//!     .build();
//!
//! let mut context = ResourceContext::new(Arc::new(app), "greeting", Value::Null)?;
//! assert_eq!(context.process().await?, Value::from("hello, world"));
//! # Ok(())
//! # }
//! ```

mod context;
mod handlers;
mod lock;
mod operation;
mod output;
mod tree;
mod validate;

pub use context::{DirectiveQueues, QueuedDirective, ResourceContext, classify_operations};
pub use lock::PrimaryLock;
pub use operation::{FileRef, Operation};
pub use output::{OutputMode, reduce, value_to_text};
pub use tree::{ContextId, ContextNode, ContextTree};
pub use validate::validate_operations;
