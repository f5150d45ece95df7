//! Host-registered handlers for the `custom` directive.
//!
//! A `custom` directive names a handler by `{path, name}`; the registry key is
//! `path/name`. The host registers a typed callback under that key instead of the engine
//! loading code at runtime.
//!
//! ```rust,no_run
//! use rcengine::app::CustomRegistry;
//! use serde_json::json;
//!
//! let mut registry = CustomRegistry::new();
//! registry.register("scripts/greeting", |call| async move {
//!     Ok(json!(format!("hello from {}", call.resource)))
//! });
//! ```

use std::collections::HashMap;
use std::fmt;
use std::future::Future;
use std::sync::Arc;

use anyhow::Result;
use futures::FutureExt;
use futures::future::BoxFuture;
use serde_json::Value;

use crate::app::App;
use crate::resource::{FileRef, Operation};

/// Everything a custom handler gets to see about its invocation.
#[derive(Clone)]
pub struct CustomCall {
    /// Host application, for file and template services
    pub app: Arc<App>,
    /// Name of the resource being processed
    pub resource: String,
    /// Nesting depth of the calling context
    pub depth: usize,
    /// The resource's effective input (null if none)
    pub input: Value,
    /// Snapshot of the operation carrying the directive
    pub operation: Operation,
    /// The directive's `{path, name}` argument
    pub target: FileRef,
}

impl fmt::Debug for CustomCall {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CustomCall")
            .field("resource", &self.resource)
            .field("depth", &self.depth)
            .field("input", &self.input)
            .field("target", &self.target)
            .finish_non_exhaustive()
    }
}

/// A registered handler; its return value becomes the operation's `data`.
pub type CustomHandler = Arc<dyn Fn(CustomCall) -> BoxFuture<'static, Result<Value>> + Send + Sync>;

/// Custom handlers by `path/name` key.
#[derive(Clone, Default)]
pub struct CustomRegistry {
    handlers: HashMap<String, CustomHandler>,
}

impl CustomRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `handler` under `key`, replacing any previous one.
    pub fn register<F, Fut>(&mut self, key: impl Into<String>, handler: F)
    where
        F: Fn(CustomCall) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<Value>> + Send + 'static,
    {
        let key = key.into();
        tracing::debug!("Registering custom handler '{}'", key);
        self.handlers.insert(key, Arc::new(move |call| handler(call).boxed()));
    }

    #[must_use]
    pub fn get(&self, key: &str) -> Option<&CustomHandler> {
        self.handlers.get(key)
    }

    #[must_use]
    pub fn contains(&self, key: &str) -> bool {
        self.handlers.contains_key(key)
    }

    /// Registered keys, sorted.
    #[must_use]
    pub fn keys(&self) -> Vec<&str> {
        let mut keys: Vec<&str> = self.handlers.keys().map(String::as_str).collect();
        keys.sort_unstable();
        keys
    }
}

impl fmt::Debug for CustomRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CustomRegistry").field("handlers", &self.keys()).finish()
    }
}
