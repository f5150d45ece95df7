//! Arena of resource contexts for one top-level evaluation.
//!
//! The root context creates the tree and occupies index 0. Every nested context spawned
//! by a `with` directive registers a node and keeps only its index, so children can look
//! up the root and their parent without owning either.

use std::sync::{Mutex, PoisonError};

use serde_json::Value;

/// Index of a context in its [`ContextTree`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ContextId(usize);

impl ContextId {
    /// The root context of every tree.
    pub const ROOT: ContextId = ContextId(0);

    #[must_use]
    pub const fn index(self) -> usize {
        self.0
    }
}

/// What the tree records about one context.
#[derive(Debug, Clone, PartialEq)]
pub struct ContextNode {
    pub depth: usize,
    /// Parent index; `None` for the root
    pub parent: Option<ContextId>,
    pub name: String,
    /// Output value, filled once the context finished processing
    pub out: Option<Value>,
}

/// Append-only arena of [`ContextNode`]s.
#[derive(Debug, Default)]
pub struct ContextTree {
    nodes: Mutex<Vec<ContextNode>>,
}

impl ContextTree {
    /// Create a tree holding only the root node.
    #[must_use]
    pub fn new(root_name: impl Into<String>) -> Self {
        Self {
            nodes: Mutex::new(vec![ContextNode {
                depth: 0,
                parent: None,
                name: root_name.into(),
                out: None,
            }]),
        }
    }

    /// Register a child of `parent` and return its id.
    pub fn push_child(&self, parent: ContextId, name: impl Into<String>) -> ContextId {
        let mut nodes = self.nodes.lock().unwrap_or_else(PoisonError::into_inner);
        let depth = nodes.get(parent.0).map_or(0, |node| node.depth) + 1;
        nodes.push(ContextNode {
            depth,
            parent: Some(parent),
            name: name.into(),
            out: None,
        });
        ContextId(nodes.len() - 1)
    }

    pub(crate) fn record_out(&self, id: ContextId, out: &Value) {
        let mut nodes = self.nodes.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(node) = nodes.get_mut(id.0) {
            node.out = Some(out.clone());
        }
    }

    #[must_use]
    pub fn node(&self, id: ContextId) -> Option<ContextNode> {
        self.nodes.lock().unwrap_or_else(PoisonError::into_inner).get(id.0).cloned()
    }

    /// Snapshot of every node, in registration order.
    #[must_use]
    pub fn nodes(&self) -> Vec<ContextNode> {
        self.nodes.lock().unwrap_or_else(PoisonError::into_inner).clone()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.lock().unwrap_or_else(PoisonError::into_inner).len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
